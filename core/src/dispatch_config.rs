// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use serde::Deserialize;
use std::fs;
use std::time::Duration;

/// Bounded-wait settings for one dispatcher
///
/// Every dispatcher-side send and receive runs under one of these waits,
/// so a stalled worker turns into a reported per-host failure instead of
/// an indefinite hang.
#[derive(Debug, Clone, Deserialize)]
pub struct DispatchConfig {
    /// Wait for a worker to accept an invocation or the termination command
    pub send_wait_ms: u64,
    /// Wait for a worker's acknowledgment and task exit
    pub ack_wait_ms: u64,
}

impl DispatchConfig {
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)?;
        let config: DispatchConfig = serde_json::from_str(&contents)?;
        Ok(config)
    }

    pub fn send_wait(&self) -> Duration {
        Duration::from_millis(self.send_wait_ms)
    }

    pub fn ack_wait(&self) -> Duration {
        Duration::from_millis(self.ack_wait_ms)
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            send_wait_ms: 5_000,
            ack_wait_ms: 5_000,
        }
    }
}
