// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{Host, Invocation};
use async_trait::async_trait;

/// Trait for executing invocations on behalf of one host
/// Different implementations for logging, recording, real transports
#[async_trait]
pub trait Executor: Send + Sync + 'static {
    /// Execute one invocation destined for `host`
    async fn execute(&self, invocation: &Invocation, host: &Host) -> Result<(), ExecutionError>;

    /// Called exactly once when `host` observes the termination command,
    /// before the worker acknowledges
    async fn finish(&self, host: &Host);
}

/// Failure reported by an executor for a single invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionError {
    message: String,
}

impl ExecutionError {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

impl std::fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExecutionError {}
