// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{ExecutionError, Executor, Host, Invocation};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// One observed executor call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutorEvent {
    Executed { host: String, invocation: String },
    Finished { host: String },
}

/// Executor that records every call in memory, for tests and dry runs
#[derive(Clone, Default)]
pub struct RecordingExecutor {
    events: Arc<Mutex<Vec<ExecutorEvent>>>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded events in arrival order
    pub fn events(&self) -> Vec<ExecutorEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Events observed at a single host, in arrival order
    pub fn events_for(&self, host_name: &str) -> Vec<ExecutorEvent> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|event| match event {
                ExecutorEvent::Executed { host, .. } => host == host_name,
                ExecutorEvent::Finished { host } => host == host_name,
            })
            .cloned()
            .collect()
    }
}

#[async_trait]
impl Executor for RecordingExecutor {
    async fn execute(&self, invocation: &Invocation, host: &Host) -> Result<(), ExecutionError> {
        self.events.lock().unwrap().push(ExecutorEvent::Executed {
            host: host.name.clone(),
            invocation: invocation.to_string(),
        });
        Ok(())
    }

    async fn finish(&self, host: &Host) {
        self.events.lock().unwrap().push(ExecutorEvent::Finished {
            host: host.name.clone(),
        });
    }
}
