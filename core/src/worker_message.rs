// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::dispatch_error::ExecutionFailure;
use crate::Invocation;
use serde::{Deserialize, Serialize};

/// Message types received by workers
///
/// One work channel per host carries both variants; the worker services
/// them in arrival order.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub enum WorkerMessage {
    /// One invocation to execute
    Invoke(Invocation),
    /// Termination command; the worker acknowledges once and exits
    Terminate,
}

/// The single acknowledgment a worker sends back after observing the
/// termination command
///
/// Carries the execution failures the worker collected; empty on the
/// happy path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerAck {
    pub worker_id: usize,
    pub failures: Vec<ExecutionFailure>,
}

impl WorkerAck {
    pub fn new(worker_id: usize, failures: Vec<ExecutionFailure>) -> Self {
        Self {
            worker_id,
            failures,
        }
    }
}
