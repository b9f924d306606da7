// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::Host;

/// Phase of the broadcast in which a worker stopped responding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BroadcastPhase {
    /// Sending an invocation on the work channel
    Invocation,
    /// Sending the termination command
    Termination,
    /// Waiting for the acknowledgment
    Acknowledgment,
    /// Waiting for the worker task to exit
    Shutdown,
}

impl std::fmt::Display for BroadcastPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let phase = match self {
            BroadcastPhase::Invocation => "invocation send",
            BroadcastPhase::Termination => "termination send",
            BroadcastPhase::Acknowledgment => "acknowledgment wait",
            BroadcastPhase::Shutdown => "worker shutdown",
        };
        write!(f, "{}", phase)
    }
}

/// One failed invocation execution, as reported back by a worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionFailure {
    pub invocation: String,
    pub detail: String,
}

impl ExecutionFailure {
    pub fn new(invocation: String, detail: String) -> Self {
        Self { invocation, detail }
    }
}

/// What went wrong with a single host during one broadcast
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// Worker did not respond within the bounded wait (crashed, deadlocked
    /// or never scheduled)
    StalledWorker { phase: BroadcastPhase },

    /// Worker broke the handshake contract: an extra acknowledgment, an
    /// exit without acknowledging, or a stop before the termination command
    ProtocolViolation { detail: String },

    /// Worker executed an invocation and the executor reported a failure
    ExecutionFailed(ExecutionFailure),
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureKind::StalledWorker { phase } => {
                write!(f, "worker stalled during {}", phase)
            }
            FailureKind::ProtocolViolation { detail } => {
                write!(f, "protocol violation: {}", detail)
            }
            FailureKind::ExecutionFailed(failure) => {
                write!(
                    f,
                    "execution of '{}' failed: {}",
                    failure.invocation, failure.detail
                )
            }
        }
    }
}

/// Failure of one host within one broadcast
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostFailure {
    pub host: Host,
    pub kind: FailureKind,
}

impl HostFailure {
    pub fn new(host: Host, kind: FailureKind) -> Self {
        Self { host, kind }
    }
}

impl std::fmt::Display for HostFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.host, self.kind)
    }
}

/// Aggregated per-host failure report for one broadcast
///
/// Collected only after the dispatcher has finished waiting on, or timing
/// out on, every host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastError {
    pub failures: Vec<HostFailure>,
}

impl BroadcastError {
    pub fn new(failures: Vec<HostFailure>) -> Self {
        Self { failures }
    }
}

impl std::fmt::Display for BroadcastError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "broadcast reported {} host failure(s):", self.failures.len())?;
        for failure in &self.failures {
            write!(f, " [{}]", failure)?;
        }
        Ok(())
    }
}

impl std::error::Error for BroadcastError {}
