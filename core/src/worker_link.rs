// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::dispatch_error::{BroadcastPhase, FailureKind};
use crate::{Host, Invocation, WorkerAck, WorkerMessage};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::timeout;

/// Dispatcher-side handle for one worker: the work-channel sender, the
/// acknowledgment receiver and the task handle, kept together in the
/// per-host arena
///
/// The work channel has depth 1, so at most one unconsumed invocation is
/// ever in flight per host. Every operation carries a bounded wait; a
/// worker that stops responding becomes a reported failure, never an
/// indefinite hang.
pub struct WorkerLink {
    host: Host,
    work_tx: mpsc::Sender<WorkerMessage>,
    ack_rx: mpsc::Receiver<WorkerAck>,
    handle: JoinHandle<()>,
}

impl WorkerLink {
    pub fn new(
        host: Host,
        work_tx: mpsc::Sender<WorkerMessage>,
        ack_rx: mpsc::Receiver<WorkerAck>,
        handle: JoinHandle<()>,
    ) -> Self {
        Self {
            host,
            work_tx,
            ack_rx,
            handle,
        }
    }

    pub fn host(&self) -> &Host {
        &self.host
    }

    /// Sends one invocation on the work channel
    pub async fn send_invocation(
        &self,
        invocation: Invocation,
        wait: Duration,
    ) -> Result<(), FailureKind> {
        self.send(
            WorkerMessage::Invoke(invocation),
            BroadcastPhase::Invocation,
            wait,
        )
        .await
    }

    /// Sends the termination command on the work channel
    pub async fn send_termination(&self, wait: Duration) -> Result<(), FailureKind> {
        self.send(WorkerMessage::Terminate, BroadcastPhase::Termination, wait)
            .await
    }

    async fn send(
        &self,
        message: WorkerMessage,
        phase: BroadcastPhase,
        wait: Duration,
    ) -> Result<(), FailureKind> {
        match timeout(wait, self.work_tx.send(message)).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(_)) => Err(FailureKind::ProtocolViolation {
                detail: "worker stopped receiving before the termination command".to_string(),
            }),
            Err(_) => Err(FailureKind::StalledWorker { phase }),
        }
    }

    /// Receives the single acknowledgment, joins the worker task and checks
    /// that no extra signal was left behind
    pub async fn collect(mut self, wait: Duration) -> Result<WorkerAck, FailureKind> {
        let ack = match timeout(wait, self.ack_rx.recv()).await {
            Ok(Some(ack)) => ack,
            Ok(None) => {
                return Err(FailureKind::ProtocolViolation {
                    detail: "worker exited without acknowledging".to_string(),
                });
            }
            Err(_) => {
                self.handle.abort();
                let _ = self.handle.await;
                return Err(FailureKind::StalledWorker {
                    phase: BroadcastPhase::Acknowledgment,
                });
            }
        };

        match timeout(wait, &mut self.handle).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                return Err(FailureKind::ProtocolViolation {
                    detail: format!("worker task failed after acknowledging: {}", e),
                });
            }
            Err(_) => {
                self.handle.abort();
                let _ = self.handle.await;
                return Err(FailureKind::StalledWorker {
                    phase: BroadcastPhase::Shutdown,
                });
            }
        }

        // The worker has exited; anything still in the acknowledgment
        // channel is a second acknowledgment.
        match self.ack_rx.try_recv() {
            Ok(_) => Err(FailureKind::ProtocolViolation {
                detail: "worker acknowledged more than once".to_string(),
            }),
            Err(_) => Ok(ack),
        }
    }

    /// Tears down a worker that already failed
    ///
    /// The task may be stuck on the executor or on a full channel, so it is
    /// aborted and reaped rather than joined.
    pub async fn abort(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }
}
