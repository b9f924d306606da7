// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::dispatch_error::ExecutionFailure;
use crate::{Executor, Host, WorkerAck, WorkerMessage};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Worker bound to a single host
///
/// Drains its work channel until the termination command arrives, then
/// acknowledges exactly once and exits. Execution failures are collected
/// and carried back on the acknowledgment; they never stop the worker.
pub struct Worker<E: Executor> {
    id: usize,
    host: Host,
    executor: Arc<E>,
}

impl<E: Executor> Worker<E> {
    pub fn new(id: usize, host: Host, executor: Arc<E>) -> Self {
        Self { id, host, executor }
    }

    /// Spawns the worker task
    ///
    /// The returned handle completes once the acknowledgment has been sent,
    /// or once the work channel closes without a termination command.
    pub fn spawn(
        self,
        work_rx: mpsc::Receiver<WorkerMessage>,
        ack_tx: mpsc::Sender<WorkerAck>,
    ) -> JoinHandle<()> {
        tokio::spawn(self.run(work_rx, ack_tx))
    }

    async fn run(
        self,
        mut work_rx: mpsc::Receiver<WorkerMessage>,
        ack_tx: mpsc::Sender<WorkerAck>,
    ) {
        let mut failures: Vec<ExecutionFailure> = Vec::new();

        while let Some(message) = work_rx.recv().await {
            match message {
                WorkerMessage::Invoke(invocation) => {
                    if let Err(e) = self.executor.execute(&invocation, &self.host).await {
                        failures.push(ExecutionFailure::new(
                            invocation.to_string(),
                            e.to_string(),
                        ));
                    }
                }
                WorkerMessage::Terminate => {
                    self.executor.finish(&self.host).await;
                    // The acknowledgment is the worker's last action.
                    let _ = ack_tx.send(WorkerAck::new(self.id, failures)).await;
                    return;
                }
            }
        }
        // Work channel closed without a termination command: the dispatcher
        // is gone and there is nobody left to acknowledge to.
    }
}
