// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::dispatch_error::{BroadcastError, FailureKind, HostFailure};
use crate::{DispatchConfig, Executor, Host, Invocation, Worker, WorkerLink};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Dispatcher coordinates one broadcast: it spawns one worker per host,
/// fans every invocation out to every worker in input order, then runs the
/// termination handshake with each of them before returning
pub struct Dispatcher<E: Executor> {
    executor: Arc<E>,
    config: DispatchConfig,
    cancellation_token: CancellationToken,
}

impl<E: Executor> Dispatcher<E> {
    pub fn new(executor: E, config: DispatchConfig) -> Self {
        Self {
            executor: Arc::new(executor),
            config,
            cancellation_token: CancellationToken::new(),
        }
    }

    /// Returns a clone of the cancellation token for external control
    ///
    /// Cancelling skips the remaining invocation rounds; the termination
    /// handshake still runs so no worker task leaks.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation_token.clone()
    }

    /// Broadcasts every invocation to every host, in input order per host,
    /// then terminates every worker and waits for its acknowledgment and
    /// its task exit
    ///
    /// Empty `hosts` returns immediately; empty `invocations` goes straight
    /// to the termination handshake. A failure on one host never blocks the
    /// others: failures are aggregated and reported together once every
    /// host has been waited on or timed out on.
    pub async fn broadcast(
        &self,
        invocations: &[Invocation],
        hosts: &[Host],
    ) -> Result<(), BroadcastError> {
        if hosts.is_empty() {
            return Ok(());
        }

        // One channel pair and one worker task per host, keyed by position.
        let mut links: Vec<WorkerLink> = Vec::with_capacity(hosts.len());
        for (worker_id, host) in hosts.iter().enumerate() {
            links.push(self.spawn_worker(worker_id, host));
        }

        let mut failures: Vec<HostFailure> = Vec::new();
        let mut failed = vec![false; links.len()];

        for invocation in invocations {
            if self.cancellation_token.is_cancelled() {
                break;
            }
            for (worker_id, link) in links.iter().enumerate() {
                if failed[worker_id] {
                    continue;
                }
                if let Err(kind) = link
                    .send_invocation(invocation.clone(), self.config.send_wait())
                    .await
                {
                    failures.push(HostFailure::new(link.host().clone(), kind));
                    failed[worker_id] = true;
                }
            }
        }

        for (worker_id, link) in links.iter().enumerate() {
            if failed[worker_id] {
                continue;
            }
            if let Err(kind) = link.send_termination(self.config.send_wait()).await {
                failures.push(HostFailure::new(link.host().clone(), kind));
                failed[worker_id] = true;
            }
        }

        for (worker_id, link) in links.into_iter().enumerate() {
            if failed[worker_id] {
                link.abort().await;
                continue;
            }
            let host = link.host().clone();
            match link.collect(self.config.ack_wait()).await {
                Ok(ack) => {
                    for failure in ack.failures {
                        failures.push(HostFailure::new(
                            host.clone(),
                            FailureKind::ExecutionFailed(failure),
                        ));
                    }
                }
                Err(kind) => failures.push(HostFailure::new(host, kind)),
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(BroadcastError::new(failures))
        }
    }

    fn spawn_worker(&self, worker_id: usize, host: &Host) -> WorkerLink {
        // Depth 1 keeps at most one unconsumed invocation in flight per host.
        let (work_tx, work_rx) = mpsc::channel(1);
        let (ack_tx, ack_rx) = mpsc::channel(1);
        let worker = Worker::new(worker_id, host.clone(), self.executor.clone());
        let handle = worker.spawn(work_rx, ack_tx);
        WorkerLink::new(host.clone(), work_tx, ack_rx, handle)
    }
}
