// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::sync::Arc;
use std::time::Duration;
use test_dispatch_core::{
    ApiParam, BroadcastPhase, ExecutorEvent, FailureKind, Host, Invocation, RecordingExecutor,
    Worker, WorkerAck, WorkerLink, WorkerMessage,
};
use tokio::sync::mpsc;

const WAIT: Duration = Duration::from_millis(1_000);

fn play() -> Invocation {
    Invocation::new(
        "fwk.vod",
        "play",
        vec![
            ApiParam::new("name", "movie.mpg"),
            ApiParam::new("loop", "false"),
        ],
    )
}

fn get_modedata() -> Invocation {
    Invocation::new(
        "csw.gsm",
        "getModedata",
        vec![ApiParam::new("parameter", "hbMode")],
    )
}

fn dsu1() -> Host {
    Host::new("dsu1", "139.182.68.1")
}

fn executed(host: &str, invocation: &str) -> ExecutorEvent {
    ExecutorEvent::Executed {
        host: host.to_string(),
        invocation: invocation.to_string(),
    }
}

fn finished(host: &str) -> ExecutorEvent {
    ExecutorEvent::Finished {
        host: host.to_string(),
    }
}

// ============================================================
// Worker state machine
// ============================================================

#[tokio::test]
async fn test_worker_executes_then_acknowledges_exactly_once() {
    let recorder = RecordingExecutor::new();
    let (work_tx, work_rx) = mpsc::channel(1);
    let (ack_tx, mut ack_rx) = mpsc::channel(1);
    let handle = Worker::new(7, dsu1(), Arc::new(recorder.clone())).spawn(work_rx, ack_tx);

    work_tx
        .send(WorkerMessage::Invoke(play()))
        .await
        .expect("worker accepts work");
    work_tx
        .send(WorkerMessage::Invoke(get_modedata()))
        .await
        .expect("worker accepts work");
    work_tx
        .send(WorkerMessage::Terminate)
        .await
        .expect("worker accepts the termination command");

    let ack = ack_rx.recv().await.expect("one acknowledgment");
    assert_eq!(ack.worker_id, 7);
    assert!(ack.failures.is_empty());

    handle.await.expect("worker task exits cleanly");
    assert!(
        ack_rx.try_recv().is_err(),
        "nothing may follow the acknowledgment"
    );
    assert_eq!(
        recorder.events_for("dsu1"),
        vec![
            executed("dsu1", "fwk.vod.play"),
            executed("dsu1", "csw.gsm.getModedata"),
            finished("dsu1"),
        ]
    );
}

#[tokio::test]
async fn test_worker_does_not_acknowledge_before_termination() {
    let recorder = RecordingExecutor::new();
    let (work_tx, work_rx) = mpsc::channel(1);
    let (ack_tx, mut ack_rx) = mpsc::channel(1);
    let handle = Worker::new(0, dsu1(), Arc::new(recorder.clone())).spawn(work_rx, ack_tx);

    work_tx
        .send(WorkerMessage::Invoke(play()))
        .await
        .expect("worker accepts work");

    // Wait until the worker has actually executed the invocation.
    for _ in 0..100 {
        if recorder.events().len() == 1 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(recorder.events().len(), 1);
    assert!(
        ack_rx.try_recv().is_err(),
        "no acknowledgment while the worker is ready"
    );

    work_tx
        .send(WorkerMessage::Terminate)
        .await
        .expect("worker accepts the termination command");
    assert!(ack_rx.recv().await.is_some());
    handle.await.expect("worker task exits cleanly");
}

#[tokio::test]
async fn test_worker_exits_quietly_when_dispatcher_goes_away() {
    let recorder = RecordingExecutor::new();
    let (work_tx, work_rx) = mpsc::channel(1);
    let (ack_tx, mut ack_rx) = mpsc::channel(1);
    let handle = Worker::new(0, dsu1(), Arc::new(recorder.clone())).spawn(work_rx, ack_tx);

    work_tx
        .send(WorkerMessage::Invoke(play()))
        .await
        .expect("worker accepts work");
    drop(work_tx);

    handle.await.expect("worker task exits cleanly");
    assert!(
        ack_rx.recv().await.is_none(),
        "no acknowledgment without a termination command"
    );
    assert_eq!(
        recorder.events_for("dsu1"),
        vec![executed("dsu1", "fwk.vod.play")],
        "no termination side effect without the command"
    );
}

// ============================================================
// Handshake violations
// ============================================================

#[tokio::test]
async fn test_second_acknowledgment_is_rejected() {
    let (work_tx, mut work_rx) = mpsc::channel::<WorkerMessage>(1);
    let (ack_tx, ack_rx) = mpsc::channel(1);
    let handle = tokio::spawn(async move {
        while let Some(message) = work_rx.recv().await {
            if matches!(message, WorkerMessage::Terminate) {
                let _ = ack_tx.send(WorkerAck::new(0, Vec::new())).await;
                let _ = ack_tx.send(WorkerAck::new(0, Vec::new())).await;
                return;
            }
        }
    });
    let link = WorkerLink::new(Host::new("dsu2", "139.182.68.2"), work_tx, ack_rx, handle);

    link.send_termination(WAIT)
        .await
        .expect("termination is accepted");
    let err = link
        .collect(WAIT)
        .await
        .expect_err("a second acknowledgment must be rejected");
    assert_eq!(
        err,
        FailureKind::ProtocolViolation {
            detail: "worker acknowledged more than once".to_string()
        }
    );
}

#[tokio::test]
async fn test_exit_without_acknowledgment_is_rejected() {
    let (work_tx, mut work_rx) = mpsc::channel::<WorkerMessage>(1);
    let (ack_tx, ack_rx) = mpsc::channel::<WorkerAck>(1);
    let handle = tokio::spawn(async move {
        let _ack_tx = ack_tx;
        while let Some(message) = work_rx.recv().await {
            if matches!(message, WorkerMessage::Terminate) {
                return;
            }
        }
    });
    let link = WorkerLink::new(Host::new("dsu2", "139.182.68.2"), work_tx, ack_rx, handle);

    link.send_termination(WAIT)
        .await
        .expect("termination is accepted");
    let err = link
        .collect(WAIT)
        .await
        .expect_err("an exit without acknowledgment must be rejected");
    assert_eq!(
        err,
        FailureKind::ProtocolViolation {
            detail: "worker exited without acknowledging".to_string()
        }
    );
}

#[tokio::test]
async fn test_unresponsive_worker_reports_a_stall() {
    let (work_tx, work_rx) = mpsc::channel::<WorkerMessage>(1);
    let (ack_tx, ack_rx) = mpsc::channel::<WorkerAck>(1);
    let handle = tokio::spawn(async move {
        let _work_rx = work_rx;
        let _ack_tx = ack_tx;
        std::future::pending::<()>().await;
    });
    let link = WorkerLink::new(Host::new("dsu2", "139.182.68.2"), work_tx, ack_rx, handle);
    let wait = Duration::from_millis(50);

    // The first send lands in the depth-1 buffer; the second finds the
    // worker never draining it.
    link.send_invocation(play(), wait)
        .await
        .expect("one invocation may be in flight");
    let err = link
        .send_invocation(get_modedata(), wait)
        .await
        .expect_err("a worker that never receives must be reported");
    assert_eq!(
        err,
        FailureKind::StalledWorker {
            phase: BroadcastPhase::Invocation
        }
    );

    link.abort().await;
}
