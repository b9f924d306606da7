// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

mod invocation;
pub use invocation::{ApiParam, Invocation};

mod host;
pub use host::Host;

mod worker_message;
pub use worker_message::{WorkerAck, WorkerMessage};

mod executor;
pub use executor::{ExecutionError, Executor};

mod log_executor;
pub use log_executor::LogExecutor;

mod recording_executor;
pub use recording_executor::{ExecutorEvent, RecordingExecutor};

mod worker;
pub use worker::Worker;

mod worker_link;
pub use worker_link::WorkerLink;

mod dispatcher;
pub use dispatcher::Dispatcher;

mod dispatch_config;
pub use dispatch_config::DispatchConfig;

mod dispatch_error;
pub use dispatch_error::{
    BroadcastError, BroadcastPhase, ExecutionFailure, FailureKind, HostFailure,
};

mod test_plan;
pub use test_plan::TestPlan;
