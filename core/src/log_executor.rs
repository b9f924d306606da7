// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{ExecutionError, Executor, Host, Invocation};
use async_trait::async_trait;

/// Executor that logs every invocation to standard output
pub struct LogExecutor;

#[async_trait]
impl Executor for LogExecutor {
    async fn execute(&self, invocation: &Invocation, host: &Host) -> Result<(), ExecutionError> {
        println!("Sending {} to host {}", invocation, host);
        Ok(())
    }

    async fn finish(&self, host: &Host) {
        println!("Ending test API executions at {}", host);
    }
}
