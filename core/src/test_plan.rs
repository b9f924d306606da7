// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{Host, Invocation};
use serde::Deserialize;
use std::fs;

/// Broadcast inputs loaded from a JSON file: the invocations to fan out
/// and the hosts to fan them out to
///
/// Inputs always reach the dispatcher as parameters; this type only makes
/// them loadable as data.
#[derive(Debug, Clone, Deserialize)]
pub struct TestPlan {
    pub invocations: Vec<Invocation>,
    pub hosts: Vec<Host>,
}

impl TestPlan {
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)?;
        let plan: TestPlan = serde_json::from_str(&contents)?;
        Ok(plan)
    }
}
