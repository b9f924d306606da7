// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use serde::{Deserialize, Serialize};

/// Single key/value parameter of a test API invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiParam {
    pub key: String,
    pub value: String,
}

impl ApiParam {
    pub fn new(key: &str, value: &str) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

/// Immutable descriptor of one test API call: the owning component, the
/// API name and its parameters in declaration order
///
/// Parameter order is preserved for display; it carries no semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    pub component: String,
    pub name: String,
    pub parameters: Vec<ApiParam>,
}

impl Invocation {
    pub fn new(component: &str, name: &str, parameters: Vec<ApiParam>) -> Self {
        Self {
            component: component.to_string(),
            name: name.to_string(),
            parameters,
        }
    }
}

impl std::fmt::Display for Invocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.component, self.name)
    }
}
