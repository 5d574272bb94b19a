use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Configuration for program execution
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    /// Maximum number of statements one evaluator may execute (default: unlimited)
    pub max_steps: Option<u64>,
}

impl EvaluatorConfig {
    /// Config with a step budget
    pub fn with_max_steps(max_steps: u64) -> Self {
        EvaluatorConfig {
            max_steps: Some(max_steps),
        }
    }

    /// Decodes a config from JSON, e.g. `{"max_steps": 10000}`
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::InvalidConfig(e.to_string()))
    }
}
