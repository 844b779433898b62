//! Engine settings for the graph-resident network.
//!
//! Every parameter has a default and can be set from `config.yaml`
//! or the environment (see [`crate::Config`]).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How several incoming contributions to one neuron are combined.
///
/// With a single incoming edge every reduction yields the plain per-edge
/// value, so the choice only matters on fan-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reduction {
    /// Sum of all contributions.
    #[default]
    Sum,
    /// Arithmetic mean of all contributions.
    Mean,
}

impl Reduction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Reduction::Sum => "sum",
            Reduction::Mean => "mean",
        }
    }

    /// Reduce a non-empty slice of contributions.
    pub fn reduce(&self, values: &[f64]) -> f64 {
        let total: f64 = values.iter().sum();
        match self {
            Reduction::Sum => total,
            Reduction::Mean if values.is_empty() => 0.0,
            Reduction::Mean => total / values.len() as f64,
        }
    }
}

impl fmt::Display for Reduction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Reduction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sum" => Ok(Reduction::Sum),
            "mean" | "avg" => Ok(Reduction::Mean),
            other => Err(format!("unknown reduction '{}'", other)),
        }
    }
}

/// Transaction scope of a multi-write operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Atomicity {
    /// All writes of one operation share a transaction; a failure rolls back
    /// everything the operation wrote.
    #[default]
    Operation,
    /// Each write commits on its own. A failure leaves earlier writes in place.
    PerStep,
}

impl fmt::Display for Atomicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atomicity::Operation => f.write_str("operation"),
            Atomicity::PerStep => f.write_str("per_step"),
        }
    }
}

impl FromStr for Atomicity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "operation" => Ok(Atomicity::Operation),
            "per_step" => Ok(Atomicity::PerStep),
            other => Err(format!("unknown atomicity '{}'", other)),
        }
    }
}

/// Settings shared by every operation of a [`super::NeuralNetwork`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub atomicity: Atomicity,
    pub reduction: Reduction,
    /// Learning rate used when a caller does not pass one.
    pub learning_rate: f64,
    /// Default number of forward/backward rounds for `train`.
    pub epochs: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            atomicity: Atomicity::Operation,
            reduction: Reduction::Sum,
            learning_rate: 0.1,
            epochs: 10,
        }
    }
}
