//! Operation outcomes and failures.
//!
//! Every operation returns `Result<Outcome, OperationError>`. The legacy
//! single-field status record (`{"result": "network_created"}` /
//! `{"result": "error"}`) is available through [`ExecutionResult`].

use crate::neo4j::traits::StoreError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status token reported for every failure.
pub const ERROR_TOKEN: &str = "error";

/// Operations exposed by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    CreateNetwork,
    Connect,
    ForwardPass,
    BackwardPass,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::CreateNetwork => "createNetwork",
            Operation::Connect => "connect",
            Operation::ForwardPass => "forwardPass",
            Operation::BackwardPass => "backwardPass",
        }
    }

    /// The outcome reported when the operation commits.
    pub fn outcome(&self) -> Outcome {
        match self {
            Operation::CreateNetwork => Outcome::NetworkCreated,
            Operation::Connect => Outcome::ConnectionCreated,
            Operation::ForwardPass => Outcome::ForwardPassCompleted,
            Operation::BackwardPass => Outcome::BackwardPassCompleted,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Successful completion of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    NetworkCreated,
    ConnectionCreated,
    ForwardPassCompleted,
    BackwardPassCompleted,
}

impl Outcome {
    pub fn token(&self) -> &'static str {
        match self {
            Outcome::NetworkCreated => "network_created",
            Outcome::ConnectionCreated => "connection_created",
            Outcome::ForwardPassCompleted => "forward_pass_completed",
            Outcome::BackwardPassCompleted => "backward_pass_completed",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Cause of an operation failure.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("learning rate must be finite, got {0}")]
    InvalidLearningRate(f64),
}

/// Terminal state of a failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureMode {
    /// Nothing was committed.
    NoOp,
    /// Some writes were committed before the failure and stay in the graph.
    PartialCommit,
}

/// A failed operation: which one, where it stopped, and why.
#[derive(Debug, thiserror::Error)]
#[error("{operation} failed (step {}, {committed} committed): {kind}", display_step(.step))]
pub struct OperationError {
    pub operation: Operation,
    /// Index of the failing write within the operation, when known.
    pub step: Option<usize>,
    /// Number of writes of this operation that remain committed.
    pub committed: usize,
    #[source]
    pub kind: ErrorKind,
}

fn display_step(step: &Option<usize>) -> String {
    match step {
        Some(i) => i.to_string(),
        None => "-".to_string(),
    }
}

impl OperationError {
    pub fn new(
        operation: Operation,
        step: Option<usize>,
        committed: usize,
        kind: impl Into<ErrorKind>,
    ) -> Self {
        Self {
            operation,
            step,
            committed,
            kind: kind.into(),
        }
    }

    pub fn failure_mode(&self) -> FailureMode {
        if self.committed == 0 {
            FailureMode::NoOp
        } else {
            FailureMode::PartialCommit
        }
    }
}

/// Single-field status record returned to callers that only need a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub result: String,
}

impl ExecutionResult {
    pub fn is_success(&self) -> bool {
        self.result != ERROR_TOKEN
    }
}

impl From<&Result<Outcome, OperationError>> for ExecutionResult {
    fn from(result: &Result<Outcome, OperationError>) -> Self {
        let token = match result {
            Ok(outcome) => outcome.token(),
            Err(_) => ERROR_TOKEN,
        };
        Self {
            result: token.to_string(),
        }
    }
}

impl From<Result<Outcome, OperationError>> for ExecutionResult {
    fn from(result: Result<Outcome, OperationError>) -> Self {
        Self::from(&result)
    }
}
