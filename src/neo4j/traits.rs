//! NeuronStore trait definition
//!
//! The port through which the engine reaches the graph. Every mutation is
//! expressed as a [`GraphWrite`] and handed over in ordered batches; a batch
//! is applied atomically or not at all. `Neo4jClient` implements it over bolt,
//! and tests use the in-memory mock.

use crate::network::config::Reduction;
use crate::network::models::{Connection, Neuron, NeuronType};
use async_trait::async_trait;
use std::fmt;

// ============================================================================
// Write vocabulary
// ============================================================================

/// A class of `CONNECTED_TO` edges selected by the types at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerEdge {
    /// `(:Neuron {type: 'input'})-[:CONNECTED_TO]->(:Neuron {type: 'hidden'})`
    InputToHidden,
    /// `(:Neuron {type: 'hidden'})-[:CONNECTED_TO]->(:Neuron {type: 'output'})`
    HiddenToOutput,
}

impl LayerEdge {
    pub fn source_type(&self) -> NeuronType {
        match self {
            LayerEdge::InputToHidden => NeuronType::Input,
            LayerEdge::HiddenToOutput => NeuronType::Hidden,
        }
    }

    pub fn target_type(&self) -> NeuronType {
        match self {
            LayerEdge::InputToHidden => NeuronType::Hidden,
            LayerEdge::HiddenToOutput => NeuronType::Output,
        }
    }
}

impl fmt::Display for LayerEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.source_type(), self.target_type())
    }
}

/// One parameterized write against the graph.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphWrite {
    /// Create a single neuron node with its full field set.
    CreateNeuron(Neuron),
    /// MERGE a `CONNECTED_TO` edge between two existing neurons.
    Connect { from: String, to: String },
    /// Bulk update: `target.output = reduce(source.output) * target.weight`
    /// for every target reached by `edge`.
    Propagate { edge: LayerEdge, reduction: Reduction },
    /// Bulk update: `source.weight -= reduce(target.output) * learning_rate`
    /// for every source leaving along `edge`.
    AdjustWeights {
        edge: LayerEdge,
        learning_rate: f64,
        reduction: Reduction,
    },
}

impl fmt::Display for GraphWrite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphWrite::CreateNeuron(n) => write!(f, "create neuron {}", n.id),
            GraphWrite::Connect { from, to } => write!(f, "connect {} -> {}", from, to),
            GraphWrite::Propagate { edge, reduction } => {
                write!(f, "propagate {} ({})", edge, reduction)
            }
            GraphWrite::AdjustWeights {
                edge,
                learning_rate,
                reduction,
            } => write!(
                f,
                "adjust weights {} (lr={}, {})",
                edge, learning_rate, reduction
            ),
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Failure reported by a store while executing a write or a read.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("neo4j error: {0}")]
    Neo4j(#[from] neo4rs::Error),

    #[error("constraint violation: {0}")]
    Constraint(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("failed to decode row: {0}")]
    Decode(String),
}

/// Failure of an atomic batch. Nothing from the batch is committed.
#[derive(Debug, thiserror::Error)]
#[error("batch write failed: {source}")]
pub struct BatchError {
    /// Index of the write that failed inside the batch, `None` when the
    /// failure happened outside any single write (begin/commit).
    pub failed_at: Option<usize>,
    #[source]
    pub source: StoreError,
}

impl BatchError {
    pub fn at(index: usize, source: StoreError) -> Self {
        Self {
            failed_at: Some(index),
            source,
        }
    }

    pub fn outside(source: StoreError) -> Self {
        Self {
            failed_at: None,
            source,
        }
    }
}

// ============================================================================
// Port
// ============================================================================

/// Abstract interface over the graph holding the network.
#[async_trait]
pub trait NeuronStore: Send + Sync {
    /// Apply `writes` in order inside one transaction.
    ///
    /// Either every write is committed or none is. An empty batch is a no-op.
    async fn apply(&self, writes: &[GraphWrite]) -> Result<(), BatchError>;

    /// List all neurons, ordered by id
    async fn list_neurons(&self) -> Result<Vec<Neuron>, StoreError>;

    /// Get a neuron by id
    async fn get_neuron(&self, id: &str) -> Result<Option<Neuron>, StoreError>;

    /// List all `CONNECTED_TO` edges, ordered by (from, to)
    async fn list_connections(&self) -> Result<Vec<Connection>, StoreError>;
}
