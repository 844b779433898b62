//! Neo4j client and the store port for the network graph

pub mod client;
mod cypher;
pub mod traits;

pub use client::Neo4jClient;
pub use traits::{BatchError, GraphWrite, LayerEdge, NeuronStore, StoreError};

#[cfg(test)]
pub(crate) mod mock;
