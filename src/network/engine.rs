//! Network session context.
//!
//! A [`NeuralNetwork`] binds a store handle to engine settings. It holds no
//! neuron state of its own: every operation reads and writes the graph
//! through the [`NeuronStore`] port.

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::neo4j::traits::{GraphWrite, NeuronStore, StoreError};

use super::config::{Atomicity, EngineConfig};
use super::models::{Connection, Neuron};
use super::result::{Operation, OperationError, Outcome};

/// Handle on the network persisted in a graph store.
///
/// Designed for injection via `Arc<NeuralNetwork>`.
pub struct NeuralNetwork {
    pub(crate) store: Arc<dyn NeuronStore>,
    pub(crate) config: EngineConfig,
}

impl NeuralNetwork {
    pub fn new(store: Arc<dyn NeuronStore>, config: EngineConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// All neurons currently stored, ordered by id.
    pub async fn neurons(&self) -> Result<Vec<Neuron>, StoreError> {
        self.store.list_neurons().await
    }

    pub async fn neuron(&self, id: &str) -> Result<Option<Neuron>, StoreError> {
        self.store.get_neuron(id).await
    }

    pub async fn connections(&self) -> Result<Vec<Connection>, StoreError> {
        self.store.list_connections().await
    }

    /// Run the ordered `writes` of one operation under the configured atomicity
    /// and report the result at the operation boundary.
    pub(crate) async fn execute(
        &self,
        operation: Operation,
        writes: Vec<GraphWrite>,
    ) -> Result<Outcome, OperationError> {
        debug!(
            "{}: {} write(s), atomicity={}",
            operation,
            writes.len(),
            self.config.atomicity
        );

        let result = match self.config.atomicity {
            Atomicity::Operation => self
                .store
                .apply(&writes)
                .await
                .map_err(|e| OperationError::new(operation, e.failed_at, 0, e.source)),
            Atomicity::PerStep => self.execute_per_step(operation, &writes).await,
        };

        match result {
            Ok(()) => {
                let outcome = operation.outcome();
                info!("{} completed ({} write(s))", operation, writes.len());
                Ok(outcome)
            }
            Err(e) => {
                error!("Error during {}: {}", operation, e);
                Err(e)
            }
        }
    }

    async fn execute_per_step(
        &self,
        operation: Operation,
        writes: &[GraphWrite],
    ) -> Result<(), OperationError> {
        for (index, write) in writes.iter().enumerate() {
            debug!("{} step {}: {}", operation, index, write);
            self.store
                .apply(std::slice::from_ref(write))
                .await
                .map_err(|e| OperationError::new(operation, Some(index), index, e.source))?;
        }
        Ok(())
    }
}
