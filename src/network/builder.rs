//! Network materialization: structure description → neuron nodes.

use crate::neo4j::traits::GraphWrite;

use super::engine::NeuralNetwork;
use super::models::NetworkStructure;
use super::result::{Operation, OperationError, Outcome};

impl NeuralNetwork {
    /// Create one neuron node per structure entry.
    ///
    /// Edges are not created here; see [`NeuralNetwork::connect`].
    /// Entry types are not validated: an unknown type is stored and stays
    /// inert for both passes.
    pub async fn create_network(
        &self,
        structure: &NetworkStructure,
    ) -> Result<Outcome, OperationError> {
        let writes = structure
            .to_neurons()
            .into_iter()
            .map(GraphWrite::CreateNeuron)
            .collect();

        self.execute(Operation::CreateNetwork, writes).await
    }

    /// Link two existing neurons with a `CONNECTED_TO` edge.
    ///
    /// Idempotent. Unknown ids match nothing and the call still succeeds.
    pub async fn connect(&self, from: &str, to: &str) -> Result<Outcome, OperationError> {
        let write = GraphWrite::Connect {
            from: from.to_string(),
            to: to.to_string(),
        };
        self.execute(Operation::Connect, vec![write]).await
    }
}
