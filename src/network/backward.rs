//! Backward weight update.
//!
//! This is a local-signal rule, not backpropagation: the downstream neuron's
//! raw output stands in for the error term, with no activation derivative.

use crate::neo4j::traits::{GraphWrite, LayerEdge};

use super::engine::NeuralNetwork;
use super::result::{ErrorKind, Operation, OperationError, Outcome};

impl NeuralNetwork {
    /// Adjust upstream weights from downstream outputs.
    ///
    /// 1. `hidden.weight -= reduce(output.output) * learning_rate`
    /// 2. `input.weight -= reduce(hidden.output) * learning_rate`
    ///
    /// Any finite learning rate is accepted, including zero and negatives.
    pub async fn backward_pass(&self, learning_rate: f64) -> Result<Outcome, OperationError> {
        if !learning_rate.is_finite() {
            let err = OperationError::new(
                Operation::BackwardPass,
                None,
                0,
                ErrorKind::InvalidLearningRate(learning_rate),
            );
            tracing::error!("Error during {}: {}", Operation::BackwardPass, err);
            return Err(err);
        }

        let reduction = self.config.reduction;
        let writes = vec![
            GraphWrite::AdjustWeights {
                edge: LayerEdge::HiddenToOutput,
                learning_rate,
                reduction,
            },
            GraphWrite::AdjustWeights {
                edge: LayerEdge::InputToHidden,
                learning_rate,
                reduction,
            },
        ];

        self.execute(Operation::BackwardPass, writes).await
    }
}
