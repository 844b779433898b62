//! Forward propagation through the stored network.

use crate::neo4j::traits::{GraphWrite, LayerEdge};

use super::engine::NeuralNetwork;
use super::result::{Operation, OperationError, Outcome};

impl NeuralNetwork {
    /// Push outputs downstream, layer by layer.
    ///
    /// 1. `hidden.output = reduce(input.output) * hidden.weight`
    /// 2. `output.output = reduce(hidden.output) * output.weight`
    ///
    /// Each step is one bulk write. Neurons without a matching incoming edge
    /// keep their output.
    pub async fn forward_pass(&self) -> Result<Outcome, OperationError> {
        let reduction = self.config.reduction;
        let writes = vec![
            GraphWrite::Propagate {
                edge: LayerEdge::InputToHidden,
                reduction,
            },
            GraphWrite::Propagate {
                edge: LayerEdge::HiddenToOutput,
                reduction,
            },
        ];

        self.execute(Operation::ForwardPass, writes).await
    }
}
