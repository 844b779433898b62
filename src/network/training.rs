//! Alternating forward/backward rounds.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::engine::NeuralNetwork;
use super::result::{ErrorKind, Operation, OperationError};

/// Summary of a training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub epochs_completed: usize,
    pub learning_rate: f64,
}

/// A training run that stopped early.
///
/// `report.epochs_completed` counts the rounds that finished before the
/// failing pass; their writes stay in the graph.
#[derive(Debug, thiserror::Error)]
#[error("training stopped after {} epoch(s): {source}", .report.epochs_completed)]
pub struct TrainingError {
    pub report: TrainingReport,
    #[source]
    pub source: OperationError,
}

impl NeuralNetwork {
    /// Run `epochs` rounds of `forward_pass` followed by `backward_pass`.
    ///
    /// A non-finite learning rate is rejected before the first round.
    /// Otherwise stops at the first failing pass; rounds already completed
    /// stay in the graph and are reported in the error.
    pub async fn train(
        &self,
        epochs: usize,
        learning_rate: f64,
    ) -> Result<TrainingReport, TrainingError> {
        let mut report = TrainingReport {
            epochs_completed: 0,
            learning_rate,
        };

        if !learning_rate.is_finite() {
            let source = OperationError::new(
                Operation::BackwardPass,
                None,
                0,
                ErrorKind::InvalidLearningRate(learning_rate),
            );
            tracing::error!("Training rejected: {}", source);
            return Err(TrainingError { report, source });
        }

        for epoch in 0..epochs {
            let round = match self.forward_pass().await {
                Ok(_) => self.backward_pass(learning_rate).await,
                Err(e) => Err(e),
            };
            if let Err(source) = round {
                return Err(TrainingError { report, source });
            }
            report.epochs_completed = epoch + 1;
            info!("Epoch {}/{} done", epoch + 1, epochs);
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::neo4j::mock::MockNeuronStore;
    use crate::neo4j::traits::NeuronStore;
    use crate::network::config::EngineConfig;
    use crate::network::models::{NetworkStructure, NeuronSpec};
    use crate::network::result::{ErrorKind, Operation};
    use crate::network::NeuralNetwork;

    async fn seeded(mock: MockNeuronStore) -> NeuralNetwork {
        let net = NeuralNetwork::new(
            Arc::new(mock) as Arc<dyn NeuronStore>,
            EngineConfig::default(),
        );
        let structure = NetworkStructure::new()
            .with("i", NeuronSpec::new(0, "input", "identity").with_output(1.0))
            .with("h", NeuronSpec::new(1, "hidden", "identity").with_weight(2.0))
            .with("o", NeuronSpec::new(2, "output", "identity"));
        net.create_network(&structure).await.unwrap();
        net.connect("i", "h").await.unwrap();
        net.connect("h", "o").await.unwrap();
        net
    }

    #[tokio::test]
    async fn test_single_epoch_matches_manual_passes() {
        let net = seeded(MockNeuronStore::new()).await;

        let report = net.train(1, 0.5).await.unwrap();
        assert_eq!(report.epochs_completed, 1);

        // forward: h.output = 1 * 2 = 2, o.output = 2 * 1 = 2
        // backward: h.weight = 2 - 2 * 0.5 = 1, i.weight = 1 - 2 * 0.5 = 0
        let h = net.neuron("h").await.unwrap().unwrap();
        let i = net.neuron("i").await.unwrap().unwrap();
        assert_eq!(h.output, 2.0);
        assert_eq!(h.weight, 1.0);
        assert_eq!(i.weight, 0.0);
    }

    #[tokio::test]
    async fn test_zero_epochs_writes_nothing() {
        let net = seeded(MockNeuronStore::new()).await;
        let before = net.neurons().await.unwrap();

        let report = net.train(0, 0.1).await.unwrap();
        assert_eq!(report.epochs_completed, 0);
        assert_eq!(net.neurons().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_stops_at_first_failure() {
        // Setup uses writes 1..=5; epoch 1 uses 6..=9; write 10 is epoch 2's forward step
        let net = seeded(MockNeuronStore::new().fail_on_write(10)).await;

        let err = net.train(3, 0.5).await.unwrap_err();
        assert_eq!(err.source.operation, Operation::ForwardPass);
        assert_eq!(err.report.epochs_completed, 1);

        // Epoch 1 stays committed
        let h = net.neuron("h").await.unwrap().unwrap();
        assert_eq!(h.weight, 1.0);
    }

    #[tokio::test]
    async fn test_non_finite_learning_rate_writes_nothing() {
        let mock = Arc::new(MockNeuronStore::new());
        let net = NeuralNetwork::new(
            mock.clone() as Arc<dyn NeuronStore>,
            EngineConfig::default(),
        );
        let structure = NetworkStructure::new()
            .with("i", NeuronSpec::new(0, "input", "identity").with_output(1.0))
            .with("h", NeuronSpec::new(1, "hidden", "identity").with_weight(2.0));
        net.create_network(&structure).await.unwrap();
        net.connect("i", "h").await.unwrap();
        let writes_before = mock.writes_seen();

        let err = net.train(3, f64::NAN).await.unwrap_err();
        assert!(matches!(err.source.kind, ErrorKind::InvalidLearningRate(_)));
        assert_eq!(err.report.epochs_completed, 0);
        assert_eq!(mock.writes_seen(), writes_before);
        assert_eq!(net.neuron("h").await.unwrap().unwrap().output, 0.0);
    }
}
