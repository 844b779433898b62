//! In-memory mock implementation of NeuronStore for testing.
//!
//! Mirrors the Cypher semantics of every [`GraphWrite`] over a
//! `tokio::sync::RwLock` snapshot. Batches are applied to a copy that
//! replaces the live state only when every write succeeded.
//! Conditionally compiled with `#[cfg(test)]`.

use crate::network::models::{Connection, Neuron};
use crate::neo4j::traits::{BatchError, GraphWrite, LayerEdge, NeuronStore, StoreError};
use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

#[derive(Debug, Clone, Default)]
struct GraphState {
    neurons: BTreeMap<String, Neuron>,
    edges: BTreeSet<(String, String)>,
}

impl GraphState {
    /// `(source, target)` pairs of edges whose endpoints match `edge`'s types.
    fn matching(&self, edge: LayerEdge) -> Vec<(String, String)> {
        let (src_type, dst_type) = (edge.source_type(), edge.target_type());
        self.edges
            .iter()
            .filter(|(from, to)| {
                match (self.neurons.get(from), self.neurons.get(to)) {
                    (Some(a), Some(b)) => a.neuron_type == src_type && b.neuron_type == dst_type,
                    _ => false,
                }
            })
            .cloned()
            .collect()
    }

    fn write(&mut self, write: &GraphWrite) -> Result<(), StoreError> {
        match write {
            GraphWrite::CreateNeuron(neuron) => {
                if self.neurons.contains_key(&neuron.id) {
                    return Err(StoreError::Constraint(format!(
                        "Neuron with id '{}' already exists",
                        neuron.id
                    )));
                }
                self.neurons.insert(neuron.id.clone(), neuron.clone());
            }
            GraphWrite::Connect { from, to } => {
                if self.neurons.contains_key(from) && self.neurons.contains_key(to) {
                    self.edges.insert((from.clone(), to.clone()));
                }
            }
            GraphWrite::Propagate { edge, reduction } => {
                // Aggregate first, then SET, like `WITH dst, agg(...)`
                let mut signals: BTreeMap<String, Vec<f64>> = BTreeMap::new();
                for (from, to) in self.matching(*edge) {
                    signals
                        .entry(to)
                        .or_default()
                        .push(self.neurons[&from].output);
                }
                for (id, values) in signals {
                    if let Some(n) = self.neurons.get_mut(&id) {
                        n.output = reduction.reduce(&values) * n.weight;
                    }
                }
            }
            GraphWrite::AdjustWeights {
                edge,
                learning_rate,
                reduction,
            } => {
                let mut signals: BTreeMap<String, Vec<f64>> = BTreeMap::new();
                for (from, to) in self.matching(*edge) {
                    signals
                        .entry(from)
                        .or_default()
                        .push(self.neurons[&to].output);
                }
                for (id, values) in signals {
                    if let Some(n) = self.neurons.get_mut(&id) {
                        n.weight -= reduction.reduce(&values) * learning_rate;
                    }
                }
            }
        }
        Ok(())
    }
}

/// In-memory mock implementation of NeuronStore for testing.
pub struct MockNeuronStore {
    state: RwLock<GraphState>,
    /// Count of individual writes attempted so far (1-based after increment).
    writes_seen: AtomicUsize,
    /// Inject a failure on this write number.
    fail_on: Option<usize>,
}

impl MockNeuronStore {
    /// Create a new empty MockNeuronStore.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(GraphState::default()),
            writes_seen: AtomicUsize::new(0),
            fail_on: None,
        }
    }

    /// Make the `n`-th write ever attempted (1-based, across all batches) fail.
    pub fn fail_on_write(mut self, n: usize) -> Self {
        self.fail_on = Some(n);
        self
    }

    pub fn writes_seen(&self) -> usize {
        self.writes_seen.load(Ordering::SeqCst)
    }
}

impl Default for MockNeuronStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NeuronStore for MockNeuronStore {
    async fn apply(&self, writes: &[GraphWrite]) -> Result<(), BatchError> {
        let mut state = self.state.write().await;
        let mut draft = state.clone();

        for (index, write) in writes.iter().enumerate() {
            let seen = self.writes_seen.fetch_add(1, Ordering::SeqCst) + 1;
            if self.fail_on == Some(seen) {
                return Err(BatchError::at(
                    index,
                    StoreError::Unavailable(format!("injected failure on write {}", seen)),
                ));
            }
            draft.write(write).map_err(|e| BatchError::at(index, e))?;
        }

        *state = draft;
        Ok(())
    }

    async fn list_neurons(&self) -> Result<Vec<Neuron>, StoreError> {
        Ok(self.state.read().await.neurons.values().cloned().collect())
    }

    async fn get_neuron(&self, id: &str) -> Result<Option<Neuron>, StoreError> {
        Ok(self.state.read().await.neurons.get(id).cloned())
    }

    async fn list_connections(&self) -> Result<Vec<Connection>, StoreError> {
        Ok(self
            .state
            .read()
            .await
            .edges
            .iter()
            .map(|(from, to)| Connection {
                from: from.clone(),
                to: to.clone(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::config::Reduction;
    use crate::network::models::NeuronSpec;

    fn neuron(id: &str, kind: &str, output: f64, weight: f64) -> GraphWrite {
        GraphWrite::CreateNeuron(Neuron::from_spec(
            id,
            &NeuronSpec::new(0, kind, "identity")
                .with_output(output)
                .with_weight(weight),
        ))
    }

    #[tokio::test]
    async fn test_batch_is_all_or_nothing() {
        let store = MockNeuronStore::new();
        let writes = vec![
            neuron("a", "input", 0.0, 1.0),
            neuron("a", "input", 0.0, 1.0),
        ];

        let err = store.apply(&writes).await.unwrap_err();
        assert_eq!(err.failed_at, Some(1));
        assert!(store.list_neurons().await.unwrap().is_empty());
        assert_eq!(store.writes_seen(), 2);
    }

    #[tokio::test]
    async fn test_adjust_weights_ignores_other_edges() {
        let store = MockNeuronStore::new();
        store
            .apply(&[
                neuron("h", "hidden", 1.0, 3.0),
                neuron("o", "output", 3.0, 1.0),
                neuron("x", "other", 5.0, 1.0),
                GraphWrite::Connect {
                    from: "h".into(),
                    to: "o".into(),
                },
                GraphWrite::Connect {
                    from: "x".into(),
                    to: "o".into(),
                },
            ])
            .await
            .unwrap();

        store
            .apply(&[GraphWrite::AdjustWeights {
                edge: LayerEdge::HiddenToOutput,
                learning_rate: 0.5,
                reduction: Reduction::Sum,
            }])
            .await
            .unwrap();

        assert_eq!(store.get_neuron("h").await.unwrap().unwrap().weight, 1.5);
        assert_eq!(store.get_neuron("x").await.unwrap().unwrap().weight, 1.0);
    }
}
