//! Cypher templates for each [`GraphWrite`].

use neo4rs::{query, Query};

use crate::network::config::Reduction;
use crate::network::models::Layer;

use super::traits::{GraphWrite, LayerEdge};

const CREATE_NEURON: &str = "CREATE (n:Neuron {id: $id, layer: $layer, type: $type, \
     activation_function: $activation_function, output: $output, weight: $weight})";

const CONNECT: &str = "MATCH (a:Neuron {id: $from}), (b:Neuron {id: $to}) \
     MERGE (a)-[:CONNECTED_TO]->(b)";

/// Every `CONNECTED_TO` edge as `(source, target)` id pairs.
pub(crate) const LIST_CONNECTIONS: &str = "MATCH (a:Neuron)-[:CONNECTED_TO]->(b:Neuron) \
     RETURN a.id AS source, b.id AS target ORDER BY source, target";

fn aggregate(reduction: Reduction) -> &'static str {
    match reduction {
        Reduction::Sum => "sum",
        Reduction::Mean => "avg",
    }
}

fn edge_pattern(edge: LayerEdge) -> String {
    format!(
        "MATCH (src:Neuron {{type: '{}'}})-[:CONNECTED_TO]->(dst:Neuron {{type: '{}'}})",
        edge.source_type(),
        edge.target_type()
    )
}

/// Statement text for a write, parameters left as `$placeholders`.
pub(crate) fn statement(write: &GraphWrite) -> String {
    match write {
        GraphWrite::CreateNeuron(_) => CREATE_NEURON.to_string(),
        GraphWrite::Connect { .. } => CONNECT.to_string(),
        GraphWrite::Propagate { edge, reduction } => format!(
            "{} WITH dst, {}(src.output) AS signal SET dst.output = signal * dst.weight",
            edge_pattern(*edge),
            aggregate(*reduction)
        ),
        GraphWrite::AdjustWeights {
            edge, reduction, ..
        } => format!(
            "{} WITH src, {}(dst.output) AS signal \
             SET src.weight = src.weight - signal * $learning_rate",
            edge_pattern(*edge),
            aggregate(*reduction)
        ),
    }
}

/// Bind the write's parameters to its statement.
pub(crate) fn to_query(write: &GraphWrite) -> Query {
    let q = query(&statement(write));
    match write {
        GraphWrite::CreateNeuron(n) => {
            let q = q
                .param("id", n.id.clone())
                .param("type", n.neuron_type.as_str())
                .param("activation_function", n.activation_function.clone())
                .param("output", n.output)
                .param("weight", n.weight);
            match &n.layer {
                Layer::Index(i) => q.param("layer", *i),
                Layer::Label(s) => q.param("layer", s.clone()),
            }
        }
        GraphWrite::Connect { from, to } => q.param("from", from.clone()).param("to", to.clone()),
        GraphWrite::Propagate { .. } => q,
        GraphWrite::AdjustWeights { learning_rate, .. } => {
            q.param("learning_rate", *learning_rate)
        }
    }
}
