//! Neuron and structure models persisted as graph nodes

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

// ============================================================================
// Neuron type
// ============================================================================

/// Role of a neuron inside the feed-forward topology.
///
/// Unknown values are kept verbatim in [`NeuronType::Other`]. They are stored
/// like any other neuron but never match a propagation or update pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NeuronType {
    Input,
    Hidden,
    Output,
    Other(String),
}

impl NeuronType {
    pub fn as_str(&self) -> &str {
        match self {
            NeuronType::Input => "input",
            NeuronType::Hidden => "hidden",
            NeuronType::Output => "output",
            NeuronType::Other(s) => s,
        }
    }
}

impl From<String> for NeuronType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "input" => NeuronType::Input,
            "hidden" => NeuronType::Hidden,
            "output" => NeuronType::Output,
            _ => NeuronType::Other(s),
        }
    }
}

impl From<&str> for NeuronType {
    fn from(s: &str) -> Self {
        NeuronType::from(s.to_string())
    }
}

impl From<NeuronType> for String {
    fn from(t: NeuronType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for NeuronType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Layer
// ============================================================================

/// Layer of a neuron, either a numeric index or a free-form label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Layer {
    Index(i64),
    Label(String),
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layer::Index(i) => write!(f, "{}", i),
            Layer::Label(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Layer {
    fn from(i: i64) -> Self {
        Layer::Index(i)
    }
}

impl From<&str> for Layer {
    fn from(s: &str) -> Self {
        Layer::Label(s.to_string())
    }
}

// ============================================================================
// Neuron node
// ============================================================================

pub const DEFAULT_OUTPUT: f64 = 0.0;
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// A persisted `(:Neuron)` node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neuron {
    pub id: String,
    pub layer: Layer,
    #[serde(rename = "type")]
    pub neuron_type: NeuronType,
    pub activation_function: String,
    pub output: f64,
    pub weight: f64,
}

impl Neuron {
    /// Build the node for one structure entry, applying output/weight defaults.
    pub fn from_spec(id: impl Into<String>, spec: &NeuronSpec) -> Self {
        Self {
            id: id.into(),
            layer: spec.layer.clone(),
            neuron_type: spec.neuron_type.clone(),
            activation_function: spec.activation_function.clone(),
            output: spec.output.unwrap_or(DEFAULT_OUTPUT),
            weight: spec.weight.unwrap_or(DEFAULT_WEIGHT),
        }
    }
}

/// A directed `CONNECTED_TO` relationship between two neurons
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Connection {
    pub from: String,
    pub to: String,
}

// ============================================================================
// Structure description
// ============================================================================

/// Per-neuron fields of a structure description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeuronSpec {
    pub layer: Layer,
    #[serde(rename = "type")]
    pub neuron_type: NeuronType,
    pub activation_function: String,
    #[serde(default)]
    pub output: Option<f64>,
    #[serde(default)]
    pub weight: Option<f64>,
}

impl NeuronSpec {
    pub fn new(
        layer: impl Into<Layer>,
        neuron_type: impl Into<NeuronType>,
        activation_function: impl Into<String>,
    ) -> Self {
        Self {
            layer: layer.into(),
            neuron_type: neuron_type.into(),
            activation_function: activation_function.into(),
            output: None,
            weight: None,
        }
    }

    pub fn with_output(mut self, output: f64) -> Self {
        self.output = Some(output);
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }
}

/// Mapping from neuron id to its fields. Ordered, so writes happen by ascending id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetworkStructure {
    pub neurons: BTreeMap<String, NeuronSpec>,
}

impl NetworkStructure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, id: impl Into<String>, spec: NeuronSpec) -> Self {
        self.neurons.insert(id.into(), spec);
        self
    }

    pub fn len(&self) -> usize {
        self.neurons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neurons.is_empty()
    }

    /// Nodes to create, one per entry.
    pub fn to_neurons(&self) -> Vec<Neuron> {
        self.neurons
            .iter()
            .map(|(id, spec)| Neuron::from_spec(id.clone(), spec))
            .collect()
    }

    /// Load a structure description from a `.json`, `.yaml` or `.yml` file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read structure file {}", path.display()))?;

        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        if is_json {
            serde_json::from_str(&contents)
                .with_context(|| format!("Invalid JSON structure in {}", path.display()))
        } else {
            serde_yaml::from_str(&contents)
                .with_context(|| format!("Invalid YAML structure in {}", path.display()))
        }
    }
}
