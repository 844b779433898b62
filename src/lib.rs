//! Graph NN
//!
//! A small feed-forward neural network that lives entirely as graph state:
//! - Neo4j nodes for neurons, `CONNECTED_TO` relationships for connections
//! - Network materialization from a structure description
//! - Forward propagation and a simplified backward weight update as bulk Cypher writes

pub mod neo4j;
pub mod network;

use anyhow::Result;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

use network::{Atomicity, EngineConfig, NeuralNetwork, Reduction};

// ============================================================================
// YAML config structs (deserialization targets)
// ============================================================================

/// Top-level YAML configuration file structure
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub neo4j: Neo4jYamlConfig,
    pub training: EngineConfig,
}

/// Neo4j configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Neo4jYamlConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
}

impl Default for Neo4jYamlConfig {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".into(),
            user: "neo4j".into(),
            password: "neo4j".into(),
        }
    }
}

// ============================================================================
// Runtime config (what the application actually uses)
// ============================================================================

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub neo4j_uri: String,
    pub neo4j_user: String,
    pub neo4j_password: String,
    pub engine: EngineConfig,
}

impl Config {
    /// Load configuration from environment variables only.
    /// Equivalent to from_yaml_and_env(None).
    pub fn from_env() -> Result<Self> {
        Self::from_yaml_and_env(None)
    }

    /// Load configuration from an optional YAML file, then override with env vars.
    ///
    /// Priority: env var > YAML > default
    ///
    /// If `yaml_path` is None, tries "config.yaml" in CWD. If the file doesn't
    /// exist, falls back to pure env var / defaults.
    pub fn from_yaml_and_env(yaml_path: Option<&Path>) -> Result<Self> {
        let yaml = Self::load_yaml(yaml_path);
        let mut engine = yaml.training;

        if let Some(lr) = env_parse::<f64>("NN_LEARNING_RATE")? {
            engine.learning_rate = lr;
        }
        if let Some(epochs) = env_parse::<usize>("NN_EPOCHS")? {
            engine.epochs = epochs;
        }
        if let Some(atomicity) = env_parse::<Atomicity>("NN_ATOMICITY")? {
            engine.atomicity = atomicity;
        }
        if let Some(reduction) = env_parse::<Reduction>("NN_REDUCTION")? {
            engine.reduction = reduction;
        }

        Ok(Self {
            neo4j_uri: std::env::var("NEO4J_URI").unwrap_or(yaml.neo4j.uri),
            neo4j_user: std::env::var("NEO4J_USER").unwrap_or(yaml.neo4j.user),
            neo4j_password: std::env::var("NEO4J_PASSWORD").unwrap_or(yaml.neo4j.password),
            engine,
        })
    }

    /// Try to load and parse a YAML config file. Returns defaults on any failure.
    fn load_yaml(yaml_path: Option<&Path>) -> YamlConfig {
        let default_path = Path::new("config.yaml");
        let path = yaml_path.unwrap_or(default_path);

        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_yaml::from_str(&contents) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}. Using defaults.", path.display(), e);
                    YamlConfig::default()
                }
            },
            Err(_) => {
                tracing::debug!(
                    "No config file at {}, using env vars / defaults",
                    path.display()
                );
                YamlConfig::default()
            }
        }
    }
}

/// Parse an optional env var, failing loudly on a value that does not parse.
fn env_parse<T>(var: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(var) {
        Ok(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", var, e)),
        Err(_) => Ok(None),
    }
}

/// Connect to Neo4j and open a network session with the configured settings.
pub async fn connect(config: &Config) -> Result<NeuralNetwork> {
    let client = neo4j::Neo4jClient::new(
        &config.neo4j_uri,
        &config.neo4j_user,
        &config.neo4j_password,
    )
    .await?;

    Ok(NeuralNetwork::new(Arc::new(client), config.engine.clone()))
}

// ============================================================================
// Tests
// ============================================================================
