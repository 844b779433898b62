//! Neo4j client holding the network graph

use super::cypher;
use super::traits::{BatchError, GraphWrite, NeuronStore, StoreError};
use crate::network::models::{Connection, Layer, Neuron, NeuronType};
use anyhow::{Context, Result};
use async_trait::async_trait;
use neo4rs::{query, Graph};
use std::sync::Arc;
use tracing::debug;

/// Client for Neo4j operations
pub struct Neo4jClient {
    graph: Arc<Graph>,
}

impl Neo4jClient {
    /// Create a new Neo4j client
    pub async fn new(uri: &str, user: &str, password: &str) -> Result<Self> {
        let graph = Graph::new(uri, user, password)
            .await
            .context("Failed to connect to Neo4j")?;

        // The pool connects lazily; one round trip surfaces a dead server here
        graph
            .run(query("RETURN 1"))
            .await
            .with_context(|| format!("Neo4j unreachable at {}", uri))?;

        let client = Self {
            graph: Arc::new(graph),
        };

        // Initialize schema
        client.init_schema().await?;

        Ok(client)
    }

    /// Initialize the graph schema with constraints and indexes
    async fn init_schema(&self) -> Result<()> {
        let constraints =
            vec!["CREATE CONSTRAINT neuron_id IF NOT EXISTS FOR (n:Neuron) REQUIRE n.id IS UNIQUE"];

        let indexes = vec!["CREATE INDEX neuron_type IF NOT EXISTS FOR (n:Neuron) ON (n.type)"];

        for constraint in constraints {
            if let Err(e) = self.graph.run(query(constraint)).await {
                tracing::warn!("Constraint may already exist: {}", e);
            }
        }

        for index in indexes {
            if let Err(e) = self.graph.run(query(index)).await {
                tracing::warn!("Index may already exist: {}", e);
            }
        }

        Ok(())
    }

    fn node_to_neuron(node: &neo4rs::Node) -> Result<Neuron, StoreError> {
        let decode = |field: &str, e: &dyn std::fmt::Display| {
            StoreError::Decode(format!("Neuron.{}: {}", field, e))
        };

        let layer = match node.get::<i64>("layer") {
            Ok(i) => Layer::Index(i),
            Err(_) => Layer::Label(node.get::<String>("layer").map_err(|e| decode("layer", &e))?),
        };

        Ok(Neuron {
            id: node.get("id").map_err(|e| decode("id", &e))?,
            layer,
            neuron_type: NeuronType::from(
                node.get::<String>("type").map_err(|e| decode("type", &e))?,
            ),
            activation_function: node.get("activation_function").unwrap_or_default(),
            output: node.get("output").map_err(|e| decode("output", &e))?,
            weight: node.get("weight").map_err(|e| decode("weight", &e))?,
        })
    }
}

#[async_trait]
impl NeuronStore for Neo4jClient {
    async fn apply(&self, writes: &[GraphWrite]) -> Result<(), BatchError> {
        if writes.is_empty() {
            return Ok(());
        }

        let mut txn = self
            .graph
            .start_txn()
            .await
            .map_err(|e| BatchError::outside(e.into()))?;

        for (index, write) in writes.iter().enumerate() {
            debug!("Executing write {}: {}", index, cypher::statement(write));
            let outcome = txn.run(cypher::to_query(write)).await;
            if let Err(e) = outcome {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::warn!("Rollback failed: {}", rollback_err);
                }
                return Err(BatchError::at(index, e.into()));
            }
        }

        txn.commit()
            .await
            .map_err(|e| BatchError::outside(e.into()))
    }

    async fn list_neurons(&self) -> Result<Vec<Neuron>, StoreError> {
        let q = query(
            r#"
            MATCH (n:Neuron)
            RETURN n
            ORDER BY n.id
            "#,
        );

        let mut result = self.graph.execute(q).await?;
        let mut neurons = Vec::new();
        while let Some(row) = result.next().await? {
            let node: neo4rs::Node = row
                .get("n")
                .map_err(|e| StoreError::Decode(e.to_string()))?;
            neurons.push(Self::node_to_neuron(&node)?);
        }
        Ok(neurons)
    }

    async fn get_neuron(&self, id: &str) -> Result<Option<Neuron>, StoreError> {
        let q = query(
            r#"
            MATCH (n:Neuron {id: $id})
            RETURN n
            "#,
        )
        .param("id", id);

        let mut result = self.graph.execute(q).await?;
        if let Some(row) = result.next().await? {
            let node: neo4rs::Node = row
                .get("n")
                .map_err(|e| StoreError::Decode(e.to_string()))?;
            Ok(Some(Self::node_to_neuron(&node)?))
        } else {
            Ok(None)
        }
    }

    async fn list_connections(&self) -> Result<Vec<Connection>, StoreError> {
        let q = query(cypher::LIST_CONNECTIONS);

        let mut result = self.graph.execute(q).await?;
        let mut connections = Vec::new();
        while let Some(row) = result.next().await? {
            connections.push(Connection {
                from: row
                    .get("source")
                    .map_err(|e| StoreError::Decode(e.to_string()))?,
                to: row
                    .get("target")
                    .map_err(|e| StoreError::Decode(e.to_string()))?,
            });
        }
        Ok(connections)
    }
}
