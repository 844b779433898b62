//! Graph-resident feed-forward network.
//!
//! Neurons are `(:Neuron)` nodes and connections are `CONNECTED_TO`
//! relationships. The engine never keeps a copy of the network in memory:
//!
//! ```text
//! NetworkStructure ──► create_network ──► (:Neuron) nodes
//!                      connect        ──► [:CONNECTED_TO] edges
//!                      forward_pass   ──► output  (input → hidden → output)
//!                      backward_pass  ──► weight  (output → hidden → input)
//! ```
//!
//! ## Modules
//!
//! - [`models`] - Neuron, NeuronSpec, NetworkStructure
//! - [`config`] - EngineConfig, Reduction, Atomicity
//! - [`engine`] - `NeuralNetwork` session context and write execution
//! - [`builder`], [`forward`], [`backward`], [`training`] - the operations
//! - [`result`] - Outcome, OperationError, ExecutionResult

pub mod backward;
pub mod builder;
pub mod config;
pub mod engine;
pub mod forward;
pub mod models;
pub mod result;
pub mod training;

pub use config::{Atomicity, EngineConfig, Reduction};
pub use engine::NeuralNetwork;
pub use models::{Connection, Layer, NetworkStructure, Neuron, NeuronSpec, NeuronType};
pub use result::{ErrorKind, ExecutionResult, FailureMode, Operation, OperationError, Outcome};
pub use training::{TrainingError, TrainingReport};
