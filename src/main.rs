//! Graph NN - command line
//!
//! Builds, trains and inspects a neural network stored in Neo4j.

use anyhow::Result;
use clap::{Parser, Subcommand};
use graph_nn::network::{ExecutionResult, NetworkStructure};
use graph_nn::Config;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "graph-nn")]
#[command(about = "Neural network simulated as Neo4j graph state")]
struct Cli {
    /// Path to the YAML config file
    #[arg(short, long, env = "GRAPH_NN_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create one neuron per entry of a JSON/YAML structure file
    Create {
        /// Structure file (neuron id → fields)
        structure: PathBuf,
    },

    /// Connect two existing neurons
    Connect { from: String, to: String },

    /// Propagate outputs input → hidden → output
    Forward,

    /// Adjust weights output → hidden → input
    Backward {
        /// Learning rate (defaults to the configured one)
        #[arg(short, long, allow_negative_numbers = true)]
        learning_rate: Option<f64>,
    },

    /// Alternate forward and backward passes
    Train {
        #[arg(short, long)]
        epochs: Option<usize>,

        #[arg(short, long, allow_negative_numbers = true)]
        learning_rate: Option<f64>,
    },

    /// Print every neuron and connection as JSON
    Inspect,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,graph_nn=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config::from_yaml_and_env(cli.config.as_deref())?;
    let network = graph_nn::connect(&config).await?;
    tracing::info!("Connected to Neo4j at {}", config.neo4j_uri);

    let record = match cli.command {
        Commands::Create { structure } => {
            let structure = NetworkStructure::from_path(&structure)?;
            ExecutionResult::from(network.create_network(&structure).await)
        }
        Commands::Connect { from, to } => ExecutionResult::from(network.connect(&from, &to).await),
        Commands::Forward => ExecutionResult::from(network.forward_pass().await),
        Commands::Backward { learning_rate } => {
            let lr = learning_rate.unwrap_or(config.engine.learning_rate);
            ExecutionResult::from(network.backward_pass(lr).await)
        }
        Commands::Train {
            epochs,
            learning_rate,
        } => {
            let epochs = epochs.unwrap_or(config.engine.epochs);
            let lr = learning_rate.unwrap_or(config.engine.learning_rate);
            match network.train(epochs, lr).await {
                Ok(report) => {
                    tracing::info!(
                        "Training complete: {} epochs at lr={}",
                        report.epochs_completed,
                        report.learning_rate
                    );
                    println!("{}", serde_json::to_string(&report)?);
                    return Ok(());
                }
                Err(e) => {
                    tracing::warn!(
                        "Training stopped after {} epoch(s)",
                        e.report.epochs_completed
                    );
                    ExecutionResult::from(Err(e.source))
                }
            }
        }
        Commands::Inspect => {
            let snapshot = serde_json::json!({
                "neurons": network.neurons().await?,
                "connections": network.connections().await?,
            });
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
            return Ok(());
        }
    };

    println!("{}", serde_json::to_string(&record)?);

    if !record.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
