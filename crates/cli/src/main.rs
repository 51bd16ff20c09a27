//! ragent CLI — the main entry point.
//!
//! Commands:
//! - `init`     — Write the default config file
//! - `chat`     — Plain system + user exchange, no tools
//! - `ideas`    — Structured (JSON schema) answer decoded into article ideas
//! - `tools`    — Tool-calling exchange with the user-profile tools
//! - `workflow` — Order workflow driven by the order tools
//! - `rag`      — Index a document folder and answer questions from it
//! - `status`   — Show the effective configuration

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod scenarios;

#[derive(Parser)]
#[command(
    name = "ragent",
    about = "ragent — tool-calling agents and retrieval-augmented answers",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// API key for the model provider (overrides the config file)
    #[arg(long, global = true, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the default configuration file
    Init,

    /// Send one message to the model, without tools
    Chat {
        /// The message to send
        message: Option<String>,
    },

    /// Ask for article ideas as structured JSON
    Ideas {
        /// The request to send
        message: Option<String>,
    },

    /// Let the model call the user-profile tools before answering
    Tools {
        /// The question to ask
        message: Option<String>,
    },

    /// Run order requests through the order workflow tools
    Workflow {
        /// One request per argument; defaults to the two demo requests
        messages: Vec<String>,
    },

    /// Answer questions from a folder of documents
    Rag {
        /// Folder to index (defaults to `knowledge.documents_dir`)
        #[arg(short, long)]
        docs: Option<PathBuf>,

        /// Use the local hashing embedder instead of the provider
        #[arg(long)]
        hashing: bool,

        /// Let the model query the knowledge base as a tool instead of
        /// grounding every question up front
        #[arg(long)]
        as_tool: bool,

        /// Questions to answer; defaults to the demo questions
        questions: Vec<String>,
    },

    /// Show the effective configuration
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    let api_key = cli.api_key;
    match cli.command {
        Commands::Init => commands::init::run().await?,
        Commands::Chat { message } => commands::chat::run(api_key, message).await?,
        Commands::Ideas { message } => commands::ideas::run(api_key, message).await?,
        Commands::Tools { message } => commands::tools::run(api_key, message).await?,
        Commands::Workflow { messages } => commands::workflow::run(api_key, messages).await?,
        Commands::Rag {
            docs,
            hashing,
            as_tool,
            questions,
        } => commands::rag::run(api_key, docs, hashing, as_tool, questions).await?,
        Commands::Status => commands::status::run(api_key).await?,
    }

    Ok(())
}
