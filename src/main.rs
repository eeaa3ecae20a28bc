//! TextLens - Composite Text Analysis Service
//!
//! Entry point: runs the HTTP API, or analyzes a single text from the command
//! line and prints the JSON result.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use textlens_core::{
    api::{ApiServer, ApiServerConfig},
    AnalysisRequest, AnalysisService, TextLensConfig,
};
use tracing::{debug, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "textlens")]
#[command(about = "Grammar, sentiment, language and readability analysis", long_about = None)]
#[command(version)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    /// Path to a TOML configuration file
    #[arg(long, env = "TEXTLENS_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API (default)
    Serve {
        /// Listen address, overrides configuration
        #[arg(long)]
        addr: Option<String>,
    },

    /// Run a full analysis and print the result as JSON
    Analyze {
        /// Text to analyze
        text: String,
    },

    /// Detect the language of a text
    Language {
        /// Text to analyze
        text: String,
    },

    /// Print word/sentence counts and complexity of a text
    Semantic {
        /// Text to analyze
        text: String,
    },
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<TextLensConfig> {
    let config = match path {
        Some(path) => TextLensConfig::from_file(&path)?,
        None => TextLensConfig::from_env()?,
    };
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = match cli.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // Use the specified level for textlens, WARN for noisy external crates
    let filter = EnvFilter::new(format!(
        "textlens={level},textlens_core={level},tower_http={level},hyper=warn,reqwest=warn",
        level = level.as_str().to_lowercase()
    ));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr) // Write logs to stderr, not stdout
        .init();

    debug!("TextLens v{} starting...", env!("CARGO_PKG_VERSION"));

    let mut config = load_config(cli.config)?;

    match cli.command.unwrap_or(Commands::Serve { addr: None }) {
        Commands::Serve { addr } => {
            if let Some(addr) = addr {
                config.server.addr = addr
                    .parse()
                    .map_err(|e| anyhow::anyhow!("Invalid address '{}': {}", addr, e))?;
            }

            let service = Arc::new(AnalysisService::from_config(&config)?);
            let server = ApiServer::new(
                ApiServerConfig {
                    addr: config.server.addr,
                    sweep_interval: config.cache.sweep_interval,
                },
                service,
            );
            server.serve().await
        }
        Commands::Analyze { text } => {
            let service = AnalysisService::from_config(&config)?;
            let request = AnalysisRequest::new(text)?;
            let result = service.analyze_text(&request).await?;
            println!("{}", serde_json::to_string_pretty(&*result)?);
            Ok(())
        }
        Commands::Language { text } => {
            let service = AnalysisService::from_config(&config)?;
            let request = AnalysisRequest::new(text)?;
            println!("{}", service.detect_language(&request).await?);
            Ok(())
        }
        Commands::Semantic { text } => {
            let service = AnalysisService::from_config(&config)?;
            let request = AnalysisRequest::new(text)?;
            let metrics = service.analyze_semantics(&request).await?;
            println!("{}", serde_json::to_string_pretty(&metrics)?);
            Ok(())
        }
    }
}
