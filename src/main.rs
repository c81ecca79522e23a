use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use answerchain::corpus::Corpus;
use answerchain::{Config, ResolutionPipeline};

#[derive(Parser)]
#[command(name = "answerchain")]
#[command(about = "Question answering with local, LLM and web fallbacks", long_about = None)]
struct Cli {
    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
        /// Host address to bind to
        #[arg(long)]
        host: Option<String>,
        /// Path to the question/answer corpus
        #[arg(long)]
        corpus: Option<PathBuf>,
    },
    /// Resolve a single question and print the answer
    Ask {
        /// Question text
        question: String,
        /// Path to the question/answer corpus
        #[arg(long)]
        corpus: Option<PathBuf>,
    },
    /// Show version information
    Version,
}

fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match format {
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is normal in production.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(cli.log_format);

    let command = cli.command.unwrap_or(Commands::Serve {
        port: None,
        host: None,
        corpus: None,
    });

    match command {
        Commands::Version => {
            println!("answerchain {}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Serve { port, host, corpus } => {
            let mut config = Config::load().with_context(|| "Failed to load configuration")?;
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(path) = corpus {
                config.corpus.path = path;
            }

            let pipeline = build_pipeline(&config)?;
            info!(stages = ?pipeline.stage_names(), "Pipeline ready");
            answerchain::server::serve(&config.server, pipeline)
                .await
                .with_context(|| "Server failed")?;
        }
        Commands::Ask { question, corpus } => {
            let mut config = Config::load().with_context(|| "Failed to load configuration")?;
            if let Some(path) = corpus {
                config.corpus.path = path;
            }

            let pipeline = build_pipeline(&config)?;
            let resolution = pipeline.resolve(&question).await;
            println!("{}", resolution.answer);
        }
    }

    Ok(())
}

fn build_pipeline(config: &Config) -> Result<ResolutionPipeline> {
    let corpus = Corpus::load_or_empty(&config.corpus.path);
    ResolutionPipeline::from_config(config, corpus).with_context(|| "Failed to build pipeline")
}
