//! # Presentify CLI
//!
//! Command-line interface for generating, serving and exporting slide decks.
//!
//! ## Usage
//!
//! ```bash
//! # Run the editing API
//! presentify serve --listen 127.0.0.1:8080
//!
//! # Generate a deck and save it as PowerPoint
//! presentify generate --topic "Rust ownership" --slides 5 --out rust.pptx
//!
//! # Export a saved deck (JSON array of slides)
//! presentify export --deck deck.json --out deck.pptx
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use presentify::{
    Deck, PresentifyError,
    backend::{DEFAULT_BACKEND_URL, GenerateRequest, HttpGenerator, generate_deck},
    export::PptxWriter,
    server::{self, ServerConfig},
};

/// Presentify - AI-assisted slide deck editor
#[derive(Parser, Debug)]
#[command(name = "presentify")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the editing API over HTTP
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:8080")]
        listen: String,

        /// Generation backend endpoint
        #[arg(long, default_value = DEFAULT_BACKEND_URL)]
        backend: String,
    },

    /// Generate a deck from a topic and export it
    Generate {
        /// Presentation topic
        #[arg(long)]
        topic: String,

        /// Number of slides (1-50)
        #[arg(long, default_value = "5")]
        slides: String,

        /// Output .pptx file
        #[arg(long, value_name = "FILE")]
        out: PathBuf,

        /// Generation backend endpoint
        #[arg(long, default_value = DEFAULT_BACKEND_URL)]
        backend: String,
    },

    /// Export a deck saved as JSON to PowerPoint
    Export {
        /// Deck JSON file
        #[arg(long, value_name = "FILE")]
        deck: PathBuf,

        /// Output .pptx file
        #[arg(long, value_name = "FILE")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli.command).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn run(command: Commands) -> Result<(), PresentifyError> {
    match command {
        Commands::Serve { listen, backend } => {
            server::serve(ServerConfig {
                listen_addr: listen,
                backend_url: backend,
            })
            .await
        }
        Commands::Generate {
            topic,
            slides,
            out,
            backend,
        } => {
            let request = GenerateRequest::from_input(topic, &slides)?;
            let generator = HttpGenerator::new(backend)?;
            let deck = generate_deck(&generator, &request).await?;
            PptxWriter::new().title(&request.text).save_deck(&deck, &out)?;
            println!("Saved {} slides to {}", deck.len(), out.display());
            Ok(())
        }
        Commands::Export { deck, out } => {
            let json = std::fs::read_to_string(&deck)?;
            let parsed: Deck = serde_json::from_str(&json).map_err(|e| {
                PresentifyError::InvalidRequest(format!("{}: {}", deck.display(), e))
            })?;
            parsed.validate()?;
            info!(path = %deck.display(), slides = parsed.len(), "loaded deck");
            PptxWriter::new().save_deck(&parsed, &out)?;
            println!("Saved {} slides to {}", parsed.len(), out.display());
            Ok(())
        }
    }
}
