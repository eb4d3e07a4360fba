//! # SiteChat — website chatbot backend
//!
//! Indexes a small static site into memory and answers chat queries over HTTP.
//!
//! Usage:
//!   sitechat serve                       # Index pages and start the gateway (port 3000)
//!   sitechat serve --port 8080           # Custom port
//!   sitechat index                       # Print extracted page records as JSON
//!   sitechat ask "How do I contact you?" # Answer one query from the terminal

use anyhow::Result;
use clap::{Parser, Subcommand};
use sitechat_core::SiteChatConfig;
use sitechat_knowledge::{Indexer, Matcher};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sitechat", version, about = "Retrieval-augmented website chatbot backend")]
struct Cli {
    /// Config file (default: $SITECHAT_CONFIG or ./sitechat.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Index the configured pages and start the HTTP gateway
    Serve {
        /// Listen port (overrides config and $PORT)
        #[arg(short, long)]
        port: Option<u16>,
        /// Listen host (overrides config)
        #[arg(long)]
        host: Option<String>,
    },
    /// Run one indexing pass and print the records
    Index,
    /// Answer a single query against a fresh index
    Ask {
        /// Query text
        #[arg(required = true)]
        query: Vec<String>,
        /// Also print the built context and matched pages
        #[arg(long)]
        show_context: bool,
    },
}

fn init_logging(verbose: bool, json: bool) {
    let filter = if verbose {
        "sitechat=debug,sitechat_core=debug,sitechat_knowledge=debug,sitechat_gateway=debug,tower_http=debug"
    } else {
        "sitechat=info,sitechat_knowledge=info,sitechat_gateway=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<SiteChatConfig> {
    let mut config = match path {
        Some(p) => SiteChatConfig::load_from(p)?,
        None => SiteChatConfig::load()?,
    };
    config.apply_env();
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_json);

    let mut config = load_config(cli.config.as_ref())?;

    match cli.command {
        Command::Serve { port, host } => {
            if let Some(port) = port {
                config.gateway.port = port;
            }
            if let Some(host) = host {
                config.gateway.host = host;
            }
            sitechat_gateway::start(config).await?;
        }
        Command::Index => {
            let indexer = Indexer::from_config(&config.site)?;
            let table = indexer.build();
            println!("{}", serde_json::to_string_pretty(&table)?);
        }
        Command::Ask { query, show_context } => {
            let indexer = Indexer::from_config(&config.site)?;
            let table = indexer.build();
            let matcher = Matcher::new(config.site.fallback_context.clone());
            let response = matcher.respond(&query.join(" "), &table)?;
            if show_context {
                println!("Sources: {}", response.sources.join(", "));
                println!("{}\n", response.context);
            }
            println!("{}", response.answer);
        }
    }

    Ok(())
}
