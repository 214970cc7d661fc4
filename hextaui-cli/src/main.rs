//! HextaUI - serve and inspect the component catalog
//!
//! Main entry point: `hextaui serve` runs the markdown/JSON endpoints,
//! `hextaui catalog ...` works on the same registry from the terminal.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use hextaui_core::config::SiteConfig;
use hextaui_core::server;

mod catalog_cli;

/// Log levels
#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Parser, Debug)]
#[clap(
    name = "hextaui",
    about = "Serve and inspect the HextaUI component catalog",
    version
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,

    /// Set log level
    #[clap(long, default_value = "info", global = true)]
    log_level: LogLevel,

    /// Emit logs as JSON lines
    #[clap(long, global = true)]
    log_json: bool,

    /// Site configuration file (defaults to ./hextaui.yaml if present)
    #[clap(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the catalog over HTTP
    Serve {
        /// Address to listen on (e.g., 0.0.0.0:8080)
        #[clap(long)]
        bind: Option<String>,

        /// Public site URL used in generated links
        #[clap(long)]
        base_url: Option<String>,

        /// Directory containing catalog YAML files
        #[clap(long)]
        data_dir: Option<PathBuf>,

        /// Cache lifetime for markdown responses, in seconds
        #[clap(long)]
        cache_max_age: Option<u64>,
    },

    /// Browse, export and validate catalog entries
    Catalog {
        #[clap(subcommand)]
        command: catalog_cli::CatalogSubcommand,
    },
}

/// Initialize tracing with CLI flags
///
/// Logs always go to stderr so that `catalog markdown` output on stdout
/// stays clean.
fn initialize_tracing(log_level: &LogLevel, json: bool) {
    let level = log_level.to_filter_directive();
    let mut filter = EnvFilter::new(level);

    // Request traces from tower-http are only interesting at debug and below
    let http_directive = match log_level {
        LogLevel::Debug | LogLevel::Trace => format!("tower_http={level}"),
        _ => "tower_http=warn".to_string(),
    };
    if let Ok(parsed) = http_directive.parse() {
        filter = filter.add_directive(parsed);
    }

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_tracing(&cli.log_level, cli.log_json);

    let config = SiteConfig::load(cli.config.as_deref())?;
    debug!("Resolved site config: {:?}", config);

    match cli.command {
        Command::Serve {
            bind,
            base_url,
            data_dir,
            cache_max_age,
        } => {
            let config = apply_serve_flags(config, bind, base_url, data_dir, cache_max_age);
            server::serve(config).await
        }
        Command::Catalog { command } => command.execute(&config),
    }
}

/// CLI flags take precedence over file and environment configuration
fn apply_serve_flags(
    mut config: SiteConfig,
    bind: Option<String>,
    base_url: Option<String>,
    data_dir: Option<PathBuf>,
    cache_max_age: Option<u64>,
) -> SiteConfig {
    if let Some(bind) = bind {
        config.bind = bind;
    }
    if let Some(base_url) = base_url {
        config.base_url = base_url;
    }
    if let Some(data_dir) = data_dir {
        config.data_dir = Some(data_dir);
    }
    if let Some(age) = cache_max_age {
        config.cache_max_age = age;
    }
    config
}
