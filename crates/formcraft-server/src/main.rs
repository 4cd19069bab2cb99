//! formcraft CLI
//!
//! Serves the form API and manages form definitions from the command line.

use std::io::Read;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use formcraft_core::FormSchemaManager;
use formcraft_forms::render_page;
use formcraft_server::commands::{format_listing, parse_new_form};
use formcraft_server::config::{
    DEFAULT_BIND, DEFAULT_DATABASE_URL, DEFAULT_MAX_BODY_BYTES, DEFAULT_MAX_CONNECTIONS,
};
use formcraft_server::{build_router, http, ServerConfig};
use formcraft_sqlite::SqliteFormStore;

/// Dynamic form definitions over SQLite.
#[derive(Parser)]
#[command(name = "formcraft")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Database URL.
    #[arg(short, long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    database: String,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database tables.
    Init,

    /// Run the HTTP server.
    Serve {
        /// Address to listen on.
        #[arg(short, long, env = "FORMCRAFT_BIND", default_value = DEFAULT_BIND)]
        bind: SocketAddr,

        /// Database pool size.
        #[arg(long, default_value_t = DEFAULT_MAX_CONNECTIONS)]
        max_connections: u32,

        /// Largest accepted request body in bytes.
        #[arg(long, default_value_t = DEFAULT_MAX_BODY_BYTES)]
        max_body_bytes: usize,
    },

    /// Create a form from a JSON document.
    Create {
        /// JSON file, or `-` for stdin.
        #[arg(short, long)]
        file: PathBuf,
    },

    /// List all forms, newest first.
    List,

    /// Print a form definition as JSON.
    Show {
        /// Form slug.
        slug: String,
    },

    /// Print a form as an HTML page.
    Render {
        /// Form slug.
        slug: String,

        /// URL the form posts to (defaults to `/forms/<slug>`).
        #[arg(long)]
        action: Option<String>,
    },
}

fn read_input(file: &Path) -> anyhow::Result<String> {
    if file.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading form JSON from stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so command output can be piped.
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let max_connections = match &cli.command {
        Commands::Serve {
            max_connections, ..
        } => *max_connections,
        _ => DEFAULT_MAX_CONNECTIONS,
    };
    let store = SqliteFormStore::connect(&cli.database, max_connections)
        .await
        .with_context(|| format!("opening {}", cli.database))?;
    let manager = FormSchemaManager::new(store);

    match cli.command {
        Commands::Init => {
            info!(database = %cli.database, "Form tables ready");
        }

        Commands::Serve {
            bind,
            max_body_bytes,
            ..
        } => {
            let config = ServerConfig::default()
                .bind(bind)
                .max_body_bytes(max_body_bytes);
            let router = Arc::new(build_router(Arc::new(manager), &config));

            let listener = TcpListener::bind(config.bind)
                .await
                .with_context(|| format!("binding {}", config.bind))?;
            info!(addr = %config.bind, "Listening");

            tokio::select! {
                () = http::serve(listener, router, config.max_body_bytes) => {}
                _ = tokio::signal::ctrl_c() => info!("Shutting down"),
            }
        }

        Commands::Create { file } => {
            let json = read_input(&file)?;
            let input = parse_new_form(&json).context("parsing form JSON")?;
            let definition = manager.create_definition(input).await?;
            println!("{}", serde_json::to_string_pretty(&definition)?);
        }

        Commands::List => {
            let definitions = manager.list_definitions().await?;
            print!("{}", format_listing(&definitions));
        }

        Commands::Show { slug } => {
            let definition = manager.get_definition_by_slug(&slug).await?;
            println!("{}", serde_json::to_string_pretty(&definition)?);
        }

        Commands::Render { slug, action } => {
            let definition = manager.get_definition_by_slug(&slug).await?;
            let action = action.unwrap_or_else(|| format!("/forms/{slug}"));
            println!("{}", render_page(&definition, &action));
        }
    }

    Ok(())
}
