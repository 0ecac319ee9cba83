//! CLI entry point for folio-rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_rs::commands::show::ShowFormat;
use folio_rs::helpers::ArchiveQuery;

#[derive(Parser)]
#[command(name = "folio-rs")]
#[command(version)]
#[command(about = "Reader and local server for manifest-driven markdown blogs", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// List posts or categories
    #[command(alias = "ls")]
    List {
        /// Type of content to list (post, category)
        #[arg(default_value = "post")]
        r#type: String,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Search the archive
    Search {
        /// Free-text query matched against title, summary, category and slug
        query: Option<String>,

        /// Only posts in this category
        #[arg(short = 'C', long)]
        category: Option<String>,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single post
    Show {
        /// Category name
        category: String,

        /// Post filename without extension
        slug: String,

        /// Print rendered HTML
        #[arg(long, conflicts_with_all = ["toc", "json"])]
        html: bool,

        /// Print the table of contents
        #[arg(long, conflicts_with = "json")]
        toc: bool,

        /// Print the post record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start a local server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "folio_rs=debug,info"
    } else {
        "folio_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            folio_rs::commands::init::init_site(&target_dir)?;
            println!("Initialized site in {:?}", target_dir);
        }

        Commands::List { r#type, json } => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            folio_rs::commands::list::run(&folio, &r#type, json).await?;
        }

        Commands::Search {
            query,
            category,
            json,
        } => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            let query = ArchiveQuery { q: query, category };
            folio_rs::commands::search::run(&folio, &query, json).await?;
        }

        Commands::Show {
            category,
            slug,
            html,
            toc,
            json,
        } => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            let format = if html {
                ShowFormat::Html
            } else if toc {
                ShowFormat::Toc
            } else if json {
                ShowFormat::Json
            } else {
                ShowFormat::Markdown
            };
            folio_rs::commands::show::run(&folio, &category, &slug, format).await?;
        }

        Commands::Server { port, ip, open } => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            folio_rs::server::start(&folio, &ip, port, open).await?;
        }

        Commands::Version => {
            println!("folio-rs version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
