//! graph-rank: shortest routes and centrality rankings for edge-list graphs.
//!
//! Edge lists are whitespace-separated label pairs, one edge per pair.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use graph_rank_core::Metric;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod load;
mod settings;

use settings::Settings;

#[derive(Parser)]
#[command(name = "graph-rank")]
#[command(version)]
#[command(
    about = "Shortest routes and centrality rankings for undirected graphs",
    long_about = None
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output as JSON instead of formatted text
    #[arg(long, global = true)]
    json: bool,

    /// Vertex capacity for loaded graphs (default: distinct labels in the file)
    #[arg(long, global = true)]
    capacity: Option<usize>,

    /// TOML settings file
    #[arg(long, global = true, env = "GRAPH_RANK_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Shortest route between two vertices
    Path {
        /// Edge-list file
        edges: PathBuf,
        from: String,
        to: String,
    },

    /// Rank vertices by a centrality metric
    Rank {
        /// Edge-list file
        edges: PathBuf,

        /// closeness or betweenness
        #[arg(short, long, default_value = "betweenness")]
        metric: Metric,

        /// Rows to show (overrides top_n from the settings file)
        #[arg(short, long)]
        top: Option<usize>,
    },

    /// Highest vertex by each metric, for one or more edge-list files
    Summary {
        #[arg(required = true)]
        edges: Vec<PathBuf>,
    },

    /// Print the adjacency matrix and edge list
    Show {
        /// Edge-list file
        edges: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("GRAPH_RANK_LOG")
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(filter)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let top = match &cli.command {
        Commands::Rank { top, .. } => *top,
        _ => None,
    };
    let settings =
        Settings::load(cli.config.as_deref())?.with_overrides(cli.capacity, top, cli.json)?;
    tracing::debug!(?settings, "effective settings");

    match cli.command {
        Commands::Path { edges, from, to } => {
            commands::emit(&settings, &commands::path(&settings, &edges, &from, &to)?)
        }
        Commands::Rank { edges, metric, .. } => {
            commands::emit(&settings, &commands::rank(&settings, &edges, metric)?)
        }
        Commands::Summary { edges } => {
            commands::emit(&settings, &commands::summary(&settings, &edges)?)
        }
        Commands::Show { edges } => commands::emit(&settings, &commands::show(&settings, &edges)?),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}
