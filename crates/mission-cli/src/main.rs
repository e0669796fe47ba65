mod cmd_config;
mod cmd_doc;
mod cmd_feed;
mod cmd_kanban;
mod cmd_memories;
mod cmd_query;
mod cmd_search;
mod cmd_session;
mod cmd_stats;
mod cmd_upcoming;
mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mission_external::{CliDocumentSearcher, CliJobLister, NoMemoryStore};
use mission_views::Dashboard;

const LOG_ENV: &str = "MISSION_LOG";

#[derive(Parser)]
#[command(
    name = "mission",
    version,
    about = "Activity feed, upcoming jobs and task board for an agent workspace"
)]
struct Cli {
    /// Config file (default: <config dir>/mission/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Recent activity and chat sessions, newest first
    Feed {
        /// Maximum number of items
        #[arg(long, default_value_t = 50)]
        limit: usize,
        /// Only show one source: activity or session
        #[arg(long)]
        source: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Next scheduled cron jobs
    Upcoming {
        #[arg(long, default_value_t = mission_views::UPCOMING_LIMIT)]
        limit: usize,
        #[arg(long)]
        json: bool,
    },
    /// Task board built from the status and checklist documents
    Kanban {
        #[arg(long)]
        json: bool,
    },
    /// Full-text search over notes
    Search {
        /// Query text
        query: String,
        #[arg(long, default_value_t = 20)]
        limit: usize,
        #[arg(long)]
        json: bool,
    },
    /// Stored memories, newest first, or similar to a query
    Memories {
        /// Memory type: personal or document
        #[arg(long = "type")]
        memory_type: Option<String>,
        /// Similarity search instead of listing
        #[arg(long)]
        query: Option<String>,
        /// List memories awaiting review
        #[arg(long, conflicts_with_all = ["memory_type", "query"])]
        pending: bool,
        #[arg(long, default_value_t = 50)]
        limit: usize,
        #[arg(long)]
        json: bool,
    },
    /// Show a chat session transcript
    Session {
        /// Session id (file name without .jsonl)
        id: String,
        #[arg(long)]
        json: bool,
    },
    /// Show a note document (path, or qmd://obsidian/ URI from search)
    Doc {
        path: String,
        #[arg(long)]
        json: bool,
    },
    /// Source and memory counts
    Stats {
        #[arg(long)]
        json: bool,
    },
    /// Run any view by name and print it as JSON
    Query {
        /// feed, upcoming, kanban, search, memories, session, document, stats
        view: String,
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long)]
        source: Option<String>,
        #[arg(long = "type")]
        memory_type: Option<String>,
        #[arg(long)]
        query: Option<String>,
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        path: Option<String>,
        /// Memories view: pending review only
        #[arg(long)]
        pending: bool,
    },
    /// Configuration
    Config {
        #[command(subcommand)]
        cmd: cmd_config::ConfigCmd,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn dashboard(cfg: &config::Config) -> Dashboard {
    Dashboard::new(
        cfg.sources.clone(),
        CliJobLister::new(cfg.cron_program.clone()),
        CliDocumentSearcher::new(cfg.search_program.clone()),
        NoMemoryStore,
    )
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref())?;

    let dash = dashboard(&cfg);
    let rt = tokio::runtime::Runtime::new()?;

    match cli.cmd {
        Command::Feed {
            limit,
            source,
            json,
        } => cmd_feed::execute(&dash, limit, source.as_deref(), json),
        Command::Upcoming { limit, json } => rt.block_on(cmd_upcoming::execute(&dash, limit, json)),
        Command::Kanban { json } => cmd_kanban::execute(&dash, json),
        Command::Search { query, limit, json } => {
            rt.block_on(cmd_search::execute(&dash, &query, limit, json))
        }
        Command::Memories {
            memory_type,
            query,
            pending,
            limit,
            json,
        } => rt.block_on(cmd_memories::execute(&cmd_memories::MemoriesParams {
            dash: &dash,
            memory_type: memory_type.as_deref(),
            query: query.as_deref(),
            pending,
            limit,
            json,
        })),
        Command::Session { id, json } => cmd_session::execute(&dash, &id, json),
        Command::Doc { path, json } => cmd_doc::execute(&dash, &path, json),
        Command::Stats { json } => rt.block_on(cmd_stats::execute(&dash, json)),
        Command::Query {
            view,
            limit,
            source,
            memory_type,
            query,
            id,
            path,
            pending,
        } => {
            let params = mission_views::QueryParams {
                limit,
                source,
                memory_type,
                query,
                id,
                path,
                pending,
            };
            rt.block_on(cmd_query::execute(&dash, &view, &params))
        }
        Command::Config { cmd } => cmd_config::run(cmd, &cfg),
    }
}
