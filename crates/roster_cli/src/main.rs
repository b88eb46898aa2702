//! Roster CLI
//!
//! Command-line front end over the roster controller: add, edit, search,
//! delete and XML exchange.

#[cfg(feature = "cli")]
use anyhow::{Context, Result};
#[cfg(feature = "cli")]
use clap::{Args, Parser, Subcommand};
#[cfg(feature = "cli")]
use roster_core::{PlayerController, PlayerId, RawFilter, RawPlayer, RosterConfig, UserError};
#[cfg(feature = "cli")]
use std::path::PathBuf;
#[cfg(feature = "cli")]
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[cfg(feature = "cli")]
const NO_MATCHES: &str = "No players found with the given criteria.";

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "roster")]
#[command(about = "Manage a football player roster", long_about = None)]
#[command(version)]
struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Database file (overrides the config file)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Add a new player
    Add(PlayerArgs),

    /// Replace every field of an existing player
    Update {
        id: i64,

        #[command(flatten)]
        player: PlayerArgs,
    },

    /// Delete one player by id
    Delete { id: i64 },

    /// Delete every player matching the criteria
    Remove(FilterArgs),

    /// Search players, one page at a time
    Search {
        #[command(flatten)]
        filter: FilterArgs,

        /// 1-based page number
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Rows per page (defaults to the configured size)
        #[arg(long)]
        page_size: Option<u32>,
    },

    /// Print the whole roster
    List,

    /// Export players to an XML file
    Export {
        /// Output XML file path
        #[arg(long)]
        out: PathBuf,

        /// Only export these ids, in this order
        #[arg(long = "id")]
        ids: Vec<i64>,
    },

    /// Import players from an XML file
    Import {
        /// Input XML file path
        #[arg(long)]
        r#in: PathBuf,

        /// Replace the roster instead of appending
        #[arg(long, default_value = "false")]
        replace: bool,
    },
}

#[cfg(feature = "cli")]
#[derive(Args)]
struct PlayerArgs {
    #[arg(long)]
    name: String,

    /// YYYY-MM-DD
    #[arg(long)]
    birth_date: String,

    #[arg(long)]
    team: String,

    #[arg(long)]
    city: String,

    #[arg(long)]
    squad: String,

    #[arg(long)]
    position: String,
}

#[cfg(feature = "cli")]
impl From<PlayerArgs> for RawPlayer {
    fn from(args: PlayerArgs) -> Self {
        RawPlayer {
            full_name: args.name,
            birth_date: args.birth_date,
            team: args.team,
            home_city: args.city,
            squad: args.squad,
            position: args.position,
        }
    }
}

#[cfg(feature = "cli")]
#[derive(Args)]
struct FilterArgs {
    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    birth_date: Option<String>,

    #[arg(long)]
    team: Option<String>,

    #[arg(long)]
    city: Option<String>,

    #[arg(long)]
    squad: Option<String>,

    #[arg(long)]
    position: Option<String>,
}

#[cfg(feature = "cli")]
impl From<FilterArgs> for RawFilter {
    fn from(args: FilterArgs) -> Self {
        RawFilter {
            full_name: args.name,
            birth_date: args.birth_date,
            team: args.team,
            home_city: args.city,
            squad: args.squad,
            position: args.position,
        }
    }
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("roster={log_level},roster_core={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let mut config = RosterConfig::from_env().context("Failed to load roster configuration")?;
    if let Some(db) = cli.db {
        config.database_path = db;
    }

    if let Err(err) = run(config, cli.command) {
        eprintln!("{}", err.message);
        std::process::exit(err.kind.exit_code());
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn run(config: RosterConfig, command: Commands) -> Result<(), UserError> {
    let mut controller = PlayerController::open(config)?;

    match command {
        Commands::Add(player) => {
            let stored = controller.add_player(&player.into())?;
            println!("Added {}", stored);
        }

        Commands::Update { id, player } => {
            let stored = controller.update_player(PlayerId(id), &player.into())?;
            println!("Updated {}", stored);
        }

        Commands::Delete { id } => {
            controller.remove_player(PlayerId(id))?;
            println!("Deleted player #{}", id);
        }

        Commands::Remove(filter) => {
            let count = controller.remove_players(&filter.into())?;
            if count == 0 {
                println!("{}", NO_MATCHES);
            } else {
                println!("Deleted {} player(s)", count);
            }
        }

        Commands::Search { filter, page, page_size } => {
            let page_size = page_size.unwrap_or(controller.config().default_page_size);
            let page = controller.search_players(&filter.into(), page, page_size)?;

            if page.total == 0 {
                println!("{}", NO_MATCHES);
                return Ok(());
            }
            for stored in &page.items {
                println!("{}", stored);
            }
            println!(
                "Page {}/{} ({} matching players)",
                page.page,
                page.total_pages(),
                page.total
            );
        }

        Commands::List => {
            let players = controller.list_players()?;
            if players.is_empty() {
                println!("The roster is empty.");
            }
            for stored in &players {
                println!("{}", stored);
            }
        }

        Commands::Export { out, ids } => {
            let count = if ids.is_empty() {
                controller.export_all(&out)?
            } else {
                let ids: Vec<PlayerId> = ids.into_iter().map(PlayerId).collect();
                controller.export_selected(&out, &ids)?
            };
            println!("Exported {} player(s) to {}", count, out.display());
        }

        Commands::Import { r#in, replace } => {
            let ids = if replace {
                controller.load_database(&r#in)?
            } else {
                controller.import_all(&r#in)?
            };
            println!("Imported {} player(s) from {}", ids.len(), r#in.display());
        }
    }

    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("roster CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
