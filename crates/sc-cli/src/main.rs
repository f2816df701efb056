//! CLI frontend for the Story Crystal campaign notebook.

mod commands;
mod view;

use std::path::PathBuf;
use std::process;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use commands::records::{BeatArgs, LocationArgs, NpcArgs, SessionArgs};
use sc_core::config::DEFAULT_DATA_DIR;
use sc_core::{Beat, Location, Npc, Session, Store, StoreConfig};

#[derive(Parser)]
#[command(
    name = "crystal",
    about = "Story Crystal: campaign notes for tabletop game masters",
    version,
    propagate_version = true
)]
struct Cli {
    /// Directory holding the campaign data
    #[arg(long, global = true, env = "STORY_CRYSTAL_DIR", default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Treat this date (YYYY-MM-DD) as today
    #[arg(long, global = true, value_parser = parse_day)]
    today: Option<NaiveDate>,

    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the whole notebook, or one section of it
    Show {
        /// campaign, notes, sessions, npcs, locations or beats
        section: Option<String>,
    },

    /// Set a campaign field: title, genre, hook, tone, inspirations
    Campaign {
        /// Field name
        field: String,
        /// New text (empty to clear)
        value: String,
    },

    /// Set a scratch note: party-roster, world-truths, session-ideas,
    /// faction-notes, relic-notes, lore-notes
    Note {
        /// Note name
        field: String,
        /// New text (empty to clear)
        text: String,
    },

    /// Plan sessions
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },

    /// Track NPCs
    Npc {
        #[command(subcommand)]
        action: NpcAction,
    },

    /// Chart locations
    Location {
        #[command(subcommand)]
        action: LocationAction,
    },

    /// Plot story beats
    Beat {
        #[command(subcommand)]
        action: BeatAction,
    },

    /// Show the next scheduled session
    Next,

    /// Erase all campaign data
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Write the campaign to `<title>-chronicle-<date>.json`
    Export {
        /// Directory to write the file into
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },
}

#[derive(Subcommand)]
enum SessionAction {
    /// Plan a new session
    Add(SessionArgs),
    /// Archive a session by id
    Remove {
        /// Session id
        id: String,
    },
    /// List sessions by date
    List,
}

#[derive(Subcommand)]
enum NpcAction {
    /// Log a new NPC
    Add(NpcArgs),
    /// Archive an NPC by id
    Remove {
        /// NPC id
        id: String,
    },
    /// List NPCs by name
    List,
}

#[derive(Subcommand)]
enum LocationAction {
    /// Record a new location
    Add(LocationArgs),
    /// Archive a location by id
    Remove {
        /// Location id
        id: String,
    },
    /// List locations by name
    List,
}

#[derive(Subcommand)]
enum BeatAction {
    /// Plot a new story beat
    Add(BeatArgs),
    /// Archive a beat by id
    Remove {
        /// Beat id
        id: String,
    },
    /// List beats by stage
    List,
}

fn parse_day(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

fn init_logging(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time(),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let today = cli.today.unwrap_or_else(sc_core::derive::today);
    let config = StoreConfig::default().with_data_dir(&cli.data_dir);
    tracing::debug!(data_dir = %config.data_dir.display(), %today, "opening campaign store");
    let mut store = Store::open_with(&config);

    let result = match cli.command {
        Commands::Show { section } => commands::show::run(&store, section.as_deref(), today),
        Commands::Campaign { field, value } => {
            commands::fields::campaign(&mut store, &field, value, today)
        }
        Commands::Note { field, text } => commands::fields::note(&mut store, &field, text, today),
        Commands::Session { action } => match action {
            SessionAction::Add(args) => commands::records::add(&mut store, args.into_draft(), today),
            SessionAction::Remove { id } => commands::records::remove::<Session, _>(&mut store, &id, today),
            SessionAction::List => commands::records::list::<Session, _>(&store, today),
        },
        Commands::Npc { action } => match action {
            NpcAction::Add(args) => commands::records::add(&mut store, args.into_draft(), today),
            NpcAction::Remove { id } => commands::records::remove::<Npc, _>(&mut store, &id, today),
            NpcAction::List => commands::records::list::<Npc, _>(&store, today),
        },
        Commands::Location { action } => match action {
            LocationAction::Add(args) => {
                commands::records::add(&mut store, args.into_draft(), today)
            }
            LocationAction::Remove { id } => {
                commands::records::remove::<Location, _>(&mut store, &id, today)
            }
            LocationAction::List => commands::records::list::<Location, _>(&store, today),
        },
        Commands::Beat { action } => match action {
            BeatAction::Add(args) => commands::records::add(&mut store, args.into_draft(), today),
            BeatAction::Remove { id } => commands::records::remove::<Beat, _>(&mut store, &id, today),
            BeatAction::List => commands::records::list::<Beat, _>(&store, today),
        },
        Commands::Next => commands::next::run(&store, today),
        Commands::Reset { yes } => commands::reset::run(&mut store, yes, today),
        Commands::Export { out } => commands::export::run(&store, &out, today),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
