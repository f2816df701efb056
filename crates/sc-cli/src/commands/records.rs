use chrono::NaiveDate;
use clap::Args;

use sc_core::render::refresh;
use sc_core::{
    BeatDraft, CrystalError, Draft, LocationDraft, NpcDraft, Record, RecordId, SessionDraft,
    Storage, Store,
};

use crate::view::TerminalView;

#[derive(Args)]
pub struct SessionArgs {
    /// Session title
    pub title: String,
    /// Planned date (YYYY-MM-DD)
    #[arg(short, long, default_value = "")]
    pub date: String,
    /// Characters in the spotlight
    #[arg(long, default_value = "")]
    pub spotlight: String,
    /// Key beats
    #[arg(long, default_value = "")]
    pub beats: String,
    /// Threats and opposition
    #[arg(long, default_value = "")]
    pub threats: String,
    /// Rewards and fallout
    #[arg(long, default_value = "")]
    pub rewards: String,
    /// Status (default: Upcoming)
    #[arg(short, long, default_value = "")]
    pub status: String,
}

impl SessionArgs {
    pub fn into_draft(self) -> SessionDraft {
        SessionDraft {
            title: self.title,
            date: self.date,
            spotlight: self.spotlight,
            beats: self.beats,
            threats: self.threats,
            rewards: self.rewards,
            status: self.status,
        }
    }
}

#[derive(Args)]
pub struct NpcArgs {
    /// NPC name
    pub name: String,
    /// Role in the story
    #[arg(short, long, default_value = "")]
    pub role: String,
    /// Faction or allegiance
    #[arg(short, long, default_value = "")]
    pub faction: String,
    /// What drives them
    #[arg(short, long, default_value = "")]
    pub motivation: String,
    /// Details and secrets
    #[arg(long, default_value = "")]
    pub details: String,
}

impl NpcArgs {
    pub fn into_draft(self) -> NpcDraft {
        NpcDraft {
            name: self.name,
            role: self.role,
            faction: self.faction,
            motivation: self.motivation,
            details: self.details,
        }
    }
}

#[derive(Args)]
pub struct LocationArgs {
    /// Location name
    pub name: String,
    /// Kind of place
    #[arg(short = 't', long = "type", default_value = "")]
    pub kind: String,
    /// Hooks and atmosphere
    #[arg(long, default_value = "")]
    pub hook: String,
    /// Dangers or guardians
    #[arg(long, default_value = "")]
    pub danger: String,
    /// Secrets and treasures
    #[arg(long, default_value = "")]
    pub treasure: String,
}

impl LocationArgs {
    pub fn into_draft(self) -> LocationDraft {
        LocationDraft {
            name: self.name,
            kind: self.kind,
            hook: self.hook,
            danger: self.danger,
            treasure: self.treasure,
        }
    }
}

#[derive(Args)]
pub struct BeatArgs {
    /// Beat title
    pub title: String,
    /// Act or stage
    #[arg(long, default_value = "")]
    pub stage: String,
    /// Status (foreshadowed, in motion, resolved, ...)
    #[arg(short, long, default_value = "")]
    pub status: String,
    /// Details
    #[arg(long, default_value = "")]
    pub details: String,
}

impl BeatArgs {
    pub fn into_draft(self) -> BeatDraft {
        BeatDraft {
            title: self.title,
            stage: self.stage,
            status: self.status,
            details: self.details,
        }
    }
}

pub fn add<D: Draft, S: Storage>(
    store: &mut Store<S>,
    draft: D,
    today: NaiveDate,
) -> Result<(), String> {
    let id = store.add(draft).map_err(|e| match e {
        CrystalError::MissingField { kind, field } => {
            format!("{kind} {field} must not be empty; nothing was added")
        }
        other => other.to_string(),
    })?;

    println!("  Added {} {id}", D::Record::KIND);
    println!();
    refresh(&mut TerminalView, store.state(), D::Record::SECTION, today);
    Ok(())
}

pub fn remove<R: Record, S: Storage>(
    store: &mut Store<S>,
    id: &str,
    today: NaiveDate,
) -> Result<(), String> {
    if store.remove::<R>(&RecordId::from(id)) {
        println!("  Archived {} {id}", R::KIND);
    } else {
        println!("  No {} with id {id}; nothing changed", R::KIND);
    }
    println!();
    refresh(&mut TerminalView, store.state(), R::SECTION, today);
    Ok(())
}

pub fn list<R: Record, S: Storage>(store: &Store<S>, today: NaiveDate) -> Result<(), String> {
    refresh(&mut TerminalView, store.state(), R::SECTION, today);
    Ok(())
}
