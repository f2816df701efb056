//! Sessions, NPCs, locations and story beats.
//!
//! Each record type comes with a draft (the submitted form) that either
//! validates into a record or is rejected because its one required field is
//! blank. Records are never edited after creation.

use std::fmt;

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::derive::{self, StatusClass};
use crate::error::{CrystalError, CrystalResult};
use crate::merge::merge_text;
use crate::render::Section;
use crate::state::CampaignState;

/// Status given to a new session when the form leaves it blank.
pub const DEFAULT_SESSION_STATUS: &str = "Upcoming";

/// Badge text for a beat without a status.
pub const DEFAULT_BEAT_BADGE: &str = "Foreshadowed";

const RANDOM_ID_CHARS: usize = 6;

/// Opaque identifier of a record within its collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl RecordId {
    /// Generate a fresh id: base-36 milliseconds, a dash, six random base-36 digits.
    pub fn new() -> Self {
        let millis = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
        let mut rng = rand::rng();
        let suffix: String = (0..RANDOM_ID_CHARS)
            .map(|_| base36_digit(rng.random_range(0..36)))
            .collect();
        Self(format!("{}-{suffix}", to_base36(millis)))
    }

    /// Generate an id not present in `existing`.
    pub fn unique<'a>(existing: impl IntoIterator<Item = &'a RecordId> + Clone) -> Self {
        loop {
            let id = Self::new();
            if !existing.clone().into_iter().any(|other| *other == id) {
                return id;
            }
        }
    }

    /// The id as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

fn base36_digit(n: u32) -> char {
    char::from_digit(n, 36).unwrap_or('0')
}

fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        // n % 36 always fits in a u32
        digits.push(base36_digit((n % 36) as u32));
        n /= 36;
    }
    digits.iter().rev().collect()
}

/// The four record collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// A planned game session.
    Session,
    /// A non-player character.
    Npc,
    /// A place in the atlas.
    Location,
    /// A story beat.
    Beat,
}

impl RecordKind {
    /// Parse a collection name as used on the command line.
    pub fn parse(s: &str) -> CrystalResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "session" | "sessions" => Ok(Self::Session),
            "npc" | "npcs" => Ok(Self::Npc),
            "location" | "locations" => Ok(Self::Location),
            "beat" | "beats" => Ok(Self::Beat),
            other => Err(CrystalError::UnknownSection(other.to_string())),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Session => write!(f, "session"),
            Self::Npc => write!(f, "NPC"),
            Self::Location => write!(f, "location"),
            Self::Beat => write!(f, "beat"),
        }
    }
}

/// Behaviour shared by every record collection.
pub trait Record: Clone + Serialize + Sized {
    /// Which collection this record belongs to.
    const KIND: RecordKind;
    /// The screen section that shows this collection.
    const SECTION: Section;
    /// Text shown when the collection is empty.
    const EMPTY_TEXT: &'static str;

    /// The record id.
    fn id(&self) -> &RecordId;

    /// Mutable access to the id, for records loaded without one.
    fn id_mut(&mut self) -> &mut RecordId;

    /// Card heading (title or name).
    fn heading(&self) -> &str;

    /// Secondary line under the heading, if any.
    fn subtitle(&self) -> Option<String> {
        None
    }

    /// Status badge text and its style class, if any.
    fn badge(&self) -> Option<(String, StatusClass)> {
        None
    }

    /// Labelled detail rows with non-empty values, in display order.
    fn details(&self) -> Vec<(&'static str, &str)>;

    /// Build a record from a loaded JSON object, defaulting absent fields.
    ///
    /// An absent or blank id stays blank here.
    fn from_fields(fields: &Map<String, Value>) -> Self;

    /// The collection inside the campaign state.
    fn collection(state: &CampaignState) -> &[Self];

    /// Mutable access to the collection inside the campaign state.
    fn collection_mut(state: &mut CampaignState) -> &mut Vec<Self>;

    /// The collection in display order.
    fn sorted(records: &[Self]) -> Vec<&Self>;
}

/// A submitted record form.
pub trait Draft {
    /// The record this draft produces.
    type Record: Record;

    /// Validate the form and build the record under `id`.
    ///
    /// # Errors
    /// [`CrystalError::MissingField`] when the required field is blank.
    fn into_record(self, id: RecordId) -> CrystalResult<Self::Record>;
}

fn non_empty<'a>(rows: &[(&'static str, &'a str)]) -> Vec<(&'static str, &'a str)> {
    rows.iter().copied().filter(|(_, v)| !v.is_empty()).collect()
}

fn required(kind: RecordKind, field: &'static str, value: &str) -> CrystalResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CrystalError::MissingField { kind, field });
    }
    Ok(value.to_string())
}

/// The stored id, blank when absent. Merging assigns blank ids afterwards.
fn loaded_id(fields: &Map<String, Value>) -> RecordId {
    let mut id = String::new();
    merge_text(&mut id, fields.get("id"));
    RecordId(id.trim().to_string())
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// A planned game session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Record id.
    pub id: RecordId,
    /// Session title.
    pub title: String,
    /// Planned date (`YYYY-MM-DD`), possibly empty.
    pub date: String,
    /// Characters or players in the spotlight.
    pub spotlight: String,
    /// Key beats planned for the session.
    pub beats: String,
    /// Threats and opposition.
    pub threats: String,
    /// Rewards and fallout.
    pub rewards: String,
    /// Free-text status.
    pub status: String,
}

impl Record for Session {
    const KIND: RecordKind = RecordKind::Session;
    const SECTION: Section = Section::Sessions;
    const EMPTY_TEXT: &'static str =
        "No sessions planned yet. Plot a new adventure to begin the chronicle.";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn id_mut(&mut self) -> &mut RecordId {
        &mut self.id
    }

    fn heading(&self) -> &str {
        if self.title.is_empty() {
            "Untitled Session"
        } else {
            &self.title
        }
    }

    fn subtitle(&self) -> Option<String> {
        (!self.date.is_empty()).then(|| derive::format_date(&self.date))
    }

    fn badge(&self) -> Option<(String, StatusClass)> {
        (!self.status.is_empty())
            .then(|| (self.status.clone(), StatusClass::classify(&self.status)))
    }

    fn details(&self) -> Vec<(&'static str, &str)> {
        non_empty(&[
            ("Spotlight", self.spotlight.as_str()),
            ("Key Beats", self.beats.as_str()),
            ("Threats & Opposition", self.threats.as_str()),
            ("Rewards & Fallout", self.rewards.as_str()),
        ])
    }

    fn from_fields(fields: &Map<String, Value>) -> Self {
        let mut s = Self {
            id: loaded_id(fields),
            ..Self::default()
        };
        merge_text(&mut s.title, fields.get("title"));
        merge_text(&mut s.date, fields.get("date"));
        merge_text(&mut s.spotlight, fields.get("spotlight"));
        merge_text(&mut s.beats, fields.get("beats"));
        merge_text(&mut s.threats, fields.get("threats"));
        merge_text(&mut s.rewards, fields.get("rewards"));
        merge_text(&mut s.status, fields.get("status"));
        s
    }

    fn collection(state: &CampaignState) -> &[Self] {
        &state.sessions
    }

    fn collection_mut(state: &mut CampaignState) -> &mut Vec<Self> {
        &mut state.sessions
    }

    fn sorted(records: &[Self]) -> Vec<&Self> {
        derive::sort_sessions(records)
    }
}

/// Session planner form.
#[derive(Debug, Clone, Default)]
pub struct SessionDraft {
    /// Required title.
    pub title: String,
    /// Planned date.
    pub date: String,
    /// Spotlight.
    pub spotlight: String,
    /// Key beats.
    pub beats: String,
    /// Threats.
    pub threats: String,
    /// Rewards.
    pub rewards: String,
    /// Status; blank becomes "Upcoming".
    pub status: String,
}

impl Draft for SessionDraft {
    type Record = Session;

    fn into_record(self, id: RecordId) -> CrystalResult<Session> {
        let title = required(RecordKind::Session, "title", &self.title)?;
        let status = match self.status.trim() {
            "" => DEFAULT_SESSION_STATUS.to_string(),
            s => s.to_string(),
        };
        Ok(Session {
            id,
            title,
            date: self.date.trim().to_string(),
            spotlight: self.spotlight.trim().to_string(),
            beats: self.beats.trim().to_string(),
            threats: self.threats.trim().to_string(),
            rewards: self.rewards.trim().to_string(),
            status,
        })
    }
}

// ---------------------------------------------------------------------------
// Npc
// ---------------------------------------------------------------------------

/// A non-player character.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Npc {
    /// Record id.
    pub id: RecordId,
    /// NPC name.
    pub name: String,
    /// Role in the story.
    pub role: String,
    /// Faction or allegiance.
    pub faction: String,
    /// What drives them.
    pub motivation: String,
    /// Details and secrets.
    pub details: String,
}

impl Record for Npc {
    const KIND: RecordKind = RecordKind::Npc;
    const SECTION: Section = Section::Npcs;
    const EMPTY_TEXT: &'static str =
        "No NPCs logged yet. Chronicle the allies and rivals the party meets.";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn id_mut(&mut self) -> &mut RecordId {
        &mut self.id
    }

    fn heading(&self) -> &str {
        &self.name
    }

    fn subtitle(&self) -> Option<String> {
        (!self.faction.is_empty()).then(|| self.faction.clone())
    }

    fn details(&self) -> Vec<(&'static str, &str)> {
        non_empty(&[
            ("Role", self.role.as_str()),
            ("Motivations", self.motivation.as_str()),
            ("Details & Secrets", self.details.as_str()),
        ])
    }

    fn from_fields(fields: &Map<String, Value>) -> Self {
        let mut n = Self {
            id: loaded_id(fields),
            ..Self::default()
        };
        merge_text(&mut n.name, fields.get("name"));
        merge_text(&mut n.role, fields.get("role"));
        merge_text(&mut n.faction, fields.get("faction"));
        merge_text(&mut n.motivation, fields.get("motivation"));
        merge_text(&mut n.details, fields.get("details"));
        n
    }

    fn collection(state: &CampaignState) -> &[Self] {
        &state.npcs
    }

    fn collection_mut(state: &mut CampaignState) -> &mut Vec<Self> {
        &mut state.npcs
    }

    fn sorted(records: &[Self]) -> Vec<&Self> {
        derive::sort_npcs(records)
    }
}

/// NPC tracker form.
#[derive(Debug, Clone, Default)]
pub struct NpcDraft {
    /// Required name.
    pub name: String,
    /// Role.
    pub role: String,
    /// Faction.
    pub faction: String,
    /// Motivation.
    pub motivation: String,
    /// Details.
    pub details: String,
}

impl Draft for NpcDraft {
    type Record = Npc;

    fn into_record(self, id: RecordId) -> CrystalResult<Npc> {
        Ok(Npc {
            id,
            name: required(RecordKind::Npc, "name", &self.name)?,
            role: self.role.trim().to_string(),
            faction: self.faction.trim().to_string(),
            motivation: self.motivation.trim().to_string(),
            details: self.details.trim().to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

/// A place in the location atlas.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Record id.
    pub id: RecordId,
    /// Location name.
    pub name: String,
    /// Kind of place (city, ruin, ...).
    #[serde(rename = "type")]
    pub kind: String,
    /// Hooks and atmosphere.
    pub hook: String,
    /// Dangers or guardians.
    pub danger: String,
    /// Secrets and treasures.
    pub treasure: String,
}

impl Record for Location {
    const KIND: RecordKind = RecordKind::Location;
    const SECTION: Section = Section::Locations;
    const EMPTY_TEXT: &'static str =
        "No locations or relics have been recorded. Chronicle the spaces your heroes explore.";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn id_mut(&mut self) -> &mut RecordId {
        &mut self.id
    }

    fn heading(&self) -> &str {
        &self.name
    }

    fn subtitle(&self) -> Option<String> {
        (!self.kind.is_empty()).then(|| self.kind.clone())
    }

    fn details(&self) -> Vec<(&'static str, &str)> {
        non_empty(&[
            ("Hooks & Atmosphere", self.hook.as_str()),
            ("Dangers or Guardians", self.danger.as_str()),
            ("Secrets & Treasures", self.treasure.as_str()),
        ])
    }

    fn from_fields(fields: &Map<String, Value>) -> Self {
        let mut l = Self {
            id: loaded_id(fields),
            ..Self::default()
        };
        merge_text(&mut l.name, fields.get("name"));
        merge_text(&mut l.kind, fields.get("type"));
        merge_text(&mut l.hook, fields.get("hook"));
        merge_text(&mut l.danger, fields.get("danger"));
        merge_text(&mut l.treasure, fields.get("treasure"));
        l
    }

    fn collection(state: &CampaignState) -> &[Self] {
        &state.locations
    }

    fn collection_mut(state: &mut CampaignState) -> &mut Vec<Self> {
        &mut state.locations
    }

    fn sorted(records: &[Self]) -> Vec<&Self> {
        derive::sort_locations(records)
    }
}

/// Location atlas form.
#[derive(Debug, Clone, Default)]
pub struct LocationDraft {
    /// Required name.
    pub name: String,
    /// Kind of place.
    pub kind: String,
    /// Hook.
    pub hook: String,
    /// Danger.
    pub danger: String,
    /// Treasure.
    pub treasure: String,
}

impl Draft for LocationDraft {
    type Record = Location;

    fn into_record(self, id: RecordId) -> CrystalResult<Location> {
        Ok(Location {
            id,
            name: required(RecordKind::Location, "name", &self.name)?,
            kind: self.kind.trim().to_string(),
            hook: self.hook.trim().to_string(),
            danger: self.danger.trim().to_string(),
            treasure: self.treasure.trim().to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Beat
// ---------------------------------------------------------------------------

/// A story beat: prophecy, twist or payoff.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Beat {
    /// Record id.
    pub id: RecordId,
    /// Beat title.
    pub title: String,
    /// Act or stage.
    pub stage: String,
    /// Free-text status.
    pub status: String,
    /// Details.
    pub details: String,
}

impl Record for Beat {
    const KIND: RecordKind = RecordKind::Beat;
    const SECTION: Section = Section::Beats;
    const EMPTY_TEXT: &'static str =
        "No story beats yet. Plot prophecies, twists, and payoffs as they unfold.";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn id_mut(&mut self) -> &mut RecordId {
        &mut self.id
    }

    fn heading(&self) -> &str {
        &self.title
    }

    fn badge(&self) -> Option<(String, StatusClass)> {
        let text = if self.status.is_empty() {
            DEFAULT_BEAT_BADGE.to_string()
        } else {
            self.status.clone()
        };
        Some((text, StatusClass::classify(&self.status)))
    }

    fn details(&self) -> Vec<(&'static str, &str)> {
        non_empty(&[("Act or Stage", self.stage.as_str()), ("Details", self.details.as_str())])
    }

    fn from_fields(fields: &Map<String, Value>) -> Self {
        let mut b = Self {
            id: loaded_id(fields),
            ..Self::default()
        };
        merge_text(&mut b.title, fields.get("title"));
        merge_text(&mut b.stage, fields.get("stage"));
        merge_text(&mut b.status, fields.get("status"));
        merge_text(&mut b.details, fields.get("details"));
        b
    }

    fn collection(state: &CampaignState) -> &[Self] {
        &state.beats
    }

    fn collection_mut(state: &mut CampaignState) -> &mut Vec<Self> {
        &mut state.beats
    }

    fn sorted(records: &[Self]) -> Vec<&Self> {
        derive::sort_beats(records)
    }
}

/// Story beat form.
#[derive(Debug, Clone, Default)]
pub struct BeatDraft {
    /// Required title.
    pub title: String,
    /// Act or stage.
    pub stage: String,
    /// Status.
    pub status: String,
    /// Details.
    pub details: String,
}

impl Draft for BeatDraft {
    type Record = Beat;

    fn into_record(self, id: RecordId) -> CrystalResult<Beat> {
        Ok(Beat {
            id,
            title: required(RecordKind::Beat, "title", &self.title)?,
            stage: self.stage.trim().to_string(),
            status: self.status.trim().to_string(),
            details: self.details.trim().to_string(),
        })
    }
}
