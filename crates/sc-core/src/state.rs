use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CrystalError;
use crate::record::{Beat, Location, Npc, Session};

/// Campaign metadata shown in the page header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    /// Campaign title.
    pub title: String,
    /// Genre and stakes.
    pub genre: String,
    /// The hook that promises adventure.
    pub hook: String,
    /// Emotional palette.
    pub tone: String,
    /// Inspirational touchstones.
    pub inspirations: String,
}

/// The root aggregate: everything the notebook stores.
///
/// Serialized with camelCase keys; this is the exact shape of the persisted
/// document and of the export file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignState {
    /// Campaign metadata.
    pub campaign: Campaign,
    /// Party roster scratch notes.
    pub party_roster: String,
    /// World truths scratch notes.
    pub world_truths: String,
    /// Session idea scratch notes.
    pub session_ideas: String,
    /// Faction scratch notes.
    pub faction_notes: String,
    /// Relic scratch notes.
    pub relic_notes: String,
    /// Lore scratch notes.
    pub lore_notes: String,
    /// Session planner.
    pub sessions: Vec<Session>,
    /// NPC roster.
    pub npcs: Vec<Npc>,
    /// Location atlas.
    pub locations: Vec<Location>,
    /// Story beats.
    pub beats: Vec<Beat>,
}

impl CampaignState {
    /// A fresh state: every text empty, every collection empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text of a campaign field.
    pub fn campaign_field(&self, field: CampaignField) -> &str {
        match field {
            CampaignField::Title => &self.campaign.title,
            CampaignField::Genre => &self.campaign.genre,
            CampaignField::Hook => &self.campaign.hook,
            CampaignField::Tone => &self.campaign.tone,
            CampaignField::Inspirations => &self.campaign.inspirations,
        }
    }

    pub(crate) fn campaign_field_mut(&mut self, field: CampaignField) -> &mut String {
        match field {
            CampaignField::Title => &mut self.campaign.title,
            CampaignField::Genre => &mut self.campaign.genre,
            CampaignField::Hook => &mut self.campaign.hook,
            CampaignField::Tone => &mut self.campaign.tone,
            CampaignField::Inspirations => &mut self.campaign.inspirations,
        }
    }

    /// Current text of a scratch note.
    pub fn note(&self, field: NoteField) -> &str {
        match field {
            NoteField::PartyRoster => &self.party_roster,
            NoteField::WorldTruths => &self.world_truths,
            NoteField::SessionIdeas => &self.session_ideas,
            NoteField::FactionNotes => &self.faction_notes,
            NoteField::RelicNotes => &self.relic_notes,
            NoteField::LoreNotes => &self.lore_notes,
        }
    }

    pub(crate) fn note_mut(&mut self, field: NoteField) -> &mut String {
        match field {
            NoteField::PartyRoster => &mut self.party_roster,
            NoteField::WorldTruths => &mut self.world_truths,
            NoteField::SessionIdeas => &mut self.session_ideas,
            NoteField::FactionNotes => &mut self.faction_notes,
            NoteField::RelicNotes => &mut self.relic_notes,
            NoteField::LoreNotes => &mut self.lore_notes,
        }
    }
}

/// Editable campaign metadata fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CampaignField {
    /// `campaign.title`
    Title,
    /// `campaign.genre`
    Genre,
    /// `campaign.hook`
    Hook,
    /// `campaign.tone`
    Tone,
    /// `campaign.inspirations`
    Inspirations,
}

impl CampaignField {
    /// All fields in form order.
    pub const ALL: [Self; 5] = [
        Self::Title,
        Self::Genre,
        Self::Hook,
        Self::Tone,
        Self::Inspirations,
    ];
}

impl FromStr for CampaignField {
    type Err = CrystalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "title" => Ok(Self::Title),
            "genre" => Ok(Self::Genre),
            "hook" => Ok(Self::Hook),
            "tone" => Ok(Self::Tone),
            "inspirations" => Ok(Self::Inspirations),
            other => Err(CrystalError::UnknownField(other.to_string())),
        }
    }
}

impl fmt::Display for CampaignField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Title => write!(f, "title"),
            Self::Genre => write!(f, "genre"),
            Self::Hook => write!(f, "hook"),
            Self::Tone => write!(f, "tone"),
            Self::Inspirations => write!(f, "inspirations"),
        }
    }
}

/// Free-text scratch fields outside the record collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoteField {
    /// `partyRoster`
    PartyRoster,
    /// `worldTruths`
    WorldTruths,
    /// `sessionIdeas`
    SessionIdeas,
    /// `factionNotes`
    FactionNotes,
    /// `relicNotes`
    RelicNotes,
    /// `loreNotes`
    LoreNotes,
}

impl NoteField {
    /// All scratch fields in page order.
    pub const ALL: [Self; 6] = [
        Self::PartyRoster,
        Self::WorldTruths,
        Self::SessionIdeas,
        Self::FactionNotes,
        Self::RelicNotes,
        Self::LoreNotes,
    ];

    /// Human label for headings.
    pub fn label(self) -> &'static str {
        match self {
            Self::PartyRoster => "Party Roster",
            Self::WorldTruths => "World Truths",
            Self::SessionIdeas => "Session Ideas",
            Self::FactionNotes => "Faction Notes",
            Self::RelicNotes => "Relic Notes",
            Self::LoreNotes => "Lore Notes",
        }
    }
}

impl FromStr for NoteField {
    type Err = CrystalError;

    /// Accepts kebab-case (`party-roster`), camelCase (`partyRoster`) or the
    /// short form without the `-notes` suffix (`faction`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "partyroster" | "party" | "roster" => Ok(Self::PartyRoster),
            "worldtruths" | "truths" => Ok(Self::WorldTruths),
            "sessionideas" | "ideas" => Ok(Self::SessionIdeas),
            "factionnotes" | "faction" | "factions" => Ok(Self::FactionNotes),
            "relicnotes" | "relic" | "relics" => Ok(Self::RelicNotes),
            "lorenotes" | "lore" => Ok(Self::LoreNotes),
            _ => Err(CrystalError::UnknownField(s.trim().to_string())),
        }
    }
}

impl fmt::Display for NoteField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PartyRoster => write!(f, "party-roster"),
            Self::WorldTruths => write!(f, "world-truths"),
            Self::SessionIdeas => write!(f, "session-ideas"),
            Self::FactionNotes => write!(f, "faction-notes"),
            Self::RelicNotes => write!(f, "relic-notes"),
            Self::LoreNotes => write!(f, "lore-notes"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_empty() {
        let state = CampaignState::new();
        assert!(state.campaign.title.is_empty());
        assert!(state.lore_notes.is_empty());
        assert!(state.sessions.is_empty());
        assert!(state.beats.is_empty());
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(CampaignState::new()).unwrap();
        let obj = json.as_object().unwrap();
        for key in [
            "campaign",
            "partyRoster",
            "worldTruths",
            "sessionIdeas",
            "factionNotes",
            "relicNotes",
            "loreNotes",
            "sessions",
            "npcs",
            "locations",
            "beats",
        ] {
            assert!(obj.contains_key(key), "missing {key}");
        }
        assert_eq!(obj.len(), 11);
    }

    #[test]
    fn parse_note_field_forms() {
        assert_eq!("party-roster".parse::<NoteField>().unwrap(), NoteField::PartyRoster);
        assert_eq!("worldTruths".parse::<NoteField>().unwrap(), NoteField::WorldTruths);
        assert_eq!("lore".parse::<NoteField>().unwrap(), NoteField::LoreNotes);
        assert!("weather".parse::<NoteField>().is_err());
    }

    #[test]
    fn note_field_display_parses_back() {
        for field in NoteField::ALL {
            assert_eq!(field.to_string().parse::<NoteField>().unwrap(), field);
        }
    }

    #[test]
    fn parse_campaign_field() {
        assert_eq!("Tone".parse::<CampaignField>().unwrap(), CampaignField::Tone);
        assert!(matches!(
            "budget".parse::<CampaignField>(),
            Err(CrystalError::UnknownField(_))
        ));
    }

    #[test]
    fn field_accessors() {
        let mut state = CampaignState::new();
        *state.campaign_field_mut(CampaignField::Hook) = "A comet falls".into();
        *state.note_mut(NoteField::RelicNotes) = "The Ember Crown".into();
        assert_eq!(state.campaign_field(CampaignField::Hook), "A comet falls");
        assert_eq!(state.note(NoteField::RelicNotes), "The Ember Crown");
    }
}
