//! Defaulting routine for loaded documents.
//!
//! A saved document may come from an older or newer build. Instead of asking
//! serde to accept it wholesale, the routine walks the known schema on top of
//! a fresh default state:
//!
//! - known keys holding the expected shape are taken over,
//! - known keys that are absent keep their default,
//! - unknown keys, at any depth, are dropped.
//!
//! Sequences are rebuilt record by record, so nothing in the result shares
//! structure with the parsed document. A record stored without an id gets
//! one that is unique in its collection; the caller should save the result
//! so the id survives the next load.

use serde_json::{Map, Value};

use crate::record::{Record, RecordId};
use crate::state::{Campaign, CampaignState};

/// Storage key the campaign is saved under. The suffix is the document version.
pub const STORAGE_KEY: &str = "story-crystal-data-v1";

/// Outcome of merging a loaded document.
#[derive(Debug, Clone, PartialEq)]
pub struct Merged {
    /// The reconciled state.
    pub state: CampaignState,
    /// How many records arrived without an id and were given one.
    pub assigned_ids: usize,
}

impl Merged {
    /// Whether the merged state differs from the document in a way worth saving.
    pub fn needs_save(&self) -> bool {
        self.assigned_ids > 0
    }
}

/// Merge a parsed document onto a fresh default state.
pub fn merge_state(source: &Value) -> CampaignState {
    merge_document(source).state
}

/// Merge a parsed document and report the ids that had to be assigned.
pub fn merge_document(source: &Value) -> Merged {
    let mut state = CampaignState::default();
    let Some(doc) = source.as_object() else {
        return Merged {
            state,
            assigned_ids: 0,
        };
    };

    if let Some(campaign) = doc.get("campaign").and_then(Value::as_object) {
        merge_campaign(&mut state.campaign, campaign);
    }

    merge_text(&mut state.party_roster, doc.get("partyRoster"));
    merge_text(&mut state.world_truths, doc.get("worldTruths"));
    merge_text(&mut state.session_ideas, doc.get("sessionIdeas"));
    merge_text(&mut state.faction_notes, doc.get("factionNotes"));
    merge_text(&mut state.relic_notes, doc.get("relicNotes"));
    merge_text(&mut state.lore_notes, doc.get("loreNotes"));

    let assigned_ids = merge_records(&mut state.sessions, doc.get("sessions"))
        + merge_records(&mut state.npcs, doc.get("npcs"))
        + merge_records(&mut state.locations, doc.get("locations"))
        + merge_records(&mut state.beats, doc.get("beats"));

    Merged {
        state,
        assigned_ids,
    }
}

fn merge_campaign(target: &mut Campaign, source: &Map<String, Value>) {
    merge_text(&mut target.title, source.get("title"));
    merge_text(&mut target.genre, source.get("genre"));
    merge_text(&mut target.hook, source.get("hook"));
    merge_text(&mut target.tone, source.get("tone"));
    merge_text(&mut target.inspirations, source.get("inspirations"));
}

/// Replace `target` with one record per object element of a source array.
///
/// Returns the number of records that needed a new id.
fn merge_records<R: Record>(target: &mut Vec<R>, source: Option<&Value>) -> usize {
    let Some(items) = source.and_then(Value::as_array) else {
        return 0;
    };
    *target = items
        .iter()
        .filter_map(Value::as_object)
        .map(R::from_fields)
        .collect();

    let blank: Vec<usize> = target
        .iter()
        .enumerate()
        .filter(|(_, r)| r.id().as_str().is_empty())
        .map(|(i, _)| i)
        .collect();
    for &i in &blank {
        let id = RecordId::unique(target.iter().map(Record::id));
        *target[i].id_mut() = id;
    }
    blank.len()
}

/// Assign a scalar onto a text slot.
///
/// Strings are taken as-is, numbers and booleans as their text, `null`
/// clears. Arrays and objects cannot live in a text slot and leave it alone.
pub(crate) fn merge_text(target: &mut String, source: Option<&Value>) {
    match source {
        Some(Value::String(s)) => s.clone_into(target),
        Some(Value::Number(n)) => *target = n.to_string(),
        Some(Value::Bool(b)) => *target = b.to_string(),
        Some(Value::Null) => target.clear(),
        Some(Value::Array(_) | Value::Object(_)) | None => {}
    }
}
