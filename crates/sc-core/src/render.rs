//! Presentation seam.
//!
//! The core never draws anything. A front end implements [`View`] and the
//! store's caller asks [`refresh`] to push the affected section after each
//! mutation. Collections arrive already in display order.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::binding::Bindings;
use crate::error::CrystalError;
use crate::record::{Beat, Location, Npc, Record, Session};
use crate::state::{CampaignState, NoteField};

/// A screen section that can be redrawn on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// Campaign header and bound fields.
    Campaign,
    /// Scratch notes.
    Notes,
    /// Session planner.
    Sessions,
    /// NPC roster.
    Npcs,
    /// Location atlas.
    Locations,
    /// Story beats.
    Beats,
}

impl Section {
    /// All sections in page order.
    pub const ALL: [Self; 6] = [
        Self::Campaign,
        Self::Notes,
        Self::Sessions,
        Self::Npcs,
        Self::Locations,
        Self::Beats,
    ];

    /// Section heading.
    pub fn title(self) -> &'static str {
        match self {
            Self::Campaign => "Campaign",
            Self::Notes => "Notes",
            Self::Sessions => "Session Planner",
            Self::Npcs => "NPC Roster",
            Self::Locations => "Location Atlas",
            Self::Beats => "Story Beats",
        }
    }
}

impl FromStr for Section {
    type Err = CrystalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "campaign" => Ok(Self::Campaign),
            "notes" | "note" => Ok(Self::Notes),
            "sessions" | "session" => Ok(Self::Sessions),
            "npcs" | "npc" => Ok(Self::Npcs),
            "locations" | "location" | "atlas" => Ok(Self::Locations),
            "beats" | "beat" => Ok(Self::Beats),
            other => Err(CrystalError::UnknownSection(other.to_string())),
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Campaign => write!(f, "campaign"),
            Self::Notes => write!(f, "notes"),
            Self::Sessions => write!(f, "sessions"),
            Self::Npcs => write!(f, "npcs"),
            Self::Locations => write!(f, "locations"),
            Self::Beats => write!(f, "beats"),
        }
    }
}

/// A front end that displays campaign state.
pub trait View {
    /// Redraw every bound display text.
    fn bindings(&mut self, bindings: &Bindings);

    /// Redraw the scratch notes.
    fn notes(&mut self, notes: &[(NoteField, &str)]);

    /// Redraw one record collection, given in display order.
    fn collection<R: Record>(&mut self, records: &[&R]);
}

/// Push one section of `state` to `view`.
///
/// Redrawing sessions also redraws the bindings, since the next-session label
/// depends on them.
pub fn refresh<V: View>(view: &mut V, state: &CampaignState, section: Section, today: NaiveDate) {
    match section {
        Section::Campaign => view.bindings(&Bindings::compute(state, today)),
        Section::Notes => view.notes(&notes_of(state)),
        Section::Sessions => {
            view.collection(&Session::sorted(&state.sessions));
            view.bindings(&Bindings::compute(state, today));
        }
        Section::Npcs => view.collection(&Npc::sorted(&state.npcs)),
        Section::Locations => view.collection(&Location::sorted(&state.locations)),
        Section::Beats => view.collection(&Beat::sorted(&state.beats)),
    }
}

/// Push the whole state to `view`.
pub fn refresh_all<V: View>(view: &mut V, state: &CampaignState, today: NaiveDate) {
    view.bindings(&Bindings::compute(state, today));
    view.notes(&notes_of(state));
    view.collection(&Session::sorted(&state.sessions));
    view.collection(&Npc::sorted(&state.npcs));
    view.collection(&Location::sorted(&state.locations));
    view.collection(&Beat::sorted(&state.beats));
}

fn notes_of(state: &CampaignState) -> Vec<(NoteField, &str)> {
    NoteField::ALL
        .into_iter()
        .map(|field| (field, state.note(field)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl View for Recorder {
        fn bindings(&mut self, bindings: &Bindings) {
            self.events.push(format!("bindings:{}", bindings.next_session));
        }

        fn notes(&mut self, notes: &[(NoteField, &str)]) {
            self.events.push(format!("notes:{}", notes.len()));
        }

        fn collection<R: Record>(&mut self, records: &[&R]) {
            let headings: Vec<&str> = records.iter().map(|r| r.heading()).collect();
            self.events
                .push(format!("{}:{}", R::SECTION, headings.join(",")));
        }
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn state() -> CampaignState {
        let mut state = CampaignState::default();
        state.sessions.push(Session {
            title: "Storm".into(),
            date: "2025-04-01".into(),
            ..Default::default()
        });
        state.sessions.push(Session {
            title: "Landfall".into(),
            date: "2025-03-01".into(),
            ..Default::default()
        });
        state.npcs.push(Npc {
            name: "Vex".into(),
            ..Default::default()
        });
        state.npcs.push(Npc {
            name: "Anwen".into(),
            ..Default::default()
        });
        state
    }

    #[test]
    fn sessions_refresh_sorted_and_rebinds() {
        let mut view = Recorder::default();
        refresh(&mut view, &state(), Section::Sessions, day("2025-02-01"));
        assert_eq!(
            view.events,
            ["sessions:Landfall,Storm", "bindings:Landfall · Mar 1, 2025"]
        );
    }

    #[test]
    fn npc_refresh_only_touches_npcs() {
        let mut view = Recorder::default();
        refresh(&mut view, &state(), Section::Npcs, day("2025-02-01"));
        assert_eq!(view.events, ["npcs:Anwen,Vex"]);
    }

    #[test]
    fn refresh_all_covers_every_section() {
        let mut view = Recorder::default();
        refresh_all(&mut view, &state(), day("2025-02-01"));
        assert_eq!(view.events.len(), 6);
        assert_eq!(view.events[1], "notes:6");
        assert_eq!(view.events[5], "beats:");
    }

    #[test]
    fn section_parse() {
        assert_eq!("NPC".parse::<Section>().unwrap(), Section::Npcs);
        assert_eq!("atlas".parse::<Section>().unwrap(), Section::Locations);
        assert!("inventory".parse::<Section>().is_err());
    }
}
