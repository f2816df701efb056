//! Display text bound to campaign state.
//!
//! A binding is recomputed on every change and falls back to a placeholder
//! when its source is empty.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::derive::next_session_label;
use crate::error::CrystalError;
use crate::state::CampaignState;

/// A display slot whose text is derived from the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binding {
    /// Campaign title.
    CampaignTitle,
    /// Campaign genre.
    CampaignGenre,
    /// Campaign tone.
    CampaignTone,
    /// Campaign hook.
    CampaignHook,
    /// Campaign inspirations.
    CampaignInspirations,
    /// The next session label.
    NextSession,
}

impl Binding {
    /// All bindings in header order.
    pub const ALL: [Self; 6] = [
        Self::CampaignTitle,
        Self::CampaignGenre,
        Self::CampaignTone,
        Self::CampaignHook,
        Self::CampaignInspirations,
        Self::NextSession,
    ];

    /// Binding key as used in markup (`campaign-title`, `next-session`, ...).
    pub fn key(self) -> &'static str {
        match self {
            Self::CampaignTitle => "campaign-title",
            Self::CampaignGenre => "campaign-genre",
            Self::CampaignTone => "campaign-tone",
            Self::CampaignHook => "campaign-hook",
            Self::CampaignInspirations => "campaign-inspirations",
            Self::NextSession => "next-session",
        }
    }

    /// Placeholder shown while the source is empty.
    pub fn placeholder(self) -> &'static str {
        match self {
            Self::CampaignTitle => "your saga",
            Self::CampaignGenre => "Define the genre and stakes.",
            Self::CampaignTone => "Outline the emotional palette.",
            Self::CampaignHook => "Describe the promise of adventure.",
            Self::CampaignInspirations => "List your inspirational touchstones.",
            Self::NextSession => "Nothing scheduled yet",
        }
    }

    /// Current display text.
    pub fn resolve(self, state: &CampaignState, today: NaiveDate) -> String {
        let value = match self {
            Self::CampaignTitle => state.campaign.title.clone(),
            Self::CampaignGenre => state.campaign.genre.clone(),
            Self::CampaignTone => state.campaign.tone.clone(),
            Self::CampaignHook => state.campaign.hook.clone(),
            Self::CampaignInspirations => state.campaign.inspirations.clone(),
            Self::NextSession => next_session_label(&state.sessions, today).unwrap_or_default(),
        };
        if value.is_empty() {
            self.placeholder().to_string()
        } else {
            value
        }
    }
}

impl FromStr for Binding {
    type Err = CrystalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|b| b.key() == s.trim())
            .ok_or_else(|| CrystalError::UnknownField(s.trim().to_string()))
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Every binding resolved at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bindings {
    /// Campaign title or placeholder.
    pub title: String,
    /// Genre or placeholder.
    pub genre: String,
    /// Tone or placeholder.
    pub tone: String,
    /// Hook or placeholder.
    pub hook: String,
    /// Inspirations or placeholder.
    pub inspirations: String,
    /// Next session label or placeholder.
    pub next_session: String,
}

impl Bindings {
    /// Resolve every binding against `state`.
    pub fn compute(state: &CampaignState, today: NaiveDate) -> Self {
        Self {
            title: Binding::CampaignTitle.resolve(state, today),
            genre: Binding::CampaignGenre.resolve(state, today),
            tone: Binding::CampaignTone.resolve(state, today),
            hook: Binding::CampaignHook.resolve(state, today),
            inspirations: Binding::CampaignInspirations.resolve(state, today),
            next_session: Binding::NextSession.resolve(state, today),
        }
    }

    /// Text of one binding.
    pub fn get(&self, binding: Binding) -> &str {
        match binding {
            Binding::CampaignTitle => &self.title,
            Binding::CampaignGenre => &self.genre,
            Binding::CampaignTone => &self.tone,
            Binding::CampaignHook => &self.hook,
            Binding::CampaignInspirations => &self.inspirations,
            Binding::NextSession => &self.next_session,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Session;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn empty_state_shows_placeholders() {
        let b = Bindings::compute(&CampaignState::default(), day("2025-02-01"));
        assert_eq!(b.title, "your saga");
        assert_eq!(b.next_session, "Nothing scheduled yet");
        for binding in Binding::ALL {
            assert_eq!(b.get(binding), binding.placeholder());
        }
    }

    #[test]
    fn filled_fields_replace_placeholders() {
        let mut state = CampaignState::default();
        state.campaign.title = "The Sundered Isles".into();
        state.sessions.push(Session {
            title: "Landfall".into(),
            date: "2025-03-01".into(),
            status: "Upcoming".into(),
            ..Default::default()
        });
        let b = Bindings::compute(&state, day("2025-02-01"));
        assert_eq!(b.title, "The Sundered Isles");
        assert_eq!(b.genre, "Define the genre and stakes.");
        assert_eq!(b.next_session, "Landfall · Upcoming · Mar 1, 2025");
    }

    #[test]
    fn keys_parse_back() {
        for binding in Binding::ALL {
            assert_eq!(binding.key().parse::<Binding>().unwrap(), binding);
        }
        assert!("campaign-budget".parse::<Binding>().is_err());
    }
}
