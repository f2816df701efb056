//! Values computed from the campaign state on every render and never stored:
//! display order, status badge classes, calendar dates and the next session.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Local, NaiveDate};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::record::{Beat, Location, Npc, Session};

/// `strftime` pattern for short human dates such as "Jan 5, 2025".
pub const SHORT_DATE_FORMAT: &str = "%b %-d, %Y";

/// Style category of a free-text status word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusClass {
    /// Not started yet.
    Planned,
    /// Currently in play.
    Active,
    /// Finished or closed.
    Complete,
}

impl StatusClass {
    /// Classify a free-text status. Unrecognized text is `Planned`.
    pub fn classify(status: &str) -> Self {
        match status.trim().to_lowercase().as_str() {
            "upcoming" | "planned" | "foreshadowed" => Self::Planned,
            "in progress" | "active" | "running" | "in motion" => Self::Active,
            "complete" | "completed" | "resolved" | "closed" => Self::Complete,
            _ => Self::Planned,
        }
    }
}

impl fmt::Display for StatusClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Planned => write!(f, "planned"),
            Self::Active => write!(f, "active"),
            Self::Complete => write!(f, "complete"),
        }
    }
}

/// Today's calendar date in local time.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a stored date as a calendar date.
///
/// Accepts `YYYY-MM-DD` and RFC 3339 timestamps (reduced to the local date).
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Local).date_naive())
}

/// Render a stored date as "Jan 5, 2025". Text that is not a date comes back verbatim.
pub fn format_date(value: &str) -> String {
    match parse_date(value) {
        Some(date) => date.format(SHORT_DATE_FORMAT).to_string(),
        None => value.to_string(),
    }
}

/// Collation key: decomposed, accents stripped, lower-cased.
///
/// "Élodie" and "elodie" share a key, so accented names sit next to their
/// plain-letter neighbours instead of after "z".
pub fn collation_key(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Locale-style text ordering.
///
/// Compares collation keys first, then case-insensitively, then exactly, so
/// the order is total and stable across runs.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

/// Sessions by date ascending; undated ones follow in their stored order.
pub fn sort_sessions(sessions: &[Session]) -> Vec<&Session> {
    let mut sorted: Vec<&Session> = sessions.iter().collect();
    sorted.sort_by_key(|s| {
        let date = parse_date(&s.date);
        (date.is_none(), date)
    });
    sorted
}

/// NPCs alphabetically by name.
pub fn sort_npcs(npcs: &[Npc]) -> Vec<&Npc> {
    let mut sorted: Vec<&Npc> = npcs.iter().collect();
    sorted.sort_by(|a, b| compare_text(&a.name, &b.name));
    sorted
}

/// Locations alphabetically by name.
pub fn sort_locations(locations: &[Location]) -> Vec<&Location> {
    let mut sorted: Vec<&Location> = locations.iter().collect();
    sorted.sort_by(|a, b| compare_text(&a.name, &b.name));
    sorted
}

/// Beats by stage, then by title.
pub fn sort_beats(beats: &[Beat]) -> Vec<&Beat> {
    let mut sorted: Vec<&Beat> = beats.iter().collect();
    sorted.sort_by(|a, b| compare_text(&a.stage, &b.stage).then_with(|| compare_text(&a.title, &b.title)));
    sorted
}

/// The session to advertise as "next".
///
/// The earliest dated session on or after `today`; failing that, the most
/// recent past one. Sessions without a parseable date never qualify.
pub fn next_session(sessions: &[Session], today: NaiveDate) -> Option<&Session> {
    let mut dated: Vec<(NaiveDate, &Session)> = sessions
        .iter()
        .filter_map(|s| parse_date(&s.date).map(|d| (d, s)))
        .collect();
    dated.sort_by_key(|(date, _)| *date);

    dated
        .iter()
        .find(|(date, _)| *date >= today)
        .or_else(|| dated.last())
        .map(|(_, session)| *session)
}

/// Label for the next session: `title · status · date`, `title · date`, or the title alone.
pub fn next_session_label(sessions: &[Session], today: NaiveDate) -> Option<String> {
    let session = next_session(sessions, today)?;
    let date = format_date(&session.date);

    let label = match (session.status.is_empty(), date.is_empty()) {
        (false, false) => format!("{} · {} · {}", session.title, session.status, date),
        (true, false) => format!("{} · {}", session.title, date),
        _ => session.title.clone(),
    };
    Some(label)
}
