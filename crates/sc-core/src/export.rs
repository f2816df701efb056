//! Export of the full campaign as a pretty-printed JSON file.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::info;

use crate::error::CrystalResult;
use crate::state::CampaignState;

/// Slug used when the campaign title has no usable characters.
pub const FALLBACK_SLUG: &str = "story-crystal";

/// The state as indented JSON, in the same shape it is persisted in.
pub fn export_json(state: &CampaignState) -> CrystalResult<String> {
    Ok(serde_json::to_string_pretty(state)?)
}

/// Lower-case the title and collapse every run of characters outside
/// `[a-z0-9]` into one hyphen, without leading or trailing hyphens.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;
    for c in title.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

/// `{slug}-chronicle-{YYYY-MM-DD}.json`
pub fn export_filename(title: &str, date: NaiveDate) -> String {
    let slug = match slugify(title) {
        s if s.is_empty() => FALLBACK_SLUG.to_string(),
        s => s,
    };
    format!("{slug}-chronicle-{}.json", date.format("%Y-%m-%d"))
}

/// Write the export file into `dir` and return its path.
pub fn write_export(state: &CampaignState, dir: &Path, today: NaiveDate) -> CrystalResult<PathBuf> {
    let path = dir.join(export_filename(&state.campaign.title, today));
    fs::write(&path, export_json(state)?)?;
    info!(path = %path.display(), "campaign exported");
    Ok(path)
}
