use chrono::NaiveDate;

use sc_core::render::{refresh, refresh_all};
use sc_core::{Section, Storage, Store};

use crate::view::TerminalView;

pub fn run<S: Storage>(
    store: &Store<S>,
    section: Option<&str>,
    today: NaiveDate,
) -> Result<(), String> {
    match section {
        Some(name) => {
            let section: Section = name.parse().map_err(|e: sc_core::CrystalError| {
                format!("{e}. Use: campaign, notes, sessions, npcs, locations, beats")
            })?;
            refresh(&mut TerminalView, store.state(), section, today);
        }
        None => refresh_all(&mut TerminalView, store.state(), today),
    }
    Ok(())
}
