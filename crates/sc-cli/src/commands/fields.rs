use chrono::NaiveDate;

use sc_core::render::refresh;
use sc_core::{CampaignField, NoteField, Section, Storage, Store};

use crate::view::TerminalView;

pub fn campaign<S: Storage>(
    store: &mut Store<S>,
    field: &str,
    value: String,
    today: NaiveDate,
) -> Result<(), String> {
    let field: CampaignField = field.parse().map_err(|e: sc_core::CrystalError| {
        format!("{e}. Use: title, genre, hook, tone, inspirations")
    })?;

    store.set_campaign_field(field, value);
    println!("  Updated campaign {field}");
    println!();
    refresh(&mut TerminalView, store.state(), Section::Campaign, today);
    Ok(())
}

pub fn note<S: Storage>(
    store: &mut Store<S>,
    field: &str,
    text: String,
    today: NaiveDate,
) -> Result<(), String> {
    let field: NoteField = field.parse().map_err(|e: sc_core::CrystalError| {
        let names: Vec<String> = NoteField::ALL.iter().map(|f| f.to_string()).collect();
        format!("{e}. Use: {}", names.join(", "))
    })?;

    store.set_note(field, text);
    println!("  Updated {}", field.label());
    println!();
    refresh(&mut TerminalView, store.state(), Section::Notes, today);
    Ok(())
}
