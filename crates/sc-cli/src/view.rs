//! Terminal rendering of the notebook.

use colored::{ColoredString, Colorize};
use comfy_table::{ContentArrangement, Table};

use sc_core::{Binding, Bindings, NoteField, Record, StatusClass, View};

const NO_DETAILS: &str = "No details recorded yet.";
const EMPTY_NOTE: &str = "(empty)";

/// Prints each refreshed section to stdout.
pub struct TerminalView;

impl View for TerminalView {
    fn bindings(&mut self, bindings: &Bindings) {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Campaign", "Value"]);

        for binding in Binding::ALL {
            table.add_row(vec![binding_label(binding), bindings.get(binding)]);
        }

        println!("{table}");
        println!();
    }

    fn notes(&mut self, notes: &[(NoteField, &str)]) {
        println!("{}", "Notes".bold());
        for (field, text) in notes {
            print!("{}", note(*field, text));
        }
        println!();
    }

    fn collection<R: Record>(&mut self, records: &[&R]) {
        println!("{}", R::SECTION.title().bold());

        if records.is_empty() {
            println!("  {}", R::EMPTY_TEXT.dimmed());
            println!();
            return;
        }

        for record in records {
            print!("{}", card(*record));
        }
        println!("  {} {}", records.len(), plural(records.len(), "entry", "entries"));
        println!();
    }
}

fn binding_label(binding: Binding) -> &'static str {
    match binding {
        Binding::CampaignTitle => "Title",
        Binding::CampaignGenre => "Genre",
        Binding::CampaignTone => "Tone",
        Binding::CampaignHook => "Hook",
        Binding::CampaignInspirations => "Inspirations",
        Binding::NextSession => "Next session",
    }
}

/// One scratch note: bold label with its CLI name, then the text indented.
pub fn note(field: NoteField, text: &str) -> String {
    let mut out = format!("  {} ({field})\n", field.label().bold());
    if text.is_empty() {
        out.push_str(&format!("    {}\n", EMPTY_NOTE.dimmed()));
    } else {
        for line in text.lines() {
            out.push_str(&format!("    {line}\n"));
        }
    }
    out
}

/// One record as a text card: heading line, id, then labelled details.
pub fn card<R: Record>(record: &R) -> String {
    let mut header = format!("  {}", record.heading().bold());
    if let Some(subtitle) = record.subtitle() {
        header.push_str(&format!("  {}", subtitle.italic()));
    }
    if let Some((text, class)) = record.badge() {
        header.push_str(&format!("  {}", badge(&text, class)));
    }

    let mut out = format!("{header}\n");
    out.push_str(&format!("    {}\n", format!("id {}", record.id()).dimmed()));

    let details = record.details();
    if details.is_empty() {
        out.push_str(&format!("    {}\n", NO_DETAILS.dimmed()));
    } else {
        for (label, value) in details {
            out.push_str(&format!("    {label}: {value}\n"));
        }
    }
    out.push('\n');
    out
}

fn badge(text: &str, class: StatusClass) -> ColoredString {
    let text = format!("[{text}]");
    match class {
        StatusClass::Planned => text.cyan(),
        StatusClass::Active => text.yellow(),
        StatusClass::Complete => text.green(),
    }
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 { one } else { many }
}
