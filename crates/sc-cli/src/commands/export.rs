use std::path::Path;

use chrono::NaiveDate;

use sc_core::export::write_export;
use sc_core::{Storage, Store};

pub fn run<S: Storage>(store: &Store<S>, out: &Path, today: NaiveDate) -> Result<(), String> {
    let path = write_export(store.state(), out, today).map_err(|e| e.to_string())?;
    println!("  Exported to {}", path.display());
    Ok(())
}
