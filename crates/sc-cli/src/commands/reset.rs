use std::io::{self, BufRead, Write};

use chrono::NaiveDate;

use sc_core::render::refresh_all;
use sc_core::{Storage, Store};

use crate::view::TerminalView;

const PROMPT: &str =
    "Reset Story Crystal? This will erase all stored campaign data in this directory. [y/N] ";

pub fn run<S: Storage>(store: &mut Store<S>, yes: bool, today: NaiveDate) -> Result<(), String> {
    if !yes && !confirm()? {
        println!("  Reset cancelled.");
        return Ok(());
    }

    store.reset();
    println!("  Campaign data erased.");
    println!();
    refresh_all(&mut TerminalView, store.state(), today);
    Ok(())
}

fn confirm() -> Result<bool, String> {
    print!("{PROMPT}");
    io::stdout()
        .flush()
        .map_err(|e| format!("cannot write prompt: {e}"))?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .map_err(|e| format!("cannot read answer: {e}"))?;
    println!();

    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
