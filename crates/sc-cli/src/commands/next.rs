use chrono::NaiveDate;

use sc_core::{Binding, Storage, Store};

pub fn run<S: Storage>(store: &Store<S>, today: NaiveDate) -> Result<(), String> {
    println!("{}", Binding::NextSession.resolve(store.state(), today));
    Ok(())
}
