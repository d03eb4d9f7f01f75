//! Local selection commands. These never reach a backend, so they skip the
//! session guard.

use envgate_core::{EnvgateConfig, EnvgateResult, FileSelectionStore, SelectionStore};

use crate::output::{format_info, format_success};

/// Print the stored environment name
pub fn current(config: &EnvgateConfig) -> EnvgateResult<()> {
    let store = FileSelectionStore::new(config.selection_file.clone());
    match store.get()? {
        Some(name) => println!("{}", name),
        None => println!("{}", format_info("No environment selected")),
    }
    Ok(())
}

/// Forget the stored environment name
pub fn clear(config: &EnvgateConfig) -> EnvgateResult<()> {
    let store = FileSelectionStore::new(config.selection_file.clone());
    store.clear()?;
    println!("{}", format_success("Environment selection cleared"));
    Ok(())
}
