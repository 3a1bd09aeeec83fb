//! Session persistence between CLI invocations.
//!
//! The machine snapshot lives as JSON next to the config file. This is a
//! presentation-driver convenience: the core never persists anything itself.

use std::path::PathBuf;

use futurefeed_core::{config, Config, UnlockMachine};

fn session_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    Ok(config::data_dir()?.join("session.json"))
}

/// Load the saved session, or start a fresh machine from config. A missing
/// or unreadable session file is not an error.
pub fn load(cfg: &Config) -> UnlockMachine {
    if let Ok(path) = session_path() {
        if let Ok(json) = std::fs::read_to_string(path) {
            if let Ok(machine) = serde_json::from_str::<UnlockMachine>(&json) {
                return machine;
            }
        }
    }
    UnlockMachine::from_config(cfg)
}

pub fn save(machine: &UnlockMachine) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(machine)?;
    std::fs::write(session_path()?, json)?;
    Ok(())
}

/// Delete the saved session. Succeeds if none exists.
pub fn reset() -> Result<(), Box<dyn std::error::Error>> {
    let path = session_path()?;
    match std::fs::remove_file(&path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
