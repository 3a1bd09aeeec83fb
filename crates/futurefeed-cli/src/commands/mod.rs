pub mod apps;
pub mod auth;
pub mod config;
pub mod demo;
pub mod goal;
pub mod session;

use chrono::Utc;
use futurefeed_core::{Config, Event, FeedItem, FeedItemKind, UnlockMachine};

use crate::session_store;

/// Load the saved session and apply any reward expiry that happened while
/// the CLI was away.
pub fn load_ticked(config: &Config) -> UnlockMachine {
    let mut machine = session_store::load(config);
    if let Some(event) = machine.tick(Utc::now()) {
        let _ = print_event(&event);
    }
    machine
}

pub fn print_event(event: &Event) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(event)?);
    Ok(())
}

/// Render one feed card the way the phone mock would.
pub fn render_card(item: &FeedItem, consumed: usize, required: usize) {
    println!();
    println!("[{}/{}] {:?}: {}", consumed + 1, required, item.kind, item.headline);
    println!("{}", item.content);
    if item.kind == FeedItemKind::Quiz {
        for (i, option) in item.options.iter().enumerate() {
            println!("  {}. {option}", i + 1);
        }
        println!("(answer with `complete --answer <number|text>`)");
    } else {
        println!("(mark as read with `complete`)");
    }
}
