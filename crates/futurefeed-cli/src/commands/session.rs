//! Phone-simulation commands: tapping apps, consuming the feed, leaving the
//! intercept or reward views.
//!
//! Quiz answers are validated here, in the presentation layer. The unlock
//! machine never sees the answer - only the completion signal, and only
//! after the answer checked out.

use chrono::Utc;
use futurefeed_core::{
    apps, CannedFeedProvider, Config, FeedItemKind, FeedPhase, FeedProvider, GeminiFeedProvider,
    UnlockMachine, View,
};

use super::{load_ticked, print_event, render_card};
use crate::session_store;

pub fn tap(app_id: &str, canned: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut machine = load_ticked(&config);

    let catalog = apps::default_catalog();
    let Some(app) = apps::find(&catalog, app_id) else {
        return Err(format!("unknown app id: {app_id} (see `apps`)").into());
    };

    match machine.tap_app(app) {
        Some(event) => print_event(&event)?,
        None => println!("nothing to tap here (current view: {:?})", machine.view()),
    }

    if let Some(req) = machine.pending_fetch() {
        println!("Preparing your Future Feed...");
        let batch = {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(async {
                if canned {
                    CannedFeedProvider::new().fetch_feed(&req.goal, req.count).await
                } else {
                    GeminiFeedProvider::from_config(&config.provider)
                        .fetch_feed(&req.goal, req.count)
                        .await
                }
            })
        };
        if let Some(event) = machine.apply_feed(req.seq, batch) {
            print_event(&event)?;
        }
    }

    show_current(&machine);
    session_store::save(&machine)
}

pub fn complete(answer: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut machine = load_ticked(&config);

    let Some(item) = machine.current_item().cloned() else {
        explain_missing_item(&machine);
        return session_store::save(&machine);
    };

    if item.kind == FeedItemKind::Quiz {
        let Some(answer) = answer else {
            return Err("this item is a quiz; pass --answer <number|text>".into());
        };
        let Some(chosen) = resolve_answer(answer, &item.options) else {
            return Err(format!("'{answer}' is not one of the options").into());
        };
        let correct = item.correct_answer.as_deref().unwrap_or_default();
        if chosen != correct {
            // Wrong answers don't consume the item.
            println!("Not quite. {}", item.explanation);
            std::process::exit(1);
        }
        println!("Correct! {}", item.explanation);
    }

    if let Some(event) = machine.complete_current_item() {
        print_event(&event)?;
    }

    match machine.view() {
        View::Reward => {
            let remaining = machine.remaining_unlock_ms(Utc::now());
            println!("Unlocked for {} seconds. Enjoy (responsibly).", remaining / 1000);
        }
        View::Intercept => show_current(&machine),
        _ => {}
    }
    session_store::save(&machine)
}

pub fn give_up() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut machine = load_ticked(&config);
    match machine.give_up() {
        Some(event) => print_event(&event)?,
        None => println!("not in an intercept (current view: {:?})", machine.view()),
    }
    session_store::save(&machine)
}

pub fn close() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut machine = load_ticked(&config);
    match machine.close_reward() {
        Some(event) => print_event(&event)?,
        None => println!("no reward open (current view: {:?})", machine.view()),
    }
    session_store::save(&machine)
}

pub fn status() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let machine = load_ticked(&config);
    print_event(&machine.snapshot(Utc::now()))?;
    session_store::save(&machine)
}

pub fn reset() -> Result<(), Box<dyn std::error::Error>> {
    session_store::reset()?;
    println!("session cleared; back to onboarding");
    Ok(())
}

fn show_current(machine: &UnlockMachine) {
    if let Some(item) = machine.current_item() {
        render_card(item, machine.items_consumed(), machine.items_required());
    } else {
        explain_missing_item(machine);
    }
}

fn explain_missing_item(machine: &UnlockMachine) {
    match machine.feed_phase() {
        Some(FeedPhase::Loading) => {
            println!("Feed is still loading; tap the app again to retry the fetch.")
        }
        Some(FeedPhase::Exhausted) => println!(
            "No more content, but only {}/{} items consumed. `give-up` to return home.",
            machine.items_consumed(),
            machine.items_required()
        ),
        Some(FeedPhase::Unavailable) => {
            println!("No goal set, so no feed could be generated. `give-up` to return home.")
        }
        _ => println!("no feed item to complete (current view: {:?})", machine.view()),
    }
}

/// Accept a 1-based option number or the option text (case-insensitive).
fn resolve_answer<'a>(input: &str, options: &'a [String]) -> Option<&'a str> {
    let input = input.trim();
    if let Ok(number) = input.parse::<usize>() {
        return options.get(number.checked_sub(1)?).map(String::as_str);
    }
    options
        .iter()
        .find(|o| o.eq_ignore_ascii_case(input))
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::resolve_answer;

    fn options() -> Vec<String> {
        vec!["O(1) average".into(), "O(log n) always".into()]
    }

    #[test]
    fn resolves_one_based_numbers() {
        let opts = options();
        assert_eq!(resolve_answer("1", &opts), Some("O(1) average"));
        assert_eq!(resolve_answer("2", &opts), Some("O(log n) always"));
        assert_eq!(resolve_answer("0", &opts), None);
        assert_eq!(resolve_answer("3", &opts), None);
    }

    #[test]
    fn resolves_text_case_insensitively() {
        let opts = options();
        assert_eq!(resolve_answer("o(1) AVERAGE", &opts), Some("O(1) average"));
        assert_eq!(resolve_answer("telekinesis", &opts), None);
    }
}
