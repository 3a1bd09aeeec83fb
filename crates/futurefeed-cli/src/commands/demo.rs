//! Scripted end-to-end session in one process.
//!
//! Runs the whole loop the phone mock would: onboarding, a distraction tap,
//! feed consumption (quizzes auto-answered with the correct option, printed
//! for the viewer), and the timed reward expiry driven by the one-shot
//! reward timer. Uses a short reward window so the demo ends quickly and
//! never touches the saved session.

use chrono::Utc;
use futurefeed_core::{
    apps, CannedFeedProvider, Config, FeedItemKind, FeedProvider, FetchRequest,
    GeminiFeedProvider, GoalCategory, RewardTimer, UnlockMachine, View,
};

use super::{print_event, render_card};

const DEMO_REWARD_MS: u64 = 2_000;

pub fn run(canned: bool) -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_inner(canned))
}

async fn run_inner(canned: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut machine = UnlockMachine::with_limits(config.unlock.required_items, DEMO_REWARD_MS);

    let event = machine
        .submit_goal("Learn Go by Friday", GoalCategory::Coding)
        .ok_or("goal submission was rejected")?;
    print_event(&event)?;

    let catalog = apps::default_catalog();
    let app = catalog
        .iter()
        .find(|a| a.is_distraction())
        .ok_or("no distraction app in catalog")?;
    println!("> tapping {}", app.name);
    print_event(&machine.tap_app(app).ok_or("tap was rejected")?)?;

    if let Some(req) = machine.pending_fetch() {
        println!("Preparing your Future Feed...");
        let batch = fetch(&config, canned, &req).await;
        if let Some(event) = machine.apply_feed(req.seq, batch) {
            print_event(&event)?;
        }
    }

    while let Some(item) = machine.current_item().cloned() {
        render_card(&item, machine.items_consumed(), machine.items_required());
        if item.kind == FeedItemKind::Quiz {
            let answer = item.correct_answer.clone().unwrap_or_default();
            println!("> answering: {answer}");
        }
        if let Some(event) = machine.complete_current_item() {
            print_event(&event)?;
        }
        if machine.view() != View::Intercept {
            break;
        }
    }

    match machine.view() {
        View::Reward => {
            let remaining = machine.remaining_unlock_ms(Utc::now());
            println!("Reward unlocked for {remaining} ms; doomscroll simulated, waiting for expiry...");

            let (tx, mut rx) = tokio::sync::mpsc::channel::<()>(1);
            let mut timer = RewardTimer::new();
            timer.schedule(std::time::Duration::from_millis(remaining), move || {
                let _ = tx.try_send(());
            });
            let _ = rx.recv().await;

            loop {
                if let Some(event) = machine.tick(Utc::now()) {
                    print_event(&event)?;
                    break;
                }
                tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            }
        }
        View::Intercept => {
            println!("Feed ran out before the threshold; giving up.");
            if let Some(event) = machine.give_up() {
                print_event(&event)?;
            }
        }
        _ => {}
    }

    println!("Demo finished at view {:?}.", machine.view());
    Ok(())
}

async fn fetch(config: &Config, canned: bool, req: &FetchRequest) -> futurefeed_core::FeedBatch {
    if canned {
        CannedFeedProvider::new().fetch_feed(&req.goal, req.count).await
    } else {
        GeminiFeedProvider::from_config(&config.provider)
            .fetch_feed(&req.goal, req.count)
            .await
    }
}
