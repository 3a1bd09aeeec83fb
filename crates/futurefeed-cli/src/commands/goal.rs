use clap::Subcommand;
use futurefeed_core::{Config, GoalCategory, View};

use super::{load_ticked, print_event};
use crate::session_store;

#[derive(Subcommand)]
pub enum GoalAction {
    /// Set the session goal (completes onboarding)
    Set {
        /// Goal statement, e.g. "Learn Go by Friday"
        statement: String,
        /// Focus area: coding, language, fitness, finance, general
        #[arg(long, default_value = "general")]
        category: String,
    },
    /// Show the active goal
    Show,
}

pub fn run(action: GoalAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    match action {
        GoalAction::Set {
            statement,
            category,
        } => {
            let category: GoalCategory = category.parse()?;
            let mut machine = load_ticked(&config);
            match machine.submit_goal(&statement, category) {
                Some(event) => print_event(&event)?,
                None if machine.view() != View::Onboarding => {
                    println!("goal is already set for this session (`reset` to start over)");
                }
                None => println!("goal statement is empty; nothing happened"),
            }
            session_store::save(&machine)
        }
        GoalAction::Show => {
            let machine = load_ticked(&config);
            match machine.goal() {
                Some(goal) => println!("{}", serde_json::to_string_pretty(goal)?),
                None => println!("no goal set; run `goal set <statement>`"),
            }
            session_store::save(&machine)
        }
    }
}
