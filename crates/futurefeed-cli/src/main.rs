use clap::{Parser, Subcommand};

mod commands;
mod session_store;

#[derive(Parser)]
#[command(name = "futurefeed-cli", version, about = "Future Feed phone-simulation CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Goal management (onboarding)
    Goal {
        #[command(subcommand)]
        action: commands::goal::GoalAction,
    },
    /// List the home-screen app catalog
    Apps,
    /// Tap an app icon on the home screen
    Tap {
        /// App id (see `apps`)
        app_id: String,
        /// Use the offline canned provider instead of Gemini
        #[arg(long)]
        canned: bool,
    },
    /// Complete the currently displayed feed item
    Complete {
        /// Selected option for quiz items (1-based number or option text)
        #[arg(long)]
        answer: Option<String>,
    },
    /// Abandon the intercept and return home
    GiveUp,
    /// Close the reward view early, forfeiting remaining unlock time
    Close,
    /// Print the current state snapshot as JSON
    Status,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Provider credential management
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
    /// Run a scripted end-to-end session in one process
    Demo {
        /// Use the offline canned provider instead of Gemini
        #[arg(long)]
        canned: bool,
    },
    /// Delete the saved session and start over at onboarding
    Reset,
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Goal { action } => commands::goal::run(action),
        Commands::Apps => commands::apps::run(),
        Commands::Tap { app_id, canned } => commands::session::tap(&app_id, canned),
        Commands::Complete { answer } => commands::session::complete(answer.as_deref()),
        Commands::GiveUp => commands::session::give_up(),
        Commands::Close => commands::session::close(),
        Commands::Status => commands::session::status(),
        Commands::Config { action } => commands::config::run(action),
        Commands::Auth { action } => commands::auth::run(action),
        Commands::Demo { canned } => commands::demo::run(canned),
        Commands::Reset => commands::session::reset(),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
