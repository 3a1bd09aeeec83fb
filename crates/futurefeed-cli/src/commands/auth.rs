use clap::Subcommand;
use futurefeed_core::{auth, Config};

#[derive(Subcommand)]
pub enum AuthAction {
    /// Store the Gemini API key in the OS keyring
    SetKey {
        key: String,
    },
    /// Show where a key would be resolved from
    Show,
    /// Remove the stored API key
    Clear,
}

pub fn run(action: AuthAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        AuthAction::SetKey { key } => {
            auth::store(&key)?;
            println!("ok");
        }
        AuthAction::Show => {
            let config = Config::load_or_default();
            let env_name = &config.provider.api_key_env;
            match std::env::var(env_name) {
                Ok(v) if !v.is_empty() => println!("using ${env_name} ({} chars)", v.len()),
                _ => match auth::get_stored()? {
                    Some(key) => println!("using keyring entry ({} chars)", key.len()),
                    None => println!("no key configured; set ${env_name} or run `auth set-key`"),
                },
            }
        }
        AuthAction::Clear => {
            auth::clear()?;
            println!("ok");
        }
    }
    Ok(())
}
