use clap::Subcommand;
use futurefeed_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the full configuration as JSON
    Show,
    /// Set a config value
    Set {
        /// One of: unlock.required_items, unlock.reward_duration_secs,
        /// provider.model, provider.api_key_env, provider.timeout_secs
        key: String,
        /// New value
        value: String,
    },
    /// Reset config to defaults
    Reset,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show => {
            let config = Config::load_or_default();
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load_or_default();
            match key.as_str() {
                "unlock.required_items" => config.unlock.required_items = value.parse()?,
                "unlock.reward_duration_secs" => {
                    config.unlock.reward_duration_secs = value.parse()?
                }
                "provider.model" => config.provider.model = value,
                "provider.api_key_env" => config.provider.api_key_env = value,
                "provider.timeout_secs" => config.provider.timeout_secs = value.parse()?,
                other => return Err(format!("unknown config key: {other}").into()),
            }
            config.save()?;
            println!("ok");
        }
        ConfigAction::Reset => {
            Config::default().save()?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}
