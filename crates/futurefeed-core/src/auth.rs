//! Provider credential storage.
//!
//! Thin wrapper around the OS keyring, with an environment-variable override
//! so the key can be injected without touching the keyring at all. The
//! provider never sees where the key came from; a missing key resolves to
//! fallback content downstream, never to an error.

use crate::config::ProviderConfig;
use crate::error::CredentialError;

const SERVICE: &str = "futurefeed";
const KEY_NAME: &str = "gemini_api_key";

/// Read the stored API key from the OS keyring (`None` if absent).
pub fn get_stored() -> Result<Option<String>, CredentialError> {
    let entry = keyring::Entry::new(SERVICE, KEY_NAME)?;
    match entry.get_password() {
        Ok(pw) => Ok(Some(pw)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Persist the API key to the OS keyring.
pub fn store(value: &str) -> Result<(), CredentialError> {
    let entry = keyring::Entry::new(SERVICE, KEY_NAME)?;
    entry.set_password(value)?;
    Ok(())
}

/// Remove the stored API key. Succeeds if none was stored.
pub fn clear() -> Result<(), CredentialError> {
    let entry = keyring::Entry::new(SERVICE, KEY_NAME)?;
    match entry.delete_credential() {
        Ok(()) => Ok(()),
        Err(keyring::Error::NoEntry) => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Resolve the API key: the environment variable named in the config wins,
/// then the keyring. Empty values count as absent.
pub fn api_key(cfg: &ProviderConfig) -> Option<String> {
    if let Ok(value) = std::env::var(&cfg.api_key_env) {
        if !value.is_empty() {
            return Some(value);
        }
    }
    get_stored().ok().flatten().filter(|v| !v.is_empty())
}
