//! # Future Feed Core Library
//!
//! This library provides the core logic for Future Feed, a phone-simulation
//! demo that intercepts taps on "distraction" apps and gates access behind a
//! short micro-learning feed. It follows a CLI-first philosophy: all
//! operations are available through the library and driven by the standalone
//! CLI binary, which acts as the presentation layer.
//!
//! ## Architecture
//!
//! - **Unlock Machine**: A wall-clock-based state machine that requires the
//!   caller to periodically invoke `tick()` and to drive the asynchronous
//!   content fetch it requests
//! - **Feed Provider**: Pluggable async content generation (Gemini-backed or
//!   canned), with all failures absorbed into fallback content at the boundary
//! - **Storage**: TOML-based configuration and OS-keyring credential storage
//!
//! ## Key Components
//!
//! - [`UnlockMachine`]: Core onboarding/home/intercept/reward state machine
//! - [`FeedProvider`]: Trait for feed-content generation backends
//! - [`Config`]: Application configuration management

pub mod apps;
pub mod auth;
pub mod config;
pub mod error;
pub mod events;
pub mod feed;
pub mod goal;
pub mod provider;
pub mod session;

pub use apps::{AppRole, MockApp};
pub use config::{Config, ProviderConfig, UnlockConfig};
pub use error::{ConfigError, CoreError, CredentialError};
pub use events::Event;
pub use feed::{FeedItem, FeedItemKind};
pub use goal::{Goal, GoalCategory};
pub use provider::{CannedFeedProvider, FeedBatch, FeedProvider, FeedSource, GeminiFeedProvider};
pub use session::{FeedPhase, FetchRequest, RewardTimer, UnlockMachine, View};
