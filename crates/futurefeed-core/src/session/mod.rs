//! Unlock session: the onboarding → home → intercept → reward state machine
//! and the cancellable reward-expiry timer.

mod machine;
mod timer;

pub use machine::{
    FeedPhase, FetchRequest, UnlockMachine, View, DEFAULT_REQUIRED_ITEMS,
    DEFAULT_REWARD_DURATION_MS,
};
pub use timer::RewardTimer;
