use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::feed::{FeedItem, FeedItemKind};
use crate::goal::{Goal, GoalCategory};
use crate::provider::FeedSource;
use crate::session::{FeedPhase, View};

/// Every state change in the system produces an Event.
/// The presentation layer polls for events and renders snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// Onboarding completed; the goal is now fixed for the session.
    GoalSubmitted {
        category: GoalCategory,
        at: DateTime<Utc>,
    },
    /// Utility app tapped; opaque pass-through, no state change.
    AppOpened {
        app_id: String,
        at: DateTime<Utc>,
    },
    /// Distraction app tapped; the gate is up and a content fetch may be
    /// outstanding (see `UnlockMachine::pending_fetch`).
    InterceptStarted {
        app_id: String,
        fetch_seq: u64,
        at: DateTime<Utc>,
    },
    /// A content batch was installed into the intercept session.
    FeedReady {
        count: usize,
        source: FeedSource,
        at: DateTime<Utc>,
    },
    /// One feed item consumed below the unlock threshold.
    FeedItemCompleted {
        index: usize,
        kind: FeedItemKind,
        at: DateTime<Utc>,
    },
    /// The final required item was consumed; the reward window is open.
    RewardUnlocked {
        app_id: String,
        duration_ms: u64,
        at: DateTime<Utc>,
    },
    /// User gave up mid-intercept.
    InterceptAbandoned {
        items_consumed: usize,
        at: DateTime<Utc>,
    },
    /// User closed the reward view before expiry, forfeiting remaining time.
    RewardClosed {
        at: DateTime<Utc>,
    },
    /// The unlock window elapsed with no user action.
    RewardExpired {
        at: DateTime<Utc>,
    },
    /// Full state snapshot for the presentation layer.
    StateSnapshot {
        view: View,
        goal: Option<Goal>,
        target_app_id: Option<String>,
        feed_phase: Option<FeedPhase>,
        current_item: Option<FeedItem>,
        items_consumed: usize,
        items_required: usize,
        remaining_unlock_ms: u64,
        at: DateTime<Utc>,
    },
}
