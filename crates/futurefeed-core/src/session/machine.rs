//! Unlock state machine implementation.
//!
//! The machine is wall-clock-based. It does not use internal threads or run
//! the content fetch itself - the caller drives both: `tick()` is invoked
//! periodically to apply reward expiry, and `pending_fetch()` tells the
//! caller which fetch to run and hand back via `apply_feed()`.
//!
//! ## State Transitions
//!
//! ```text
//! Onboarding -> Home <-> Intercept -> Reward -> Home
//! ```
//!
//! Commands return `Some(Event)` when a transition (or observable action)
//! happened and `None` when the intent was ignored. Invalid intents never
//! error: an empty goal statement, a completion signal while loading, or a
//! stale fetch result are all silently dropped.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::apps::{AppRole, MockApp};
use crate::config::Config;
use crate::events::Event;
use crate::feed::FeedItem;
use crate::goal::{Goal, GoalCategory};
use crate::provider::FeedBatch;

pub const DEFAULT_REQUIRED_ITEMS: usize = 3;
pub const DEFAULT_REWARD_DURATION_MS: u64 = 60_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Onboarding,
    Home,
    Intercept,
    Reward,
}

/// Sub-state of the intercept view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedPhase {
    /// Content fetch outstanding; no item exists to consume yet.
    Loading,
    /// Items available at the current index.
    Ready,
    /// The sequence ran out below the unlock threshold. Recoverable error
    /// display; give-up remains available.
    Exhausted,
    /// Intercept entered with no active goal, so no fetch was issued.
    Unavailable,
}

/// Handed to the caller when an intercept needs content. The `seq` must be
/// passed back to [`UnlockMachine::apply_feed`] so that a fetch resolving
/// after abandonment is dropped instead of resurrecting stale items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchRequest {
    pub seq: u64,
    pub goal: Goal,
    pub count: usize,
}

/// Core unlock state machine.
///
/// All mutation happens through the command methods; presentation observes
/// the machine only through queries and [`UnlockMachine::snapshot`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnlockMachine {
    view: View,
    goal: Option<Goal>,
    target_app: Option<MockApp>,
    feed_items: Vec<FeedItem>,
    items_consumed: usize,
    items_required: usize,
    #[serde(default)]
    phase: Option<FeedPhase>,
    /// Generation counter for content fetches. Bumped on every new intercept
    /// and on abandonment; `apply_feed` ignores batches from older
    /// generations.
    #[serde(default)]
    fetch_seq: u64,
    reward_duration_ms: u64,
    /// Expiry instant while in the reward view. Cleared on every path out of
    /// reward so a stale expiry can never fire against a later state.
    #[serde(default)]
    unlock_deadline: Option<DateTime<Utc>>,
}

impl UnlockMachine {
    /// Create a machine at the onboarding view with default thresholds.
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_REQUIRED_ITEMS, DEFAULT_REWARD_DURATION_MS)
    }

    /// Create a machine with an explicit unlock threshold and reward window.
    pub fn with_limits(items_required: usize, reward_duration_ms: u64) -> Self {
        Self {
            view: View::Onboarding,
            goal: None,
            target_app: None,
            feed_items: Vec::new(),
            items_consumed: 0,
            items_required: items_required.max(1),
            phase: None,
            fetch_seq: 0,
            reward_duration_ms,
            unlock_deadline: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::with_limits(
            config.unlock.required_items,
            config.unlock.reward_duration_secs.saturating_mul(1000),
        )
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn view(&self) -> View {
        self.view
    }

    pub fn goal(&self) -> Option<&Goal> {
        self.goal.as_ref()
    }

    pub fn target_app(&self) -> Option<&MockApp> {
        self.target_app.as_ref()
    }

    pub fn feed_phase(&self) -> Option<FeedPhase> {
        self.phase
    }

    pub fn feed_items(&self) -> &[FeedItem] {
        &self.feed_items
    }

    pub fn items_consumed(&self) -> usize {
        self.items_consumed
    }

    pub fn items_required(&self) -> usize {
        self.items_required
    }

    /// The item currently presented, if the intercept feed is ready.
    pub fn current_item(&self) -> Option<&FeedItem> {
        if self.view == View::Intercept && self.phase == Some(FeedPhase::Ready) {
            self.feed_items.get(self.items_consumed)
        } else {
            None
        }
    }

    /// The fetch the caller should run, while one is outstanding.
    pub fn pending_fetch(&self) -> Option<FetchRequest> {
        if self.view != View::Intercept || self.phase != Some(FeedPhase::Loading) {
            return None;
        }
        let goal = self.goal.clone()?;
        Some(FetchRequest {
            seq: self.fetch_seq,
            goal,
            count: self.items_required,
        })
    }

    /// Milliseconds of unlock time left at `now`; 0 outside the reward view.
    pub fn remaining_unlock_ms(&self, now: DateTime<Utc>) -> u64 {
        match (self.view, self.unlock_deadline) {
            (View::Reward, Some(deadline)) => (deadline - now).num_milliseconds().max(0) as u64,
            _ => 0,
        }
    }

    /// Build a full state snapshot event for the presentation layer.
    pub fn snapshot(&self, now: DateTime<Utc>) -> Event {
        Event::StateSnapshot {
            view: self.view,
            goal: self.goal.clone(),
            target_app_id: self.target_app.as_ref().map(|a| a.id.clone()),
            feed_phase: self.phase,
            current_item: self.current_item().cloned(),
            items_consumed: self.items_consumed,
            items_required: self.items_required,
            remaining_unlock_ms: self.remaining_unlock_ms(now),
            at: now,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Complete onboarding. An empty or whitespace-only statement blocks the
    /// transition silently.
    pub fn submit_goal(&mut self, statement: &str, category: GoalCategory) -> Option<Event> {
        if self.view != View::Onboarding {
            return None;
        }
        let statement = statement.trim();
        if statement.is_empty() {
            return None;
        }
        self.goal = Some(Goal::new(statement, category));
        self.view = View::Home;
        Some(Event::GoalSubmitted {
            category,
            at: Utc::now(),
        })
    }

    /// Tap an app on the home screen. Utilities pass through without a view
    /// change; distractions raise the intercept gate and request content.
    pub fn tap_app(&mut self, app: &MockApp) -> Option<Event> {
        if self.view != View::Home {
            return None;
        }
        match app.role {
            AppRole::Utility => Some(Event::AppOpened {
                app_id: app.id.clone(),
                at: Utc::now(),
            }),
            AppRole::Distraction => {
                self.target_app = Some(app.clone());
                self.items_consumed = 0;
                self.feed_items.clear();
                self.view = View::Intercept;
                if self.goal.is_some() {
                    self.fetch_seq += 1;
                    self.phase = Some(FeedPhase::Loading);
                } else {
                    // No goal, no fetch: the feed stays empty and the view
                    // shows an error affordance.
                    self.phase = Some(FeedPhase::Unavailable);
                }
                Some(Event::InterceptStarted {
                    app_id: app.id.clone(),
                    fetch_seq: self.fetch_seq,
                    at: Utc::now(),
                })
            }
        }
    }

    /// Install a fetched batch. Batches carrying a stale `seq`, or arriving
    /// when the machine is no longer waiting in an intercept, are discarded.
    pub fn apply_feed(&mut self, seq: u64, batch: FeedBatch) -> Option<Event> {
        if self.view != View::Intercept
            || self.phase != Some(FeedPhase::Loading)
            || seq != self.fetch_seq
        {
            return None;
        }
        let count = batch.items.len();
        self.feed_items = batch.items;
        self.phase = Some(if count == 0 {
            FeedPhase::Exhausted
        } else {
            FeedPhase::Ready
        });
        Some(Event::FeedReady {
            count,
            source: batch.source,
            at: Utc::now(),
        })
    }

    /// Consume the currently presented item.
    ///
    /// The machine never validates quiz answers - that is the presentation
    /// layer's responsibility; this method only receives the completion
    /// signal. Each accepted call increments the consumed count by exactly
    /// one. Reaching the threshold on this call opens the reward window;
    /// running out of items below it flips to [`FeedPhase::Exhausted`].
    pub fn complete_current_item(&mut self) -> Option<Event> {
        if self.view != View::Intercept || self.phase != Some(FeedPhase::Ready) {
            return None;
        }
        let Some(item) = self.feed_items.get(self.items_consumed) else {
            self.phase = Some(FeedPhase::Exhausted);
            return None;
        };
        let index = self.items_consumed;
        let kind = item.kind;
        self.items_consumed += 1;

        if self.items_consumed >= self.items_required {
            self.items_consumed = self.items_required;
            let app_id = self
                .target_app
                .as_ref()
                .map(|a| a.id.clone())
                .unwrap_or_default();
            self.enter_reward();
            return Some(Event::RewardUnlocked {
                app_id,
                duration_ms: self.reward_duration_ms,
                at: Utc::now(),
            });
        }

        if self.items_consumed >= self.feed_items.len() {
            self.phase = Some(FeedPhase::Exhausted);
        }
        Some(Event::FeedItemCompleted {
            index,
            kind,
            at: Utc::now(),
        })
    }

    /// Abandon the intercept. Also invalidates any in-flight fetch.
    pub fn give_up(&mut self) -> Option<Event> {
        if self.view != View::Intercept {
            return None;
        }
        let items_consumed = self.items_consumed;
        self.fetch_seq += 1;
        self.return_home();
        Some(Event::InterceptAbandoned {
            items_consumed,
            at: Utc::now(),
        })
    }

    /// Close the reward view early. Forfeits the remaining unlock time and
    /// cancels the pending expiry.
    pub fn close_reward(&mut self) -> Option<Event> {
        if self.view != View::Reward {
            return None;
        }
        self.return_home();
        Some(Event::RewardClosed { at: Utc::now() })
    }

    /// Call periodically. Returns `Some(Event::RewardExpired)` once the
    /// unlock window has elapsed.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Option<Event> {
        if self.view != View::Reward {
            return None;
        }
        let deadline = self.unlock_deadline?;
        if now < deadline {
            return None;
        }
        self.return_home();
        Some(Event::RewardExpired { at: now })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn enter_reward(&mut self) {
        // Overwrites any previous deadline: entering reward re-arms the
        // one-shot.
        self.view = View::Reward;
        self.phase = None;
        self.unlock_deadline =
            Some(Utc::now() + Duration::milliseconds(self.reward_duration_ms as i64));
    }

    fn return_home(&mut self) {
        self.view = View::Home;
        self.target_app = None;
        self.feed_items.clear();
        self.items_consumed = 0;
        self.phase = None;
        self.unlock_deadline = None;
    }
}

impl Default for UnlockMachine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apps::default_catalog;
    use crate::feed::{FeedItem, FeedItemKind};
    use crate::provider::FeedBatch;
    use proptest::prelude::*;

    fn items(n: usize) -> Vec<FeedItem> {
        (0..n)
            .map(|i| FeedItem::new(FeedItemKind::Fact, format!("h{i}"), "c", "e"))
            .collect()
    }

    fn distraction() -> MockApp {
        default_catalog()
            .into_iter()
            .find(|a| a.is_distraction())
            .unwrap()
    }

    fn utility() -> MockApp {
        default_catalog()
            .into_iter()
            .find(|a| !a.is_distraction())
            .unwrap()
    }

    /// Machine at home with a goal and default limits.
    fn at_home() -> UnlockMachine {
        let mut m = UnlockMachine::new();
        m.submit_goal("Learn Go by Friday", GoalCategory::Coding)
            .unwrap();
        m
    }

    /// Machine in intercept with `supply` ready items.
    fn at_intercept(supply: usize) -> UnlockMachine {
        let mut m = at_home();
        m.tap_app(&distraction()).unwrap();
        let req = m.pending_fetch().unwrap();
        m.apply_feed(req.seq, FeedBatch::generated(items(supply)))
            .unwrap();
        m
    }

    #[test]
    fn goal_submission_transitions_once() {
        let mut m = UnlockMachine::new();
        assert_eq!(m.view(), View::Onboarding);
        assert!(m
            .submit_goal("Learn Go by Friday", GoalCategory::Coding)
            .is_some());
        assert_eq!(m.view(), View::Home);
        assert_eq!(m.goal().unwrap().statement, "Learn Go by Friday");

        // Second submission is ignored; the goal is fixed for the session.
        assert!(m.submit_goal("Something else", GoalCategory::Fitness).is_none());
        assert_eq!(m.goal().unwrap().category, GoalCategory::Coding);
    }

    #[test]
    fn empty_goal_statement_is_silently_blocked() {
        let mut m = UnlockMachine::new();
        assert!(m.submit_goal("", GoalCategory::General).is_none());
        assert!(m.submit_goal("   \t ", GoalCategory::General).is_none());
        assert_eq!(m.view(), View::Onboarding);
        assert!(m.goal().is_none());
    }

    #[test]
    fn utility_tap_never_changes_view() {
        let mut m = at_home();
        let event = m.tap_app(&utility()).unwrap();
        assert!(matches!(event, Event::AppOpened { .. }));
        assert_eq!(m.view(), View::Home);
        assert!(m.pending_fetch().is_none());
    }

    #[test]
    fn distraction_tap_intercepts_and_requests_one_fetch() {
        let mut m = at_home();
        let app = distraction();
        let event = m.tap_app(&app).unwrap();
        assert!(matches!(event, Event::InterceptStarted { .. }));
        assert_eq!(m.view(), View::Intercept);
        assert_eq!(m.feed_phase(), Some(FeedPhase::Loading));
        assert_eq!(m.items_consumed(), 0);
        assert_eq!(m.target_app().unwrap().id, app.id);

        let req = m.pending_fetch().unwrap();
        assert_eq!(req.count, m.items_required());
        assert_eq!(req.goal.statement, "Learn Go by Friday");
    }

    #[test]
    fn completion_is_rejected_while_loading() {
        let mut m = at_home();
        m.tap_app(&distraction()).unwrap();
        assert!(m.complete_current_item().is_none());
        assert_eq!(m.items_consumed(), 0);
        assert!(m.current_item().is_none());
    }

    #[test]
    fn threshold_reached_exactly_on_final_completion() {
        let mut m = at_intercept(3);
        assert_eq!(m.feed_phase(), Some(FeedPhase::Ready));

        for expected in 1..=2 {
            let event = m.complete_current_item().unwrap();
            assert!(matches!(event, Event::FeedItemCompleted { .. }));
            assert_eq!(m.items_consumed(), expected);
            assert_eq!(m.view(), View::Intercept);
        }

        let event = m.complete_current_item().unwrap();
        assert!(matches!(event, Event::RewardUnlocked { duration_ms, .. } if duration_ms == 60_000));
        assert_eq!(m.view(), View::Reward);
        assert_eq!(m.items_consumed(), 3);

        // No further completions in reward.
        assert!(m.complete_current_item().is_none());
        assert_eq!(m.items_consumed(), 3);
    }

    #[test]
    fn single_fallback_item_leaves_intercept_exhausted() {
        let mut m = at_home();
        m.tap_app(&distraction()).unwrap();
        let req = m.pending_fetch().unwrap();
        m.apply_feed(req.seq, FeedBatch::missing_credential()).unwrap();

        assert_eq!(m.feed_phase(), Some(FeedPhase::Ready));
        assert!(m.complete_current_item().is_some());
        assert_eq!(m.items_consumed(), 1);
        assert_eq!(m.view(), View::Intercept);
        assert_eq!(m.feed_phase(), Some(FeedPhase::Exhausted));
        assert!(m.current_item().is_none());

        // Still recoverable.
        assert!(m.give_up().is_some());
        assert_eq!(m.view(), View::Home);
    }

    #[test]
    fn empty_batch_goes_straight_to_exhausted() {
        let mut m = at_home();
        m.tap_app(&distraction()).unwrap();
        let req = m.pending_fetch().unwrap();
        m.apply_feed(req.seq, FeedBatch::generated(vec![])).unwrap();
        assert_eq!(m.feed_phase(), Some(FeedPhase::Exhausted));
        assert!(m.current_item().is_none());
    }

    #[test]
    fn give_up_resets_and_returns_home() {
        let mut m = at_intercept(3);
        m.complete_current_item().unwrap();
        assert_eq!(m.items_consumed(), 1);

        let event = m.give_up().unwrap();
        assert!(matches!(event, Event::InterceptAbandoned { items_consumed: 1, .. }));
        assert_eq!(m.view(), View::Home);
        assert_eq!(m.items_consumed(), 0);
        assert!(m.target_app().is_none());
        assert!(m.feed_items().is_empty());
    }

    #[test]
    fn fetch_resolving_after_abandonment_is_discarded() {
        let mut m = at_home();
        m.tap_app(&distraction()).unwrap();
        let req = m.pending_fetch().unwrap();
        m.give_up().unwrap();

        // Late result for the abandoned session.
        assert!(m.apply_feed(req.seq, FeedBatch::generated(items(3))).is_none());
        assert_eq!(m.view(), View::Home);
        assert!(m.feed_items().is_empty());
    }

    #[test]
    fn stale_generation_is_discarded_even_mid_intercept() {
        let mut m = at_home();
        m.tap_app(&distraction()).unwrap();
        let old = m.pending_fetch().unwrap();
        m.give_up().unwrap();

        m.tap_app(&distraction()).unwrap();
        let fresh = m.pending_fetch().unwrap();
        assert!(fresh.seq > old.seq);

        // The old generation must not populate the new session.
        assert!(m.apply_feed(old.seq, FeedBatch::generated(items(1))).is_none());
        assert_eq!(m.feed_phase(), Some(FeedPhase::Loading));

        assert!(m.apply_feed(fresh.seq, FeedBatch::generated(items(3))).is_some());
        assert_eq!(m.feed_phase(), Some(FeedPhase::Ready));
    }

    #[test]
    fn double_apply_of_same_batch_is_ignored() {
        let mut m = at_home();
        m.tap_app(&distraction()).unwrap();
        let req = m.pending_fetch().unwrap();
        assert!(m.apply_feed(req.seq, FeedBatch::generated(items(3))).is_some());
        assert!(m.apply_feed(req.seq, FeedBatch::generated(items(1))).is_none());
        assert_eq!(m.feed_items().len(), 3);
    }

    #[test]
    fn reward_expires_via_tick_and_resets() {
        let mut m = at_intercept(3);
        for _ in 0..3 {
            m.complete_current_item();
        }
        assert_eq!(m.view(), View::Reward);

        let now = Utc::now();
        assert!(m.remaining_unlock_ms(now) > 0);
        assert!(m.tick(now).is_none()); // before the deadline

        let later = now + Duration::milliseconds(60_001);
        let event = m.tick(later).unwrap();
        assert!(matches!(event, Event::RewardExpired { .. }));
        assert_eq!(m.view(), View::Home);
        assert_eq!(m.items_consumed(), 0);
        assert!(m.target_app().is_none());
        assert_eq!(m.remaining_unlock_ms(later), 0);
        assert!(m.feed_items().is_empty());
    }

    #[test]
    fn closing_reward_cancels_the_pending_expiry() {
        let mut m = at_intercept(3);
        for _ in 0..3 {
            m.complete_current_item();
        }
        let event = m.close_reward().unwrap();
        assert!(matches!(event, Event::RewardClosed { .. }));
        assert_eq!(m.view(), View::Home);

        // A tick long past the old deadline must not fire against the new
        // state.
        let later = Utc::now() + Duration::hours(1);
        assert!(m.tick(later).is_none());
        assert_eq!(m.view(), View::Home);
    }

    #[test]
    fn reentering_reward_rearms_the_deadline() {
        let mut m = UnlockMachine::with_limits(1, 60_000);
        m.submit_goal("Learn Go by Friday", GoalCategory::Coding)
            .unwrap();
        m.tap_app(&distraction()).unwrap();
        let req = m.pending_fetch().unwrap();
        m.apply_feed(req.seq, FeedBatch::generated(items(1))).unwrap();
        m.complete_current_item().unwrap();
        assert_eq!(m.view(), View::Reward);
        m.close_reward().unwrap();

        // Second round.
        m.tap_app(&distraction()).unwrap();
        let req = m.pending_fetch().unwrap();
        m.apply_feed(req.seq, FeedBatch::generated(items(1))).unwrap();
        m.complete_current_item().unwrap();
        assert_eq!(m.view(), View::Reward);
        assert!(m.remaining_unlock_ms(Utc::now()) > 59_000);
    }

    #[test]
    fn intercept_without_goal_is_unavailable() {
        // A home view without a goal is only reachable through a restored
        // snapshot (e.g. a hand-edited session file); the machine still must
        // degrade instead of fetching.
        let json = serde_json::json!({
            "view": "home",
            "goal": null,
            "target_app": null,
            "feed_items": [],
            "items_consumed": 0,
            "items_required": 3,
            "reward_duration_ms": 60_000u64,
        });
        let mut m: UnlockMachine = serde_json::from_value(json).unwrap();
        assert!(m.goal().is_none());

        m.tap_app(&distraction()).unwrap();
        assert_eq!(m.view(), View::Intercept);
        assert_eq!(m.feed_phase(), Some(FeedPhase::Unavailable));
        assert!(m.pending_fetch().is_none());
        assert!(m.complete_current_item().is_none());
        assert!(m.give_up().is_some());
    }

    #[test]
    fn machine_roundtrips_through_serde() {
        let m = at_intercept(3);
        let json = serde_json::to_string(&m).unwrap();
        let restored: UnlockMachine = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.view(), View::Intercept);
        assert_eq!(restored.feed_phase(), Some(FeedPhase::Ready));
        assert_eq!(restored.feed_items().len(), 3);
        assert_eq!(restored.items_required(), 3);
    }

    #[test]
    fn snapshot_reflects_current_item() {
        let m = at_intercept(3);
        let snap = m.snapshot(Utc::now());
        match snap {
            Event::StateSnapshot {
                view,
                feed_phase,
                current_item,
                items_consumed,
                items_required,
                ..
            } => {
                assert_eq!(view, View::Intercept);
                assert_eq!(feed_phase, Some(FeedPhase::Ready));
                assert_eq!(current_item.unwrap().headline, "h0");
                assert_eq!(items_consumed, 0);
                assert_eq!(items_required, 3);
            }
            _ => panic!("expected StateSnapshot"),
        }
    }

    proptest! {
        /// Exhaustively consuming any supply never overshoots the threshold,
        /// reaches the reward exactly when the supply suffices, and flags
        /// under-supply as exhausted instead of crashing.
        #[test]
        fn consumption_respects_threshold(required in 1usize..10, supply in 0usize..15) {
            let mut m = UnlockMachine::with_limits(required, 60_000);
            m.submit_goal("Learn Go by Friday", GoalCategory::Coding).unwrap();
            m.tap_app(&distraction()).unwrap();
            let req = m.pending_fetch().unwrap();
            prop_assert_eq!(req.count, required);
            m.apply_feed(req.seq, FeedBatch::generated(items(supply))).unwrap();

            let mut completions = 0;
            while m.complete_current_item().is_some() {
                completions += 1;
                prop_assert!(completions <= required, "completion loop ran away");
            }

            prop_assert!(m.items_consumed() <= required);
            if supply >= required {
                prop_assert_eq!(m.view(), View::Reward);
                prop_assert_eq!(m.items_consumed(), required);
                prop_assert_eq!(completions, required);
            } else {
                prop_assert_eq!(m.view(), View::Intercept);
                prop_assert_eq!(m.feed_phase(), Some(FeedPhase::Exhausted));
                prop_assert_eq!(m.items_consumed(), supply);
                prop_assert_eq!(completions, supply);
            }
        }
    }
}
