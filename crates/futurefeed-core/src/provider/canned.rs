//! Deterministic offline provider.
//!
//! Produces well-formed items from fixed per-category templates, cycling
//! through the three content kinds. Used by the CLI demo mode and by tests
//! that need real-looking batches without a network. This is a full provider
//! implementation, not the degraded fallback path.

use async_trait::async_trait;

use super::{FeedBatch, FeedProvider};
use crate::feed::{FeedItem, FeedItemKind};
use crate::goal::{Goal, GoalCategory};

#[derive(Debug, Clone, Copy, Default)]
pub struct CannedFeedProvider;

impl CannedFeedProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FeedProvider for CannedFeedProvider {
    async fn fetch_feed(&self, goal: &Goal, count: usize) -> FeedBatch {
        let templates = templates_for(goal.category);
        let items = (0..count.max(1))
            .map(|i| templates[i % templates.len()].instantiate(goal))
            .collect();
        FeedBatch::generated(items)
    }
}

struct Template {
    kind: FeedItemKind,
    headline: &'static str,
    content: &'static str,
    explanation: &'static str,
    options: &'static [&'static str],
    correct: &'static str,
}

impl Template {
    fn instantiate(&self, goal: &Goal) -> FeedItem {
        let content = self.content.replace("{goal}", &goal.statement);
        match self.kind {
            FeedItemKind::Quiz => FeedItem::quiz(
                self.headline,
                content,
                self.explanation,
                self.options.iter().map(|s| s.to_string()).collect(),
                self.correct,
            ),
            kind => FeedItem::new(kind, self.headline, content, self.explanation),
        }
    }
}

fn templates_for(category: GoalCategory) -> &'static [Template] {
    match category {
        GoalCategory::Coding => &[
            Template {
                kind: FeedItemKind::Quiz,
                headline: "Big-O pop quiz",
                content: "Toward \"{goal}\": what's the lookup cost in a hash map?",
                explanation: "Average O(1); collisions make the worst case linear.",
                options: &["O(1) average", "O(log n) always", "O(n) average"],
                correct: "O(1) average",
            },
            Template {
                kind: FeedItemKind::Fact,
                headline: "Ship smaller diffs",
                content: "Reviews of under ~200 changed lines catch defects at the highest rate.",
                explanation: "Small changes keep reviewer attention where bugs hide.",
                options: &[],
                correct: "",
            },
            Template {
                kind: FeedItemKind::Analogy,
                headline: "Tests are guardrails",
                content: "A test suite is a guardrail, not a seatbelt: it keeps you on the road instead of softening the crash.",
                explanation: "Fast feedback prevents the mistake rather than surviving it.",
                options: &[],
                correct: "",
            },
        ],
        GoalCategory::Language => &[
            Template {
                kind: FeedItemKind::Quiz,
                headline: "Vocab speed round",
                content: "For \"{goal}\": roughly how many word families cover ~80% of everyday speech?",
                explanation: "The most frequent ~1,000 families carry most conversation.",
                options: &["About 1,000", "About 10,000", "About 50,000"],
                correct: "About 1,000",
            },
            Template {
                kind: FeedItemKind::Fact,
                headline: "Spacing beats cramming",
                content: "Reviewing a word at growing intervals roughly doubles retention versus massed repetition.",
                explanation: "Spaced retrieval strengthens memory each time it almost fades.",
                options: &[],
                correct: "",
            },
            Template {
                kind: FeedItemKind::Analogy,
                headline: "Immersion is a gym",
                content: "Listening practice is a gym membership: showing up daily beats one heroic session.",
                explanation: "Consistency, not intensity, builds comprehension.",
                options: &[],
                correct: "",
            },
        ],
        GoalCategory::Fitness => &[
            Template {
                kind: FeedItemKind::Quiz,
                headline: "Recovery check",
                content: "On the way to \"{goal}\": when does muscle actually grow?",
                explanation: "Training is the stimulus; adaptation happens during recovery.",
                options: &["During the workout", "During recovery", "Only while fasting"],
                correct: "During recovery",
            },
            Template {
                kind: FeedItemKind::Fact,
                headline: "Walk the boring miles",
                content: "Low-intensity movement drives most daily energy expenditure for non-athletes.",
                explanation: "NEAT quietly outweighs the gym hour.",
                options: &[],
                correct: "",
            },
            Template {
                kind: FeedItemKind::Analogy,
                headline: "Progressive overload is compound interest",
                content: "Adding one rep a week is compound interest for your body: invisible daily, undeniable yearly.",
                explanation: "Small consistent increments compound into large adaptations.",
                options: &[],
                correct: "",
            },
        ],
        GoalCategory::Finance => &[
            Template {
                kind: FeedItemKind::Quiz,
                headline: "Rule of 72",
                content: "Working on \"{goal}\": at 8% annual growth, money doubles in about...",
                explanation: "72 / 8 = 9 years, the classic doubling shortcut.",
                options: &["5 years", "9 years", "15 years"],
                correct: "9 years",
            },
            Template {
                kind: FeedItemKind::Fact,
                headline: "Fees eat quietly",
                content: "A 1% annual fee can consume roughly a quarter of a portfolio's gains over 30 years.",
                explanation: "Costs compound just like returns do.",
                options: &[],
                correct: "",
            },
            Template {
                kind: FeedItemKind::Analogy,
                headline: "Budgets are diets",
                content: "A budget is a diet plan: the strict ones fail, the sustainable ones change your life.",
                explanation: "Adherence beats optimization.",
                options: &[],
                correct: "",
            },
        ],
        GoalCategory::General => &[
            Template {
                kind: FeedItemKind::Quiz,
                headline: "Focus math",
                content: "Chasing \"{goal}\": how long does it take to refocus after an interruption?",
                explanation: "Studies put full refocus at around 23 minutes.",
                options: &["About 2 minutes", "About 23 minutes", "About an hour"],
                correct: "About 23 minutes",
            },
            Template {
                kind: FeedItemKind::Fact,
                headline: "Two-minute rule",
                content: "If a task takes under two minutes, doing it now is cheaper than tracking it.",
                explanation: "Administration overhead often exceeds the task itself.",
                options: &[],
                correct: "",
            },
            Template {
                kind: FeedItemKind::Analogy,
                headline: "Habits are votes",
                content: "Every small action is a vote for the person you want to become; no single vote decides the election.",
                explanation: "Identity shifts through accumulated repetition.",
                options: &[],
                correct: "",
            },
        ],
    }
}
