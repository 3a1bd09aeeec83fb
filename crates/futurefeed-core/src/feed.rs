//! Feed item model.
//!
//! A feed item is one unit of micro-learning content. Items are produced in
//! batches by a [`crate::provider::FeedProvider`] (or its fallback path),
//! immutable once created, and discarded when a new intercept session starts
//! or the app returns home.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedItemKind {
    Quiz,
    Fact,
    Analogy,
}

/// One unit of generated micro-learning content.
///
/// Invariant: `options` and `correct_answer` are meaningful only when
/// `kind == Quiz`; for other kinds they are empty/absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItem {
    pub id: String,
    pub kind: FeedItemKind,
    /// Short, catchy hook title.
    pub headline: String,
    /// Main body text.
    pub content: String,
    /// Brief explanation of why the answer is correct or the fact matters.
    pub explanation: String,
    /// Quiz options in presentation order; empty for non-quiz items.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    /// The designated correct option; `None` for non-quiz items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
}

impl FeedItem {
    /// A non-quiz item. Options are cleared regardless of kind semantics.
    pub fn new(
        kind: FeedItemKind,
        headline: impl Into<String>,
        content: impl Into<String>,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            headline: headline.into(),
            content: content.into(),
            explanation: explanation.into(),
            options: Vec::new(),
            correct_answer: None,
        }
    }

    /// A quiz item with its option set and designated correct option.
    pub fn quiz(
        headline: impl Into<String>,
        content: impl Into<String>,
        explanation: impl Into<String>,
        options: Vec<String>,
        correct_answer: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind: FeedItemKind::Quiz,
            headline: headline.into(),
            content: content.into(),
            explanation: explanation.into(),
            options,
            correct_answer: Some(correct_answer.into()),
        }
    }

    /// Check the model invariant: quiz items need a non-empty option set and
    /// a correct answer that is one of the options.
    pub fn is_well_formed(&self) -> bool {
        match self.kind {
            FeedItemKind::Quiz => {
                !self.options.is_empty()
                    && self
                        .correct_answer
                        .as_deref()
                        .map(|answer| self.options.iter().any(|o| o == answer))
                        .unwrap_or(false)
            }
            FeedItemKind::Fact | FeedItemKind::Analogy => true,
        }
    }

    /// Fallback item returned when no provider credential is configured.
    /// No network access is attempted in that case.
    pub fn missing_credential_fallback() -> Self {
        Self::new(
            FeedItemKind::Fact,
            "API Key Missing",
            "Set a Gemini API key to generate real content.",
            "The app needs the API key to generate your feed.",
        )
    }

    /// Fallback item returned when generation was attempted but failed.
    pub fn connection_failure_fallback() -> Self {
        Self::new(
            FeedItemKind::Fact,
            "Connection Error",
            "Could not reach the Future Feed server. Try again.",
            "Check your internet or API limits.",
        )
    }
}
