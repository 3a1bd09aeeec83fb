//! Content-provider boundary.
//!
//! The unlock machine asks a [`FeedProvider`] for a batch of feed items and
//! treats whatever comes back as consumable content. Providers absorb their
//! own failures: `fetch_feed` always resolves to a batch with at least one
//! well-formed item, never an error. The [`FeedSource`] tri-state records
//! what actually happened for the event stream.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::feed::FeedItem;
use crate::goal::Goal;

mod canned;
mod gemini;

pub use canned::CannedFeedProvider;
pub use gemini::GeminiFeedProvider;

/// Where a batch came from. The unlock machine makes the same transitions for
/// all three; the distinction exists so degraded fetches stay observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedSource {
    Generated,
    MissingCredential,
    Failure,
}

/// An ordered batch of feed items. Ordering is presentation order and is
/// never re-sorted downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedBatch {
    pub items: Vec<FeedItem>,
    pub source: FeedSource,
}

impl FeedBatch {
    pub fn generated(items: Vec<FeedItem>) -> Self {
        Self {
            items,
            source: FeedSource::Generated,
        }
    }

    /// Single-item fallback when no credential is configured.
    pub fn missing_credential() -> Self {
        Self {
            items: vec![FeedItem::missing_credential_fallback()],
            source: FeedSource::MissingCredential,
        }
    }

    /// Single-item fallback when generation was attempted and failed.
    pub fn failure() -> Self {
        Self {
            items: vec![FeedItem::connection_failure_fallback()],
            source: FeedSource::Failure,
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.source != FeedSource::Generated
    }
}

/// Asynchronous source of micro-learning feed items.
///
/// `count` is the number of items requested (`count >= 1`); a provider may
/// return its best-effort count. Implementations must not let errors escape:
/// every failure mode resolves to a fallback batch.
#[async_trait]
pub trait FeedProvider: Send + Sync {
    async fn fetch_feed(&self, goal: &Goal, count: usize) -> FeedBatch;
}

/// Internal taxonomy for the provider boundary. Never escapes this module:
/// `fetch_feed` converts every case into fallback content.
#[derive(Debug, Error)]
pub(crate) enum ProviderError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("empty or missing response payload")]
    EmptyResponse,

    #[error("response JSON did not match the feed schema: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("generated item violates feed invariants")]
    MalformedItem,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::FeedItemKind;

    #[test]
    fn fallback_batches_have_one_well_formed_fact() {
        for batch in [FeedBatch::missing_credential(), FeedBatch::failure()] {
            assert_eq!(batch.items.len(), 1);
            assert!(batch.is_degraded());
            assert_eq!(batch.items[0].kind, FeedItemKind::Fact);
            assert!(batch.items[0].is_well_formed());
        }
    }

    #[test]
    fn generated_batch_is_not_degraded() {
        let batch = FeedBatch::generated(vec![]);
        assert!(!batch.is_degraded());
    }
}
