//! Listing reference data lookup.
//!
//! Resolution is asynchronous: the caller hands over a single-shot channel and
//! the resolver writes exactly one result to it, usually from another task.

use crate::model::{Listing, ListingId};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ResolveError {
    #[error("No listing found for id {0}")]
    NotFound(ListingId),
    #[error("Reference data unavailable: {0}")]
    Unavailable(String),
}

pub type ListingResult = Result<Listing, ResolveError>;

pub trait ListingResolver: Send + Sync {
    /// Starts a lookup for `listing_id`. The answer is written to `result`
    /// exactly once. `shutdown` is the caller's shutdown signal and may be used
    /// to abandon slow lookups.
    fn resolve(
        &self,
        shutdown: CancellationToken,
        listing_id: ListingId,
        result: oneshot::Sender<ListingResult>,
    );
}

/// Answers from a fixed table of listings.
#[derive(Debug, Clone, Default)]
pub struct StaticListingResolver {
    listings: Arc<HashMap<ListingId, Listing>>,
}

impl StaticListingResolver {
    pub fn new(listings: impl IntoIterator<Item = Listing>) -> Self {
        let listings = listings.into_iter().map(|l| (l.id, l)).collect();
        Self {
            listings: Arc::new(listings),
        }
    }

    pub fn lookup(&self, listing_id: ListingId) -> ListingResult {
        self.listings
            .get(&listing_id)
            .cloned()
            .ok_or(ResolveError::NotFound(listing_id))
    }
}

impl ListingResolver for StaticListingResolver {
    fn resolve(
        &self,
        shutdown: CancellationToken,
        listing_id: ListingId,
        result: oneshot::Sender<ListingResult>,
    ) {
        let answer = if shutdown.is_cancelled() {
            Err(ResolveError::Unavailable("resolver shutting down".into()))
        } else {
            self.lookup(listing_id)
        };
        tokio::spawn(async move {
            let _ = result.send(answer);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn resolves_known_and_unknown_listings() {
        let resolver = StaticListingResolver::new([Listing::new(5, "ACME", "XNAS")]);

        let (tx, rx) = oneshot::channel();
        resolver.resolve(CancellationToken::new(), 5, tx);
        assert_eq!(rx.await.unwrap().unwrap().symbol, "ACME");

        let (tx, rx) = oneshot::channel();
        resolver.resolve(CancellationToken::new(), 6, tx);
        assert_eq!(rx.await.unwrap(), Err(ResolveError::NotFound(6)));
    }
}
