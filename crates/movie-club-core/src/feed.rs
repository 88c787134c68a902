use std::sync::Arc;

use movie_club_catalog::MovieCatalog;
use movie_club_models::Review;
use movie_club_store::ReviewStore;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::enrich::fill_missing_movie_info_batch;

const FEED_BUFFER: usize = 8;

/// Live review feed for one movie (or the all-movies sentinel): a store
/// subscription whose every snapshot passes through enrichment before
/// delivery. Dropping the feed tears the subscription down.
pub struct ReviewFeed {
    receiver: mpsc::Receiver<Vec<Review>>,
    worker: JoinHandle<()>,
}

impl ReviewFeed {
    pub fn open(store: &ReviewStore, catalog: Arc<dyn MovieCatalog>, movie_id: u64) -> Self {
        let mut subscription = store.subscribe(movie_id);
        let (sender, receiver) = mpsc::channel(FEED_BUFFER);

        let worker = tokio::spawn(async move {
            while let Some(snapshot) = subscription.next_snapshot().await {
                let enriched = fill_missing_movie_info_batch(catalog.as_ref(), snapshot).await;
                if sender.send(enriched).await.is_err() {
                    // Receiver gone; release the store listener
                    break;
                }
            }
            debug!("Review feed for movie {} closed", movie_id);
        });

        Self { receiver, worker }
    }

    /// Next enriched snapshot; `None` after the feed is closed.
    pub async fn next_snapshot(&mut self) -> Option<Vec<Review>> {
        self.receiver.recv().await
    }

    /// Explicit teardown; dropping the feed is equivalent.
    pub fn close(self) {}
}

impl Drop for ReviewFeed {
    fn drop(&mut self) {
        self.worker.abort();
    }
}
