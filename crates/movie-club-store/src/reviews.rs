use chrono::Utc;
use movie_club_models::{Review, User};
use tokio::sync::broadcast;
use tracing::debug;
use uuid::Uuid;

use crate::db::Database;
use crate::error::StoreError;

/// Sentinel movie id: query the most recent reviews across all movies
/// (front-page feed) instead of one movie's reviews.
pub const ALL_MOVIES: u64 = 0;

/// Cap applied to the all-movies feed. Per-movie queries are uncapped;
/// the asymmetry is intentional.
pub const RECENT_REVIEWS_LIMIT: usize = 10;

/// CRUD plus live queries over the `reviews` collection.
///
/// Mutations carry no ownership check at this layer; the caller is expected
/// to gate edit/delete on the signed-in user matching the review author.
#[derive(Clone)]
pub struct ReviewStore {
    db: Database,
}

impl ReviewStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Create one review document and return its generated id. A user may
    /// post any number of reviews per movie.
    #[allow(clippy::too_many_arguments)]
    pub async fn add_review(
        &self,
        movie_id: u64,
        user: &User,
        content: impl Into<String>,
        rating: u8,
        movie_title: Option<String>,
        movie_year: Option<u32>,
        poster_path: Option<String>,
    ) -> Result<String, StoreError> {
        let review = Review {
            id: Uuid::new_v4().to_string(),
            movie_id,
            user_id: user.uid.clone(),
            display_name: user.display_name_or_default().to_string(),
            photo_url: user.photo_url.clone(),
            rating,
            content: content.into(),
            created_at: Utc::now(),
            movie_title,
            movie_year,
            poster_path,
        };
        let id = review.id.clone();

        self.db
            .mutate(|state| {
                state.reviews.push(review);
                Ok(())
            })
            .await?;

        debug!("Added review {} for movie {}", id, movie_id);
        Ok(id)
    }

    /// Update the two author-mutable fields of a review.
    pub async fn update_review(
        &self,
        review_id: &str,
        content: impl Into<String>,
        rating: u8,
    ) -> Result<(), StoreError> {
        let content = content.into();
        let review_id = review_id.to_string();
        self.db
            .mutate(move |state| {
                let review = state
                    .reviews
                    .iter_mut()
                    .find(|r| r.id == review_id)
                    .ok_or_else(|| StoreError::NotFound(format!("reviews/{}", review_id)))?;
                review.content = content;
                review.rating = rating;
                Ok(())
            })
            .await
    }

    pub async fn delete_review(&self, review_id: &str) -> Result<(), StoreError> {
        let review_id = review_id.to_string();
        self.db
            .mutate(move |state| {
                let before = state.reviews.len();
                state.reviews.retain(|r| r.id != review_id);
                if state.reviews.len() == before {
                    return Err(StoreError::NotFound(format!("reviews/{}", review_id)));
                }
                Ok(())
            })
            .await
    }

    /// Point read of one review document.
    pub async fn review(&self, review_id: &str) -> Option<Review> {
        let state = self.db.read().await;
        state.reviews.iter().find(|r| r.id == review_id).cloned()
    }

    /// One-shot read with the live-query semantics: `ALL_MOVIES` returns the
    /// newest `RECENT_REVIEWS_LIMIT` reviews across every movie; any other
    /// id returns all of that movie's reviews. Newest first in both cases.
    pub async fn movie_reviews(&self, movie_id: u64) -> Vec<Review> {
        let state = self.db.read().await;
        query_reviews(&state.reviews, movie_id)
    }

    /// Open a live query: the initial snapshot is delivered immediately and
    /// a fresh one after every store mutation. Dropping the handle (or
    /// calling [`ReviewSubscription::unsubscribe`]) releases the listener;
    /// leaking it keeps the listener alive for the life of the database.
    pub fn subscribe(&self, movie_id: u64) -> ReviewSubscription {
        ReviewSubscription {
            movie_id,
            receiver: self.db.subscribe_changes(),
            db: self.db.clone(),
            initial_pending: true,
        }
    }
}

fn query_reviews(reviews: &[Review], movie_id: u64) -> Vec<Review> {
    let mut matched: Vec<Review> = if movie_id == ALL_MOVIES {
        reviews.to_vec()
    } else {
        reviews
            .iter()
            .filter(|r| r.movie_id == movie_id)
            .cloned()
            .collect()
    };
    matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    if movie_id == ALL_MOVIES {
        matched.truncate(RECENT_REVIEWS_LIMIT);
    }
    matched
}

/// Cancellable handle for one live review query. Each subscriber gets its
/// own independent snapshots; two handles on the same query do not share
/// anything beyond the underlying data.
pub struct ReviewSubscription {
    movie_id: u64,
    receiver: broadcast::Receiver<()>,
    db: Database,
    initial_pending: bool,
}

impl ReviewSubscription {
    pub fn movie_id(&self) -> u64 {
        self.movie_id
    }

    /// Wait for the next snapshot. Returns `None` once the database has
    /// been dropped and no further snapshots can arrive. A subscriber that
    /// falls behind gets one fresh snapshot covering everything it missed.
    pub async fn next_snapshot(&mut self) -> Option<Vec<Review>> {
        if self.initial_pending {
            self.initial_pending = false;
        } else {
            match self.receiver.recv().await {
                Ok(()) | Err(broadcast::error::RecvError::Lagged(_)) => {}
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }

        let state = self.db.read().await;
        Some(query_reviews(&state.reviews, self.movie_id))
    }

    /// Release the listener. Dropping the handle has the same effect; this
    /// just makes teardown explicit at call sites.
    pub fn unsubscribe(self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use movie_club_models::User;

    fn test_user(uid: &str) -> User {
        User {
            uid: uid.to_string(),
            email: None,
            display_name: Some(format!("user-{}", uid)),
            photo_url: None,
            created_at: Utc::now(),
            watched_movies: Vec::new(),
        }
    }

    fn store() -> ReviewStore {
        ReviewStore::new(Database::in_memory())
    }

    async fn add(store: &ReviewStore, movie_id: u64, uid: &str, content: &str) -> String {
        store
            .add_review(movie_id, &test_user(uid), content, 4, None, None, None)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_recent_feed_returns_reviews_across_movies_newest_first() {
        let store = store();
        add(&store, 1, "u1", "primera").await;
        add(&store, 2, "u2", "segunda").await;
        add(&store, 3, "u1", "tercera").await;

        let feed = store.movie_reviews(ALL_MOVIES).await;
        assert_eq!(feed.len(), 3);
        assert_eq!(feed[0].content, "tercera");
        assert_eq!(feed[2].content, "primera");
    }

    #[tokio::test]
    async fn test_recent_feed_caps_at_limit() {
        let store = store();
        for i in 0..11 {
            add(&store, i + 1, "u1", &format!("reseña {}", i)).await;
        }

        let feed = store.movie_reviews(ALL_MOVIES).await;
        assert_eq!(feed.len(), RECENT_REVIEWS_LIMIT);
        // The newest review survives the cap, the oldest does not
        assert_eq!(feed[0].content, "reseña 10");
        assert!(feed.iter().all(|r| r.content != "reseña 0"));
    }

    #[tokio::test]
    async fn test_per_movie_query_is_uncapped() {
        let store = store();
        for i in 0..12 {
            add(&store, 42, "u1", &format!("r{}", i)).await;
        }
        add(&store, 7, "u1", "otro").await;

        let reviews = store.movie_reviews(42).await;
        assert_eq!(reviews.len(), 12);
        assert!(reviews.iter().all(|r| r.movie_id == 42));
    }

    #[tokio::test]
    async fn test_update_changes_only_content_and_rating() {
        let store = store();
        let id = add(&store, 42, "u1", "regular").await;

        store.update_review(&id, "buenísima", 5).await.unwrap();

        let reviews = store.movie_reviews(42).await;
        assert_eq!(reviews[0].content, "buenísima");
        assert_eq!(reviews[0].rating, 5);
        assert_eq!(reviews[0].user_id, "u1");
    }

    #[tokio::test]
    async fn test_mutation_carries_no_ownership_check() {
        // The store accepts any update/delete by document id; ownership is
        // enforced by the caller's control gating only.
        let store = store();
        let id = add(&store, 42, "author", "mía").await;
        store.update_review(&id, "editada por cualquiera", 1).await.unwrap();
        store.delete_review(&id).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let store = store();
        let err = store.update_review("missing", "x", 1).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_removes_only_target() {
        let store = store();
        let id1 = add(&store, 42, "u1", "una").await;
        let id2 = add(&store, 42, "u2", "otra").await;

        store.delete_review(&id1).await.unwrap();

        let reviews = store.movie_reviews(42).await;
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].id, id2);
        assert!(matches!(
            store.delete_review(&id1).await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_sorting_honours_created_at_not_insertion_order() {
        let store = store();
        let id_old = add(&store, 42, "u1", "vieja").await;
        add(&store, 42, "u2", "nueva").await;

        // Backdate the first review well past any clock granularity issue
        let db = store.db.clone();
        db.mutate(|state| {
            let review = state.reviews.iter_mut().find(|r| r.id == id_old).unwrap();
            review.created_at = Utc::now() - Duration::days(1);
            Ok(())
        })
        .await
        .unwrap();

        let reviews = store.movie_reviews(42).await;
        assert_eq!(reviews[0].content, "nueva");
        assert_eq!(reviews[1].content, "vieja");
    }

    #[tokio::test]
    async fn test_subscription_initial_and_live_snapshots() {
        let store = store();
        add(&store, 42, "u1", "antes").await;

        let mut sub = store.subscribe(42);
        let initial = sub.next_snapshot().await.unwrap();
        assert_eq!(initial.len(), 1);

        add(&store, 42, "u2", "después").await;
        let next = sub.next_snapshot().await.unwrap();
        assert_eq!(next.len(), 2);
        assert_eq!(next[0].content, "después");

        sub.unsubscribe();
    }

    #[tokio::test]
    async fn test_independent_subscribers_get_independent_snapshots() {
        let store = store();
        let mut a = store.subscribe(42);
        let mut b = store.subscribe(42);
        assert_eq!(a.next_snapshot().await.unwrap().len(), 0);
        assert_eq!(b.next_snapshot().await.unwrap().len(), 0);

        add(&store, 42, "u1", "hola").await;
        assert_eq!(a.next_snapshot().await.unwrap().len(), 1);
        assert_eq!(b.next_snapshot().await.unwrap().len(), 1);
    }
}
