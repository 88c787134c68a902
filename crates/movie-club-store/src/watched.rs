use movie_club_models::WatchedEntry;
use tracing::debug;

use crate::db::Database;
use crate::error::StoreError;

/// Membership operations on the `watchedMovies` array of a user document.
#[derive(Clone)]
pub struct WatchedStore {
    db: Database,
}

impl WatchedStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Toggle a movie's watched status and return the new membership.
    /// Remove-if-present-else-add runs atomically under the write lock, so
    /// serialized toggles strictly alternate and concurrent toggles cannot
    /// both observe the same pre-state.
    pub async fn toggle_watched(
        &self,
        user_id: &str,
        movie_id: u64,
        movie_title: &str,
    ) -> Result<bool, StoreError> {
        let user_id = user_id.to_string();
        let movie_title = movie_title.to_string();
        let watched = self
            .db
            .mutate(move |state| {
                let user = state
                    .users
                    .get_mut(&user_id)
                    .ok_or_else(|| StoreError::NotFound(format!("users/{}", user_id)))?;

                let before = user.watched_movies.len();
                user.watched_movies.retain(|m| m.id != movie_id);
                if user.watched_movies.len() < before {
                    Ok(false)
                } else {
                    user.watched_movies.push(WatchedEntry {
                        id: movie_id,
                        title: movie_title,
                    });
                    Ok(true)
                }
            })
            .await?;

        debug!("Movie {} watched={} for user", movie_id, watched);
        Ok(watched)
    }

    /// Point read. A missing user document means "not watched", matching
    /// the read-path degradation of the source.
    pub async fn is_watched(&self, user_id: &str, movie_id: u64) -> bool {
        if user_id.is_empty() {
            return false;
        }
        let state = self.db.read().await;
        state
            .users
            .get(user_id)
            .map(|u| u.watched_movies.iter().any(|m| m.id == movie_id))
            .unwrap_or(false)
    }

    pub async fn watched_movies(&self, user_id: &str) -> Vec<WatchedEntry> {
        let state = self.db.read().await;
        state
            .users
            .get(user_id)
            .map(|u| u.watched_movies.clone())
            .unwrap_or_default()
    }
}
