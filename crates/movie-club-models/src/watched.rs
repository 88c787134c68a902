use serde::{Deserialize, Serialize};

/// Per-user marker that a movie has been viewed. Stored inside the user
/// document's `watchedMovies` array; presence means watched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WatchedEntry {
    pub id: u64,
    pub title: String,
}
