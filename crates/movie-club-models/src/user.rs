use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::watched::WatchedEntry;

/// Identity record, created at signup and read on login. The watched-movies
/// array lives on the user document, as in the source collection layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub watched_movies: Vec<WatchedEntry>,
}

impl User {
    /// Display name with the source's fallback for anonymous accounts.
    pub fn display_name_or_default(&self) -> &str {
        self.display_name.as_deref().unwrap_or("Usuario")
    }
}
