use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use movie_club_models::{Review, User};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::{broadcast, RwLock, RwLockReadGuard};
use tracing::{info, warn};

use crate::error::StoreError;

const USERS_FILE: &str = "users.json";
const REVIEWS_FILE: &str = "reviews.json";

// Snapshots are coalesced on lag, so a small buffer is enough even with
// slow subscribers.
const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// The two collections of the application: `users` (watched lists live on
/// the user document) and `reviews`.
#[derive(Clone, Default)]
pub(crate) struct State {
    pub(crate) users: HashMap<String, User>,
    pub(crate) reviews: Vec<Review>,
}

/// Embedded document database. In-memory state behind an async RwLock,
/// persisted as one JSON file per collection, with a broadcast channel
/// fanning out change notifications to live subscriptions.
///
/// Cheap to clone; all clones share the same state and notifier.
#[derive(Clone)]
pub struct Database {
    state: Arc<RwLock<State>>,
    notify: broadcast::Sender<()>,
    data_dir: Option<PathBuf>,
}

impl Database {
    /// Open (or create) the database under `data_dir`, loading any existing
    /// collection files.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();
        std::fs::create_dir_all(&data_dir)?;

        let users: Vec<User> = load_collection(&data_dir.join(USERS_FILE), "users");
        let reviews: Vec<Review> = load_collection(&data_dir.join(REVIEWS_FILE), "reviews");

        let state = State {
            users: users.into_iter().map(|u| (u.uid.clone(), u)).collect(),
            reviews,
        };

        let (notify, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Ok(Self {
            state: Arc::new(RwLock::new(state)),
            notify,
            data_dir: Some(data_dir),
        })
    }

    /// Volatile database with no backing files. Used by tests and dry runs.
    pub fn in_memory() -> Self {
        let (notify, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            state: Arc::new(RwLock::new(State::default())),
            notify,
            data_dir: None,
        }
    }

    pub(crate) async fn read(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().await
    }

    /// Apply one mutation atomically: the closure runs on a copy of the
    /// state under the write lock, the copy is persisted, and only then is
    /// it swapped in and broadcast. A failed closure or a failed write
    /// leaves both memory and disk exactly as they were, and subscribers
    /// hear nothing.
    pub(crate) async fn mutate<R>(
        &self,
        f: impl FnOnce(&mut State) -> Result<R, StoreError>,
    ) -> Result<R, StoreError> {
        let result = {
            let mut state = self.state.write().await;
            let mut next = state.clone();
            let result = f(&mut next)?;
            self.persist(&next)?;
            *state = next;
            result
        };

        // A send error only means no subscriber is listening right now.
        let _ = self.notify.send(());
        Ok(result)
    }

    pub(crate) fn subscribe_changes(&self) -> broadcast::Receiver<()> {
        self.notify.subscribe()
    }

    fn persist(&self, state: &State) -> Result<(), StoreError> {
        let Some(dir) = &self.data_dir else {
            return Ok(());
        };

        let mut users: Vec<&User> = state.users.values().collect();
        users.sort_by(|a, b| a.uid.cmp(&b.uid));
        save_collection(&dir.join(USERS_FILE), &users)?;
        save_collection(&dir.join(REVIEWS_FILE), &state.reviews)?;
        Ok(())
    }
}

fn load_collection<T: DeserializeOwned>(path: &Path, name: &str) -> Vec<T> {
    if !path.exists() {
        return Vec::new();
    }

    match std::fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<Vec<T>>(&content) {
            Ok(data) => {
                info!("Loaded {} {} from {}", data.len(), name, path.display());
                data
            }
            Err(e) => {
                warn!(
                    "Corrupt collection file {} ({}). Starting the {} collection empty.",
                    path.display(),
                    e,
                    name
                );
                Vec::new()
            }
        },
        Err(e) => {
            warn!("Failed to read {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

fn save_collection<T: Serialize>(path: &Path, data: &T) -> Result<(), StoreError> {
    let content = serde_json::to_string_pretty(data)?;
    std::fs::write(path, content)?;
    Ok(())
}
