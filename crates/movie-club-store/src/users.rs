use chrono::Utc;
use movie_club_models::User;
use tracing::info;

use crate::db::Database;
use crate::error::StoreError;

/// Identity records in the `users` collection. Authentication itself is the
/// identity provider's business; this store only persists the signup-time
/// document and serves the login-time read.
#[derive(Clone)]
pub struct UserStore {
    db: Database,
}

impl UserStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Create the user document if it does not exist yet, mirroring the
    /// sign-in path of the source (the document is only written on first
    /// login). Returns the stored record either way.
    pub async fn create_user(
        &self,
        uid: &str,
        email: Option<&str>,
        display_name: Option<&str>,
        photo_url: Option<&str>,
    ) -> Result<User, StoreError> {
        let uid = uid.to_string();
        let email = email.map(str::to_string);
        let display_name = display_name.map(str::to_string);
        let photo_url = photo_url.map(str::to_string);

        self.db
            .mutate(move |state| {
                if let Some(existing) = state.users.get(&uid) {
                    return Ok(existing.clone());
                }

                let user = User {
                    uid: uid.clone(),
                    email,
                    display_name,
                    photo_url,
                    created_at: Utc::now(),
                    watched_movies: Vec::new(),
                };
                info!("Created user document {}", uid);
                state.users.insert(uid, user.clone());
                Ok(user)
            })
            .await
    }

    pub async fn user(&self, uid: &str) -> Option<User> {
        let state = self.db.read().await;
        state.users.get(uid).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_then_read() {
        let store = UserStore::new(Database::in_memory());
        store
            .create_user("u1", Some("ana@example.com"), Some("Ana"), None)
            .await
            .unwrap();

        let user = store.user("u1").await.unwrap();
        assert_eq!(user.email.as_deref(), Some("ana@example.com"));
        assert_eq!(user.display_name_or_default(), "Ana");
        assert!(store.user("u2").await.is_none());
    }

    #[tokio::test]
    async fn test_create_is_idempotent() {
        let store = UserStore::new(Database::in_memory());
        let first = store.create_user("u1", None, Some("Ana"), None).await.unwrap();
        // A second sign-in must not overwrite the original document
        let second = store
            .create_user("u1", Some("otra@example.com"), Some("Otra"), None)
            .await
            .unwrap();
        assert_eq!(first, second);
        assert_eq!(second.display_name.as_deref(), Some("Ana"));
    }

    #[tokio::test]
    async fn test_anonymous_display_name_falls_back() {
        let store = UserStore::new(Database::in_memory());
        let user = store.create_user("u1", None, None, None).await.unwrap();
        assert_eq!(user.display_name_or_default(), "Usuario");
    }
}
