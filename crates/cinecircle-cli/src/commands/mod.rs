pub mod account;
pub mod config;
pub mod details;
pub mod movies;
pub mod reviews;
pub mod watched;

use std::time::Duration;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use indicatif::ProgressBar;
use movie_club_catalog::{TmdbClient, TmdbSettings};
use movie_club_config::{Config, CredentialStore, PathManager};
use movie_club_models::User;
use movie_club_store::{Database, ReviewStore, UserStore, WatchedStore};

use crate::output::Output;

/// Everything a command needs: configuration, the catalog client and the
/// three stores over the shared database. Built once per invocation.
pub struct AppContext {
    pub config: Config,
    pub paths: PathManager,
    pub catalog: TmdbClient,
    pub users: UserStore,
    pub reviews: ReviewStore,
    pub watched: WatchedStore,
}

impl AppContext {
    pub fn init() -> Result<Self> {
        let paths = PathManager::default();
        paths
            .ensure_directories()
            .map_err(|e| eyre!("Failed to create application directories: {}", e))?;

        let config = Config::load(&paths.config_file())
            .map_err(|e| eyre!("Failed to load configuration: {}", e))?;

        let mut credentials = CredentialStore::new(paths.credentials_file());
        credentials
            .load()
            .map_err(|e| eyre!("Failed to load credentials: {}", e))?;

        // Config file (or env) wins; the credential file is the fallback
        let api_key = if config.tmdb.api_key.is_empty() {
            credentials.get_tmdb_api_key().cloned().unwrap_or_default()
        } else {
            config.tmdb.api_key.clone()
        };
        let access_token = if config.tmdb.access_token.is_empty() {
            credentials
                .get_tmdb_access_token()
                .cloned()
                .unwrap_or_default()
        } else {
            config.tmdb.access_token.clone()
        };

        let mut settings = TmdbSettings::new(api_key, access_token);
        if let Some(base_url) = &config.tmdb.base_url {
            settings.base_url = base_url.clone();
        }
        if let Some(image_base_url) = &config.tmdb.image_base_url {
            settings.image_base_url = image_base_url.clone();
        }
        if let Some(language) = &config.tmdb.language {
            settings.language = language.clone();
        }
        let catalog = TmdbClient::new(settings);

        let store_dir = config
            .store
            .data_dir
            .clone()
            .unwrap_or_else(|| paths.store_dir());
        let db = Database::open(store_dir)?;

        Ok(Self {
            config,
            paths,
            catalog,
            users: UserStore::new(db.clone()),
            reviews: ReviewStore::new(db.clone()),
            watched: WatchedStore::new(db),
        })
    }

    /// The locally signed-in user, if any.
    pub async fn active_user(&self) -> Result<Option<User>> {
        let mut credentials = CredentialStore::new(self.paths.credentials_file());
        credentials
            .load()
            .map_err(|e| eyre!("Failed to load credentials: {}", e))?;
        let Some(uid) = credentials.get_active_uid().cloned() else {
            return Ok(None);
        };
        Ok(self.users.user(&uid).await)
    }

    /// The active user, or a sign-in prompt for commands that require one.
    pub async fn require_user(&self, output: &Output) -> Result<Option<User>> {
        match self.active_user().await? {
            Some(user) => Ok(Some(user)),
            None => {
                output.error("Debes iniciar sesión para continuar (cinecircle login <uid>)");
                Ok(None)
            }
        }
    }

    pub fn set_active_uid(&self, uid: &str) -> Result<()> {
        self.update_credentials(|credentials| credentials.set_active_uid(uid.to_string()))
    }

    pub fn clear_active_uid(&self) -> Result<()> {
        self.update_credentials(CredentialStore::clear_active_uid)
    }

    fn update_credentials(&self, f: impl FnOnce(&mut CredentialStore)) -> Result<()> {
        let mut credentials = CredentialStore::new(self.paths.credentials_file());
        credentials
            .load()
            .map_err(|e| eyre!("Failed to load credentials: {}", e))?;
        f(&mut credentials);
        credentials
            .save()
            .map_err(|e| eyre!("Failed to save credentials: {}", e))?;
        Ok(())
    }
}

/// Spinner for network fetches; only in interactive human output.
pub fn spinner(output: &Output, msg: &str) -> Option<ProgressBar> {
    if !output.is_human() || output.is_quiet() {
        return None;
    }
    let pb = ProgressBar::new_spinner();
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    Some(pb)
}

pub fn finish_spinner(pb: Option<ProgressBar>) {
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
}
