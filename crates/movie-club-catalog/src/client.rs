use async_trait::async_trait;
use movie_club_models::{MovieDetails, MovieResponse, VideoResponse};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::CatalogError;
use crate::images::{self, DEFAULT_IMAGE_BASE_URL};
use crate::traits::MovieCatalog;

const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
const DEFAULT_LANGUAGE: &str = "es-ES";
pub const DEFAULT_IMAGE_SIZE: &str = "w500";

/// Connection settings for the catalog service. The api key is public
/// client configuration, not a secret boundary.
#[derive(Debug, Clone)]
pub struct TmdbSettings {
    pub base_url: String,
    pub image_base_url: String,
    pub api_key: String,
    pub access_token: String,
    pub language: String,
}

impl TmdbSettings {
    pub fn new(api_key: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            api_key: api_key.into(),
            access_token: access_token.into(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

/// HTTP client for the TMDB catalog. Stateless apart from the connection
/// pool; cheap to clone.
#[derive(Clone)]
pub struct TmdbClient {
    client: Client,
    settings: TmdbSettings,
}

impl TmdbClient {
    pub fn new(settings: TmdbSettings) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }

    /// Absolute artwork URL for a nullable catalog path, or the local
    /// placeholder when the path is absent.
    pub fn image_url(&self, path: Option<&str>, size: &str) -> String {
        images::image_url(&self.settings.image_base_url, path, size)
    }

    /// Issue one catalog GET. Every endpoint goes through here: api key,
    /// language and page are query parameters, the access token rides in
    /// the Authorization header. Non-success statuses carry the body text
    /// back to the caller; there is no retry and no timeout.
    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        page: Option<u32>,
        query: Option<&str>,
    ) -> Result<T, CatalogError> {
        let joiner = if endpoint.contains('?') { '&' } else { '?' };
        let mut url = format!(
            "{}{}{}api_key={}&language={}&page={}",
            self.settings.base_url,
            endpoint,
            joiner,
            self.settings.api_key,
            self.settings.language,
            page.unwrap_or(1)
        );
        if let Some(q) = query {
            url.push_str("&query=");
            url.push_str(&urlencoding::encode(q));
        }

        debug!("GET {}", endpoint);
        let response = self
            .client
            .get(&url)
            .header("accept", "application/json")
            .header(
                "Authorization",
                format!("Bearer {}", self.settings.access_token),
            )
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Status { status, body });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(CatalogError::Decode)
    }
}

#[async_trait]
impl MovieCatalog for TmdbClient {
    async fn popular(&self, page: u32) -> Result<MovieResponse, CatalogError> {
        self.get(
            "/movie/popular?include_adult=false&sort_by=popularity.desc",
            Some(page),
            None,
        )
        .await
    }

    async fn top_rated(&self, page: u32) -> Result<MovieResponse, CatalogError> {
        self.get("/movie/top_rated", Some(page), None).await
    }

    async fn upcoming(&self, page: u32) -> Result<MovieResponse, CatalogError> {
        self.get("/movie/upcoming", Some(page), None).await
    }

    async fn now_playing(&self, page: u32) -> Result<MovieResponse, CatalogError> {
        self.get("/movie/now_playing", Some(page), None).await
    }

    async fn search(&self, query: &str, page: u32) -> Result<MovieResponse, CatalogError> {
        self.get("/search/movie", Some(page), Some(query)).await
    }

    async fn movie_details(&self, movie_id: u64) -> Result<MovieDetails, CatalogError> {
        self.get(&format!("/movie/{}", movie_id), None, None).await
    }

    async fn similar(&self, movie_id: u64) -> Result<MovieResponse, CatalogError> {
        self.get(&format!("/movie/{}/similar", movie_id), None, None)
            .await
    }

    async fn movie_videos(&self, movie_id: u64) -> Result<VideoResponse, CatalogError> {
        self.get(&format!("/movie/{}/videos", movie_id), None, None)
            .await
    }
}
