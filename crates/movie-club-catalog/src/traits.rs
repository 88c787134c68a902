use async_trait::async_trait;
use movie_club_models::{LiteMovieResponse, MovieDetails, MovieResponse, VideoResponse};

use crate::error::CatalogError;

/// Read-only view of the movie catalog. `TmdbClient` is the production
/// implementation; enrichment and the CLI take this seam so tests can run
/// against an in-memory catalog.
///
/// All list operations take a 1-based page number.
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    async fn popular(&self, page: u32) -> Result<MovieResponse, CatalogError>;
    async fn top_rated(&self, page: u32) -> Result<MovieResponse, CatalogError>;
    async fn upcoming(&self, page: u32) -> Result<MovieResponse, CatalogError>;
    async fn now_playing(&self, page: u32) -> Result<MovieResponse, CatalogError>;

    /// Server-side keyword search.
    async fn search(&self, query: &str, page: u32) -> Result<MovieResponse, CatalogError>;

    async fn movie_details(&self, movie_id: u64) -> Result<MovieDetails, CatalogError>;
    async fn similar(&self, movie_id: u64) -> Result<MovieResponse, CatalogError>;
    async fn movie_videos(&self, movie_id: u64) -> Result<VideoResponse, CatalogError>;

    // Lite variants: same envelope with projected records. The popular lite
    // list is backed by the now-playing endpoint (source behavior).
    async fn popular_lite(&self, page: u32) -> Result<LiteMovieResponse, CatalogError> {
        Ok(self.now_playing(page).await?.into())
    }

    async fn top_rated_lite(&self, page: u32) -> Result<LiteMovieResponse, CatalogError> {
        Ok(self.top_rated(page).await?.into())
    }

    async fn upcoming_lite(&self, page: u32) -> Result<LiteMovieResponse, CatalogError> {
        Ok(self.upcoming(page).await?.into())
    }

    async fn similar_lite(&self, movie_id: u64) -> Result<LiteMovieResponse, CatalogError> {
        Ok(self.similar(movie_id).await?.into())
    }
}
