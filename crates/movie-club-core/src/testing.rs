use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use movie_club_catalog::{CatalogError, MovieCatalog};
use movie_club_models::{
    Genre, Movie, MovieDetails, MovieResponse, Review, Video, VideoResponse,
};

use crate::pages::Section;

/// In-memory catalog for tests: serves canned section listings, details and
/// search results, answers 404 for everything it does not know.
pub(crate) struct FakeCatalog {
    details: HashMap<u64, MovieDetails>,
    listings: HashMap<Section, Vec<Movie>>,
    broken_listings: HashSet<Section>,
    search_results: Vec<Movie>,
    details_calls: AtomicU32,
    listing_calls: AtomicU32,
}

impl FakeCatalog {
    pub(crate) fn new() -> Self {
        Self {
            details: HashMap::new(),
            listings: HashMap::new(),
            broken_listings: HashSet::new(),
            search_results: Vec::new(),
            details_calls: AtomicU32::new(0),
            listing_calls: AtomicU32::new(0),
        }
    }

    pub(crate) fn with_details(mut self, details: MovieDetails) -> Self {
        self.details.insert(details.id(), details);
        self
    }

    pub(crate) fn with_listing(mut self, section: Section, results: Vec<Movie>) -> Self {
        self.listings.insert(section, results);
        self
    }

    pub(crate) fn with_broken_listing(mut self, section: Section) -> Self {
        self.broken_listings.insert(section);
        self
    }

    pub(crate) fn with_search_results(mut self, results: Vec<Movie>) -> Self {
        self.search_results = results;
        self
    }

    pub(crate) fn details_calls(&self) -> u32 {
        self.details_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn listing_calls(&self) -> u32 {
        self.listing_calls.load(Ordering::SeqCst)
    }

    fn listing(&self, section: Section, page: u32) -> Result<MovieResponse, CatalogError> {
        self.listing_calls.fetch_add(1, Ordering::SeqCst);
        if self.broken_listings.contains(&section) {
            return Err(CatalogError::Status {
                status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                body: "upstream unavailable".to_string(),
            });
        }
        let results = self.listings.get(&section).cloned().unwrap_or_default();
        Ok(MovieResponse {
            page,
            total_pages: u32::from(!results.is_empty()),
            total_results: results.len() as u32,
            results,
        })
    }

    fn not_found() -> CatalogError {
        CatalogError::Status {
            status: reqwest::StatusCode::NOT_FOUND,
            body: "The resource you requested could not be found.".to_string(),
        }
    }

    fn empty_response(page: u32) -> MovieResponse {
        MovieResponse {
            page,
            results: Vec::new(),
            total_pages: 0,
            total_results: 0,
        }
    }
}

#[async_trait]
impl MovieCatalog for FakeCatalog {
    async fn popular(&self, page: u32) -> Result<MovieResponse, CatalogError> {
        self.listing(Section::Popular, page)
    }

    async fn top_rated(&self, page: u32) -> Result<MovieResponse, CatalogError> {
        self.listing(Section::TopRated, page)
    }

    async fn upcoming(&self, page: u32) -> Result<MovieResponse, CatalogError> {
        self.listing(Section::Upcoming, page)
    }

    async fn now_playing(&self, page: u32) -> Result<MovieResponse, CatalogError> {
        Ok(Self::empty_response(page))
    }

    async fn search(&self, _query: &str, page: u32) -> Result<MovieResponse, CatalogError> {
        Ok(MovieResponse {
            page,
            results: self.search_results.clone(),
            total_pages: if self.search_results.is_empty() { 0 } else { 1 },
            total_results: self.search_results.len() as u32,
        })
    }

    async fn movie_details(&self, movie_id: u64) -> Result<MovieDetails, CatalogError> {
        self.details_calls.fetch_add(1, Ordering::SeqCst);
        self.details
            .get(&movie_id)
            .cloned()
            .ok_or_else(Self::not_found)
    }

    async fn similar(&self, _movie_id: u64) -> Result<MovieResponse, CatalogError> {
        Ok(Self::empty_response(1))
    }

    async fn movie_videos(&self, movie_id: u64) -> Result<VideoResponse, CatalogError> {
        if self.details.contains_key(&movie_id) {
            Ok(VideoResponse {
                id: movie_id,
                results: Vec::<Video>::new(),
            })
        } else {
            Err(Self::not_found())
        }
    }
}

pub(crate) fn fake_movie(id: u64, title: &str) -> Movie {
    Movie {
        id,
        title: title.to_string(),
        poster_path: Some(format!("/{}.jpg", id)),
        backdrop_path: None,
        overview: format!("Sinopsis de {}", title),
        release_date: "2020-01-01".to_string(),
        vote_average: 7.0,
        genre_ids: vec![18],
    }
}

pub(crate) fn fake_details(id: u64, title: &str, release_date: &str) -> MovieDetails {
    let mut movie = fake_movie(id, title);
    movie.release_date = release_date.to_string();
    MovieDetails {
        movie,
        genres: vec![Genre {
            id: 18,
            name: "Drama".to_string(),
        }],
        runtime: 120,
        budget: 0,
        revenue: 0,
        tagline: String::new(),
        homepage: String::new(),
    }
}

pub(crate) fn review_missing_info(movie_id: u64) -> Review {
    Review {
        id: format!("review-{}", movie_id),
        movie_id,
        user_id: "u1".to_string(),
        display_name: "Ana".to_string(),
        photo_url: None,
        rating: 4,
        content: "Muy buena".to_string(),
        created_at: Utc::now(),
        movie_title: None,
        movie_year: None,
        poster_path: None,
    }
}
