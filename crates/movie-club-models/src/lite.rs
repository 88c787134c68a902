use serde::{Deserialize, Serialize};

use crate::movie::{Movie, MovieDetails, MovieResponse};

/// Reduced movie record for list/grid views. Derived, recomputed on every
/// fetch, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LiteMovie {
    pub id: u64,
    pub title: String,
    pub poster_path: Option<String>,
    pub vote_average: f64,
}

impl From<Movie> for LiteMovie {
    fn from(movie: Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title,
            poster_path: movie.poster_path,
            vote_average: movie.vote_average,
        }
    }
}

impl From<MovieDetails> for LiteMovie {
    fn from(details: MovieDetails) -> Self {
        details.movie.into()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LiteMovieResponse {
    pub page: u32,
    pub results: Vec<LiteMovie>,
    pub total_pages: u32,
    pub total_results: u32,
}

impl From<MovieResponse> for LiteMovieResponse {
    fn from(response: MovieResponse) -> Self {
        Self {
            page: response.page,
            results: response.results.into_iter().map(LiteMovie::from).collect(),
            total_pages: response.total_pages,
            total_results: response.total_results,
        }
    }
}
