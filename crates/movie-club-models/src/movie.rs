use serde::{Deserialize, Serialize};

/// Full movie record as returned by the catalog list endpoints.
/// Immutable snapshot of catalog data; never persisted by this system.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub genre_ids: Vec<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

/// Single-resource detail record: the list fields plus the extended ones.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    #[serde(flatten)]
    pub movie: Movie,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub runtime: u32,
    #[serde(default)]
    pub budget: u64,
    #[serde(default)]
    pub revenue: u64,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub homepage: String,
}

impl MovieDetails {
    pub fn id(&self) -> u64 {
        self.movie.id
    }

    pub fn title(&self) -> &str {
        &self.movie.title
    }

    /// Release year, parsed from the leading component of `release_date`
    /// ("2021-10-22" -> 2021). Empty or malformed dates yield None.
    pub fn release_year(&self) -> Option<u32> {
        self.movie
            .release_date
            .split('-')
            .next()
            .and_then(|y| y.parse().ok())
            .filter(|y| *y > 0)
    }
}

/// Paginated catalog response envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieResponse {
    pub page: u32,
    pub results: Vec<Movie>,
    pub total_pages: u32,
    pub total_results: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_year() {
        let details: MovieDetails = serde_json::from_value(serde_json::json!({
            "id": 438631,
            "title": "Dune",
            "poster_path": "/dune.jpg",
            "backdrop_path": null,
            "release_date": "2021-10-22",
        }))
        .unwrap();
        assert_eq!(details.release_year(), Some(2021));
    }

    #[test]
    fn test_release_year_empty_date() {
        let details: MovieDetails = serde_json::from_value(serde_json::json!({
            "id": 1,
            "title": "Unreleased",
            "poster_path": null,
            "backdrop_path": null,
        }))
        .unwrap();
        assert_eq!(details.release_year(), None);
    }

    #[test]
    fn test_details_flatten_roundtrip() {
        let json = serde_json::json!({
            "id": 438631,
            "title": "Dune",
            "poster_path": "/dune.jpg",
            "backdrop_path": "/bg.jpg",
            "overview": "Arrakis",
            "release_date": "2021-10-22",
            "vote_average": 7.8,
            "genre_ids": [],
            "genres": [{"id": 878, "name": "Ciencia ficción"}],
            "runtime": 155,
            "tagline": "El miedo mata la mente",
        });
        let details: MovieDetails = serde_json::from_value(json).unwrap();
        assert_eq!(details.id(), 438631);
        assert_eq!(details.movie.vote_average, 7.8);
        assert_eq!(details.genres[0].name, "Ciencia ficción");
        assert_eq!(details.runtime, 155);
        // Untouched fields default rather than fail deserialization
        assert_eq!(details.budget, 0);
    }
}
