use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A star-rated text review of one movie.
///
/// `movie_title`/`movie_year`/`poster_path` are cached catalog metadata for
/// the recent-reviews list; when absent they are back-filled by enrichment,
/// never overwritten once present. Document field names stay camelCase to
/// match the stored collection shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub movie_id: u64,
    pub user_id: String,
    pub display_name: String,
    #[serde(rename = "photoURL", skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    pub rating: u8,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movie_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movie_year: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
}

impl Review {
    /// Whether all cached movie fields are present, i.e. enrichment has
    /// nothing left to fill.
    pub fn has_movie_info(&self) -> bool {
        self.movie_title.is_some() && self.movie_year.is_some() && self.poster_path.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_has_movie_info() {
        let mut review = Review {
            id: "r1".to_string(),
            movie_id: 42,
            user_id: "u1".to_string(),
            display_name: "Ana".to_string(),
            photo_url: None,
            rating: 4,
            content: "Muy buena".to_string(),
            created_at: Utc::now(),
            movie_title: Some("Movie".to_string()),
            movie_year: Some(2020),
            poster_path: None,
        };
        assert!(!review.has_movie_info());
        review.poster_path = Some("/p.jpg".to_string());
        assert!(review.has_movie_info());
    }

    #[test]
    fn test_document_field_names_are_camel_case() {
        let review = Review {
            id: "r1".to_string(),
            movie_id: 42,
            user_id: "u1".to_string(),
            display_name: "Ana".to_string(),
            photo_url: Some("https://example.com/a.png".to_string()),
            rating: 5,
            content: "".to_string(),
            created_at: Utc::now(),
            movie_title: None,
            movie_year: None,
            poster_path: None,
        };
        let json = serde_json::to_value(&review).unwrap();
        assert!(json.get("movieId").is_some());
        assert!(json.get("photoURL").is_some());
        assert!(json.get("createdAt").is_some());
        // Absent cached fields are omitted, not serialized as null
        assert!(json.get("movieTitle").is_none());
    }
}
