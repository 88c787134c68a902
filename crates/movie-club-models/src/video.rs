use serde::{Deserialize, Serialize};

/// Trailer/teaser record from the catalog's videos endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Video {
    pub id: String,
    pub key: String,
    pub name: String,
    pub site: String, // YouTube, Vimeo, etc.
    #[serde(default)]
    pub size: u32,
    #[serde(rename = "type")]
    pub video_type: String, // Trailer, Teaser, etc.
    #[serde(default)]
    pub official: bool,
    #[serde(default)]
    pub published_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VideoResponse {
    pub id: u64,
    pub results: Vec<Video>,
}
