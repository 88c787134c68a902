/// Local asset served when the catalog has no artwork for a movie.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder-movie.svg";

pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// Map a nullable relative artwork path to an absolute URL, or the local
/// placeholder when the path is absent. Never produces a remote URL with a
/// missing path segment.
pub fn image_url(base_url: &str, path: Option<&str>, size: &str) -> String {
    match path {
        Some(p) if !p.is_empty() => format!("{}/{}{}", base_url, size, p),
        _ => PLACEHOLDER_IMAGE.to_string(),
    }
}
