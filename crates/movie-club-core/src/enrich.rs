use movie_club_catalog::MovieCatalog;
use movie_club_models::Review;
use tracing::{debug, warn};

/// Back-fill a review's cached movie metadata from the catalog.
///
/// A review that already carries title, year and poster is returned
/// untouched without a catalog call. Otherwise the movie details are
/// fetched and only the absent fields are filled; present fields are never
/// overwritten. A failed fetch logs a warning and passes the review through
/// unfilled.
pub async fn fill_missing_movie_info(catalog: &dyn MovieCatalog, review: Review) -> Review {
    if review.has_movie_info() {
        return review;
    }

    let details = match catalog.movie_details(review.movie_id).await {
        Ok(details) => details,
        Err(e) => {
            warn!(
                "Could not fetch movie {} for review {}: {}",
                review.movie_id, review.id, e
            );
            return review;
        }
    };

    debug!("Filling movie info for review {}", review.id);
    let mut review = review;
    if review.movie_title.is_none() {
        review.movie_title = Some(details.title().to_string());
    }
    if review.movie_year.is_none() {
        review.movie_year = details.release_year();
    }
    if review.poster_path.is_none() {
        review.poster_path = details.movie.poster_path.clone();
    }
    review
}

/// Enrich a batch, strictly one review at a time to bound catalog load.
/// One failing review never drops or corrupts the others; output order
/// matches input order.
pub async fn fill_missing_movie_info_batch(
    catalog: &dyn MovieCatalog,
    reviews: Vec<Review>,
) -> Vec<Review> {
    let mut filled = Vec::with_capacity(reviews.len());
    for review in reviews {
        filled.push(fill_missing_movie_info(catalog, review).await);
    }
    filled
}
