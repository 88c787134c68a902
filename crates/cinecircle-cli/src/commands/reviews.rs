use std::sync::Arc;

use color_eyre::Result;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use movie_club_catalog::MovieCatalog;
use movie_club_core::{fill_missing_movie_info_batch, ReviewFeed, Session};
use movie_club_models::Review;
use movie_club_store::ALL_MOVIES;
use tracing::warn;

use super::{finish_spinner, spinner, AppContext};
use crate::output::Output;

pub async fn run_list(ctx: &AppContext, movie_id: u64, output: &Output) -> Result<()> {
    let reviews = ctx.reviews.movie_reviews(movie_id).await;
    let reviews = fill_missing_movie_info_batch(&ctx.catalog, reviews).await;

    if reviews.is_empty() {
        output.println("Todavía no hay reseñas para esta película");
        return Ok(());
    }
    render_reviews(&reviews, output);
    Ok(())
}

pub async fn run_recent(ctx: &AppContext, output: &Output) -> Result<()> {
    let reviews = ctx.reviews.movie_reviews(ALL_MOVIES).await;
    let reviews = fill_missing_movie_info_batch(&ctx.catalog, reviews).await;

    if reviews.is_empty() {
        output.println("Todavía no hay reseñas");
        return Ok(());
    }
    render_reviews(&reviews, output);
    Ok(())
}

pub async fn run_follow(ctx: &AppContext, movie_id: u64, output: &Output) -> Result<()> {
    let catalog: Arc<dyn MovieCatalog> = Arc::new(ctx.catalog.clone());
    let mut feed = ReviewFeed::open(&ctx.reviews, catalog, movie_id);

    if movie_id == ALL_MOVIES {
        output.println("Siguiendo las reseñas más recientes (Ctrl+C para salir)");
    } else {
        output.println(format!(
            "Siguiendo las reseñas de la película {} (Ctrl+C para salir)",
            movie_id
        ));
    }

    loop {
        tokio::select! {
            snapshot = feed.next_snapshot() => {
                match snapshot {
                    Some(reviews) if reviews.is_empty() => {
                        output.println("(sin reseñas)");
                    }
                    Some(reviews) => render_reviews(&reviews, output),
                    None => break,
                }
            }
            _ = tokio::signal::ctrl_c() => {
                feed.close();
                break;
            }
        }
    }
    Ok(())
}

pub async fn run_add(
    ctx: &AppContext,
    movie_id: u64,
    rating: u8,
    content: &str,
    output: &Output,
) -> Result<()> {
    let Some(user) = ctx.require_user(output).await? else {
        return Ok(());
    };

    // Cache the movie metadata on the review when the catalog answers;
    // enrichment fills it later otherwise
    let pb = spinner(output, "Publicando reseña...");
    let (movie_title, movie_year, poster_path) = match ctx.catalog.movie_details(movie_id).await {
        Ok(details) => (
            Some(details.title().to_string()),
            details.release_year(),
            details.movie.poster_path.clone(),
        ),
        Err(e) => {
            warn!("Could not cache movie info for new review: {}", e);
            (None, None, None)
        }
    };

    let result = ctx
        .reviews
        .add_review(movie_id, &user, content, rating, movie_title, movie_year, poster_path)
        .await;
    finish_spinner(pb);

    match result {
        Ok(id) => output.success(format!("Reseña publicada ({})", id)),
        Err(e) => {
            warn!("Review insert failed: {}", e);
            output.error(format!("No se pudo publicar la reseña: {}", e));
        }
    }
    Ok(())
}

pub async fn run_edit(
    ctx: &AppContext,
    review_id: &str,
    rating: u8,
    content: &str,
    output: &Output,
) -> Result<()> {
    let Some(user) = ctx.require_user(output).await? else {
        return Ok(());
    };

    // Ownership is enforced here, at the control layer; the store itself
    // mutates by document id
    let mut session = Session::new();
    session.set_user(user);
    let Some(review) = ctx.reviews.review(review_id).await else {
        output.error("Reseña no encontrada");
        return Ok(());
    };
    if !session.owns_review(&review.user_id) {
        output.error("Solo el autor puede modificar su reseña");
        return Ok(());
    }

    match ctx.reviews.update_review(review_id, content, rating).await {
        Ok(()) => output.success("Reseña actualizada"),
        Err(e) => {
            warn!("Review update failed: {}", e);
            output.error(format!("No se pudo actualizar la reseña: {}", e));
        }
    }
    Ok(())
}

pub async fn run_delete(ctx: &AppContext, review_id: &str, output: &Output) -> Result<()> {
    let Some(user) = ctx.require_user(output).await? else {
        return Ok(());
    };

    let mut session = Session::new();
    session.set_user(user);
    let Some(review) = ctx.reviews.review(review_id).await else {
        output.error("Reseña no encontrada");
        return Ok(());
    };
    if !session.owns_review(&review.user_id) {
        output.error("Solo el autor puede eliminar su reseña");
        return Ok(());
    }

    match ctx.reviews.delete_review(review_id).await {
        Ok(()) => output.success("Reseña eliminada"),
        Err(e) => {
            warn!("Review delete failed: {}", e);
            output.error(format!("No se pudo eliminar la reseña: {}", e));
        }
    }
    Ok(())
}

fn stars(rating: u8) -> String {
    let filled = rating.min(5) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

fn render_reviews(reviews: &[Review], output: &Output) {
    if !output.is_human() {
        if let Ok(value) = serde_json::to_value(reviews) {
            output.json(&value);
        }
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Fecha", "Película", "Usuario", "Nota", "Reseña", "Id"]);
    for review in reviews {
        let movie = match (&review.movie_title, review.movie_year) {
            (Some(title), Some(year)) => format!("{} ({})", title, year),
            (Some(title), None) => title.clone(),
            (None, _) => format!("#{}", review.movie_id),
        };
        table.add_row(vec![
            Cell::new(review.created_at.format("%Y-%m-%d %H:%M")),
            Cell::new(movie),
            Cell::new(&review.display_name),
            Cell::new(stars(review.rating)),
            Cell::new(&review.content),
            Cell::new(&review.id),
        ]);
    }
    output.println(table.to_string());
}
