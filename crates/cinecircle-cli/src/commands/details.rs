use color_eyre::Result;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use movie_club_catalog::{client::DEFAULT_IMAGE_SIZE, MovieCatalog};
use movie_club_models::MovieDetails;
use tracing::warn;

use super::{finish_spinner, spinner, AppContext};
use crate::output::Output;

pub async fn run_details(ctx: &AppContext, movie_id: u64, output: &Output) -> Result<()> {
    let pb = spinner(output, "Cargando película...");
    let details = match ctx.catalog.movie_details(movie_id).await {
        Ok(details) => details,
        Err(e) => {
            finish_spinner(pb);
            if e.is_not_found() {
                output.error("Película no encontrada");
            } else {
                warn!("Details fetch failed for {}: {}", movie_id, e);
                output.error(format!("No se pudo cargar la película: {}", e));
            }
            return Ok(());
        }
    };

    // Trailers and similar titles degrade independently; the detail page
    // still renders without them
    let videos = ctx.catalog.movie_videos(movie_id).await;
    let similar = ctx.catalog.similar_lite(movie_id).await;
    finish_spinner(pb);

    if !output.is_human() {
        let mut value = serde_json::to_value(&details).unwrap_or_default();
        if let (Ok(videos), Some(obj)) = (&videos, value.as_object_mut()) {
            obj.insert(
                "videos".to_string(),
                serde_json::to_value(&videos.results).unwrap_or_default(),
            );
        }
        if let (Ok(similar), Some(obj)) = (&similar, value.as_object_mut()) {
            obj.insert(
                "similar".to_string(),
                serde_json::to_value(&similar.results).unwrap_or_default(),
            );
        }
        output.json(&value);
        return Ok(());
    }

    render_details(ctx, &details, output);

    match videos {
        Ok(videos) => {
            let trailers: Vec<_> = videos
                .results
                .iter()
                .filter(|v| v.site == "YouTube" && v.video_type == "Trailer")
                .collect();
            if !trailers.is_empty() {
                output.println("\nTráilers:");
                for video in trailers {
                    output.println(format!(
                        "  {} - https://www.youtube.com/watch?v={}",
                        video.name, video.key
                    ));
                }
            }
        }
        Err(e) => warn!("Videos fetch failed for {}: {}", movie_id, e),
    }

    match similar {
        Ok(similar) if !similar.results.is_empty() => {
            output.println("\nPelículas similares:");
            for movie in similar.results.iter().take(5) {
                output.println(format!("  {} ({:.1}) [{}]", movie.title, movie.vote_average, movie.id));
            }
        }
        Ok(_) => {}
        Err(e) => warn!("Similar fetch failed for {}: {}", movie_id, e),
    }

    Ok(())
}

fn render_details(ctx: &AppContext, details: &MovieDetails, output: &Output) {
    let year = details
        .release_year()
        .map(|y| format!(" ({})", y))
        .unwrap_or_default();
    output.println(format!("{}{}", details.title(), year));
    if !details.tagline.is_empty() {
        output.println(format!("\"{}\"", details.tagline));
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.add_row(vec![Cell::new("Sinopsis"), Cell::new(&details.movie.overview)]);
    table.add_row(vec![
        Cell::new("Géneros"),
        Cell::new(
            details
                .genres
                .iter()
                .map(|g| g.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        ),
    ]);
    table.add_row(vec![
        Cell::new("Duración"),
        Cell::new(format!("{} min", details.runtime)),
    ]);
    table.add_row(vec![
        Cell::new("Nota media"),
        Cell::new(format!("{:.1}", details.movie.vote_average)),
    ]);
    table.add_row(vec![
        Cell::new("Póster"),
        Cell::new(ctx.catalog.image_url(details.movie.poster_path.as_deref(), DEFAULT_IMAGE_SIZE)),
    ]);
    if !details.homepage.is_empty() {
        table.add_row(vec![Cell::new("Web"), Cell::new(&details.homepage)]);
    }
    output.println(table.to_string());
}
