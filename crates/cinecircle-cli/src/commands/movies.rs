use color_eyre::Result;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use movie_club_catalog::{client::DEFAULT_IMAGE_SIZE, MovieCatalog};
use movie_club_core::{front_page_candidates, search_local, PageCache, LOCAL_SEARCH_LIMIT};
use movie_club_models::{LiteMovieResponse, Movie, MovieResponse};
use tracing::warn;

use super::{finish_spinner, spinner, AppContext};
use crate::output::Output;

#[derive(Debug, Clone, Copy)]
pub enum Listing {
    Popular,
    TopRated,
    Upcoming,
    NowPlaying,
}

impl Listing {
    fn title(&self) -> &'static str {
        match self {
            Listing::Popular => "Películas populares",
            Listing::TopRated => "Mejor valoradas",
            Listing::Upcoming => "Próximos estrenos",
            Listing::NowPlaying => "En cartelera",
        }
    }
}

pub async fn run_list(
    ctx: &AppContext,
    listing: Listing,
    page: u32,
    lite: bool,
    output: &Output,
) -> Result<()> {
    let pb = spinner(output, "Cargando películas...");

    if lite {
        let result = match listing {
            Listing::Popular => ctx.catalog.popular_lite(page).await,
            Listing::TopRated => ctx.catalog.top_rated_lite(page).await,
            Listing::Upcoming => ctx.catalog.upcoming_lite(page).await,
            Listing::NowPlaying => ctx.catalog.now_playing(page).await.map(Into::into),
        };
        finish_spinner(pb);
        match result {
            Ok(response) => render_lite_response(ctx, listing.title(), &response, output),
            Err(e) => {
                warn!("Catalog listing failed: {}", e);
                output.error(format!("No se pudieron cargar las películas: {}", e));
            }
        }
        return Ok(());
    }

    let result = match listing {
        Listing::Popular => ctx.catalog.popular(page).await,
        Listing::TopRated => ctx.catalog.top_rated(page).await,
        Listing::Upcoming => ctx.catalog.upcoming(page).await,
        Listing::NowPlaying => ctx.catalog.now_playing(page).await,
    };
    finish_spinner(pb);

    match result {
        Ok(response) => render_response(ctx, listing.title(), &response, output),
        Err(e) => {
            warn!("Catalog listing failed: {}", e);
            output.error(format!("No se pudieron cargar las películas: {}", e));
        }
    }
    Ok(())
}

pub async fn run_search(ctx: &AppContext, query: &str, page: u32, output: &Output) -> Result<()> {
    if query.trim().is_empty() {
        output.warn("Introduce un texto de búsqueda");
        return Ok(());
    }

    let pb = spinner(output, "Buscando...");

    // Search-as-you-type path: aggregate the front-page sections and match
    // locally, capped. No local hit (or explicit pagination) falls through
    // to the full server search.
    if page == 1 {
        let mut cache = PageCache::new();
        let candidates = front_page_candidates(&ctx.catalog, &mut cache).await;
        let local: Vec<Movie> = search_local(&candidates, query, LOCAL_SEARCH_LIMIT)
            .into_iter()
            .cloned()
            .collect();
        if !local.is_empty() {
            finish_spinner(pb);
            let total = local.len() as u32;
            let response = MovieResponse {
                page: 1,
                results: local,
                total_pages: 1,
                total_results: total,
            };
            render_response(
                ctx,
                &format!("Resultados para \"{}\"", query),
                &response,
                output,
            );
            return Ok(());
        }
    }

    let result = ctx.catalog.search(query, page).await;
    finish_spinner(pb);

    match result {
        Ok(response) if response.results.is_empty() => {
            output.println(format!("Sin resultados para \"{}\"", query));
        }
        Ok(response) => render_response(ctx, &format!("Resultados para \"{}\"", query), &response, output),
        Err(e) => {
            warn!("Catalog search failed: {}", e);
            output.error(format!("No se pudo completar la búsqueda: {}", e));
        }
    }
    Ok(())
}

fn render_response(ctx: &AppContext, title: &str, response: &MovieResponse, output: &Output) {
    if !output.is_human() {
        if let Ok(value) = serde_json::to_value(response) {
            output.json(&value);
        }
        return;
    }

    output.println(title);
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Id", "Título", "Estreno", "Nota", "Póster"]);
    for movie in &response.results {
        table.add_row(vec![
            Cell::new(movie.id),
            Cell::new(&movie.title),
            Cell::new(&movie.release_date),
            Cell::new(format!("{:.1}", movie.vote_average)),
            Cell::new(ctx.catalog.image_url(movie.poster_path.as_deref(), DEFAULT_IMAGE_SIZE)),
        ]);
    }
    output.println(table.to_string());
    output.println(format!(
        "Página {} de {} ({} resultados)",
        response.page, response.total_pages, response.total_results
    ));
}

fn render_lite_response(
    ctx: &AppContext,
    title: &str,
    response: &LiteMovieResponse,
    output: &Output,
) {
    if !output.is_human() {
        if let Ok(value) = serde_json::to_value(response) {
            output.json(&value);
        }
        return;
    }

    output.println(title);
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Id", "Título", "Nota", "Póster"]);
    for movie in &response.results {
        table.add_row(vec![
            Cell::new(movie.id),
            Cell::new(&movie.title),
            Cell::new(format!("{:.1}", movie.vote_average)),
            Cell::new(ctx.catalog.image_url(movie.poster_path.as_deref(), DEFAULT_IMAGE_SIZE)),
        ]);
    }
    output.println(table.to_string());
    output.println(format!(
        "Página {} de {} ({} resultados)",
        response.page, response.total_pages, response.total_results
    ));
}
