use color_eyre::Result;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use movie_club_catalog::MovieCatalog;
use tracing::warn;

use super::{finish_spinner, spinner, AppContext};
use crate::output::Output;

pub async fn run_toggle(ctx: &AppContext, movie_id: u64, output: &Output) -> Result<()> {
    let Some(user) = ctx.require_user(output).await? else {
        return Ok(());
    };

    // The entry stores the title for display; fall back to the id when the
    // catalog cannot answer
    let pb = spinner(output, "Actualizando lista...");
    let title = match ctx.catalog.movie_details(movie_id).await {
        Ok(details) => details.title().to_string(),
        Err(e) => {
            warn!("Could not fetch title for watched entry: {}", e);
            format!("#{}", movie_id)
        }
    };

    let result = ctx.watched.toggle_watched(&user.uid, movie_id, &title).await;
    finish_spinner(pb);

    match result {
        Ok(true) => output.success(format!("\"{}\" marcada como vista", title)),
        Ok(false) => output.success(format!("\"{}\" eliminada de tu lista de vistas", title)),
        Err(e) => {
            warn!("Watched toggle failed: {}", e);
            output.error(format!("No se pudo actualizar tu lista de vistas: {}", e));
        }
    }
    Ok(())
}

pub async fn run_list(ctx: &AppContext, output: &Output) -> Result<()> {
    let Some(user) = ctx.require_user(output).await? else {
        return Ok(());
    };

    let entries = ctx.watched.watched_movies(&user.uid).await;
    if entries.is_empty() {
        output.println("Todavía no has marcado ninguna película como vista");
        return Ok(());
    }

    if !output.is_human() {
        if let Ok(value) = serde_json::to_value(&entries) {
            output.json(&value);
        }
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Id", "Título"]);
    for entry in &entries {
        table.add_row(vec![Cell::new(entry.id), Cell::new(&entry.title)]);
    }
    output.println(table.to_string());
    output.println(format!("{} películas vistas", entries.len()));
    Ok(())
}

pub async fn run_check(ctx: &AppContext, movie_id: u64, output: &Output) -> Result<()> {
    let Some(user) = ctx.require_user(output).await? else {
        return Ok(());
    };

    if ctx.watched.is_watched(&user.uid, movie_id).await {
        output.println("Vista");
    } else {
        output.println("No vista");
    }
    Ok(())
}
