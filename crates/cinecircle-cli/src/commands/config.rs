use color_eyre::eyre::eyre;
use color_eyre::Result;
use movie_club_config::{Config, CredentialStore, PathManager};

use crate::output::Output;

pub fn run_show(full: bool, output: &Output) -> Result<()> {
    let paths = PathManager::default();
    let config = Config::load(&paths.config_file())
        .map_err(|e| eyre!("Failed to load configuration: {}", e))?;

    let mut credentials = CredentialStore::new(paths.credentials_file());
    credentials
        .load()
        .map_err(|e| eyre!("Failed to load credentials: {}", e))?;

    let api_key = effective(&config.tmdb.api_key, credentials.get_tmdb_api_key());
    let access_token = effective(&config.tmdb.access_token, credentials.get_tmdb_access_token());

    if !output.is_human() {
        let value = serde_json::json!({
            "config_file": paths.config_file(),
            "store_dir": config.store.data_dir.clone().unwrap_or_else(|| paths.store_dir()),
            "tmdb": {
                "api_key": display_secret(api_key, full),
                "access_token": display_secret(access_token, full),
                "base_url": config.tmdb.base_url,
                "image_base_url": config.tmdb.image_base_url,
                "language": config.tmdb.language,
            },
            "active_uid": credentials.get_active_uid(),
        });
        output.json(&value);
        return Ok(());
    }

    output.println(format!("Configuración: {}", paths.config_file().display()));
    output.println(format!(
        "Almacén de datos: {}",
        config
            .store
            .data_dir
            .clone()
            .unwrap_or_else(|| paths.store_dir())
            .display()
    ));
    output.println(format!("TMDB api_key: {}", display_secret(api_key, full)));
    output.println(format!(
        "TMDB access_token: {}",
        display_secret(access_token, full)
    ));
    if let Some(base_url) = &config.tmdb.base_url {
        output.println(format!("TMDB base_url: {}", base_url));
    }
    if let Some(language) = &config.tmdb.language {
        output.println(format!("Idioma: {}", language));
    }
    match credentials.get_active_uid() {
        Some(uid) => output.println(format!("Sesión activa: {}", uid)),
        None => output.println("Sesión activa: (ninguna)"),
    }
    Ok(())
}

pub fn run_tmdb(
    api_key: Option<String>,
    access_token: Option<String>,
    output: &Output,
) -> Result<()> {
    if api_key.is_none() && access_token.is_none() {
        output.warn("Nada que guardar: indica --api-key y/o --access-token");
        return Ok(());
    }

    let paths = PathManager::default();
    paths
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create application directories: {}", e))?;

    let mut credentials = CredentialStore::new(paths.credentials_file());
    credentials
        .load()
        .map_err(|e| eyre!("Failed to load credentials: {}", e))?;

    if let Some(api_key) = api_key {
        credentials.set_tmdb_api_key(api_key);
    }
    if let Some(access_token) = access_token {
        credentials.set_tmdb_access_token(access_token);
    }
    credentials
        .save()
        .map_err(|e| eyre!("Failed to save credentials: {}", e))?;

    output.success("Credenciales de TMDB guardadas");
    Ok(())
}

fn effective<'a>(from_config: &'a str, fallback: Option<&'a String>) -> Option<&'a str> {
    if !from_config.is_empty() {
        Some(from_config)
    } else {
        fallback.map(String::as_str)
    }
}

/// Secrets print masked unless `--full` is passed.
fn display_secret(value: Option<&str>, full: bool) -> String {
    match value {
        None => "(sin configurar)".to_string(),
        Some(_) if !full => "********".to_string(),
        Some(value) => value.to_string(),
    }
}
