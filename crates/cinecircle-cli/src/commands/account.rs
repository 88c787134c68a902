use color_eyre::Result;
use tracing::warn;

use super::AppContext;
use crate::output::Output;

pub async fn run_login(
    ctx: &AppContext,
    uid: &str,
    email: Option<String>,
    name: Option<String>,
    photo: Option<String>,
    output: &Output,
) -> Result<()> {
    let user = match ctx
        .users
        .create_user(uid, email.as_deref(), name.as_deref(), photo.as_deref())
        .await
    {
        Ok(user) => user,
        Err(e) => {
            warn!("User sign-in failed: {}", e);
            output.error(format!("No se pudo iniciar sesión: {}", e));
            return Ok(());
        }
    };

    ctx.set_active_uid(&user.uid)?;
    output.success(format!("Sesión iniciada como {}", user.display_name_or_default()));
    Ok(())
}

pub fn run_logout(ctx: &AppContext, output: &Output) -> Result<()> {
    ctx.clear_active_uid()?;
    output.success("Sesión cerrada");
    Ok(())
}

pub async fn run_whoami(ctx: &AppContext, output: &Output) -> Result<()> {
    match ctx.active_user().await? {
        Some(user) => {
            if !output.is_human() {
                if let Ok(value) = serde_json::to_value(&user) {
                    output.json(&value);
                }
                return Ok(());
            }
            output.println(format!("{} ({})", user.display_name_or_default(), user.uid));
            if let Some(email) = &user.email {
                output.println(format!("  {}", email));
            }
            output.println(format!(
                "  Miembro desde {}",
                user.created_at.format("%Y-%m-%d")
            ));
        }
        None => output.println("No has iniciado sesión"),
    }
    Ok(())
}
