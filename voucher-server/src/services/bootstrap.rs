//! First-start admin account

use shared::models::Role;

use crate::config::Config;
use crate::db;
use crate::state::AppState;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Create the bootstrap admin when no admin exists and credentials are
/// configured.
pub async fn ensure_admin(state: &AppState, config: &Config) -> Result<(), BoxError> {
    if db::users::admin_exists(&state.pool).await? {
        return Ok(());
    }

    let (Some(username), Some(password)) = (
        config.bootstrap_admin_username.as_deref(),
        config.bootstrap_admin_password.as_deref(),
    ) else {
        tracing::warn!(
            "No admin account exists. Set BOOTSTRAP_ADMIN_USERNAME and \
             BOOTSTRAP_ADMIN_PASSWORD to create one."
        );
        return Ok(());
    };

    let username = super::users::normalize_username(username);
    if password.chars().count() < super::users::MIN_PASSWORD_LEN {
        return Err(format!(
            "BOOTSTRAP_ADMIN_PASSWORD must be at least {} characters",
            super::users::MIN_PASSWORD_LEN
        )
        .into());
    }
    let hashed = crate::util::hash_password(password).map_err(|e| e.to_string())?;
    let now = shared::util::now_millis();
    let admin = db::users::create(&state.pool, &username, &hashed, Role::Admin, None, now).await?;

    tracing::info!(user_id = admin.id, username = %admin.username, "Bootstrap admin created");
    Ok(())
}
