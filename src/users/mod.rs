pub mod dto;
pub mod handlers;
pub mod repo;

use axum::Router;
use tracing::info;

use crate::auth::password::hash_password_blocking;
use crate::db::AppState;

use self::repo::{Role, User};

pub fn router() -> Router<AppState> {
    handlers::router()
}

/// Provision the admin account named in the environment, once. Existing
/// accounts are left untouched so a restart never resets a password.
pub async fn bootstrap_admin(state: &AppState) -> anyhow::Result<()> {
    let Some(admin) = state.config.bootstrap_admin.clone() else {
        return Ok(());
    };

    if User::find_by_username(&state.db, &admin.username)
        .await?
        .is_some()
    {
        return Ok(());
    }

    let password_hash = hash_password_blocking(admin.password).await?;
    let user = User::create(&state.db, &admin.username, &password_hash, Role::Admin).await?;
    info!(user_id = user.id, username = %user.username, "admin account provisioned");
    Ok(())
}
