use serde::{Deserialize, Serialize};
use tower_sessions::{
    cookie::{time::Duration, SameSite},
    Expiry, MemoryStore, Session, SessionManagerLayer,
};

use crate::config::SessionConfig;
use crate::users::repo::Role;

pub const SESSION_COOKIE_NAME: &str = "referrank_session";

pub mod keys {
    pub const CURRENT_USER: &str = "current_user";
    pub const FLASH: &str = "flash";
}

/// Identity stored in the session after a successful login. Absent key
/// means unauthenticated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
    pub role: Role,
}

pub fn layer(config: &SessionConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(Duration::minutes(config.ttl_minutes)))
        .with_same_site(SameSite::Strict)
        .with_http_only(true)
        .with_secure(false)
        .with_path("/")
}

pub async fn establish(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::CURRENT_USER, user).await
}
