use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use super::session::keys;

/// One-shot message queues riding the session. `take` removes them, so a
/// message is rendered at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub success: Vec<String>,
    pub error: Vec<String>,
}

pub async fn push_success(
    session: &Session,
    message: impl Into<String>,
) -> Result<(), tower_sessions::session::Error> {
    let mut flash: Flash = session.get(keys::FLASH).await?.unwrap_or_default();
    flash.success.push(message.into());
    session.insert(keys::FLASH, &flash).await
}

pub async fn push_error(
    session: &Session,
    message: impl Into<String>,
) -> Result<(), tower_sessions::session::Error> {
    let mut flash: Flash = session.get(keys::FLASH).await?.unwrap_or_default();
    flash.error.push(message.into());
    session.insert(keys::FLASH, &flash).await
}

pub async fn take(session: &Session) -> Result<Flash, tower_sessions::session::Error> {
    Ok(session.remove::<Flash>(keys::FLASH).await?.unwrap_or_default())
}
