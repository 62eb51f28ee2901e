use axum::Router;

use crate::db::AppState;

pub mod dto;
pub mod extractors;
pub mod flash;
pub mod handlers;
pub mod password;
pub mod session;

pub fn router() -> Router<AppState> {
    handlers::router()
}
