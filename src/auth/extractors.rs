use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::users::repo::Role;

use super::session::{keys, CurrentUser};

pub const FORBIDDEN_NOT_ADMIN: &str = "Akses ditolak. Bukan admin.";
pub const FORBIDDEN_NOT_USER: &str = "Akses ditolak. Bukan user.";

/// Resolves the session identity and requires the admin role.
#[derive(Debug)]
pub struct RequireAdmin(pub CurrentUser);

/// Resolves the session identity and requires the user role.
#[derive(Debug)]
pub struct RequireUser(pub CurrentUser);

/// Missing identity bounces to the login page; a wrong role is a plain 403,
/// never a redirect and never a 404.
pub enum AuthRejection {
    RedirectToLogin,
    Forbidden(&'static str),
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/").into_response(),
            Self::Forbidden(message) => (StatusCode::FORBIDDEN, message).into_response(),
        }
    }
}

async fn current_user(parts: &Parts) -> Result<CurrentUser, AuthRejection> {
    let session = parts
        .extensions
        .get::<Session>()
        .ok_or(AuthRejection::RedirectToLogin)?;
    session
        .get::<CurrentUser>(keys::CURRENT_USER)
        .await
        .ok()
        .flatten()
        .ok_or(AuthRejection::RedirectToLogin)
}

#[async_trait]
impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = current_user(parts).await?;
        if user.role != Role::Admin {
            return Err(AuthRejection::Forbidden(FORBIDDEN_NOT_ADMIN));
        }
        Ok(Self(user))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = current_user(parts).await?;
        if user.role != Role::User {
            return Err(AuthRejection::Forbidden(FORBIDDEN_NOT_USER));
        }
        Ok(Self(user))
    }
}
