use axum::{
    extract::{Form, State},
    response::Redirect,
    routing::{get, post},
    Json, Router,
};
use tower_sessions::Session;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginForm, LoginPage},
        flash,
        password::verify_password_blocking,
        session::{self, CurrentUser},
    },
    db::AppState,
    error::AppError,
    users::repo::{Role, User},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(login_page))
        .route("/login", post(login))
        .route("/logout", get(logout))
}

const EMPTY_CREDENTIALS_MSG: &str = "Username dan Password wajib diisi.";
const BAD_CREDENTIALS_MSG: &str = "Username atau Password salah.";

#[instrument(skip(session))]
async fn login_page(session: Session) -> Result<Json<LoginPage>, AppError> {
    let flash = flash::take(&session).await?;
    Ok(Json(LoginPage { flash }))
}

#[instrument(skip(state, session, form))]
async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Redirect, AppError> {
    if form.username.is_empty() || form.password.is_empty() {
        flash::push_error(&session, EMPTY_CREDENTIALS_MSG).await?;
        return Ok(Redirect::to("/"));
    }

    // Unknown username and wrong password answer identically.
    let Some(user) = User::find_by_username(&state.db, &form.username).await? else {
        warn!(username = %form.username, "login rejected");
        flash::push_error(&session, BAD_CREDENTIALS_MSG).await?;
        return Ok(Redirect::to("/"));
    };

    if !verify_password_blocking(form.password, user.password_hash.clone()).await? {
        warn!(username = %form.username, "login rejected");
        flash::push_error(&session, BAD_CREDENTIALS_MSG).await?;
        return Ok(Redirect::to("/"));
    }

    session::establish(
        &session,
        &CurrentUser {
            id: user.id,
            username: user.username.clone(),
            role: user.role,
        },
    )
    .await?;
    info!(user_id = user.id, username = %user.username, role = ?user.role, "user logged in");

    Ok(Redirect::to(match user.role {
        Role::Admin => "/admin",
        Role::User => "/dashboard",
    }))
}

#[instrument(skip(session))]
async fn logout(session: Session) -> Result<Redirect, AppError> {
    session.flush().await?;
    Ok(Redirect::to("/"))
}
