use axum::{
    extract::{Form, Path, State},
    response::Redirect,
    routing::{get, post},
    Json, Router,
};
use tower_sessions::Session;
use tracing::{info, instrument};

use crate::{
    auth::{extractors::RequireAdmin, flash, password::hash_password_blocking},
    db::AppState,
    error::AppError,
};

use super::{
    dto::{AddUserForm, AdminPage, EditPasswordForm},
    repo::{Role, User},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin", get(admin_page))
        .route("/admin/add-user", post(add_user))
        .route(
            "/admin/edit-password/:id",
            post(edit_password).put(edit_password),
        )
}

const EMPTY_CREDENTIALS_MSG: &str = "Username dan Password wajib diisi.";
const EMPTY_PASSWORD_MSG: &str = "Kolom password baru tidak boleh kosong.";
const PASSWORD_CHANGED_MSG: &str = "Password user berhasil diubah.";

#[instrument(skip(state, session))]
async fn admin_page(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<AdminPage>, AppError> {
    let users = User::list_summaries(&state.db).await?;
    let flash = flash::take(&session).await?;
    Ok(Json(AdminPage { users, flash }))
}

#[instrument(skip(state, session, form))]
async fn add_user(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddUserForm>,
) -> Result<Redirect, AppError> {
    if form.username.is_empty() || form.password.is_empty() {
        flash::push_error(&session, EMPTY_CREDENTIALS_MSG).await?;
        return Ok(Redirect::to("/admin"));
    }

    if User::find_by_username(&state.db, &form.username)
        .await?
        .is_some()
    {
        flash::push_error(
            &session,
            format!(
                "Gagal menambahkan. Username \"{}\" sudah terdaftar.",
                form.username
            ),
        )
        .await?;
        return Ok(Redirect::to("/admin"));
    }

    let password_hash = hash_password_blocking(form.password).await?;
    let user = User::create(&state.db, &form.username, &password_hash, Role::User).await?;
    info!(user_id = user.id, username = %user.username, "user account created");

    flash::push_success(
        &session,
        format!("User \"{}\" berhasil ditambahkan!", user.username),
    )
    .await?;
    Ok(Redirect::to("/admin"))
}

#[instrument(skip(state, session, form))]
async fn edit_password(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
    Form(form): Form<EditPasswordForm>,
) -> Result<Redirect, AppError> {
    if form.password.is_empty() {
        flash::push_error(&session, EMPTY_PASSWORD_MSG).await?;
        return Ok(Redirect::to("/admin"));
    }

    let password_hash = hash_password_blocking(form.password).await?;
    if !User::update_password(&state.db, id, &password_hash).await? {
        return Err(AppError::NotFound);
    }
    info!(user_id = id, "user password changed");

    flash::push_success(&session, PASSWORD_CHANGED_MSG).await?;
    Ok(Redirect::to("/admin"))
}
