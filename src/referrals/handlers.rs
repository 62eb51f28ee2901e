use axum::{
    extract::{Form, Path, State},
    response::Redirect,
    routing::{delete, get, post},
    Json, Router,
};
use tower_sessions::Session;
use tracing::{info, instrument};

use crate::{
    auth::{extractors::RequireUser, flash},
    db::AppState,
    error::AppError,
    stats::period::today_utc,
};

use super::{
    dto::{EditReferralPage, ReferralForm, ReferralListPage, ReferralView},
    repo::Referral,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/lihatdata", get(list_referrals))
        .route("/inputnasabah", post(create_referral))
        .route("/edit-nasabah/:id", get(edit_page).post(submit_edit))
        .route("/hapus-nasabah/:id", delete(delete_referral))
}

const EMPTY_FIELDS_MSG: &str = "Semua field wajib diisi";

#[instrument(skip(state))]
async fn list_referrals(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
) -> Result<Json<ReferralListPage>, AppError> {
    let referrals = Referral::list_by_owner(&state.db, user.id)
        .await?
        .into_iter()
        .map(ReferralView::from)
        .collect();
    Ok(Json(ReferralListPage { referrals }))
}

#[instrument(skip(state, session, form))]
async fn create_referral(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ReferralForm>,
) -> Result<Redirect, AppError> {
    if form.has_empty_field() {
        flash::push_error(&session, EMPTY_FIELDS_MSG).await?;
        return Ok(Redirect::to("/dashboard"));
    }

    let referral = Referral::insert(
        &state.db,
        user.id,
        &form.customer_name,
        &form.referral_code,
        &form.sales_name,
        today_utc(),
    )
    .await?;
    info!(referral_id = referral.id, user_id = user.id, "referral recorded");

    Ok(Redirect::to("/lihatdata"))
}

#[instrument(skip(state, session))]
async fn edit_page(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> Result<Json<EditReferralPage>, AppError> {
    let Some(referral) = Referral::find_owned(&state.db, id, user.id).await? else {
        return Err(AppError::NotFound);
    };
    let flash = flash::take(&session).await?;
    Ok(Json(EditReferralPage {
        referral: ReferralView::from(referral),
        flash,
    }))
}

#[instrument(skip(state, session, form))]
async fn submit_edit(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
    Form(form): Form<ReferralForm>,
) -> Result<Redirect, AppError> {
    if form.has_empty_field() {
        flash::push_error(&session, EMPTY_FIELDS_MSG).await?;
        return Ok(Redirect::to(&format!("/edit-nasabah/{id}")));
    }

    let updated = Referral::update_owned(
        &state.db,
        id,
        user.id,
        &form.customer_name,
        &form.referral_code,
        &form.sales_name,
    )
    .await?;
    if !updated {
        return Err(AppError::NotFound);
    }
    info!(referral_id = id, user_id = user.id, "referral updated");

    Ok(Redirect::to("/lihatdata"))
}

#[instrument(skip(state))]
async fn delete_referral(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    if !Referral::delete_owned(&state.db, id, user.id).await? {
        return Err(AppError::NotFound);
    }
    info!(referral_id = id, user_id = user.id, "referral deleted");

    Ok(Redirect::to("/lihatdata"))
}
