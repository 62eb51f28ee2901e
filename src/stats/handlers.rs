use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use tower_sessions::Session;
use tracing::instrument;

use crate::{
    auth::{
        extractors::{RequireAdmin, RequireUser},
        flash,
    },
    db::AppState,
    error::AppError,
};

use super::{
    dto::{DashboardPage, PeriodeQuery, TopSalesPage},
    period::{today_utc, Period},
    repo::{self, RankOrder},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/top-sales", get(top_sales))
}

#[instrument(skip(state, session))]
async fn dashboard(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<PeriodeQuery>,
) -> Result<Json<DashboardPage>, AppError> {
    let today = today_utc();
    let period = Period::parse(query.periode.as_deref());
    let filter = period.resolve(today);

    let stats = repo::owner_stats(&state.db, user.id, today).await?;
    let top_sales = repo::owner_ranking(&state.db, user.id, &filter, RankOrder::Top).await?;
    let bottom_sales = repo::owner_ranking(&state.db, user.id, &filter, RankOrder::Bottom).await?;
    let flash = flash::take(&session).await?;

    Ok(Json(DashboardPage {
        username: user.username,
        periode: period.label(),
        stats,
        top_sales,
        bottom_sales,
        flash,
    }))
}

#[instrument(skip(state))]
async fn top_sales(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<PeriodeQuery>,
) -> Result<Json<TopSalesPage>, AppError> {
    let today = today_utc();
    let period = Period::parse(query.periode.as_deref());
    let filter = period.resolve(today);

    let stats = repo::global_stats(&state.db, today).await?;
    let top_sales = repo::global_ranking(&state.db, &filter, RankOrder::Top).await?;
    let bottom_sales = repo::global_ranking(&state.db, &filter, RankOrder::Bottom).await?;

    Ok(Json(TopSalesPage {
        periode: period.label(),
        stats,
        top_sales,
        bottom_sales,
    }))
}
