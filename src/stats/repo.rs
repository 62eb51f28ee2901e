use sqlx::SqlitePool;
use time::Date;

use super::dto::{AgentCount, GlobalAgentCount, GlobalStats, OwnerStats};
use super::period::{iso_date, iso_month, iso_year, week_start, DateFilter};

pub const RANKING_LIMIT: i64 = 5;

/// Ranking direction. Bottom ranks ascending over the same grouping, so a
/// single agent shows up in both lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankOrder {
    Top,
    Bottom,
}

impl RankOrder {
    fn keyword(self) -> &'static str {
        match self {
            Self::Top => "DESC",
            Self::Bottom => "ASC",
        }
    }
}

pub async fn owner_stats(
    db: &SqlitePool,
    user_id: i64,
    today: Date,
) -> anyhow::Result<OwnerStats> {
    let today_count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM referrals WHERE user_id = ? AND submission_date = ?",
    )
    .bind(user_id)
    .bind(iso_date(today))
    .fetch_one(db)
    .await?;

    let month = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM referrals WHERE user_id = ? AND strftime('%Y-%m', submission_date) = ?",
    )
    .bind(user_id)
    .bind(iso_month(today))
    .fetch_one(db)
    .await?;

    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM referrals WHERE user_id = ?")
        .bind(user_id)
        .fetch_one(db)
        .await?;

    Ok(OwnerStats {
        today: today_count,
        month,
        total,
    })
}

pub async fn global_stats(db: &SqlitePool, today: Date) -> anyhow::Result<GlobalStats> {
    let today_count =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM referrals WHERE submission_date = ?")
            .bind(iso_date(today))
            .fetch_one(db)
            .await?;

    let week =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM referrals WHERE submission_date >= ?")
            .bind(iso_date(week_start(today)))
            .fetch_one(db)
            .await?;

    let month = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM referrals WHERE strftime('%Y-%m', submission_date) = ?",
    )
    .bind(iso_month(today))
    .fetch_one(db)
    .await?;

    let year = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM referrals WHERE strftime('%Y', submission_date) = ?",
    )
    .bind(iso_year(today))
    .fetch_one(db)
    .await?;

    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM referrals")
        .fetch_one(db)
        .await?;

    Ok(GlobalStats {
        today: today_count,
        week,
        month,
        year,
        total,
    })
}

/// Agents ranked inside one account's rows. Name order breaks count ties so
/// repeated calls page the same way.
pub async fn owner_ranking(
    db: &SqlitePool,
    user_id: i64,
    filter: &DateFilter,
    order: RankOrder,
) -> anyhow::Result<Vec<AgentCount>> {
    // Clause and direction come from closed enums; caller input never
    // reaches the statement text.
    let sql = format!(
        r#"
        SELECT sales_name, COUNT(*) AS total
        FROM referrals
        WHERE user_id = ? AND {clause}
        GROUP BY sales_name
        ORDER BY total {order}, sales_name ASC
        LIMIT ?
        "#,
        clause = filter.clause(),
        order = order.keyword(),
    );
    let rows = sqlx::query_as::<_, AgentCount>(&sql)
        .bind(user_id)
        .bind(filter.value())
        .bind(RANKING_LIMIT)
        .fetch_all(db)
        .await?;
    Ok(rows)
}

/// Agents ranked across every account, grouped per (agent, account) pair.
pub async fn global_ranking(
    db: &SqlitePool,
    filter: &DateFilter,
    order: RankOrder,
) -> anyhow::Result<Vec<GlobalAgentCount>> {
    let sql = format!(
        r#"
        SELECT r.sales_name, u.username, COUNT(*) AS total
        FROM referrals r
        JOIN users u ON u.id = r.user_id
        WHERE {clause}
        GROUP BY r.sales_name, u.username
        ORDER BY total {order}, r.sales_name ASC, u.username ASC
        LIMIT ?
        "#,
        clause = filter.clause(),
        order = order.keyword(),
    );
    let rows = sqlx::query_as::<_, GlobalAgentCount>(&sql)
        .bind(filter.value())
        .bind(RANKING_LIMIT)
        .fetch_all(db)
        .await?;
    Ok(rows)
}
