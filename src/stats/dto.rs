use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::auth::flash::Flash;

/// Counters for one account: submissions recorded today, this calendar
/// month, and ever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OwnerStats {
    pub today: i64,
    pub month: i64,
    pub total: i64,
}

/// Counters across every account. `week` runs from the most recent Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GlobalStats {
    pub today: i64,
    pub week: i64,
    pub month: i64,
    pub year: i64,
    pub total: i64,
}

/// One ranking row: a sales agent and the submissions inside the window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct AgentCount {
    pub sales_name: String,
    pub total: i64,
}

/// Global ranking row. The same agent name under two accounts stays two rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct GlobalAgentCount {
    pub sales_name: String,
    pub username: String,
    pub total: i64,
}

#[derive(Debug, Deserialize)]
pub struct PeriodeQuery {
    pub periode: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DashboardPage {
    pub username: String,
    pub periode: &'static str,
    pub stats: OwnerStats,
    pub top_sales: Vec<AgentCount>,
    pub bottom_sales: Vec<AgentCount>,
    pub flash: Flash,
}

#[derive(Debug, Serialize)]
pub struct TopSalesPage {
    pub periode: &'static str,
    pub stats: GlobalStats,
    pub top_sales: Vec<GlobalAgentCount>,
    pub bottom_sales: Vec<GlobalAgentCount>,
}
