use serde::{Deserialize, Serialize};
use time::Date;

use crate::auth::flash::Flash;

use super::repo::Referral;

/// Referral row as rendered to its owner. The owning account id stays
/// server-side.
#[derive(Debug, Serialize)]
pub struct ReferralView {
    pub id: i64,
    pub customer_name: String,
    pub referral_code: String,
    pub sales_name: String,
    pub submission_date: Date,
}

impl From<Referral> for ReferralView {
    fn from(row: Referral) -> Self {
        Self {
            id: row.id,
            customer_name: row.customer_name,
            referral_code: row.referral_code,
            sales_name: row.sales_name,
            submission_date: row.submission_date,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReferralListPage {
    pub referrals: Vec<ReferralView>,
}

#[derive(Debug, Serialize)]
pub struct EditReferralPage {
    pub referral: ReferralView,
    pub flash: Flash,
}

/// Defaults keep an incomplete form on the validation path instead of a
/// deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct ReferralForm {
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub referral_code: String,
    #[serde(default)]
    pub sales_name: String,
}

impl ReferralForm {
    pub fn has_empty_field(&self) -> bool {
        self.customer_name.is_empty() || self.referral_code.is_empty() || self.sales_name.is_empty()
    }
}
