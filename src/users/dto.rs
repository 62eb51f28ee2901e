use serde::{Deserialize, Serialize};

use crate::auth::flash::Flash;

use super::repo::UserSummary;

/// Admin landing payload: every account plus any pending flash messages.
#[derive(Debug, Serialize)]
pub struct AdminPage {
    pub users: Vec<UserSummary>,
    pub flash: Flash,
}

/// Defaults keep an incomplete form on the validation path instead of a
/// deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct AddUserForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct EditPasswordForm {
    #[serde(default)]
    pub password: String,
}
