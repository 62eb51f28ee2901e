use serde::{Deserialize, Serialize};

use super::flash::Flash;

/// Request body for login. Defaults keep an incomplete form on the
/// validation path instead of a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// View model for the login page.
#[derive(Debug, Serialize)]
pub struct LoginPage {
    pub flash: Flash,
}
