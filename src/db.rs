use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let options = SqliteConnectOptions::from_str(&config.database_url)
            .context("parse DATABASE_URL")?
            .create_if_missing(true)
            // WAL keeps readers running while the single writer commits
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .foreign_keys(true);
        let db = SqlitePoolOptions::new()
            .max_connections(10)
            .connect_with(options)
            .await
            .context("connect to database")?;
        Ok(Self { db, config })
    }
}

#[cfg(test)]
pub mod test_support {
    use argon2::{
        password_hash::{PasswordHasher, SaltString},
        Algorithm, Argon2, Params, Version,
    };
    use axum::body::Body;
    use axum::http::{header, Request};
    use axum::response::Response;
    use axum::Router;
    use http_body_util::BodyExt;
    use rand::rngs::OsRng;
    use tower::ServiceExt;

    use super::*;
    use crate::config::SessionConfig;

    /// Fresh in-memory database with migrations applied. One connection so
    /// every query sees the same database.
    pub async fn state() -> AppState {
        let config = Arc::new(AppConfig {
            database_url: "sqlite::memory:".into(),
            session: SessionConfig { ttl_minutes: 60 },
            bootstrap_admin: None,
        });
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .unwrap()
            .foreign_keys(true);
        let db = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .unwrap();
        sqlx::migrate!("./migrations").run(&db).await.unwrap();
        AppState { db, config }
    }

    pub async fn app() -> (AppState, Router) {
        let state = state().await;
        let router = crate::app::build_app(state.clone());
        (state, router)
    }

    /// Argon2 with minimal cost so seeding users stays fast; verification
    /// reads the parameters back from the PHC string.
    pub fn quick_hash(password: &str) -> String {
        let params = Params::new(1024, 1, 1, None).unwrap();
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        let salt = SaltString::generate(&mut OsRng);
        argon2
            .hash_password(password.as_bytes(), &salt)
            .unwrap()
            .to_string()
    }

    pub async fn seed_user(db: &SqlitePool, username: &str, password: &str, role: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(
            "INSERT INTO users (username, password_hash, role) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(username)
        .bind(quick_hash(password))
        .bind(role)
        .fetch_one(db)
        .await
        .unwrap()
    }

    pub async fn seed_referral(
        db: &SqlitePool,
        user_id: i64,
        customer: &str,
        code: &str,
        sales: &str,
        date: &str,
    ) -> i64 {
        sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO referrals (customer_name, referral_code, sales_name, submission_date, user_id)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(customer)
        .bind(code)
        .bind(sales)
        .bind(date)
        .bind(user_id)
        .fetch_one(db)
        .await
        .unwrap()
    }

    pub async fn send(app: Router, req: Request<Body>) -> Response {
        app.oneshot(req).await.unwrap()
    }

    pub fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    pub fn form_request(
        method: &str,
        uri: &str,
        cookie: Option<&str>,
        body: &str,
    ) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    /// Session cookie from a response, in `name=value` form for reuse in
    /// a Cookie header.
    pub fn session_cookie(res: &Response) -> Option<String> {
        res.headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(|v| v.to_string())
    }

    pub async fn login_cookie(app: Router, username: &str, password: &str) -> String {
        let body = format!("username={}&password={}", username, password);
        let res = app
            .oneshot(form_request("POST", "/login", None, &body))
            .await
            .unwrap();
        session_cookie(&res).expect("login should set a session cookie")
    }

    pub async fn body_json(res: Response) -> serde_json::Value {
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    pub async fn body_text(res: Response) -> String {
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }
}
