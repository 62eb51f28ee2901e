use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

/// Account role, stored as lowercase text. Only two values exist; the table
/// carries a CHECK constraint to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
}

/// Row shape for the admin user list; the hash stays out of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
    pub role: Role,
}

impl User {
    /// Find a user by username.
    pub async fn find_by_username(db: &SqlitePool, username: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, role
            FROM users
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Create a new user with hashed password.
    pub async fn create(
        db: &SqlitePool,
        username: &str,
        password_hash: &str,
        role: Role,
    ) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash, role)
            VALUES (?, ?, ?)
            RETURNING id, username, password_hash, role
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(role)
        .fetch_one(db)
        .await?;
        Ok(user)
    }

    /// Replace a user's password hash. False when the id does not exist.
    pub async fn update_password(
        db: &SqlitePool,
        id: i64,
        password_hash: &str,
    ) -> anyhow::Result<bool> {
        let result = sqlx::query("UPDATE users SET password_hash = ? WHERE id = ?")
            .bind(password_hash)
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn list_summaries(db: &SqlitePool) -> anyhow::Result<Vec<UserSummary>> {
        let rows = sqlx::query_as::<_, UserSummary>(
            r#"
            SELECT id, username, role
            FROM users
            ORDER BY id ASC
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use crate::db::test_support::{seed_user, state};

    use super::*;

    #[tokio::test]
    async fn create_and_find_roundtrip() {
        let state = state().await;

        let created = User::create(&state.db, "budi", "hash-value", Role::User)
            .await
            .unwrap();
        assert_eq!(created.username, "budi");
        assert_eq!(created.role, Role::User);

        let found = User::find_by_username(&state.db, "budi")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.password_hash, "hash-value");

        assert!(User::find_by_username(&state.db, "tidakada")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn role_column_round_trips_both_variants() {
        let state = state().await;
        User::create(&state.db, "kepala", "h", Role::Admin)
            .await
            .unwrap();
        User::create(&state.db, "budi", "h", Role::User).await.unwrap();

        let kepala = User::find_by_username(&state.db, "kepala")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(kepala.role, Role::Admin);
        let budi = User::find_by_username(&state.db, "budi")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(budi.role, Role::User);
    }

    #[tokio::test]
    async fn update_password_reports_missing_ids() {
        let state = state().await;
        let id = seed_user(&state.db, "budi", "lama", "user").await;

        assert!(User::update_password(&state.db, id, "new-hash").await.unwrap());
        let row = User::find_by_username(&state.db, "budi")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row.password_hash, "new-hash");

        assert!(!User::update_password(&state.db, 9999, "new-hash").await.unwrap());
    }

    #[tokio::test]
    async fn list_summaries_in_insertion_order() {
        let state = state().await;
        seed_user(&state.db, "kepala", "pw", "admin").await;
        seed_user(&state.db, "budi", "pw", "user").await;
        seed_user(&state.db, "sari", "pw", "user").await;

        let rows = User::list_summaries(&state.db).await.unwrap();
        let names: Vec<&str> = rows.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["kepala", "budi", "sari"]);
        assert_eq!(rows[0].role, Role::Admin);
    }
}
