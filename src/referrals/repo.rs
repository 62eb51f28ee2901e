use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use time::Date;

/// Referral record in the database. `submission_date` is stored as ISO text
/// and set by the server, never by the form.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Referral {
    pub id: i64,
    pub customer_name: String,
    pub referral_code: String,
    pub sales_name: String,
    pub submission_date: Date,
    pub user_id: i64,
}

impl Referral {
    /// Newest first; ids break the tie for rows recorded on the same day.
    pub async fn list_by_owner(db: &SqlitePool, user_id: i64) -> anyhow::Result<Vec<Referral>> {
        let rows = sqlx::query_as::<_, Referral>(
            r#"
            SELECT id, customer_name, referral_code, sales_name, submission_date, user_id
            FROM referrals
            WHERE user_id = ?
            ORDER BY submission_date DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    /// A row under another account answers exactly like a missing row.
    pub async fn find_owned(
        db: &SqlitePool,
        id: i64,
        user_id: i64,
    ) -> anyhow::Result<Option<Referral>> {
        let row = sqlx::query_as::<_, Referral>(
            r#"
            SELECT id, customer_name, referral_code, sales_name, submission_date, user_id
            FROM referrals
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    pub async fn insert(
        db: &SqlitePool,
        user_id: i64,
        customer_name: &str,
        referral_code: &str,
        sales_name: &str,
        submission_date: Date,
    ) -> anyhow::Result<Referral> {
        let row = sqlx::query_as::<_, Referral>(
            r#"
            INSERT INTO referrals (customer_name, referral_code, sales_name, submission_date, user_id)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, customer_name, referral_code, sales_name, submission_date, user_id
            "#,
        )
        .bind(customer_name)
        .bind(referral_code)
        .bind(sales_name)
        .bind(submission_date)
        .bind(user_id)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    /// False when the id does not exist or belongs to another account.
    pub async fn update_owned(
        db: &SqlitePool,
        id: i64,
        user_id: i64,
        customer_name: &str,
        referral_code: &str,
        sales_name: &str,
    ) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE referrals
            SET customer_name = ?, referral_code = ?, sales_name = ?
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(customer_name)
        .bind(referral_code)
        .bind(sales_name)
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_owned(db: &SqlitePool, id: i64, user_id: i64) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM referrals WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::db::test_support::{seed_referral, seed_user, state};

    use super::*;

    #[tokio::test]
    async fn insert_round_trips_the_submission_date() {
        let state = state().await;
        let owner = seed_user(&state.db, "budi", "pw", "user").await;

        let created = Referral::insert(
            &state.db,
            owner,
            "Andi Wijaya",
            "REF-001",
            "Citra",
            date!(2025 - 03 - 15),
        )
        .await
        .unwrap();

        let found = Referral::find_owned(&state.db, created.id, owner)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.customer_name, "Andi Wijaya");
        assert_eq!(found.submission_date, date!(2025 - 03 - 15));
        assert_eq!(found.user_id, owner);
    }

    #[tokio::test]
    async fn list_orders_newest_first_with_id_tiebreak() {
        let state = state().await;
        let owner = seed_user(&state.db, "budi", "pw", "user").await;
        let oldest = seed_referral(&state.db, owner, "A", "R1", "Citra", "2025-03-10").await;
        let first_of_day = seed_referral(&state.db, owner, "B", "R2", "Citra", "2025-03-12").await;
        let second_of_day = seed_referral(&state.db, owner, "C", "R3", "Citra", "2025-03-12").await;

        let rows = Referral::list_by_owner(&state.db, owner).await.unwrap();
        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![second_of_day, first_of_day, oldest]);
    }

    #[tokio::test]
    async fn foreign_rows_answer_like_missing_rows() {
        let state = state().await;
        let owner = seed_user(&state.db, "budi", "pw", "user").await;
        let other = seed_user(&state.db, "sari", "pw", "user").await;
        let theirs = seed_referral(&state.db, other, "A", "R1", "Citra", "2025-03-10").await;

        assert!(Referral::find_owned(&state.db, theirs, owner)
            .await
            .unwrap()
            .is_none());
        assert!(Referral::find_owned(&state.db, 9999, owner)
            .await
            .unwrap()
            .is_none());

        assert!(!Referral::update_owned(&state.db, theirs, owner, "X", "Y", "Z")
            .await
            .unwrap());
        assert!(!Referral::delete_owned(&state.db, theirs, owner).await.unwrap());

        // The foreign row is untouched.
        let row = Referral::find_owned(&state.db, theirs, other)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row.customer_name, "A");
    }

    #[tokio::test]
    async fn update_owned_changes_fields_but_not_the_date() {
        let state = state().await;
        let owner = seed_user(&state.db, "budi", "pw", "user").await;
        let id = seed_referral(&state.db, owner, "A", "R1", "Citra", "2025-03-10").await;

        assert!(
            Referral::update_owned(&state.db, id, owner, "Baru", "R9", "Dewi")
                .await
                .unwrap()
        );

        let row = Referral::find_owned(&state.db, id, owner)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row.customer_name, "Baru");
        assert_eq!(row.referral_code, "R9");
        assert_eq!(row.sales_name, "Dewi");
        assert_eq!(row.submission_date, date!(2025 - 03 - 10));
    }
}
