//! Repository for the `skills` table.

use skilltrack_core::ledger::SkillTime;
use skilltrack_core::types::DbId;
use sqlx::PgPool;

use super::PgTx;
use crate::models::skill::Skill;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, name, hours, minutes, created_at, updated_at";

/// Provides CRUD operations for skills.
///
/// Ownership is not checked here; handlers load the row and run it through
/// `skilltrack_core::access::ensure_owner` first.
pub struct SkillRepo;

impl SkillRepo {
    /// Insert a skill with zero accumulated time.
    pub async fn create(
        tx: &mut PgTx<'_>,
        user_id: DbId,
        name: &str,
    ) -> Result<Skill, sqlx::Error> {
        let query = format!(
            "INSERT INTO skills (user_id, name, hours, minutes)
             VALUES ($1, $2, 0, 0)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Skill>(&query)
            .bind(user_id)
            .bind(name)
            .fetch_one(&mut **tx)
            .await
    }

    /// Find a skill by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Skill>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM skills WHERE id = $1");
        sqlx::query_as::<_, Skill>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a skill and lock its row until the transaction ends.
    pub async fn find_by_id_for_update(
        tx: &mut PgTx<'_>,
        id: DbId,
    ) -> Result<Option<Skill>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM skills WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Skill>(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// List a user's skills in creation order.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Skill>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM skills
             WHERE user_id = $1
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Skill>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Names of a user's skills, read inside the caller's transaction.
    ///
    /// `except_id` leaves one skill out, e.g. the one being renamed.
    pub async fn list_names_by_user(
        tx: &mut PgTx<'_>,
        user_id: DbId,
        except_id: Option<DbId>,
    ) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM skills
             WHERE user_id = $1 AND ($2::BIGINT IS NULL OR id <> $2)
             ORDER BY id",
        )
        .bind(user_id)
        .bind(except_id)
        .fetch_all(&mut **tx)
        .await?;
        Ok(rows.into_iter().map(|(name,)| name).collect())
    }

    /// Overwrite the accumulated time, returning the updated row.
    pub async fn set_time(
        tx: &mut PgTx<'_>,
        id: DbId,
        time: SkillTime,
    ) -> Result<Skill, sqlx::Error> {
        let query = format!(
            "UPDATE skills SET hours = $2, minutes = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Skill>(&query)
            .bind(id)
            .bind(time.hours())
            .bind(time.minutes())
            .fetch_one(&mut **tx)
            .await
    }

    /// Replace the skill's name, returning the updated row.
    pub async fn set_name(tx: &mut PgTx<'_>, id: DbId, name: &str) -> Result<Skill, sqlx::Error> {
        let query = format!(
            "UPDATE skills SET name = $2
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Skill>(&query)
            .bind(id)
            .bind(name)
            .fetch_one(&mut **tx)
            .await
    }

    /// Delete a skill by ID. Its history goes with it (`ON DELETE CASCADE`).
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM skills WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
