//! Repository for the append-only `skill_history` table.

use skilltrack_core::types::DbId;
use sqlx::PgPool;

use super::PgTx;
use crate::models::skill_history::{CreateSkillHistory, SkillHistory};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, skill_id, action, hours_changed, minutes_changed, \
                       old_name, new_name, created_at";

/// Appends and reads skill history. There is no update or delete.
pub struct SkillHistoryRepo;

impl SkillHistoryRepo {
    /// Append one record inside the transaction that mutated the skill.
    pub async fn append(
        tx: &mut PgTx<'_>,
        input: &CreateSkillHistory<'_>,
    ) -> Result<SkillHistory, sqlx::Error> {
        let query = format!(
            "INSERT INTO skill_history
                (skill_id, action, hours_changed, minutes_changed, old_name, new_name)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SkillHistory>(&query)
            .bind(input.skill_id)
            .bind(input.entry.action.as_str())
            .bind(input.entry.hours_changed)
            .bind(input.entry.minutes_changed)
            .bind(&input.entry.old_name)
            .bind(&input.entry.new_name)
            .fetch_one(&mut **tx)
            .await
    }

    /// Full history of a skill, oldest first.
    pub async fn list_by_skill(
        pool: &PgPool,
        skill_id: DbId,
    ) -> Result<Vec<SkillHistory>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM skill_history
             WHERE skill_id = $1
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, SkillHistory>(&query)
            .bind(skill_id)
            .fetch_all(pool)
            .await
    }
}
