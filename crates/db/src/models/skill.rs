//! Skill entity model and DTOs.

use serde::{Deserialize, Serialize};
use skilltrack_core::error::CoreError;
use skilltrack_core::ledger::SkillTime;
use skilltrack_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `skills` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Skill {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub hours: i32,
    pub minutes: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Skill {
    /// Accumulated time as a ledger value.
    pub fn time(&self) -> Result<SkillTime, CoreError> {
        SkillTime::new(self.hours, self.minutes)
    }
}

/// Skill as returned to clients, with derived progress fields.
#[derive(Debug, Clone, Serialize)]
pub struct SkillResponse {
    pub id: DbId,
    pub name: String,
    pub hours: i32,
    pub minutes: i32,
    /// Percentage of the 10,000-hour ceiling, capped at 100.
    pub progress: f64,
    /// e.g. `"12h 5m"`.
    pub total_time: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<Skill> for SkillResponse {
    type Error = CoreError;

    fn try_from(skill: Skill) -> Result<Self, Self::Error> {
        let time = skill.time()?;
        Ok(Self {
            id: skill.id,
            name: skill.name,
            hours: time.hours(),
            minutes: time.minutes(),
            progress: time.progress(),
            total_time: time.total_time(),
            created_at: skill.created_at,
            updated_at: skill.updated_at,
        })
    }
}

/// DTO for creating a skill.
#[derive(Debug, Deserialize)]
pub struct CreateSkill {
    pub name: String,
}

/// DTO for renaming a skill.
#[derive(Debug, Deserialize)]
pub struct RenameSkill {
    pub name: String,
}

/// DTO for `add-time`. `minutes` may be omitted.
#[derive(Debug, Deserialize)]
pub struct AddTime {
    pub hours: i32,
    #[serde(default)]
    pub minutes: i32,
}

/// DTO for `remove-time`. Only whole hours can be removed.
#[derive(Debug, Deserialize)]
pub struct RemoveTime {
    pub hours: i32,
}
