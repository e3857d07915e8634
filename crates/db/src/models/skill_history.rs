//! Skill history model: the append-only log of ledger mutations.

use serde::Serialize;
use skilltrack_core::history::HistoryEntry;
use skilltrack_core::ledger::{HistoryAction, LedgerEntry};
use skilltrack_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `skill_history` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SkillHistory {
    pub id: DbId,
    pub skill_id: DbId,
    #[sqlx(try_from = "String")]
    pub action: HistoryAction,
    pub hours_changed: i32,
    pub minutes_changed: i32,
    pub old_name: Option<String>,
    pub new_name: Option<String>,
    pub created_at: Timestamp,
}

impl HistoryEntry for SkillHistory {
    fn id(&self) -> DbId {
        self.id
    }

    fn action(&self) -> HistoryAction {
        self.action
    }

    fn hours_changed(&self) -> i32 {
        self.hours_changed
    }

    fn minutes_changed(&self) -> i32 {
        self.minutes_changed
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

/// DTO for appending one record to a skill's history.
#[derive(Debug)]
pub struct CreateSkillHistory<'a> {
    pub skill_id: DbId,
    pub entry: &'a LedgerEntry,
}
