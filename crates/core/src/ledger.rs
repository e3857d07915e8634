//! Skill time ledger: normalized time totals and the history entries that
//! every mutation appends.
//!
//! Functions here compute the new state of a skill and the entry to log; the
//! caller persists both in one transaction.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::registry::{ensure_unique_name, normalize_name};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const MINUTES_PER_HOUR: i64 = 60;

/// Hours of practice that correspond to 100% progress.
pub const PROGRESS_CEILING_HOURS: i64 = 10_000;

// ---------------------------------------------------------------------------
// Skill time
// ---------------------------------------------------------------------------

/// Cumulative practiced time, always normalized so `0 <= minutes < 60`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SkillTime {
    hours: i32,
    minutes: i32,
}

impl SkillTime {
    pub const ZERO: SkillTime = SkillTime {
        hours: 0,
        minutes: 0,
    };

    /// Build a time value from stored columns, normalizing minute overflow.
    pub fn new(hours: i32, minutes: i32) -> Result<Self, CoreError> {
        if hours < 0 || minutes < 0 {
            return Err(CoreError::InvalidAmount(format!(
                "time must not be negative (got {hours}h {minutes}m)"
            )));
        }
        Self::from_total_minutes(i64::from(hours) * MINUTES_PER_HOUR + i64::from(minutes))
    }

    fn from_total_minutes(total: i64) -> Result<Self, CoreError> {
        let hours = i32::try_from(total / MINUTES_PER_HOUR)
            .map_err(|_| CoreError::InvalidAmount("accumulated time is too large".into()))?;
        let minutes = (total % MINUTES_PER_HOUR) as i32;
        Ok(Self { hours, minutes })
    }

    pub fn hours(&self) -> i32 {
        self.hours
    }

    pub fn minutes(&self) -> i32 {
        self.minutes
    }

    pub fn total_minutes(&self) -> i64 {
        i64::from(self.hours) * MINUTES_PER_HOUR + i64::from(self.minutes)
    }

    /// Percentage of the 10,000-hour ceiling, capped at 100.
    ///
    /// Cosmetic only: accumulated time itself is not capped.
    pub fn progress(&self) -> f64 {
        let ceiling = (PROGRESS_CEILING_HOURS * MINUTES_PER_HOUR) as f64;
        (self.total_minutes() as f64 / ceiling * 100.0).min(100.0)
    }

    /// Human-readable total, e.g. `"12h 5m"`.
    pub fn total_time(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SkillTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h {}m", self.hours, self.minutes)
    }
}

// ---------------------------------------------------------------------------
// History actions and entries
// ---------------------------------------------------------------------------

/// Kind of mutation recorded in a skill's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryAction {
    Added,
    Removed,
    Renamed,
}

impl HistoryAction {
    /// The value stored in the `skill_history.action` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Removed => "removed",
            Self::Renamed => "renamed",
        }
    }
}

impl FromStr for HistoryAction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "added" => Ok(Self::Added),
            "removed" => Ok(Self::Removed),
            "renamed" => Ok(Self::Renamed),
            other => Err(CoreError::Internal(format!(
                "unknown history action '{other}'"
            ))),
        }
    }
}

impl TryFrom<String> for HistoryAction {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for HistoryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A history entry waiting to be appended to the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub action: HistoryAction,
    pub hours_changed: i32,
    pub minutes_changed: i32,
    pub old_name: Option<String>,
    pub new_name: Option<String>,
}

/// Result of a time adjustment: the new skill time plus the entry to log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerChange {
    pub time: SkillTime,
    pub entry: LedgerEntry,
}

/// Result of a rename. `entry` is `None` when the name did not change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renamed {
    pub name: String,
    pub entry: Option<LedgerEntry>,
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

fn ensure_non_negative(field: &str, value: i32) -> Result<(), CoreError> {
    if value < 0 {
        return Err(CoreError::InvalidAmount(format!(
            "{field} must not be negative (got {value})"
        )));
    }
    Ok(())
}

/// Reject negative hour or minute deltas.
pub fn check_amount(hours: i32, minutes: i32) -> Result<(), CoreError> {
    ensure_non_negative("hours", hours)?;
    ensure_non_negative("minutes", minutes)
}

/// Add practiced time. Minute overflow carries into hours.
///
/// The entry records the delta exactly as supplied, so `add_time(t, 1, 90)`
/// logs `1h 90m` while moving the total by `2h 30m`.
pub fn add_time(current: SkillTime, hours: i32, minutes: i32) -> Result<LedgerChange, CoreError> {
    check_amount(hours, minutes)?;

    let delta = i64::from(hours) * MINUTES_PER_HOUR + i64::from(minutes);
    let time = SkillTime::from_total_minutes(current.total_minutes() + delta)?;

    Ok(LedgerChange {
        time,
        entry: LedgerEntry {
            action: HistoryAction::Added,
            hours_changed: hours,
            minutes_changed: minutes,
            old_name: None,
            new_name: None,
        },
    })
}

/// Remove whole hours, flooring at zero. Minutes are left untouched.
pub fn remove_time(current: SkillTime, hours: i32) -> Result<LedgerChange, CoreError> {
    ensure_non_negative("hours", hours)?;

    let time = SkillTime {
        hours: (current.hours - hours).max(0),
        minutes: current.minutes,
    };

    Ok(LedgerChange {
        time,
        entry: LedgerEntry {
            action: HistoryAction::Removed,
            hours_changed: hours,
            minutes_changed: 0,
            old_name: None,
            new_name: None,
        },
    })
}

/// Rename a skill. `siblings` are the names of the owner's other skills.
pub fn rename<'a, I>(current_name: &str, new_name: &str, siblings: I) -> Result<Renamed, CoreError>
where
    I: IntoIterator<Item = &'a str>,
{
    let name = normalize_name(new_name)?;
    if name == current_name {
        return Ok(Renamed { name, entry: None });
    }
    ensure_unique_name(siblings, &name)?;

    Ok(Renamed {
        entry: Some(LedgerEntry {
            action: HistoryAction::Renamed,
            hours_changed: 0,
            minutes_changed: 0,
            old_name: Some(current_name.to_string()),
            new_name: Some(name.clone()),
        }),
        name,
    })
}
