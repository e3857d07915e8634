//! Monthly aggregation and per-month detail over a skill's history log.
//!
//! Both views are recomputed from the log on every call; there is no stored
//! aggregate state.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};

use crate::error::CoreError;
use crate::ledger::HistoryAction;
use crate::types::{DbId, Timestamp};

/// Read access to one persisted history record.
pub trait HistoryEntry {
    fn id(&self) -> DbId;
    fn action(&self) -> HistoryAction;
    fn hours_changed(&self) -> i32;
    fn minutes_changed(&self) -> i32;
    fn created_at(&self) -> Timestamp;
}

// ---------------------------------------------------------------------------
// Month key
// ---------------------------------------------------------------------------

/// A calendar month, written as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Result<Self, CoreError> {
        if !(1..=12).contains(&month) || !(0..=9999).contains(&year) {
            return Err(CoreError::Validation(format!(
                "Invalid month {year:04}-{month:02}"
            )));
        }
        Ok(Self { year, month })
    }

    /// The month a timestamp falls in (UTC).
    pub fn of(ts: &Timestamp) -> Self {
        Self {
            year: ts.year(),
            month: ts.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Display label such as `"March 2024"`.
    pub fn label(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|d| d.format("%B %Y").to_string())
            .unwrap_or_else(|| self.to_string())
    }
}

impl FromStr for MonthKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid =
            || CoreError::Validation(format!("Invalid month key '{s}', expected YYYY-MM"));

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4
            || month.len() != 2
            || !year.bytes().all(|b| b.is_ascii_digit())
            || !month.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ---------------------------------------------------------------------------
// Monthly summary
// ---------------------------------------------------------------------------

/// Totals for one calendar month of a skill's history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthSummary {
    pub key: MonthKey,
    pub label: String,
    pub added_hours: i64,
    pub added_minutes: i64,
    pub removed_hours: i64,
    pub removed_minutes: i64,
    /// Number of history records in the month, any action.
    pub total: i64,
}

impl MonthSummary {
    fn empty(key: MonthKey) -> Self {
        Self {
            key,
            label: key.label(),
            added_hours: 0,
            added_minutes: 0,
            removed_hours: 0,
            removed_minutes: 0,
            total: 0,
        }
    }
}

/// Group records by month, ascending, summing added and removed time
/// separately. Renames count towards `total` only.
pub fn monthly_summary<E: HistoryEntry>(records: &[E]) -> Vec<MonthSummary> {
    let mut months: BTreeMap<MonthKey, MonthSummary> = BTreeMap::new();

    for record in records {
        let key = MonthKey::of(&record.created_at());
        let summary = months
            .entry(key)
            .or_insert_with(|| MonthSummary::empty(key));

        summary.total += 1;
        match record.action() {
            HistoryAction::Added => {
                summary.added_hours += i64::from(record.hours_changed());
                summary.added_minutes += i64::from(record.minutes_changed());
            }
            HistoryAction::Removed => {
                summary.removed_hours += i64::from(record.hours_changed());
                summary.removed_minutes += i64::from(record.minutes_changed());
            }
            HistoryAction::Renamed => {}
        }
    }

    months.into_values().collect()
}

/// Records that fall in `month`, newest first.
pub fn daily_detail<E, I>(records: I, month: MonthKey) -> Vec<E>
where
    E: HistoryEntry,
    I: IntoIterator<Item = E>,
{
    let mut selected: Vec<E> = records
        .into_iter()
        .filter(|r| MonthKey::of(&r.created_at()) == month)
        .collect();
    // Ids break ties between records written in the same instant.
    selected.sort_by(|a, b| {
        b.created_at()
            .cmp(&a.created_at())
            .then_with(|| b.id().cmp(&a.id()))
    });
    selected
}
