//! Handlers for a skill's history views: monthly totals and one month's
//! records.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use skilltrack_core::history::{daily_detail, monthly_summary, MonthKey, MonthSummary};
use skilltrack_core::types::DbId;
use skilltrack_db::models::skill::SkillResponse;
use skilltrack_db::models::skill_history::SkillHistory;
use skilltrack_db::repositories::SkillHistoryRepo;

use crate::error::AppResult;
use crate::handlers::skill::ensure_owned_skill;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Monthly totals for one skill, oldest month first.
#[derive(Debug, Serialize)]
pub struct HistoryMonthsResponse {
    pub skill: SkillResponse,
    pub months: Vec<MonthSummary>,
}

/// Records of one month, newest first.
#[derive(Debug, Serialize)]
pub struct HistoryMonthResponse {
    pub skill: SkillResponse,
    pub month: MonthKey,
    pub label: String,
    pub records: Vec<SkillHistory>,
}

/// GET /api/v1/skills/{id}/history
pub async fn list_months(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<HistoryMonthsResponse>>> {
    let skill = ensure_owned_skill(&state, &auth.caller(), id).await?;
    let records = SkillHistoryRepo::list_by_skill(&state.pool, skill.id).await?;

    Ok(Json(DataResponse {
        data: HistoryMonthsResponse {
            months: monthly_summary(&records),
            skill: SkillResponse::try_from(skill)?,
        },
    }))
}

/// GET /api/v1/skills/{id}/history/{month}
///
/// `month` is a `YYYY-MM` key as returned by [`list_months`].
pub async fn get_month(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((id, month)): Path<(DbId, String)>,
) -> AppResult<Json<DataResponse<HistoryMonthResponse>>> {
    let month: MonthKey = month.parse()?;

    let skill = ensure_owned_skill(&state, &auth.caller(), id).await?;
    let records = SkillHistoryRepo::list_by_skill(&state.pool, skill.id).await?;

    Ok(Json(DataResponse {
        data: HistoryMonthResponse {
            skill: SkillResponse::try_from(skill)?,
            label: month.label(),
            records: daily_detail(records, month),
            month,
        },
    }))
}
