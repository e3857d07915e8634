//! Handlers for the `/skills` resource: the skill registry and the time
//! ledger.
//!
//! Every handler resolves the caller through [`AuthUser`] and checks
//! ownership with [`ensure_owner`] before touching a skill. Ledger mutations
//! lock the skill row and write the new total plus its history record in one
//! transaction.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use skilltrack_core::access::{ensure_owner, Caller};
use skilltrack_core::error::CoreError;
use skilltrack_core::ledger::{self, LedgerChange, SkillTime};
use skilltrack_core::registry;
use skilltrack_core::types::DbId;
use skilltrack_db::models::skill::{
    AddTime, CreateSkill, RemoveTime, RenameSkill, Skill, SkillResponse,
};
use skilltrack_db::models::skill_history::{CreateSkillHistory, SkillHistory};
use skilltrack_db::repositories::{SkillHistoryRepo, SkillRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Result of a ledger mutation: the updated skill and the record appended.
#[derive(Debug, Serialize)]
pub struct LedgerResponse {
    pub skill: SkillResponse,
    pub entry: SkillHistory,
}

fn skill_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Skill", id })
}

/// Load a skill the caller owns, or fail with `NotFound`.
pub(crate) async fn ensure_owned_skill(
    state: &AppState,
    caller: &Caller,
    id: DbId,
) -> AppResult<Skill> {
    let skill = SkillRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| skill_not_found(id))?;
    ensure_owner(caller, skill.user_id, skill.id)?;
    Ok(skill)
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// GET /api/v1/skills
pub async fn list_skills(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<SkillResponse>>>> {
    let skills = SkillRepo::list_by_user(&state.pool, auth.user_id)
        .await?
        .into_iter()
        .map(SkillResponse::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(DataResponse { data: skills }))
}

/// POST /api/v1/skills
///
/// The owner's user row is locked while the limit and name checks run, so
/// concurrent creations cannot exceed the limit.
pub async fn create_skill(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateSkill>,
) -> AppResult<(StatusCode, Json<DataResponse<SkillResponse>>)> {
    let caller = auth.caller();
    let mut tx = state.pool.begin().await?;

    if !UserRepo::lock(&mut tx, caller.user_id).await? {
        return Err(AppError::Core(CoreError::Unauthorized(
            "User no longer exists".into(),
        )));
    }

    let existing = SkillRepo::list_names_by_user(&mut tx, caller.user_id, None).await?;
    let existing: Vec<&str> = existing.iter().map(String::as_str).collect();
    let name = registry::validate_new_skill(&existing, &input.name)?;

    let skill = SkillRepo::create(&mut tx, caller.user_id, &name).await?;
    tx.commit().await?;

    tracing::info!(
        user_id = caller.user_id,
        skill_id = skill.id,
        name = %skill.name,
        "Skill created",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: SkillResponse::try_from(skill)?,
        }),
    ))
}

/// GET /api/v1/skills/{id}
pub async fn get_skill(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<SkillResponse>>> {
    let skill = ensure_owned_skill(&state, &auth.caller(), id).await?;
    Ok(Json(DataResponse {
        data: SkillResponse::try_from(skill)?,
    }))
}

/// PUT /api/v1/skills/{id}
///
/// Rename a skill. A changed name appends a `renamed` history record.
pub async fn rename_skill(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<RenameSkill>,
) -> AppResult<Json<DataResponse<SkillResponse>>> {
    let caller = auth.caller();
    let mut tx = state.pool.begin().await?;

    // Same lock order as create_skill: user row first, then the skill.
    UserRepo::lock(&mut tx, caller.user_id).await?;
    let skill = SkillRepo::find_by_id_for_update(&mut tx, id)
        .await?
        .ok_or_else(|| skill_not_found(id))?;
    ensure_owner(&caller, skill.user_id, skill.id)?;

    let siblings =
        SkillRepo::list_names_by_user(&mut tx, caller.user_id, Some(skill.id)).await?;
    let renamed = ledger::rename(
        &skill.name,
        &input.name,
        siblings.iter().map(String::as_str),
    )?;

    let Some(entry) = renamed.entry else {
        return Ok(Json(DataResponse {
            data: SkillResponse::try_from(skill)?,
        }));
    };

    let updated = SkillRepo::set_name(&mut tx, skill.id, &renamed.name).await?;
    SkillHistoryRepo::append(
        &mut tx,
        &CreateSkillHistory {
            skill_id: skill.id,
            entry: &entry,
        },
    )
    .await?;
    tx.commit().await?;

    tracing::info!(
        user_id = caller.user_id,
        skill_id = updated.id,
        old_name = %skill.name,
        new_name = %updated.name,
        "Skill renamed",
    );

    Ok(Json(DataResponse {
        data: SkillResponse::try_from(updated)?,
    }))
}

/// DELETE /api/v1/skills/{id}
///
/// Deletes the skill and its history. Returns 204, or 404 when the caller
/// does not own a skill with this id.
pub async fn delete_skill(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let skill = ensure_owned_skill(&state, &auth.caller(), id).await?;

    if !SkillRepo::delete(&state.pool, skill.id).await? {
        return Err(skill_not_found(id));
    }

    tracing::info!(user_id = auth.user_id, skill_id = id, name = %skill.name, "Skill deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// POST /api/v1/skills/{id}/add-time
pub async fn add_time(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<AddTime>,
) -> AppResult<Json<DataResponse<LedgerResponse>>> {
    ledger::check_amount(input.hours, input.minutes)?;

    let result = apply_time_change(&state, &auth.caller(), id, |current| {
        ledger::add_time(current, input.hours, input.minutes)
    })
    .await?;

    tracing::info!(
        user_id = auth.user_id,
        skill_id = id,
        hours = input.hours,
        minutes = input.minutes,
        total = %result.skill.total_time,
        "Time added",
    );

    Ok(Json(DataResponse { data: result }))
}

/// POST /api/v1/skills/{id}/remove-time
///
/// Removes whole hours only; accumulated minutes are kept.
pub async fn remove_time(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<RemoveTime>,
) -> AppResult<Json<DataResponse<LedgerResponse>>> {
    ledger::check_amount(input.hours, 0)?;

    let result = apply_time_change(&state, &auth.caller(), id, |current| {
        ledger::remove_time(current, input.hours)
    })
    .await?;

    tracing::info!(
        user_id = auth.user_id,
        skill_id = id,
        hours = input.hours,
        total = %result.skill.total_time,
        "Time removed",
    );

    Ok(Json(DataResponse { data: result }))
}

/// Lock the skill, apply `change` to its time, and persist the new total
/// together with the history record.
async fn apply_time_change<F>(
    state: &AppState,
    caller: &Caller,
    id: DbId,
    change: F,
) -> AppResult<LedgerResponse>
where
    F: FnOnce(SkillTime) -> Result<LedgerChange, CoreError>,
{
    let mut tx = state.pool.begin().await?;

    let skill = SkillRepo::find_by_id_for_update(&mut tx, id)
        .await?
        .ok_or_else(|| skill_not_found(id))?;
    ensure_owner(caller, skill.user_id, skill.id)?;

    let LedgerChange { time, entry } = change(skill.time()?)?;

    let updated = SkillRepo::set_time(&mut tx, skill.id, time).await?;
    let record = SkillHistoryRepo::append(
        &mut tx,
        &CreateSkillHistory {
            skill_id: skill.id,
            entry: &entry,
        },
    )
    .await?;
    tx.commit().await?;

    Ok(LedgerResponse {
        skill: SkillResponse::try_from(updated)?,
        entry: record,
    })
}
