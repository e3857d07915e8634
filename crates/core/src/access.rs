//! Caller identity and the ownership predicate shared by every skill operation.

use crate::error::CoreError;
use crate::types::DbId;

/// The resolved identity of the user making a request.
///
/// Built once per request by the session gate and passed explicitly into
/// every operation that reads or mutates user-owned data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub user_id: DbId,
}

impl Caller {
    pub fn new(user_id: DbId) -> Self {
        Self { user_id }
    }
}

/// Succeeds only when `caller` owns the skill identified by `skill_id`.
///
/// A mismatch is reported as `NotFound`, exactly like a missing skill.
pub fn ensure_owner(caller: &Caller, owner_id: DbId, skill_id: DbId) -> Result<(), CoreError> {
    if caller.user_id == owner_id {
        Ok(())
    } else {
        Err(CoreError::NotFound {
            entity: "Skill",
            id: skill_id,
        })
    }
}
