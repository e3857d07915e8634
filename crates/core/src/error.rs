use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Skill limit reached: at most {limit} skills per user")]
    SkillLimitReached { limit: usize },

    #[error("A skill named '{name}' already exists")]
    DuplicateSkillName { name: String },

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
