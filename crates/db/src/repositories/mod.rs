//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&PgPool` as the first argument, or a `&mut Transaction` when the call
//! must join a caller-managed transaction.

pub mod session_repo;
pub mod skill_history_repo;
pub mod skill_repo;
pub mod user_repo;

pub use session_repo::SessionRepo;
pub use skill_history_repo::SkillHistoryRepo;
pub use skill_repo::SkillRepo;
pub use user_repo::UserRepo;

/// Transaction handle taken by repository methods that join a transaction.
pub type PgTx<'c> = sqlx::Transaction<'c, sqlx::Postgres>;
