//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - `Deserialize`/plain DTOs for inserts where the table takes input

pub mod session;
pub mod skill;
pub mod skill_history;
pub mod user;
