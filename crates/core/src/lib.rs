//! Domain logic for the skill tracker.
//!
//! Everything in this crate is pure: no I/O, no database access. The `db`
//! crate persists what these functions compute and the `api` crate wires
//! them to HTTP.

pub mod access;
pub mod error;
pub mod history;
pub mod ledger;
pub mod registry;
pub mod types;
