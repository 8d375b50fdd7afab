//! Domain logic for the grade computation and result aggregation engine.
//!
//! Everything in this crate is pure: no database access, no I/O. The
//! `campus-db` and `campus-results` crates feed it rows and persist its output.

pub mod entry_list;
pub mod error;
pub mod grading;
pub mod input;
pub mod marks;
pub mod result_card;
pub mod types;
