//! Grade computation and result aggregation engine.
//!
//! Entry points that span several repositories and apply the engine's
//! validation policy:
//!
//! - [`marks::bulk_upsert`]: transactional bulk mark ingestion
//! - [`result_card::get_student_result_card`]: per-student report card
//! - [`entry_list::list_entries`]: roster-with-marks view for bulk entry
//! - [`schemes`]: validated grading scheme writes

pub mod entry_list;
pub mod error;
pub mod marks;
pub mod result_card;
pub mod schemes;

pub use error::{ResultsError, ResultsResult};
