//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` create/update DTOs where the engine writes the table
//!
//! Serialized field names are camelCase to match the external API.

pub mod class_subject;
pub mod exam;
pub mod exam_result;
pub mod grading_scheme;
pub mod student;
