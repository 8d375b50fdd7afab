//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod class_subject_repo;
pub mod exam_repo;
pub mod exam_result_repo;
pub mod grading_scheme_repo;
pub mod student_repo;

pub use class_subject_repo::ClassSubjectRepo;
pub use exam_repo::ExamRepo;
pub use exam_result_repo::ExamResultRepo;
pub use grading_scheme_repo::GradingSchemeRepo;
pub use student_repo::StudentRepo;
