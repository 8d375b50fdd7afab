pub mod exam_results;
pub mod grading_schemes;
