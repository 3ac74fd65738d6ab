pub mod extractor;
pub mod jwt;
pub mod parameter_error_handler;
pub mod sql;
pub mod validate;

pub use extractor::{
    SafeAcademicYearIdI64, SafeAssignmentIdI64, SafeClassIdI64, SafeContactIdI64,
    SafeResultIdI64, SafeStudentIdI64, SafeSubjectIdI64, SafeSubmissionIdI64,
};
pub use parameter_error_handler::json_error_handler;
pub use parameter_error_handler::query_error_handler;
pub use sql::escape_like_pattern;
