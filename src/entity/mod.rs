//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。

use chrono::{DateTime, Utc};

pub mod prelude;

pub mod academic_years;
pub mod assessment_results;
pub mod assignment_submissions;
pub mod current_academic_year;
pub mod report_comments;
pub mod school_classes;
pub mod student_contacts;
pub mod students;
pub mod subject_assignments;
pub mod subjects;
pub mod users;

/// 秒级时间戳转换为 UTC 时间
pub(crate) fn from_timestamp(ts: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()
}
