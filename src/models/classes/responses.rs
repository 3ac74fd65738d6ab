use serde::Serialize;
use ts_rs::TS;

use super::entities::SchoolClass;
use crate::models::students::entities::Student;

// 班级及学生人数
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "class.ts")]
pub struct ClassSummary {
    #[serde(flatten)]
    #[ts(flatten)]
    pub class: SchoolClass,
    pub student_count: u64,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "class.ts")]
pub struct ClassListResponse {
    pub items: Vec<ClassSummary>,
}

// 班级花名册
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "class.ts")]
pub struct ClassDetailResponse {
    pub class: SchoolClass,
    pub students: Vec<Student>,
}
