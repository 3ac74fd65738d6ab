use serde::Serialize;
use ts_rs::TS;

use super::entities::Student;
use crate::models::assessments::entities::AssessmentResultDetail;
use crate::models::classes::entities::SchoolClass;

// 学生档案（教师/管理员查看）
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct StudentProfileResponse {
    pub student: Student,
    pub class: SchoolClass,
    pub results: Vec<AssessmentResultDetail>,
}
