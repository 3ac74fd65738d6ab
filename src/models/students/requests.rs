use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

// 向班级添加学生
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct CreateStudentRequest {
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub parent_id: Option<i64>,
}
