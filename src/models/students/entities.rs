use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 学生
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct Student {
    pub id: i64,
    /// 学校分配的学号，全局唯一
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    pub class_id: i64,
    pub date_of_birth: NaiveDate,
    /// 关联的家长账号
    pub parent_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
