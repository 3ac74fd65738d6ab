use chrono::{DateTime, Utc};
use serde::Deserialize;
use ts_rs::TS;

use super::entities::AssignmentType;

// 作业列表筛选
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct AssignmentListParams {
    pub subject_id: Option<i64>,
}

// 创建作业
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct CreateAssignmentRequest {
    pub title: String,
    pub description: Option<String>,
    pub subject_id: i64,
    pub assignment_type: AssignmentType,
    pub due_date: DateTime<Utc>,
    pub max_points: f64,
    pub attachment: Option<String>,
    /// 省略时使用当前学年
    pub academic_year_id: Option<i64>,
    #[serde(default)]
    pub is_published: bool,
}

// 修改作业
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct UpdateAssignmentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub subject_id: Option<i64>,
    pub assignment_type: Option<AssignmentType>,
    pub due_date: Option<DateTime<Utc>>,
    pub max_points: Option<f64>,
    pub attachment: Option<String>,
    pub is_published: Option<bool>,
}

// 家长为孩子提交作业
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct SubmitAssignmentRequest {
    pub student_id: i64,
    pub file_path: Option<String>,
    pub text: Option<String>,
}

// 批改
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct GradeSubmissionRequest {
    pub grade: f64,
    pub feedback: Option<String>,
}
