use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

string_enum! {
    /// 作业类型
    #[ts(export, export_to = "assignment.ts")]
    pub enum AssignmentType("assignment type") {
        Homework => "homework",
        Classwork => "classwork",
        Project => "project",
        Quiz => "quiz",
        Test => "test",
    }
}

// 科目作业
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct SubjectAssignment {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub subject_id: i64,
    pub assignment_type: AssignmentType,
    pub due_date: DateTime<Utc>,
    pub max_points: f64,
    /// 附件上传路径，内容不做解析
    pub attachment: Option<String>,
    pub created_by: i64,
    pub academic_year_id: i64,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SubjectAssignment {
    /// 作者总是可见，其他人仅在发布后可见
    pub fn is_visible_to(&self, user_id: i64) -> bool {
        self.is_published || self.created_by == user_id
    }
}

// 作业提交
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct AssignmentSubmission {
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    pub submitted_by: i64,
    pub file_path: Option<String>,
    pub text: Option<String>,
    pub grade: Option<f64>,
    pub feedback: Option<String>,
    pub is_graded: bool,
    pub graded_by: Option<i64>,
    pub graded_at: Option<DateTime<Utc>>,
    pub submitted_at: DateTime<Utc>,
}

/// 提交状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "assignment.ts")]
pub enum SubmissionState {
    NoSubmission,
    Submitted,
    Graded,
}

impl SubmissionState {
    pub fn of(submission: Option<&AssignmentSubmission>) -> Self {
        match submission {
            None => SubmissionState::NoSubmission,
            Some(s) if s.is_graded => SubmissionState::Graded,
            Some(_) => SubmissionState::Submitted,
        }
    }
}
