use serde::Serialize;
use ts_rs::TS;

use super::entities::{AssignmentSubmission, AssignmentType, SubjectAssignment, SubmissionState};
use crate::models::academics::entities::{AcademicYear, Subject};
use crate::models::students::entities::Student;

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct AssignmentListResponse {
    pub items: Vec<SubjectAssignment>,
}

// 作业详情：作者可见全部提交，家长只见自己孩子的提交
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct AssignmentDetailResponse {
    pub assignment: SubjectAssignment,
    pub submissions: Vec<AssignmentSubmission>,
}

// 创建作业表单上下文
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct AssignmentFormContext {
    pub subjects: Vec<Subject>,
    pub assignment_types: Vec<AssignmentType>,
    pub current_year: Option<AcademicYear>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct ChildSubmissionState {
    pub student: Student,
    pub state: SubmissionState,
    pub submission: Option<AssignmentSubmission>,
}

// 提交表单上下文
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct SubmitFormContext {
    pub assignment: SubjectAssignment,
    pub children: Vec<ChildSubmissionState>,
}

// 批改表单上下文
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct GradeFormContext {
    pub assignment: SubjectAssignment,
    pub submission: AssignmentSubmission,
    pub student: Student,
}
