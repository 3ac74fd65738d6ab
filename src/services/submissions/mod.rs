pub mod grade;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::access::{Operation, Target, authorize};
use super::assignments::load_assignment;
use super::{denial_response, error_response, not_found};
use crate::models::ErrorCode;
use crate::models::assignments::entities::{AssignmentSubmission, SubjectAssignment};
use crate::models::assignments::requests::GradeSubmissionRequest;
use crate::models::students::entities::Student;
use crate::models::users::entities::User;
use crate::storage::Storage;

pub struct SubmissionService {
    storage: Option<Arc<dyn Storage>>,
}

impl SubmissionService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    // 批改表单上下文
    pub async fn grade_context(
        &self,
        request: &HttpRequest,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        grade::grade_context(self, request, submission_id).await
    }

    pub async fn grade_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
        req: GradeSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        grade::grade_submission(self, request, submission_id, req).await
    }
}

/// 加载提交及其作业、学生，并检查批改权限
pub(crate) async fn load_for_grading(
    storage: &Arc<dyn Storage>,
    actor: &User,
    submission_id: i64,
) -> Result<(AssignmentSubmission, SubjectAssignment, Student), HttpResponse> {
    let submission = match storage.get_submission_by_id(submission_id).await {
        Ok(Some(submission)) => submission,
        Ok(None) => {
            return Err(not_found(
                ErrorCode::SubmissionNotFound,
                "Submission not found",
            ));
        }
        Err(e) => return Err(error_response(&e, ErrorCode::Conflict)),
    };
    let assignment = load_assignment(storage, submission.assignment_id).await?;
    let student = match storage.get_student_by_id(submission.student_id).await {
        Ok(Some(student)) => student,
        Ok(None) => return Err(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => return Err(error_response(&e, ErrorCode::Conflict)),
    };

    let target = Target::Submission {
        assignment: &assignment,
        student: &student,
    };
    authorize(actor, &target, Operation::Grade).map_err(|denial| denial_response(actor, denial))?;

    Ok((submission, assignment, student))
}
