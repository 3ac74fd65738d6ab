use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{SubmissionService, load_for_grading};
use crate::models::assignments::requests::GradeSubmissionRequest;
use crate::models::assignments::responses::GradeFormContext;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, current_user, error_response, not_found};
use crate::utils::validate::validate_grade;

pub async fn grade_context(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match load_for_grading(&storage, &user, submission_id).await {
        Ok((submission, assignment, student)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            GradeFormContext {
                assignment,
                submission,
                student,
            },
            "Grading form retrieved successfully",
        ))),
        Err(resp) => Ok(resp),
    }
}

pub async fn grade_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
    req: GradeSubmissionRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let (submission, assignment, student) =
        match load_for_grading(&storage, &user, submission_id).await {
            Ok(found) => found,
            Err(resp) => return Ok(resp),
        };

    if let Err(msg) = validate_grade(req.grade, assignment.max_points) {
        return Ok(bad_request(msg));
    }
    let feedback = req
        .feedback
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty());

    // 重复批改只会修改分数与评语
    let regrade = submission.is_graded;
    match storage
        .grade_submission(submission.id, req.grade, feedback, user.id)
        .await
    {
        Ok(Some(graded)) => {
            info!(
                "Submission {} for student {} {} by teacher {}: {}/{}",
                graded.id,
                student.student_id,
                if regrade { "regraded" } else { "graded" },
                user.id,
                req.grade,
                assignment.max_points
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                graded,
                "Submission graded successfully",
            )))
        }
        Ok(None) => Ok(not_found(
            ErrorCode::SubmissionNotFound,
            "Submission not found",
        )),
        Err(e) => Ok(error_response(&e, ErrorCode::Conflict)),
    }
}
