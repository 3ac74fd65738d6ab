use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ResultService;
use crate::models::assessments::requests::{NewAssessmentResult, RecordResultRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{Operation, Target, authorize};
use crate::services::{
    current_user, denial_response, error_response, load_student_with_class, not_found,
    resolve_academic_year,
};

pub async fn record_result(
    service: &ResultService,
    request: &HttpRequest,
    student_id: i64,
    req: RecordResultRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let (student, class) = match load_student_with_class(&storage, student_id).await {
        Ok(found) => found,
        Err(resp) => return Ok(resp),
    };
    let target = Target::Student {
        student: &student,
        class: &class,
    };
    if let Err(denial) = authorize(&user, &target, Operation::RecordResult) {
        return Ok(denial_response(&user, denial));
    }

    match storage.get_subject_by_id(req.subject_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::SubjectNotFound, "Subject not found")),
        Err(e) => return Ok(error_response(&e, ErrorCode::Conflict)),
    }
    let academic_year_id = match resolve_academic_year(&storage, req.academic_year_id).await {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };

    let new = NewAssessmentResult {
        student_id: student.id,
        subject_id: req.subject_id,
        term: req.term,
        academic_year_id,
        performance_level: req.performance_level,
        teacher_comment: req.teacher_comment.trim().to_string(),
        recorded_by: user.id,
    };

    match storage.create_result(new).await {
        Ok(result) => {
            info!(
                "Result recorded for student {} (subject {}, term {}) by teacher {}",
                student.student_id, result.subject_id, result.term, user.id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                result,
                "Result added successfully",
            )))
        }
        Err(e) => Ok(error_response(&e, ErrorCode::ResultAlreadyExists)),
    }
}
