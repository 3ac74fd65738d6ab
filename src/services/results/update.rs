use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ResultService;
use crate::models::assessments::requests::UpdateResultRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{Operation, Target, authorize};
use crate::services::{
    current_user, denial_response, error_response, load_student_with_class, not_found,
};

pub async fn update_result(
    service: &ResultService,
    request: &HttpRequest,
    result_id: i64,
    mut req: UpdateResultRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let existing = match storage.get_result_by_id(result_id).await {
        Ok(Some(result)) => result,
        Ok(None) => return Ok(not_found(ErrorCode::ResultNotFound, "Result not found")),
        Err(e) => return Ok(error_response(&e, ErrorCode::Conflict)),
    };
    let (student, class) = match load_student_with_class(&storage, existing.student_id).await {
        Ok(found) => found,
        Err(resp) => return Ok(resp),
    };
    let target = Target::Result {
        student: &student,
        class: &class,
    };
    if let Err(denial) = authorize(&user, &target, Operation::Modify) {
        return Ok(denial_response(&user, denial));
    }

    req.teacher_comment = req.teacher_comment.map(|c| c.trim().to_string());

    match storage.update_result(existing.id, req).await {
        Ok(Some(updated)) => {
            info!("Result {} updated by teacher {}", updated.id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                updated,
                "Result updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::ResultNotFound, "Result not found")),
        Err(e) => Ok(error_response(&e, ErrorCode::Conflict)),
    }
}
