use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{AssignmentService, load_assignment};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{Operation, Target, authorize};
use crate::services::{current_user, denial_response, error_response, not_found};

pub async fn delete_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let assignment = match load_assignment(&storage, assignment_id).await {
        Ok(assignment) => assignment,
        Err(resp) => return Ok(resp),
    };
    if let Err(denial) = authorize(&user, &Target::Assignment(&assignment), Operation::Modify) {
        return Ok(denial_response(&user, denial));
    }

    match storage.delete_assignment(assignment.id).await {
        Ok(true) => {
            info!(
                "Assignment '{}' ({}) deleted by teacher {}",
                assignment.title, assignment.id, user.id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Assignment deleted successfully",
            )))
        }
        Ok(false) => Ok(not_found(
            ErrorCode::AssignmentNotFound,
            "Assignment not found",
        )),
        Err(e) => Ok(error_response(&e, ErrorCode::Conflict)),
    }
}
