use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{AssignmentService, ensure_subject, load_assignment};
use crate::models::assignments::requests::UpdateAssignmentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{Operation, Target, authorize};
use crate::services::{bad_request, current_user, denial_response, error_response, not_found};
use crate::utils::validate::{validate_max_points, validate_required};

pub async fn update_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
    mut req: UpdateAssignmentRequest,
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

    if let Some(title) = req.title.as_deref() {
        if let Err(msg) = validate_required(title, "Title") {
            return Ok(bad_request(msg));
        }
        req.title = Some(title.trim().to_string());
    }
    if let Some(max_points) = req.max_points
        && let Err(msg) = validate_max_points(max_points)
    {
        return Ok(bad_request(msg));
    }
    if let Some(subject_id) = req.subject_id
        && let Err(resp) = ensure_subject(&storage, subject_id).await
    {
        return Ok(resp);
    }

    match storage.update_assignment(assignment.id, req).await {
        Ok(Some(updated)) => {
            info!("Assignment {} updated by teacher {}", updated.id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                updated,
                "Assignment updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(
            ErrorCode::AssignmentNotFound,
            "Assignment not found",
        )),
        Err(e) => Ok(error_response(&e, ErrorCode::Conflict)),
    }
}
