use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{AssignmentService, ensure_subject};
use crate::models::assignments::entities::AssignmentType;
use crate::models::assignments::requests::CreateAssignmentRequest;
use crate::models::assignments::responses::AssignmentFormContext;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::require_area;
use crate::services::{
    bad_request, current_user, denial_response, error_response, resolve_academic_year,
};
use crate::utils::validate::{validate_max_points, validate_required};

pub async fn create_context(
    service: &AssignmentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    if let Err(denial) = require_area(&user, UserRole::Teacher) {
        return Ok(denial_response(&user, denial));
    }

    let storage = service.get_storage(request);

    let subjects = match storage.list_subjects().await {
        Ok(subjects) => subjects,
        Err(e) => return Ok(error_response(&e, ErrorCode::Conflict)),
    };
    let current_year = match storage.get_current_academic_year().await {
        Ok(year) => year,
        Err(e) => return Ok(error_response(&e, ErrorCode::Conflict)),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        AssignmentFormContext {
            subjects,
            assignment_types: AssignmentType::ALL.to_vec(),
            current_year,
        },
        "Assignment form retrieved successfully",
    )))
}

pub async fn create_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    mut req: CreateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    if let Err(denial) = require_area(&user, UserRole::Teacher) {
        return Ok(denial_response(&user, denial));
    }

    if let Err(msg) = validate_required(&req.title, "Title") {
        return Ok(bad_request(msg));
    }
    if let Err(msg) = validate_max_points(req.max_points) {
        return Ok(bad_request(msg));
    }
    req.title = req.title.trim().to_string();

    let storage = service.get_storage(request);

    if let Err(resp) = ensure_subject(&storage, req.subject_id).await {
        return Ok(resp);
    }
    let year_id = match resolve_academic_year(&storage, req.academic_year_id).await {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };

    match storage.create_assignment(user.id, year_id, req).await {
        Ok(assignment) => {
            info!(
                "Assignment '{}' ({}) created by teacher {}, published: {}",
                assignment.title, assignment.id, user.id, assignment.is_published
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                assignment,
                "Assignment created successfully",
            )))
        }
        Err(e) => Ok(error_response(&e, ErrorCode::Conflict)),
    }
}
