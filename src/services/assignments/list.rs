use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AssignmentService, ensure_subject};
use crate::models::{
    ApiResponse, ErrorCode,
    assignments::{requests::AssignmentListParams, responses::AssignmentListResponse},
};
use crate::services::{current_user, error_response};

pub async fn list_assignments(
    service: &AssignmentService,
    request: &HttpRequest,
    query: AssignmentListParams,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Some(subject_id) = query.subject_id
        && let Err(resp) = ensure_subject(&storage, subject_id).await
    {
        return Ok(resp);
    }

    match storage
        .list_visible_assignments(user.id, query.subject_id)
        .await
    {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AssignmentListResponse { items },
            "Assignments retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::Conflict)),
    }
}
