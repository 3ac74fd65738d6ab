use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ContactService;
use crate::models::contacts::{requests::ContactListParams, responses::ContactListResponse};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::require_area;
use crate::services::{current_user, denial_response, error_response};

pub async fn list_contacts(
    service: &ContactService,
    request: &HttpRequest,
    query: ContactListParams,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    if let Err(denial) = require_area(&user, UserRole::Teacher) {
        return Ok(denial_response(&user, denial));
    }

    let storage = service.get_storage(request);

    match storage.list_contacts(user.id, query.class_level).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ContactListResponse { items },
            "Contacts retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::Conflict)),
    }
}
