use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{ContactService, parse_class_level, validate_contact_fields};
use crate::models::contacts::requests::CreateContactRequest;
use crate::models::contacts::responses::ContactFormContext;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::require_area;
use crate::services::{bad_request, current_user, denial_response, error_response};

pub async fn level_context(
    service: &ContactService,
    request: &HttpRequest,
    class_level: &str,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    if let Err(denial) = require_area(&user, UserRole::Teacher) {
        return Ok(denial_response(&user, denial));
    }
    let level = match parse_class_level(class_level) {
        Ok(level) => level,
        Err(msg) => return Ok(bad_request(msg)),
    };

    let storage = service.get_storage(request);

    match storage.list_contacts(user.id, Some(level)).await {
        Ok(existing) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ContactFormContext {
                level: level.into(),
                existing,
            },
            "Contact form retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::Conflict)),
    }
}

pub async fn create_contact(
    service: &ContactService,
    request: &HttpRequest,
    class_level: &str,
    req: CreateContactRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    if let Err(denial) = require_area(&user, UserRole::Teacher) {
        return Ok(denial_response(&user, denial));
    }
    let level = match parse_class_level(class_level) {
        Ok(level) => level,
        Err(msg) => return Ok(bad_request(msg)),
    };

    if let Err(msg) = validate_contact_fields(
        &[
            (Some(req.child_first_name.as_str()), "Child first name"),
            (Some(req.child_last_name.as_str()), "Child last name"),
            (Some(req.parent_name.as_str()), "Parent name"),
        ],
        Some(req.parent_phone.as_str()),
        req.parent_email.as_deref(),
    ) {
        return Ok(bad_request(msg));
    }

    let storage = service.get_storage(request);

    match storage.create_contact(user.id, level, req).await {
        Ok(contact) => {
            info!(
                "Contact {} ({}) recorded by teacher {}",
                contact.id, contact.class_level, user.id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                contact,
                "Contact saved successfully",
            )))
        }
        Err(e) => Ok(error_response(&e, ErrorCode::Conflict)),
    }
}
