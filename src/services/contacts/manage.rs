use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{ContactService, validate_contact_fields};
use crate::models::contacts::entities::StudentContact;
use crate::models::contacts::requests::UpdateContactRequest;
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{Operation, Target, authorize};
use crate::services::{bad_request, current_user, denial_response, error_response, not_found};
use crate::storage::Storage;

async fn load_own_contact(
    storage: &Arc<dyn Storage>,
    actor: &User,
    contact_id: i64,
) -> Result<StudentContact, HttpResponse> {
    let contact = match storage.get_contact_by_id(contact_id).await {
        Ok(Some(contact)) => contact,
        Ok(None) => return Err(not_found(ErrorCode::ContactNotFound, "Contact not found")),
        Err(e) => return Err(error_response(&e, ErrorCode::Conflict)),
    };
    authorize(actor, &Target::Contact(&contact), Operation::Modify)
        .map_err(|denial| denial_response(actor, denial))?;
    Ok(contact)
}

pub async fn update_contact(
    service: &ContactService,
    request: &HttpRequest,
    contact_id: i64,
    req: UpdateContactRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let contact = match load_own_contact(&storage, &user, contact_id).await {
        Ok(contact) => contact,
        Err(resp) => return Ok(resp),
    };

    if let Err(msg) = validate_contact_fields(
        &[
            (req.child_first_name.as_deref(), "Child first name"),
            (req.child_last_name.as_deref(), "Child last name"),
            (req.parent_name.as_deref(), "Parent name"),
        ],
        req.parent_phone.as_deref(),
        req.parent_email.as_deref(),
    ) {
        return Ok(bad_request(msg));
    }

    match storage.update_contact(contact.id, req).await {
        Ok(Some(updated)) => {
            info!("Contact {} updated by teacher {}", updated.id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                updated,
                "Contact updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::ContactNotFound, "Contact not found")),
        Err(e) => Ok(error_response(&e, ErrorCode::Conflict)),
    }
}

pub async fn delete_contact(
    service: &ContactService,
    request: &HttpRequest,
    contact_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let contact = match load_own_contact(&storage, &user, contact_id).await {
        Ok(contact) => contact,
        Err(resp) => return Ok(resp),
    };

    match storage.delete_contact(contact.id).await {
        Ok(true) => {
            info!("Contact {} deleted by teacher {}", contact.id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Contact deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::ContactNotFound, "Contact not found")),
        Err(e) => Ok(error_response(&e, ErrorCode::Conflict)),
    }
}
