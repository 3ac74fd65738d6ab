use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::UserService;
use crate::models::{ApiResponse, ErrorCode, users::requests::CreateUserRequest};
use crate::services::{bad_request, error_response};
use crate::utils::validate::{validate_email, validate_phone, validate_username};

pub async fn create_user(
    service: &UserService,
    user_data: CreateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_username(&user_data.username) {
        return Ok(bad_request(msg));
    }
    if let Some(email) = user_data.email.as_deref().filter(|e| !e.is_empty())
        && let Err(msg) = validate_email(email)
    {
        return Ok(bad_request(msg));
    }
    if let Some(phone) = user_data.phone_number.as_deref().filter(|p| !p.is_empty())
        && let Err(msg) = validate_phone(phone)
    {
        return Ok(bad_request(msg));
    }

    let storage = service.get_storage(request);

    match storage.create_user(user_data).await {
        Ok(user) => {
            info!("Provisioned {} account '{}' (id {})", user.role, user.username, user.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                user,
                "Account created successfully",
            )))
        }
        Err(e) => Ok(error_response(&e, ErrorCode::UserAlreadyExists)),
    }
}
