use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{ClassService, load_class_for};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::Operation;
use crate::services::{current_user, error_response, not_found};

pub async fn delete_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let class = match load_class_for(&storage, &user, class_id, Operation::Modify).await {
        Ok(class) => class,
        Err(resp) => return Ok(resp),
    };

    match storage.delete_class(class.id).await {
        Ok(true) => {
            info!("Class '{}' ({}) deleted by user {}", class.name, class.id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Class deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::ClassNotFound, "Class not found")),
        Err(e) => Ok(error_response(&e, ErrorCode::Conflict)),
    }
}
