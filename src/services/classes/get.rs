use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ClassService, load_class_for};
use crate::models::{ApiResponse, ErrorCode, classes::responses::ClassDetailResponse};
use crate::services::access::Operation;
use crate::services::{current_user, error_response};

pub async fn get_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let class = match load_class_for(&storage, &user, class_id, Operation::View).await {
        Ok(class) => class,
        Err(resp) => return Ok(resp),
    };

    match storage.list_students_by_class(class.id).await {
        Ok(students) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ClassDetailResponse { class, students },
            "Class retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::Conflict)),
    }
}
