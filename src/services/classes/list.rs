use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::models::{
    ApiResponse, ErrorCode,
    classes::{requests::ClassQueryParams, responses::ClassListResponse},
    users::entities::UserRole,
};
use crate::services::{current_user, error_response};

pub async fn list_classes(
    service: &ClassService,
    request: &HttpRequest,
    query: ClassQueryParams,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    // 教师只能看到自己的班级
    let teacher_filter = match user.role {
        UserRole::Admin => None,
        UserRole::Teacher | UserRole::Parent => Some(user.id),
    };

    match storage
        .list_classes(teacher_filter, query.academic_year_id)
        .await
    {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ClassListResponse { items },
            "Class list retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::Conflict)),
    }
}
