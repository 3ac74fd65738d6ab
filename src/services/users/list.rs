use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::{
    ApiResponse, ErrorCode,
    users::{
        entities::UserRole,
        requests::{UserListParams, UserListQuery},
    },
};
use crate::services::{current_user, error_response};

pub async fn list_users(
    service: &UserService,
    query: UserListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    // 教师只用于为学生关联家长
    let role = match user.role {
        UserRole::Admin => query.role,
        _ => Some(UserRole::Parent),
    };

    let (page, size) = query.pagination.normalized();
    let list_query = UserListQuery {
        page,
        size,
        role,
        search: query.search,
    };

    match storage.list_users_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "User list retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::Conflict)),
    }
}
