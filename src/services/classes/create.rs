use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ClassService;
use crate::models::classes::requests::CreateClassRequest;
use crate::models::users::entities::{User, UserRole};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::Denial;
use crate::services::{
    bad_request, current_user, denial_response, error_response, not_found, resolve_academic_year,
};
use crate::storage::Storage;
use crate::utils::validate::validate_required;

pub async fn create_class(
    service: &ClassService,
    request: &HttpRequest,
    class_data: CreateClassRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    if let Err(msg) = validate_required(&class_data.name, "Class name") {
        return Ok(bad_request(msg));
    }

    let storage = service.get_storage(request);

    let teacher_id = match resolve_class_teacher(&user, class_data.teacher_id, &storage).await {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };
    let year_id = match resolve_academic_year(&storage, class_data.academic_year_id).await {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };

    match storage
        .create_class(class_data.name.trim(), teacher_id, year_id)
        .await
    {
        Ok(class) => {
            info!(
                "Class '{}' created by user {} for teacher {}",
                class.name, user.id, teacher_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                class,
                "Class created successfully",
            )))
        }
        Err(e) => Ok(error_response(&e, ErrorCode::ClassAlreadyExists)),
    }
}

/// 确定班主任：教师默认是自己，管理员必须指定一名教师
async fn resolve_class_teacher(
    actor: &User,
    requested: Option<i64>,
    storage: &Arc<dyn Storage>,
) -> Result<i64, HttpResponse> {
    match actor.role {
        UserRole::Teacher => match requested {
            None => Ok(actor.id),
            Some(id) if id == actor.id => Ok(id),
            Some(_) => Err(denial_response(
                actor,
                Denial::new(actor.role, "Teachers can only create classes for themselves"),
            )),
        },
        UserRole::Admin => {
            let Some(id) = requested else {
                return Err(bad_request("teacher_id is required"));
            };
            ensure_teacher(storage, id).await.map(|_| id)
        }
        UserRole::Parent => Err(denial_response(
            actor,
            Denial::new(actor.role, "Parents cannot create classes"),
        )),
    }
}

/// 指定的用户必须存在且是教师
pub(crate) async fn ensure_teacher(
    storage: &Arc<dyn Storage>,
    user_id: i64,
) -> Result<User, HttpResponse> {
    match storage.get_user_by_id(user_id).await {
        Ok(Some(user)) if user.role == UserRole::Teacher => Ok(user),
        Ok(Some(_)) => Err(bad_request("Class teacher must be a teacher account")),
        Ok(None) => Err(not_found(ErrorCode::UserNotFound, "User not found")),
        Err(e) => Err(error_response(&e, ErrorCode::Conflict)),
    }
}
