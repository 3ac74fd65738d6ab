use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::create::ensure_teacher;
use super::{ClassService, load_class_for};
use crate::models::classes::requests::UpdateClassRequest;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{Denial, Operation};
use crate::services::{
    bad_request, current_user, denial_response, error_response, not_found, resolve_academic_year,
};
use crate::utils::validate::validate_required;

pub async fn update_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
    mut update_data: UpdateClassRequest,
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

    if let Some(name) = update_data.name.as_deref() {
        if let Err(msg) = validate_required(name, "Class name") {
            return Ok(bad_request(msg));
        }
        update_data.name = Some(name.trim().to_string());
    }

    // 只有管理员可以更换班主任
    if let Some(teacher_id) = update_data.teacher_id
        && teacher_id != class.teacher_id
    {
        if user.role != UserRole::Admin {
            return Ok(denial_response(
                &user,
                Denial::new(user.role, "Only administrators can reassign a class"),
            ));
        }
        if let Err(resp) = ensure_teacher(&storage, teacher_id).await {
            return Ok(resp);
        }
    }

    if let Some(year_id) = update_data.academic_year_id
        && let Err(resp) = resolve_academic_year(&storage, Some(year_id)).await
    {
        return Ok(resp);
    }

    match storage.update_class(class.id, update_data).await {
        Ok(Some(updated)) => {
            info!("Class {} updated by user {}", updated.id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                updated,
                "Class updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::ClassNotFound, "Class not found")),
        Err(e) => Ok(error_response(&e, ErrorCode::ClassAlreadyExists)),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{HttpMessage, http::StatusCode, http::header::LOCATION, test, web};

    use super::*;
    use crate::services::access::TEACHER_LANDING;
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::testing::{memory_storage, user};

    #[actix_web::test]
    async fn test_teacher_cannot_reassign_class() {
        let db = memory_storage().await;
        let owner = user(&db, "teacher1", UserRole::Teacher).await;
        let other = user(&db, "teacher2", UserRole::Teacher).await;
        let storage: Arc<dyn Storage> = Arc::new(db);

        let year = storage.create_academic_year("2024-2025", true).await.unwrap();
        let class = storage.create_class("Grade 3A", owner.id, year.id).await.unwrap();

        let request = test::TestRequest::default()
            .app_data(web::Data::new(storage.clone()))
            .to_http_request();
        request.extensions_mut().insert(owner.clone());

        let resp = update_class(
            &ClassService::new_lazy(),
            &request,
            class.id,
            UpdateClassRequest {
                name: None,
                teacher_id: Some(other.id),
                academic_year_id: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert_eq!(resp.headers().get(LOCATION).unwrap(), TEACHER_LANDING);

        let kept = storage.get_class_by_id(class.id).await.unwrap().unwrap();
        assert_eq!(kept.teacher_id, owner.id);
    }
}
