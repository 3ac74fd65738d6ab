pub mod access;
pub mod academics;
pub mod assignments;
pub mod classes;
pub mod contacts;
pub mod dashboard;
pub mod reports;
pub mod results;
pub mod students;
pub mod submissions;
pub mod users;

pub use academics::CatalogService;
pub use assignments::AssignmentService;
pub use classes::ClassService;
pub use contacts::ContactService;
pub use dashboard::DashboardService;
pub use results::ResultService;
pub use students::StudentService;
pub use submissions::SubmissionService;
pub use users::UserService;

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, http::header::LOCATION};
use tracing::{error, info};

use crate::errors::SchoolError;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode, RedirectHint, classes::entities::SchoolClass,
    students::entities::Student, users::entities::User,
};
use crate::storage::Storage;
use access::Denial;

// 从 app_data 取存储实例
pub(crate) fn storage_from_request(request: &HttpRequest) -> Arc<dyn Storage> {
    request
        .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
        .expect("Storage not found in app data")
        .get_ref()
        .clone()
}

/// 取当前用户；RequireJWT 之后总能取到
pub(crate) fn current_user(request: &HttpRequest) -> Result<User, HttpResponse> {
    RequireJWT::extract_user_claims(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized: missing user",
        ))
    })
}

/// 拒绝访问：403，附带落地页
pub(crate) fn denial_response(actor: &User, denial: Denial) -> HttpResponse {
    info!(
        "Access denied for user {} ({}): {}",
        actor.id, actor.role, denial.message
    );
    HttpResponse::Forbidden()
        .insert_header((LOCATION, denial.redirect_to))
        .json(ApiResponse::error(
            ErrorCode::Forbidden,
            RedirectHint {
                redirect_to: denial.redirect_to.to_string(),
            },
            denial.message,
        ))
}

pub(crate) fn not_found(code: ErrorCode, message: &str) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(code, message))
}

pub(crate) fn bad_request(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, message))
}

/// 业务错误到 HTTP 响应的统一映射
///
/// `conflict_code` 用于唯一约束冲突时给出更具体的错误码。
pub(crate) fn error_response(err: &SchoolError, conflict_code: ErrorCode) -> HttpResponse {
    match err {
        SchoolError::Validation(msg) => bad_request(msg.clone()),
        SchoolError::NotFound(msg) => not_found(ErrorCode::NotFound, msg),
        SchoolError::UniquenessViolation(msg) => {
            info!("Uniqueness violation: {}", msg);
            HttpResponse::Conflict().json(ApiResponse::error_empty(conflict_code, msg.clone()))
        }
        SchoolError::PermissionDenied(msg) => {
            HttpResponse::Forbidden().json(ApiResponse::error_empty(ErrorCode::Forbidden, msg.clone()))
        }
        SchoolError::Authentication(msg) => HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::Unauthorized, msg.clone())),
        SchoolError::ReportRender(msg) => {
            error!("Report rendering failed: {}", msg);
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::ReportRenderFailed,
                "Failed to render report",
            ))
        }
        other => {
            error!("{}", other.format_simple());
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                other.message(),
            ))
        }
    }
}

/// 加载学生及其班级，任一缺失返回 404
pub(crate) async fn load_student_with_class(
    storage: &Arc<dyn Storage>,
    student_id: i64,
) -> Result<(Student, SchoolClass), HttpResponse> {
    let student = match storage.get_student_by_id(student_id).await {
        Ok(Some(student)) => student,
        Ok(None) => return Err(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => return Err(error_response(&e, ErrorCode::Conflict)),
    };

    let class = match storage.get_class_by_id(student.class_id).await {
        Ok(Some(class)) => class,
        Ok(None) => return Err(not_found(ErrorCode::ClassNotFound, "Class not found")),
        Err(e) => return Err(error_response(&e, ErrorCode::Conflict)),
    };

    Ok((student, class))
}

/// 请求未指定学年时使用当前学年
pub(crate) async fn resolve_academic_year(
    storage: &Arc<dyn Storage>,
    requested: Option<i64>,
) -> Result<i64, HttpResponse> {
    match requested {
        Some(id) => match storage.get_academic_year_by_id(id).await {
            Ok(Some(year)) => Ok(year.id),
            Ok(None) => Err(not_found(
                ErrorCode::AcademicYearNotFound,
                "Academic year not found",
            )),
            Err(e) => Err(error_response(&e, ErrorCode::Conflict)),
        },
        None => match storage.get_current_academic_year().await {
            Ok(Some(year)) => Ok(year.id),
            Ok(None) => Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::NoCurrentAcademicYear,
                "No current academic year is set",
            ))),
            Err(e) => Err(error_response(&e, ErrorCode::Conflict)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn test_denial_renders_redirect() {
        let actor = User {
            id: 9,
            username: "parent9".to_string(),
            role: UserRole::Parent,
            first_name: String::new(),
            last_name: String::new(),
            email: None,
            phone_number: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        let resp = denial_response(&actor, Denial::new(UserRole::Parent, access::ACCESS_DENIED));
        assert_eq!(resp.status(), actix_web::http::StatusCode::FORBIDDEN);
        assert_eq!(
            resp.headers().get(LOCATION).unwrap(),
            access::PARENT_LANDING
        );

        let body = to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["code"], ErrorCode::Forbidden as i32);
        assert_eq!(json["data"]["redirect_to"], access::PARENT_LANDING);
        assert_eq!(json["message"], access::ACCESS_DENIED);
    }

    #[test]
    fn test_error_mapping() {
        let conflict = error_response(
            &SchoolError::uniqueness_violation("dup"),
            ErrorCode::ResultAlreadyExists,
        );
        assert_eq!(conflict.status(), actix_web::http::StatusCode::CONFLICT);
        let invalid = error_response(&SchoolError::validation("bad"), ErrorCode::Conflict);
        assert_eq!(invalid.status(), actix_web::http::StatusCode::BAD_REQUEST);
        let failed = error_response(&SchoolError::database_operation("x"), ErrorCode::Conflict);
        assert_eq!(failed.status(), actix_web::http::StatusCode::INTERNAL_SERVER_ERROR);
    }
}
