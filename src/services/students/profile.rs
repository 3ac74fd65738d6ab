use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{StudentService, load_student_for};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode, students::responses::StudentProfileResponse};
use crate::services::access::{ACCESS_DENIED, Denial, Operation};
use crate::services::{current_user, denial_response, error_response};

pub async fn get_profile(
    service: &StudentService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    // 档案页面只对教职工开放，家长走成绩页面
    if user.role == UserRole::Parent {
        return Ok(denial_response(&user, Denial::new(user.role, ACCESS_DENIED)));
    }

    let storage = service.get_storage(request);

    let (student, class) =
        match load_student_for(&storage, &user, student_id, Operation::View, false).await {
            Ok(found) => found,
            Err(resp) => return Ok(resp),
        };

    match storage.list_results_for_student(student.id).await {
        Ok(results) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            StudentProfileResponse {
                student,
                class,
                results,
            },
            "Student profile retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::Conflict)),
    }
}
