use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{StudentService, load_student_for};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::Operation;
use crate::services::{current_user, error_response, not_found};

pub async fn delete_student(
    service: &StudentService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let (student, _) =
        match load_student_for(&storage, &user, student_id, Operation::Modify, false).await {
            Ok(found) => found,
            Err(resp) => return Ok(resp),
        };

    match storage.delete_student(student.id).await {
        Ok(true) => {
            info!(
                "Student {} ({}) deleted by user {}",
                student.student_id, student.id, user.id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Student deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => Ok(error_response(&e, ErrorCode::Conflict)),
    }
}
