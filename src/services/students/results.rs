use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{StudentService, load_student_for};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode, assessments::responses::StudentResultsResponse};
use crate::services::access::{Operation, require_area};
use crate::services::{current_user, denial_response, error_response};

pub async fn get_results(
    service: &StudentService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    if let Err(denial) = require_area(&user, UserRole::Parent) {
        return Ok(denial_response(&user, denial));
    }

    let storage = service.get_storage(request);

    let (student, _) =
        match load_student_for(&storage, &user, student_id, Operation::View, true).await {
            Ok(found) => found,
            Err(resp) => return Ok(resp),
        };

    match storage.list_results_for_student(student.id).await {
        Ok(results) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            StudentResultsResponse::group(student, results),
            "Results retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::Conflict)),
    }
}
