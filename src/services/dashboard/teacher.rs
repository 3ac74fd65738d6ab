use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{DashboardService, RECENT_RESULTS_LIMIT};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode, dashboard::responses::TeacherDashboard};
use crate::services::access::require_area;
use crate::services::{current_user, denial_response, error_response};

pub async fn teacher_dashboard(
    service: &DashboardService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    if let Err(denial) = require_area(&user, UserRole::Teacher) {
        return Ok(denial_response(&user, denial));
    }

    let storage = service.get_storage(request);

    let classes = match storage.list_classes(Some(user.id), None).await {
        Ok(classes) => classes,
        Err(e) => return Ok(error_response(&e, ErrorCode::Conflict)),
    };
    let recent_results = match storage
        .list_recent_results_for_teacher(user.id, RECENT_RESULTS_LIMIT)
        .await
    {
        Ok(results) => results,
        Err(e) => return Ok(error_response(&e, ErrorCode::Conflict)),
    };
    let total_results = match storage.count_results_for_teacher(user.id).await {
        Ok(count) => count,
        Err(e) => return Ok(error_response(&e, ErrorCode::Conflict)),
    };
    let total_students = classes.iter().map(|c| c.student_count).sum();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        TeacherDashboard {
            classes,
            recent_results,
            total_students,
            total_results,
        },
        "Teacher dashboard retrieved successfully",
    )))
}
