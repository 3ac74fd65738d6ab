use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{DashboardService, RECENT_RESULTS_LIMIT};
use crate::models::dashboard::responses::{ChildOverview, ParentDashboard};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::require_area;
use crate::services::{current_user, denial_response, error_response, not_found};

pub async fn parent_dashboard(
    service: &DashboardService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    if let Err(denial) = require_area(&user, UserRole::Parent) {
        return Ok(denial_response(&user, denial));
    }

    let storage = service.get_storage(request);

    let children = match storage.list_students_by_parent(user.id).await {
        Ok(children) => children,
        Err(e) => return Ok(error_response(&e, ErrorCode::Conflict)),
    };

    let mut students = Vec::with_capacity(children.len());
    for student in children {
        let class = match storage.get_class_by_id(student.class_id).await {
            Ok(Some(class)) => class,
            Ok(None) => return Ok(not_found(ErrorCode::ClassNotFound, "Class not found")),
            Err(e) => return Ok(error_response(&e, ErrorCode::Conflict)),
        };
        students.push(ChildOverview { student, class });
    }

    let recent_results = match storage
        .list_recent_results_for_parent(user.id, RECENT_RESULTS_LIMIT)
        .await
    {
        Ok(results) => results,
        Err(e) => return Ok(error_response(&e, ErrorCode::Conflict)),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        ParentDashboard {
            students,
            recent_results,
        },
        "Parent dashboard retrieved successfully",
    )))
}
