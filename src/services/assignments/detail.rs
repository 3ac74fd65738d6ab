use std::collections::HashSet;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AssignmentService, load_assignment};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode, assignments::responses::AssignmentDetailResponse};
use crate::services::access::{Operation, Target, authorize};
use crate::services::{current_user, denial_response, error_response};

pub async fn get_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let assignment = match load_assignment(&storage, assignment_id).await {
        Ok(assignment) => assignment,
        Err(resp) => return Ok(resp),
    };
    if let Err(denial) = authorize(&user, &Target::Assignment(&assignment), Operation::View) {
        return Ok(denial_response(&user, denial));
    }

    // 作者与管理员看到全部提交，家长只看到自己孩子的提交
    let show_all = user.role == UserRole::Admin || assignment.created_by == user.id;
    let submissions = if show_all || user.role == UserRole::Parent {
        match storage.list_submissions_for_assignment(assignment.id).await {
            Ok(submissions) => submissions,
            Err(e) => return Ok(error_response(&e, ErrorCode::Conflict)),
        }
    } else {
        Vec::new()
    };

    let submissions = if show_all {
        submissions
    } else {
        let children: HashSet<i64> = match storage.list_students_by_parent(user.id).await {
            Ok(students) => students.into_iter().map(|s| s.id).collect(),
            Err(e) => return Ok(error_response(&e, ErrorCode::Conflict)),
        };
        submissions
            .into_iter()
            .filter(|s| children.contains(&s.student_id))
            .collect()
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        AssignmentDetailResponse {
            assignment,
            submissions,
        },
        "Assignment retrieved successfully",
    )))
}
