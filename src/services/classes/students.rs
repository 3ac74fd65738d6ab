use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{ClassService, load_class_for};
use crate::models::students::requests::CreateStudentRequest;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{Denial, Operation};
use crate::services::{
    bad_request, current_user, denial_response, error_response, not_found,
};
use crate::utils::validate::{validate_required, validate_student_id};

pub async fn add_student(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
    mut student_data: CreateStudentRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    // 只有班主任可以添加学生
    let class = match load_class_for(&storage, &user, class_id, Operation::Modify).await {
        Ok(class) => class,
        Err(resp) => return Ok(resp),
    };
    if class.teacher_id != user.id {
        return Ok(denial_response(
            &user,
            Denial::new(user.role, "You can only add students to your own classes."),
        ));
    }

    if let Err(msg) = validate_student_id(&student_data.student_id) {
        return Ok(bad_request(msg));
    }
    for (value, field) in [
        (&student_data.first_name, "First name"),
        (&student_data.last_name, "Last name"),
    ] {
        if let Err(msg) = validate_required(value, field) {
            return Ok(bad_request(msg));
        }
    }
    student_data.student_id = student_data.student_id.trim().to_string();

    if let Some(parent_id) = student_data.parent_id {
        match storage.get_user_by_id(parent_id).await {
            Ok(Some(parent)) if parent.role == UserRole::Parent => {}
            Ok(Some(_)) => return Ok(bad_request("Linked account must be a parent")),
            Ok(None) => return Ok(not_found(ErrorCode::UserNotFound, "Parent not found")),
            Err(e) => return Ok(error_response(&e, ErrorCode::Conflict)),
        }
    }

    match storage.create_student(class.id, student_data).await {
        Ok(student) => {
            info!(
                "Student {} added to class {} by teacher {}",
                student.student_id, class.id, user.id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                student,
                "Student added successfully",
            )))
        }
        Err(e) => Ok(error_response(&e, ErrorCode::StudentIdAlreadyExists)),
    }
}
