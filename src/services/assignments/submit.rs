use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{AssignmentService, load_assignment};
use crate::models::assignments::entities::SubmissionState;
use crate::models::assignments::requests::SubmitAssignmentRequest;
use crate::models::assignments::responses::{ChildSubmissionState, SubmitFormContext};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{Operation, Target, authorize, require_area};
use crate::services::{
    bad_request, current_user, denial_response, error_response, load_student_with_class,
};
use crate::utils::validate::validate_submission_content;

fn not_published() -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::AssignmentNotPublished,
        "Assignment is not published",
    ))
}

fn already_submitted() -> HttpResponse {
    HttpResponse::Conflict().json(ApiResponse::error_empty(
        ErrorCode::SubmissionAlreadyExists,
        "This assignment has already been submitted for this student",
    ))
}

/// 空白内容视为未提供
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub async fn submit_context(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    if let Err(denial) = require_area(&user, UserRole::Parent) {
        return Ok(denial_response(&user, denial));
    }

    let storage = service.get_storage(request);

    let assignment = match load_assignment(&storage, assignment_id).await {
        Ok(assignment) => assignment,
        Err(resp) => return Ok(resp),
    };
    if !assignment.is_published {
        return Ok(not_published());
    }

    let students = match storage.list_students_by_parent(user.id).await {
        Ok(students) => students,
        Err(e) => return Ok(error_response(&e, ErrorCode::Conflict)),
    };

    let mut children = Vec::with_capacity(students.len());
    for student in students {
        let submission = match storage
            .get_submission_for_student(assignment.id, student.id)
            .await
        {
            Ok(submission) => submission,
            Err(e) => return Ok(error_response(&e, ErrorCode::Conflict)),
        };
        children.push(ChildSubmissionState {
            state: SubmissionState::of(submission.as_ref()),
            student,
            submission,
        });
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        SubmitFormContext {
            assignment,
            children,
        },
        "Submission form retrieved successfully",
    )))
}

pub async fn submit_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
    req: SubmitAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    if let Err(denial) = require_area(&user, UserRole::Parent) {
        return Ok(denial_response(&user, denial));
    }

    let storage = service.get_storage(request);

    let assignment = match load_assignment(&storage, assignment_id).await {
        Ok(assignment) => assignment,
        Err(resp) => return Ok(resp),
    };
    if !assignment.is_published {
        return Ok(not_published());
    }

    let (student, _) = match load_student_with_class(&storage, req.student_id).await {
        Ok(found) => found,
        Err(resp) => return Ok(resp),
    };
    let target = Target::Submission {
        assignment: &assignment,
        student: &student,
    };
    if let Err(denial) = authorize(&user, &target, Operation::Submit) {
        return Ok(denial_response(&user, denial));
    }

    let file_path = non_blank(req.file_path);
    let text = non_blank(req.text);
    if let Err(msg) = validate_submission_content(file_path.as_deref(), text.as_deref()) {
        return Ok(bad_request(msg));
    }

    match storage
        .get_submission_for_student(assignment.id, student.id)
        .await
    {
        Ok(Some(_)) => return Ok(already_submitted()),
        Ok(None) => {}
        Err(e) => return Ok(error_response(&e, ErrorCode::Conflict)),
    }

    // 并发提交由唯一索引兜底
    match storage
        .create_submission(assignment.id, student.id, user.id, file_path, text)
        .await
    {
        Ok(submission) => {
            info!(
                "Assignment {} submitted for student {} by parent {}",
                assignment.id, student.student_id, user.id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                submission,
                "Assignment submitted successfully",
            )))
        }
        Err(e) => Ok(error_response(&e, ErrorCode::SubmissionAlreadyExists)),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{HttpMessage, body::to_bytes, http::StatusCode, test, web};
    use chrono::{Duration, NaiveDate, Utc};

    use super::*;
    use crate::models::academics::requests::CreateSubjectRequest;
    use crate::models::assignments::entities::AssignmentType;
    use crate::models::assignments::requests::CreateAssignmentRequest;
    use crate::models::students::requests::CreateStudentRequest;
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::testing::{memory_storage, user};

    #[actix_web::test]
    async fn test_second_submission_conflicts() {
        let db = memory_storage().await;
        let teacher = user(&db, "teacher1", UserRole::Teacher).await;
        let parent = user(&db, "parent1", UserRole::Parent).await;
        let storage: Arc<dyn Storage> = Arc::new(db);

        let year = storage.create_academic_year("2024-2025", true).await.unwrap();
        let class = storage.create_class("Grade 3A", teacher.id, year.id).await.unwrap();
        let subject = storage
            .create_subject(CreateSubjectRequest {
                name: "English".to_string(),
                code: "ENG".to_string(),
            })
            .await
            .unwrap();
        let student = storage
            .create_student(
                class.id,
                CreateStudentRequest {
                    student_id: "S-001".to_string(),
                    first_name: "Amani".to_string(),
                    last_name: "Otieno".to_string(),
                    date_of_birth: NaiveDate::from_ymd_opt(2016, 4, 2).unwrap(),
                    parent_id: Some(parent.id),
                },
            )
            .await
            .unwrap();
        let assignment = storage
            .create_assignment(
                teacher.id,
                year.id,
                CreateAssignmentRequest {
                    title: "Reading log".to_string(),
                    description: None,
                    subject_id: subject.id,
                    assignment_type: AssignmentType::Homework,
                    due_date: Utc::now() + Duration::days(3),
                    max_points: 10.0,
                    attachment: None,
                    academic_year_id: None,
                    is_published: true,
                },
            )
            .await
            .unwrap();

        let request = test::TestRequest::default()
            .app_data(web::Data::new(storage.clone()))
            .to_http_request();
        request.extensions_mut().insert(parent.clone());
        let service = AssignmentService::new_lazy();
        let submit = |text: &str| SubmitAssignmentRequest {
            student_id: student.id,
            file_path: None,
            text: Some(text.to_string()),
        };

        let first = submit_assignment(&service, &request, assignment.id, submit("Read chapter 1"))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::CREATED);

        let second = submit_assignment(&service, &request, assignment.id, submit("Again"))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::CONFLICT);
        let body = to_bytes(second.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["code"], ErrorCode::SubmissionAlreadyExists as i32);

        // 原提交保持不变
        let kept = storage
            .get_submission_for_student(assignment.id, student.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(kept.text.as_deref(), Some("Read chapter 1"));
    }
}
