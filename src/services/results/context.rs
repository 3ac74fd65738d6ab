use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ResultService;
use crate::models::academics::requests::ReportCommentQuery;
use crate::models::assessments::entities::{PerformanceLevel, Term};
use crate::models::assessments::responses::AddResultContext;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{Operation, Target, authorize};
use crate::services::{current_user, denial_response, error_response, load_student_with_class};

pub async fn add_result_context(
    service: &ResultService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let (student, class) = match load_student_with_class(&storage, student_id).await {
        Ok(found) => found,
        Err(resp) => return Ok(resp),
    };
    let target = Target::Student {
        student: &student,
        class: &class,
    };
    if let Err(denial) = authorize(&user, &target, Operation::RecordResult) {
        return Ok(denial_response(&user, denial));
    }

    let current_year = match storage.get_current_academic_year().await {
        Ok(year) => year,
        Err(e) => return Ok(error_response(&e, ErrorCode::Conflict)),
    };
    let subjects = match storage.list_subjects().await {
        Ok(subjects) => subjects,
        Err(e) => return Ok(error_response(&e, ErrorCode::Conflict)),
    };
    let comment_templates = match storage
        .list_report_comments(ReportCommentQuery::default())
        .await
    {
        Ok(templates) => templates,
        Err(e) => return Ok(error_response(&e, ErrorCode::Conflict)),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        AddResultContext {
            student,
            current_year,
            subjects,
            terms: Term::ALL.to_vec(),
            performance_levels: PerformanceLevel::ALL.iter().copied().map(Into::into).collect(),
            comment_templates,
        },
        "Result form retrieved successfully",
    )))
}
