use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CatalogService;
use crate::models::{
    ApiResponse, ErrorCode,
    academics::requests::{CreateReportCommentRequest, ReportCommentQuery},
};
use crate::services::{bad_request, error_response, not_found};

pub async fn list_comment_templates(
    service: &CatalogService,
    request: &HttpRequest,
    query: ReportCommentQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_report_comments(query).await {
        Ok(templates) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            templates,
            "Comment templates retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::Conflict)),
    }
}

pub async fn create_comment_template(
    service: &CatalogService,
    request: &HttpRequest,
    req: CreateReportCommentRequest,
) -> ActixResult<HttpResponse> {
    if req.template_comment.trim().is_empty() {
        return Ok(bad_request("Template comment is required"));
    }

    let storage = service.get_storage(request);

    match storage.get_subject_by_id(req.subject_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::SubjectNotFound, "Subject not found")),
        Err(e) => return Ok(error_response(&e, ErrorCode::Conflict)),
    }

    match storage.create_report_comment(req).await {
        Ok(template) => Ok(HttpResponse::Created().json(ApiResponse::success(
            template,
            "Comment template created successfully",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::Conflict)),
    }
}
