use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::CatalogService;
use crate::models::{ApiResponse, ErrorCode, academics::requests::CreateSubjectRequest};
use crate::services::{bad_request, error_response};
use crate::utils::validate::validate_required;

pub async fn list_subjects(
    service: &CatalogService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_subjects().await {
        Ok(subjects) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            subjects,
            "Subjects retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::Conflict)),
    }
}

pub async fn create_subject(
    service: &CatalogService,
    request: &HttpRequest,
    mut req: CreateSubjectRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_required(&req.name, "Subject name") {
        return Ok(bad_request(msg));
    }
    if let Err(msg) = validate_required(&req.code, "Subject code") {
        return Ok(bad_request(msg));
    }
    // 科目代码统一大写
    req.code = req.code.trim().to_uppercase();
    req.name = req.name.trim().to_string();

    let storage = service.get_storage(request);

    match storage.create_subject(req).await {
        Ok(subject) => {
            info!("Created subject {} ({})", subject.name, subject.code);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                subject,
                "Subject created successfully",
            )))
        }
        Err(e) => Ok(error_response(&e, ErrorCode::Conflict)),
    }
}
