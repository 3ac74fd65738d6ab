use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::CatalogService;
use crate::models::{ApiResponse, ErrorCode, academics::requests::CreateAcademicYearRequest};
use crate::services::{bad_request, error_response, not_found};
use crate::utils::validate::validate_required;

pub async fn list_academic_years(
    service: &CatalogService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_academic_years().await {
        Ok(years) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            years,
            "Academic years retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::Conflict)),
    }
}

pub async fn get_current_academic_year(
    service: &CatalogService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_current_academic_year().await {
        Ok(Some(year)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            year,
            "Current academic year retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(
            ErrorCode::NoCurrentAcademicYear,
            "No current academic year is set",
        )),
        Err(e) => Ok(error_response(&e, ErrorCode::Conflict)),
    }
}

pub async fn create_academic_year(
    service: &CatalogService,
    request: &HttpRequest,
    req: CreateAcademicYearRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_required(&req.name, "Academic year name") {
        return Ok(bad_request(msg));
    }

    let storage = service.get_storage(request);

    match storage.create_academic_year(req.name.trim(), req.current).await {
        Ok(year) => {
            info!("Created academic year '{}' (current: {})", year.name, year.current);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                year,
                "Academic year created successfully",
            )))
        }
        Err(e) => Ok(error_response(&e, ErrorCode::Conflict)),
    }
}

pub async fn set_current_academic_year(
    service: &CatalogService,
    request: &HttpRequest,
    year_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.set_current_academic_year(year_id).await {
        Ok(Some(year)) => {
            info!("Current academic year set to '{}'", year.name);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                year,
                "Current academic year updated",
            )))
        }
        Ok(None) => Ok(not_found(
            ErrorCode::AcademicYearNotFound,
            "Academic year not found",
        )),
        Err(e) => Ok(error_response(&e, ErrorCode::Conflict)),
    }
}
