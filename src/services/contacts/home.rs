use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ContactService;
use crate::models::contacts::entities::ClassLevel;
use crate::models::contacts::responses::{ClassLevelCount, ClassLevelOption, ContactHomeResponse};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::require_area;
use crate::services::{current_user, denial_response, error_response};

pub async fn home(service: &ContactService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    if let Err(denial) = require_area(&user, UserRole::Teacher) {
        return Ok(denial_response(&user, denial));
    }

    let storage = service.get_storage(request);

    match storage.count_contacts_by_level(user.id).await {
        Ok(counts) => {
            let total: u64 = counts.iter().map(|(_, count)| count).sum();
            let levels = counts
                .into_iter()
                .map(|(level, count)| ClassLevelCount {
                    level: level.into(),
                    count,
                })
                .collect();
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                ContactHomeResponse { levels, total },
                "Contact overview retrieved successfully",
            )))
        }
        Err(e) => Ok(error_response(&e, ErrorCode::Conflict)),
    }
}

pub async fn select_class(request: &HttpRequest) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    if let Err(denial) = require_area(&user, UserRole::Teacher) {
        return Ok(denial_response(&user, denial));
    }

    let levels: Vec<ClassLevelOption> = ClassLevel::ALL.iter().copied().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        levels,
        "Class levels retrieved successfully",
    )))
}
