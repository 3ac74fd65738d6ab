use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{ApiResponse, dashboard::responses::LandingResponse};
use crate::services::access::landing_page;
use crate::services::current_user;

pub async fn landing(request: &HttpRequest) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        LandingResponse {
            role: user.role,
            redirect_to: landing_page(user.role).to_string(),
        },
        "Landing page resolved",
    )))
}
