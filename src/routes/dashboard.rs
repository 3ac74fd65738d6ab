use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::services::DashboardService;

static DASHBOARD_SERVICE: Lazy<DashboardService> = Lazy::new(DashboardService::new_lazy);

pub async fn landing(req: HttpRequest) -> ActixResult<HttpResponse> {
    DASHBOARD_SERVICE.landing(&req).await
}

pub async fn teacher_dashboard(req: HttpRequest) -> ActixResult<HttpResponse> {
    DASHBOARD_SERVICE.teacher_dashboard(&req).await
}

pub async fn parent_dashboard(req: HttpRequest) -> ActixResult<HttpResponse> {
    DASHBOARD_SERVICE.parent_dashboard(&req).await
}

// 仪表盘的角色检查在服务层完成，以便返回各自的落地页
pub fn configure_dashboard_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/dashboard")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(landing))
            .route("/teacher", web::get().to(teacher_dashboard))
            .route("/parent", web::get().to(parent_dashboard)),
    );
}
