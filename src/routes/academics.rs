use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::academics::requests::{
    CreateAcademicYearRequest, CreateReportCommentRequest, CreateSubjectRequest,
    ReportCommentQuery,
};
use crate::models::users::entities::UserRole;
use crate::services::CatalogService;
use crate::utils::SafeAcademicYearIdI64;

static CATALOG_SERVICE: Lazy<CatalogService> = Lazy::new(CatalogService::new_lazy);

pub async fn list_academic_years(req: HttpRequest) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE.list_academic_years(&req).await
}

pub async fn get_current_academic_year(req: HttpRequest) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE.get_current_academic_year(&req).await
}

pub async fn create_academic_year(
    req: HttpRequest,
    year_data: web::Json<CreateAcademicYearRequest>,
) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE
        .create_academic_year(&req, year_data.into_inner())
        .await
}

pub async fn set_current_academic_year(
    req: HttpRequest,
    year_id: SafeAcademicYearIdI64,
) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE
        .set_current_academic_year(&req, year_id.0)
        .await
}

pub async fn list_subjects(req: HttpRequest) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE.list_subjects(&req).await
}

pub async fn create_subject(
    req: HttpRequest,
    subject_data: web::Json<CreateSubjectRequest>,
) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE
        .create_subject(&req, subject_data.into_inner())
        .await
}

pub async fn list_comment_templates(
    req: HttpRequest,
    query: web::Query<ReportCommentQuery>,
) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE
        .list_comment_templates(&req, query.into_inner())
        .await
}

pub async fn create_comment_template(
    req: HttpRequest,
    template_data: web::Json<CreateReportCommentRequest>,
) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE
        .create_comment_template(&req, template_data.into_inner())
        .await
}

// 配置路由：学年、科目、评语模板
pub fn configure_academics_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/academic-years")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_academic_years))
                    .route(
                        web::post()
                            .to(create_academic_year)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            )
            .route("/current", web::get().to(get_current_academic_year))
            .route(
                "/{year_id}/current",
                web::put()
                    .to(set_current_academic_year)
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
            ),
    )
    .service(
        web::scope("/api/v1/subjects")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_subjects))
                    .route(
                        web::post()
                            .to(create_subject)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            ),
    )
    .service(
        web::scope("/api/v1/comment-templates")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(
                        web::get()
                            .to(list_comment_templates)
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    )
                    .route(
                        web::post()
                            .to(create_comment_template)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            ),
    );
}
