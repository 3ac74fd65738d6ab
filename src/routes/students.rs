use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::assessments::requests::{RecordResultRequest, UpdateResultRequest};
use crate::models::users::entities::UserRole;
use crate::services::{ResultService, StudentService};
use crate::utils::{SafeResultIdI64, SafeStudentIdI64};

static STUDENT_SERVICE: Lazy<StudentService> = Lazy::new(StudentService::new_lazy);
static RESULT_SERVICE: Lazy<ResultService> = Lazy::new(ResultService::new_lazy);

pub async fn get_profile(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.get_profile(&req, student_id.0).await
}

pub async fn get_results(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.get_results(&req, student_id.0).await
}

pub async fn download_report(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.download_report(&req, student_id.0).await
}

pub async fn delete_student(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.delete_student(&req, student_id.0).await
}

pub async fn add_result_context(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE.add_result_context(&req, student_id.0).await
}

pub async fn record_result(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
    result_data: web::Json<RecordResultRequest>,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE
        .record_result(&req, student_id.0, result_data.into_inner())
        .await
}

pub async fn update_result(
    req: HttpRequest,
    result_id: SafeResultIdI64,
    update_data: web::Json<UpdateResultRequest>,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE
        .update_result(&req, result_id.0, update_data.into_inner())
        .await
}

// 配置路由：学生档案、成绩与成绩单
pub fn configure_students_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/students")
            .wrap(middlewares::RequireJWT)
            .route(
                "/{student_id}",
                web::delete()
                    .to(delete_student)
                    .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
            )
            .route(
                "/{student_id}/profile",
                web::get()
                    .to(get_profile)
                    .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
            )
            .service(
                web::resource("/{student_id}/add-result")
                    .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
                    .route(web::get().to(add_result_context))
                    .route(web::post().to(record_result)),
            )
            // 家长区域由服务层检查，越权时返回落地页
            .route("/{student_id}/results", web::get().to(get_results))
            .route(
                "/{student_id}/download-report",
                web::get().to(download_report),
            ),
    )
    .service(
        web::scope("/api/v1/results")
            .wrap(middlewares::RequireJWT)
            .route(
                "/{result_id}",
                web::put()
                    .to(update_result)
                    .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
            ),
    );
}
