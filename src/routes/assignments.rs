use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::assignments::requests::{
    AssignmentListParams, CreateAssignmentRequest, GradeSubmissionRequest,
    SubmitAssignmentRequest, UpdateAssignmentRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::{AssignmentService, SubmissionService};
use crate::utils::{SafeAssignmentIdI64, SafeSubjectIdI64, SafeSubmissionIdI64};

static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);
static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

pub async fn list_assignments(
    req: HttpRequest,
    query: web::Query<AssignmentListParams>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .list_assignments(&req, query.into_inner())
        .await
}

pub async fn list_assignments_by_subject(
    req: HttpRequest,
    subject_id: SafeSubjectIdI64,
) -> ActixResult<HttpResponse> {
    let query = AssignmentListParams {
        subject_id: Some(subject_id.0),
    };
    ASSIGNMENT_SERVICE.list_assignments(&req, query).await
}

pub async fn create_context(req: HttpRequest) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.create_context(&req).await
}

pub async fn create_assignment(
    req: HttpRequest,
    assignment_data: web::Json<CreateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .create_assignment(&req, assignment_data.into_inner())
        .await
}

pub async fn get_assignment(
    req: HttpRequest,
    assignment_id: SafeAssignmentIdI64,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .get_assignment(&req, assignment_id.0)
        .await
}

pub async fn update_assignment(
    req: HttpRequest,
    assignment_id: SafeAssignmentIdI64,
    update_data: web::Json<UpdateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .update_assignment(&req, assignment_id.0, update_data.into_inner())
        .await
}

pub async fn delete_assignment(
    req: HttpRequest,
    assignment_id: SafeAssignmentIdI64,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .delete_assignment(&req, assignment_id.0)
        .await
}

pub async fn submit_context(
    req: HttpRequest,
    assignment_id: SafeAssignmentIdI64,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .submit_context(&req, assignment_id.0)
        .await
}

pub async fn submit_assignment(
    req: HttpRequest,
    assignment_id: SafeAssignmentIdI64,
    submission_data: web::Json<SubmitAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .submit_assignment(&req, assignment_id.0, submission_data.into_inner())
        .await
}

pub async fn grade_context(
    req: HttpRequest,
    submission_id: SafeSubmissionIdI64,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .grade_context(&req, submission_id.0)
        .await
}

pub async fn grade_submission(
    req: HttpRequest,
    submission_id: SafeSubmissionIdI64,
    grade_data: web::Json<GradeSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .grade_submission(&req, submission_id.0, grade_data.into_inner())
        .await
}

// 配置路由：作业与提交
pub fn configure_assignments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/assignments")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_assignments))
            .route(
                "/subject/{subject_id}",
                web::get().to(list_assignments_by_subject),
            )
            // 必须在 /{assignment_id} 之前注册
            .service(
                web::resource("/create")
                    .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
                    .route(web::get().to(create_context))
                    .route(web::post().to(create_assignment)),
            )
            .service(
                web::resource("/{assignment_id}")
                    .route(web::get().to(get_assignment))
                    .route(
                        web::put()
                            .to(update_assignment)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_assignment)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    ),
            )
            .service(
                web::resource("/{assignment_id}/submit")
                    .route(web::get().to(submit_context))
                    .route(web::post().to(submit_assignment)),
            ),
    )
    .service(
        web::scope("/api/v1/submissions")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/{submission_id}/grade")
                    .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
                    .route(web::get().to(grade_context))
                    .route(web::post().to(grade_submission)),
            ),
    );
}
