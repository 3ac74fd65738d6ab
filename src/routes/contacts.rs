use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::contacts::requests::{
    ContactListParams, CreateContactRequest, UpdateContactRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::ContactService;
use crate::utils::SafeContactIdI64;

static CONTACT_SERVICE: Lazy<ContactService> = Lazy::new(ContactService::new_lazy);

pub async fn home(req: HttpRequest) -> ActixResult<HttpResponse> {
    CONTACT_SERVICE.home(&req).await
}

pub async fn select_class(req: HttpRequest) -> ActixResult<HttpResponse> {
    CONTACT_SERVICE.select_class(&req).await
}

pub async fn list_contacts(
    req: HttpRequest,
    query: web::Query<ContactListParams>,
) -> ActixResult<HttpResponse> {
    CONTACT_SERVICE.list_contacts(&req, query.into_inner()).await
}

pub async fn level_context(
    req: HttpRequest,
    class_level: web::Path<String>,
) -> ActixResult<HttpResponse> {
    CONTACT_SERVICE.level_context(&req, &class_level).await
}

pub async fn create_contact(
    req: HttpRequest,
    class_level: web::Path<String>,
    contact_data: web::Json<CreateContactRequest>,
) -> ActixResult<HttpResponse> {
    CONTACT_SERVICE
        .create_contact(&req, &class_level, contact_data.into_inner())
        .await
}

pub async fn update_contact(
    req: HttpRequest,
    contact_id: SafeContactIdI64,
    update_data: web::Json<UpdateContactRequest>,
) -> ActixResult<HttpResponse> {
    CONTACT_SERVICE
        .update_contact(&req, contact_id.0, update_data.into_inner())
        .await
}

pub async fn delete_contact(
    req: HttpRequest,
    contact_id: SafeContactIdI64,
) -> ActixResult<HttpResponse> {
    CONTACT_SERVICE.delete_contact(&req, contact_id.0).await
}

// 配置路由：教师的学生联系人名录
pub fn configure_contacts_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/student-contact")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(home))
            .route("/select-class", web::get().to(select_class))
            .route("/list", web::get().to(list_contacts))
            .service(
                web::resource("/records/{contact_id}")
                    .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
                    .route(web::put().to(update_contact))
                    .route(web::delete().to(delete_contact)),
            )
            .service(
                web::resource("/{class_level}")
                    .route(web::get().to(level_context))
                    .route(web::post().to(create_contact)),
            ),
    );
}
