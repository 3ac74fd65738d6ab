/*!
 * 基于角色的访问控制中间件
 *
 * 必须在 RequireJWT 之后使用，只做粗粒度的角色判断；
 * 班级归属、家长关系等细粒度规则由服务层的访问控制模块负责。
 * 角色不符时与服务层一样返回 403，并带上该角色落地页的跳转提示。
 *
 * ```rust,ignore
 * web::scope("/api/v1/student-contact")
 *     .wrap(RequireRole::new(&UserRole::Teacher))
 *     .wrap(RequireJWT)
 * ```
 *
 * 多个角色任一即可：
 *
 * ```rust,ignore
 * .wrap(RequireRole::new_any(UserRole::staff_roles()))
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use crate::models::{
    ErrorCode,
    users::entities::{User, UserRole},
};
use crate::services::access::{ACCESS_DENIED, Denial};
use crate::services::denial_response;

use super::create_error_response;

#[derive(Clone)]
pub struct RequireRole {
    allowed_roles: Vec<UserRole>,
}

impl RequireRole {
    /// 只允许单一角色
    pub fn new(role: &UserRole) -> Self {
        Self {
            allowed_roles: vec![*role],
        }
    }

    /// 允许任一角色
    pub fn new_any(roles: &[&UserRole]) -> Self {
        Self {
            allowed_roles: roles.iter().map(|r| **r).collect(),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            allowed_roles: self.allowed_roles.clone(),
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    allowed_roles: Vec<UserRole>,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let allowed_roles = self.allowed_roles.clone();

        Box::pin(async move {
            let user = req.extensions().get::<User>().cloned();

            match user {
                Some(user) if allowed_roles.contains(&user.role) => {
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Some(user) => {
                    info!(
                        "Role {} not in allowed roles {:?}",
                        user.role, allowed_roles
                    );
                    // 与服务层拒绝一致：403 并指回该角色的落地页
                    let denial = Denial::new(user.role, ACCESS_DENIED);
                    Ok(req.into_response(
                        denial_response(&user, denial).map_into_right_body(),
                    ))
                }
                None => {
                    info!(
                        "Role check failed: no user in request extensions. Make sure RequireJWT middleware is applied first."
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            "Authentication required",
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::access::{DEFAULT_LANDING, PARENT_LANDING};
    use actix_web::{App, HttpResponse, http::header::LOCATION, test, web};

    fn user_with(role: UserRole) -> User {
        User {
            id: 7,
            username: "member7".to_string(),
            role,
            first_name: String::new(),
            last_name: String::new(),
            email: None,
            phone_number: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    // 在 RequireRole 之前注入指定角色的用户
    async fn call_as(role: UserRole) -> ServiceResponse {
        let app = test::init_service(
            App::new().service(
                web::resource("/gated")
                    .wrap(RequireRole::new_any(UserRole::teacher_roles()))
                    .wrap_fn(move |req, srv| {
                        req.extensions_mut().insert(user_with(role));
                        srv.call(req)
                    })
                    .route(web::get().to(|| async { HttpResponse::Ok().finish() })),
            ),
        )
        .await;
        test::call_service(&app, test::TestRequest::get().uri("/gated").to_request())
            .await
            .map_into_boxed_body()
    }

    #[actix_web::test]
    async fn test_allowed_role_passes_through() {
        let resp = call_as(UserRole::Teacher).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_wrong_role_redirects_to_own_landing() {
        let resp = call_as(UserRole::Parent).await;

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert_eq!(resp.headers().get(LOCATION).unwrap(), PARENT_LANDING);

        let json: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(json["code"], ErrorCode::Forbidden as i32);
        assert_eq!(json["data"]["redirect_to"], PARENT_LANDING);
        assert_eq!(json["message"], ACCESS_DENIED);
    }

    #[actix_web::test]
    async fn test_admin_on_teacher_route_redirects_to_dashboard() {
        let resp = call_as(UserRole::Admin).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert_eq!(resp.headers().get(LOCATION).unwrap(), DEFAULT_LANDING);
    }

    #[actix_web::test]
    async fn test_missing_user_is_unauthorized() {
        let app = test::init_service(
            App::new().service(
                web::resource("/gated")
                    .wrap(RequireRole::new(&UserRole::Teacher))
                    .route(web::get().to(|| async { HttpResponse::Ok().finish() })),
            ),
        )
        .await;
        let resp = test::call_service(&app, test::TestRequest::get().uri("/gated").to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert!(resp.headers().get(LOCATION).is_none());
    }
}
