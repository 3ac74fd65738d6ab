//! 路径参数提取器
//!
//! 从 `match_info` 中读取 ID 并校验为正整数，失败时直接返回 400。

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

fn parse_positive_id(req: &HttpRequest, name: &str) -> Result<i64, actix_web::Error> {
    let raw = req.match_info().get(name).unwrap_or_default();
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => {
            let message = format!("Invalid path parameter '{name}': '{raw}'");
            let response = HttpResponse::BadRequest()
                .json(ApiResponse::<()>::error_empty(ErrorCode::BadRequest, &message));
            Err(InternalError::from_response(message, response).into())
        }
    }
}

macro_rules! define_safe_id {
    ($($(#[$meta:meta])* $name:ident => $param:literal),+ $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq)]
            pub struct $name(pub i64);

            impl FromRequest for $name {
                type Error = actix_web::Error;
                type Future = Ready<Result<Self, Self::Error>>;

                fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                    ready(parse_positive_id(req, $param).map($name))
                }
            }
        )+
    };
}

define_safe_id! {
    SafeClassIdI64 => "class_id",
    SafeStudentIdI64 => "student_id",
    SafeResultIdI64 => "result_id",
    SafeAssignmentIdI64 => "assignment_id",
    SafeSubmissionIdI64 => "submission_id",
    SafeContactIdI64 => "contact_id",
    SafeAcademicYearIdI64 => "year_id",
    SafeSubjectIdI64 => "subject_id",
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_accepts_positive_id() {
        let (req, mut payload) = TestRequest::default()
            .param("class_id", "12")
            .to_http_parts();
        let id = SafeClassIdI64::from_request(&req, &mut payload).await.unwrap();
        assert_eq!(id.0, 12);
    }

    #[actix_web::test]
    async fn test_rejects_bad_ids() {
        for raw in ["0", "-3", "abc", ""] {
            let (req, mut payload) = TestRequest::default()
                .param("student_id", raw)
                .to_http_parts();
            assert!(
                SafeStudentIdI64::from_request(&req, &mut payload)
                    .await
                    .is_err()
            );
        }
    }
}
