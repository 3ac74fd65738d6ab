pub mod home;
pub mod list;
pub mod manage;
pub mod record;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::contacts::entities::ClassLevel;
use crate::models::contacts::requests::{
    ContactListParams, CreateContactRequest, UpdateContactRequest,
};
use crate::storage::Storage;
use crate::utils::validate::{validate_email, validate_phone, validate_required};

/// 教师私有的学生联系人名录
pub struct ContactService {
    storage: Option<Arc<dyn Storage>>,
}

impl ContactService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    pub async fn home(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        home::home(self, request).await
    }

    pub async fn select_class(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        home::select_class(request).await
    }

    pub async fn list_contacts(
        &self,
        request: &HttpRequest,
        query: ContactListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_contacts(self, request, query).await
    }

    pub async fn level_context(
        &self,
        request: &HttpRequest,
        class_level: &str,
    ) -> ActixResult<HttpResponse> {
        record::level_context(self, request, class_level).await
    }

    pub async fn create_contact(
        &self,
        request: &HttpRequest,
        class_level: &str,
        req: CreateContactRequest,
    ) -> ActixResult<HttpResponse> {
        record::create_contact(self, request, class_level, req).await
    }

    pub async fn update_contact(
        &self,
        request: &HttpRequest,
        contact_id: i64,
        req: UpdateContactRequest,
    ) -> ActixResult<HttpResponse> {
        manage::update_contact(self, request, contact_id, req).await
    }

    pub async fn delete_contact(
        &self,
        request: &HttpRequest,
        contact_id: i64,
    ) -> ActixResult<HttpResponse> {
        manage::delete_contact(self, request, contact_id).await
    }
}

pub(crate) fn parse_class_level(raw: &str) -> Result<ClassLevel, String> {
    raw.parse::<ClassLevel>()
}

/// 校验联系人字段；`None` 表示该字段未修改
pub(crate) fn validate_contact_fields(
    names: &[(Option<&str>, &'static str)],
    phone: Option<&str>,
    email: Option<&str>,
) -> Result<(), String> {
    for &(value, field) in names {
        if let Some(value) = value {
            validate_required(value, field)?;
        }
    }
    if let Some(phone) = phone {
        validate_phone(phone).map_err(|e| e.to_string())?;
    }
    if let Some(email) = email.filter(|e| !e.is_empty()) {
        validate_email(email).map_err(|e| e.to_string())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_class_level() {
        assert_eq!(parse_class_level("grade_3"), Ok(ClassLevel::Grade3));
        assert!(parse_class_level("grade_12").is_err());
    }

    #[test]
    fn test_validate_contact_fields() {
        assert!(
            validate_contact_fields(
                &[(Some("Amani"), "Child first name")],
                Some("+254712345678"),
                Some(""),
            )
            .is_ok()
        );
        assert!(validate_contact_fields(&[(Some("  "), "Parent name")], None, None).is_err());
        assert!(validate_contact_fields(&[(None, "Parent name")], Some("call me"), None).is_err());
        assert!(validate_contact_fields(&[], None, Some("not-an-email")).is_err());
    }
}
