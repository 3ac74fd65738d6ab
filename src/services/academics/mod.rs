pub mod subjects;
pub mod templates;
pub mod years;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::academics::requests::{
    CreateAcademicYearRequest, CreateReportCommentRequest, CreateSubjectRequest,
    ReportCommentQuery,
};
use crate::storage::Storage;

/// 学年、科目与评语模板目录
pub struct CatalogService {
    storage: Option<Arc<dyn Storage>>,
}

impl CatalogService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_academic_years(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        years::list_academic_years(self, request).await
    }

    pub async fn get_current_academic_year(
        &self,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        years::get_current_academic_year(self, request).await
    }

    pub async fn create_academic_year(
        &self,
        request: &HttpRequest,
        req: CreateAcademicYearRequest,
    ) -> ActixResult<HttpResponse> {
        years::create_academic_year(self, request, req).await
    }

    // 切换当前学年
    pub async fn set_current_academic_year(
        &self,
        request: &HttpRequest,
        year_id: i64,
    ) -> ActixResult<HttpResponse> {
        years::set_current_academic_year(self, request, year_id).await
    }

    pub async fn list_subjects(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        subjects::list_subjects(self, request).await
    }

    pub async fn create_subject(
        &self,
        request: &HttpRequest,
        req: CreateSubjectRequest,
    ) -> ActixResult<HttpResponse> {
        subjects::create_subject(self, request, req).await
    }

    pub async fn list_comment_templates(
        &self,
        request: &HttpRequest,
        query: ReportCommentQuery,
    ) -> ActixResult<HttpResponse> {
        templates::list_comment_templates(self, request, query).await
    }

    pub async fn create_comment_template(
        &self,
        request: &HttpRequest,
        req: CreateReportCommentRequest,
    ) -> ActixResult<HttpResponse> {
        templates::create_comment_template(self, request, req).await
    }
}
