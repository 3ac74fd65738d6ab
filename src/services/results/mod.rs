pub mod context;
pub mod record;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::assessments::requests::{RecordResultRequest, UpdateResultRequest};
use crate::storage::Storage;

/// 评估结果录入与修改
pub struct ResultService {
    storage: Option<Arc<dyn Storage>>,
}

impl ResultService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    // 录入表单上下文
    pub async fn add_result_context(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        context::add_result_context(self, request, student_id).await
    }

    pub async fn record_result(
        &self,
        request: &HttpRequest,
        student_id: i64,
        req: RecordResultRequest,
    ) -> ActixResult<HttpResponse> {
        record::record_result(self, request, student_id, req).await
    }

    pub async fn update_result(
        &self,
        request: &HttpRequest,
        result_id: i64,
        req: UpdateResultRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_result(self, request, result_id, req).await
    }
}
