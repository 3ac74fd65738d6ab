pub mod landing;
pub mod parent;
pub mod teacher;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::storage::Storage;

/// 仪表盘上显示的最近成绩条数
pub const RECENT_RESULTS_LIMIT: u64 = 5;

pub struct DashboardService {
    storage: Option<Arc<dyn Storage>>,
}

impl DashboardService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    // 按角色返回落地页
    pub async fn landing(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        landing::landing(request).await
    }

    pub async fn teacher_dashboard(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        teacher::teacher_dashboard(self, request).await
    }

    pub async fn parent_dashboard(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        parent::parent_dashboard(self, request).await
    }
}
