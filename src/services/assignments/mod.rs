pub mod create;
pub mod delete;
pub mod detail;
pub mod list;
pub mod submit;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::{error_response, not_found};
use crate::models::ErrorCode;
use crate::models::assignments::entities::SubjectAssignment;
use crate::models::assignments::requests::{
    AssignmentListParams, CreateAssignmentRequest, SubmitAssignmentRequest,
    UpdateAssignmentRequest,
};
use crate::storage::Storage;

pub struct AssignmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl AssignmentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    // 作业列表（已发布的 + 自己创建的）
    pub async fn list_assignments(
        &self,
        request: &HttpRequest,
        query: AssignmentListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_assignments(self, request, query).await
    }

    pub async fn create_context(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        create::create_context(self, request).await
    }

    pub async fn create_assignment(
        &self,
        request: &HttpRequest,
        req: CreateAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_assignment(self, request, req).await
    }

    pub async fn get_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_assignment(self, request, assignment_id).await
    }

    pub async fn update_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
        req: UpdateAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_assignment(self, request, assignment_id, req).await
    }

    // 删除作业，提交一并删除
    pub async fn delete_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_assignment(self, request, assignment_id).await
    }

    // 提交表单：列出家长的孩子及各自的提交状态
    pub async fn submit_context(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        submit::submit_context(self, request, assignment_id).await
    }

    pub async fn submit_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
        req: SubmitAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit_assignment(self, request, assignment_id, req).await
    }
}

pub(crate) async fn load_assignment(
    storage: &Arc<dyn Storage>,
    assignment_id: i64,
) -> Result<SubjectAssignment, HttpResponse> {
    match storage.get_assignment_by_id(assignment_id).await {
        Ok(Some(assignment)) => Ok(assignment),
        Ok(None) => Err(not_found(
            ErrorCode::AssignmentNotFound,
            "Assignment not found",
        )),
        Err(e) => Err(error_response(&e, ErrorCode::Conflict)),
    }
}

/// 科目必须存在
pub(crate) async fn ensure_subject(
    storage: &Arc<dyn Storage>,
    subject_id: i64,
) -> Result<(), HttpResponse> {
    match storage.get_subject_by_id(subject_id).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(not_found(ErrorCode::SubjectNotFound, "Subject not found")),
        Err(e) => Err(error_response(&e, ErrorCode::Conflict)),
    }
}
