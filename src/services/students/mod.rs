pub mod delete;
pub mod profile;
pub mod report;
pub mod results;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::access::{Operation, Target, authorize};
use super::{denial_response, load_student_with_class};
use crate::models::{
    classes::entities::SchoolClass, students::entities::Student, users::entities::User,
};
use crate::storage::Storage;

pub struct StudentService {
    storage: Option<Arc<dyn Storage>>,
}

impl StudentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    // 学生档案
    pub async fn get_profile(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        profile::get_profile(self, request, student_id).await
    }

    // 家长查看孩子的成绩
    pub async fn get_results(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        results::get_results(self, request, student_id).await
    }

    // 下载成绩单 PDF
    pub async fn download_report(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        report::download_report(self, request, student_id).await
    }

    pub async fn delete_student(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_student(self, request, student_id).await
    }
}

/// 加载学生并按给定目标检查权限
pub(crate) async fn load_student_for(
    storage: &Arc<dyn Storage>,
    actor: &User,
    student_id: i64,
    operation: Operation,
    as_result: bool,
) -> Result<(Student, SchoolClass), HttpResponse> {
    let (student, class) = load_student_with_class(storage, student_id).await?;

    let target = if as_result {
        Target::Result {
            student: &student,
            class: &class,
        }
    } else {
        Target::Student {
            student: &student,
            class: &class,
        }
    };
    authorize(actor, &target, operation).map_err(|denial| denial_response(actor, denial))?;

    Ok((student, class))
}
