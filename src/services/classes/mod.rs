pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod students;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::access::{Operation, Target, authorize};
use super::{denial_response, error_response, not_found};
use crate::models::ErrorCode;
use crate::models::classes::entities::SchoolClass;
use crate::models::classes::requests::{ClassQueryParams, CreateClassRequest, UpdateClassRequest};
use crate::models::students::requests::CreateStudentRequest;
use crate::models::users::entities::User;
use crate::storage::Storage;

pub struct ClassService {
    storage: Option<Arc<dyn Storage>>,
}

impl ClassService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    // 获取班级列表
    pub async fn list_classes(
        &self,
        request: &HttpRequest,
        query: ClassQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_classes(self, request, query).await
    }

    pub async fn create_class(
        &self,
        request: &HttpRequest,
        class_data: CreateClassRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_class(self, request, class_data).await
    }

    // 班级花名册
    pub async fn get_class(
        &self,
        request: &HttpRequest,
        class_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_class(self, request, class_id).await
    }

    // 更新班级信息
    pub async fn update_class(
        &self,
        request: &HttpRequest,
        class_id: i64,
        update_data: UpdateClassRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_class(self, request, class_id, update_data).await
    }

    // 删除班级（级联删除学生、成绩与提交）
    pub async fn delete_class(
        &self,
        request: &HttpRequest,
        class_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_class(self, request, class_id).await
    }

    // 向班级添加学生
    pub async fn add_student(
        &self,
        request: &HttpRequest,
        class_id: i64,
        student_data: CreateStudentRequest,
    ) -> ActixResult<HttpResponse> {
        students::add_student(self, request, class_id, student_data).await
    }
}

/// 加载班级并检查调用者对其的操作权限
pub(crate) async fn load_class_for(
    storage: &Arc<dyn Storage>,
    actor: &User,
    class_id: i64,
    operation: Operation,
) -> Result<SchoolClass, HttpResponse> {
    let class = match storage.get_class_by_id(class_id).await {
        Ok(Some(class)) => class,
        Ok(None) => return Err(not_found(ErrorCode::ClassNotFound, "Class not found")),
        Err(e) => return Err(error_response(&e, ErrorCode::Conflict)),
    };

    authorize(actor, &Target::Class(&class), operation)
        .map_err(|denial| denial_response(actor, denial))?;

    Ok(class)
}
