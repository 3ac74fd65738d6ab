//! 学生存储操作

use super::SeaOrmStorage;
use super::classes::delete_students_cascade;
use crate::entity::prelude::*;
use crate::entity::students::Column;
use crate::errors::{Result, SchoolError};
use crate::models::students::{entities::Student, requests::CreateStudentRequest};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 在班级中创建学生
    pub async fn create_student_impl(
        &self,
        class_id: i64,
        req: CreateStudentRequest,
    ) -> Result<Student> {
        let model = StudentActiveModel {
            student_id: Set(req.student_id),
            first_name: Set(req.first_name),
            last_name: Set(req.last_name),
            class_id: Set(class_id),
            date_of_birth: Set(req.date_of_birth),
            parent_id: Set(req.parent_id),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("创建学生", e))?;

        Ok(result.into_student())
    }

    pub async fn get_student_by_id_impl(&self, id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询学生", e))?;

        Ok(result.map(|m| m.into_student()))
    }

    pub async fn list_students_by_class_impl(&self, class_id: i64) -> Result<Vec<Student>> {
        let models = Students::find()
            .filter(Column::ClassId.eq(class_id))
            .order_by_asc(Column::LastName)
            .order_by_asc(Column::FirstName)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询班级学生", e))?;

        Ok(models.into_iter().map(|m| m.into_student()).collect())
    }

    pub async fn list_students_by_parent_impl(&self, parent_id: i64) -> Result<Vec<Student>> {
        let models = Students::find()
            .filter(Column::ParentId.eq(parent_id))
            .order_by_asc(Column::FirstName)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询家长的学生", e))?;

        Ok(models.into_iter().map(|m| m.into_student()).collect())
    }

    /// 删除学生，成绩与作业提交在同一事务内一并删除
    pub async fn delete_student_impl(&self, id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::from_db("开启事务", e))?;

        let deleted = delete_students_cascade(&txn, vec![id]).await?;

        txn.commit()
            .await
            .map_err(|e| SchoolError::from_db("提交事务", e))?;

        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::super::testing::{memory_storage, user};
    use crate::models::students::requests::CreateStudentRequest;
    use crate::models::users::entities::UserRole;
    use crate::storage::Storage;

    fn req(student_id: &str, first: &str, parent_id: Option<i64>) -> CreateStudentRequest {
        CreateStudentRequest {
            student_id: student_id.to_string(),
            first_name: first.to_string(),
            last_name: "Wanjiru".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(2016, 1, 30).unwrap(),
            parent_id,
        }
    }

    #[tokio::test]
    async fn test_student_id_is_unique() {
        let storage = memory_storage().await;
        let teacher = user(&storage, "teacher1", UserRole::Teacher).await;
        let year = storage.create_academic_year("2024-2025", true).await.unwrap();
        let class = storage.create_class("Grade 3", teacher.id, year.id).await.unwrap();

        storage.create_student(class.id, req("S100", "Baraka", None)).await.unwrap();
        let err = storage
            .create_student(class.id, req("S100", "Zawadi", None))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E014");
    }

    #[tokio::test]
    async fn test_parent_may_have_several_children() {
        let storage = memory_storage().await;
        let teacher = user(&storage, "teacher1", UserRole::Teacher).await;
        let parent = user(&storage, "parent1", UserRole::Parent).await;
        let year = storage.create_academic_year("2024-2025", true).await.unwrap();
        let class = storage.create_class("Grade 3", teacher.id, year.id).await.unwrap();

        storage
            .create_student(class.id, req("S100", "Zawadi", Some(parent.id)))
            .await
            .unwrap();
        storage
            .create_student(class.id, req("S101", "Baraka", Some(parent.id)))
            .await
            .unwrap();
        storage.create_student(class.id, req("S102", "Imani", None)).await.unwrap();

        let children = storage.list_students_by_parent(parent.id).await.unwrap();
        let names: Vec<_> = children.iter().map(|s| s.first_name.as_str()).collect();
        assert_eq!(names, vec!["Baraka", "Zawadi"]);

        assert_eq!(storage.list_students_by_class(class.id).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_delete_student() {
        let storage = memory_storage().await;
        let teacher = user(&storage, "teacher1", UserRole::Teacher).await;
        let year = storage.create_academic_year("2024-2025", true).await.unwrap();
        let class = storage.create_class("Grade 3", teacher.id, year.id).await.unwrap();
        let student = storage.create_student(class.id, req("S1", "Imani", None)).await.unwrap();

        assert!(storage.delete_student(student.id).await.unwrap());
        assert!(!storage.delete_student(student.id).await.unwrap());
    }
}
