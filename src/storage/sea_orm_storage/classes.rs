//! 班级存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::prelude::*;
use crate::entity::{assessment_results, assignment_submissions, school_classes, students};
use crate::errors::{Result, SchoolError};
use crate::models::classes::{
    entities::SchoolClass, requests::UpdateClassRequest, responses::ClassSummary,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

/// 删除若干学生及其成绩与作业提交（调用方负责事务）
pub(super) async fn delete_students_cascade<C: ConnectionTrait>(
    conn: &C,
    student_ids: Vec<i64>,
) -> Result<u64> {
    if student_ids.is_empty() {
        return Ok(0);
    }

    AssignmentSubmissions::delete_many()
        .filter(assignment_submissions::Column::StudentId.is_in(student_ids.clone()))
        .exec(conn)
        .await
        .map_err(|e| SchoolError::from_db("删除作业提交", e))?;
    AssessmentResults::delete_many()
        .filter(assessment_results::Column::StudentId.is_in(student_ids.clone()))
        .exec(conn)
        .await
        .map_err(|e| SchoolError::from_db("删除评估结果", e))?;
    let deleted = Students::delete_many()
        .filter(students::Column::Id.is_in(student_ids))
        .exec(conn)
        .await
        .map_err(|e| SchoolError::from_db("删除学生", e))?;

    Ok(deleted.rows_affected)
}

impl SeaOrmStorage {
    /// 创建班级
    pub async fn create_class_impl(
        &self,
        name: &str,
        teacher_id: i64,
        academic_year_id: i64,
    ) -> Result<SchoolClass> {
        let now = chrono::Utc::now().timestamp();

        let model = SchoolClassActiveModel {
            name: Set(name.to_string()),
            teacher_id: Set(teacher_id),
            academic_year_id: Set(academic_year_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("创建班级", e))?;

        Ok(result.into_class())
    }

    /// 通过 ID 获取班级
    pub async fn get_class_by_id_impl(&self, class_id: i64) -> Result<Option<SchoolClass>> {
        let result = SchoolClasses::find_by_id(class_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询班级", e))?;

        Ok(result.map(|m| m.into_class()))
    }

    /// 列出班级及各班学生人数
    pub async fn list_classes_impl(
        &self,
        teacher_id: Option<i64>,
        academic_year_id: Option<i64>,
    ) -> Result<Vec<ClassSummary>> {
        let mut select = SchoolClasses::find();
        if let Some(teacher_id) = teacher_id {
            select = select.filter(school_classes::Column::TeacherId.eq(teacher_id));
        }
        if let Some(year_id) = academic_year_id {
            select = select.filter(school_classes::Column::AcademicYearId.eq(year_id));
        }

        let classes = select
            .order_by_asc(school_classes::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询班级列表", e))?;

        let class_ids: Vec<i64> = classes.iter().map(|c| c.id).collect();
        let counts: HashMap<i64, i64> = if class_ids.is_empty() {
            HashMap::new()
        } else {
            Students::find()
                .select_only()
                .column(students::Column::ClassId)
                .column_as(students::Column::Id.count(), "student_count")
                .filter(students::Column::ClassId.is_in(class_ids))
                .group_by(students::Column::ClassId)
                .into_tuple::<(i64, i64)>()
                .all(&self.db)
                .await
                .map_err(|e| SchoolError::from_db("统计学生人数", e))?
                .into_iter()
                .collect()
        };

        Ok(classes
            .into_iter()
            .map(|m| {
                let student_count = counts.get(&m.id).copied().unwrap_or(0) as u64;
                ClassSummary {
                    class: m.into_class(),
                    student_count,
                }
            })
            .collect())
    }

    /// 更新班级信息
    pub async fn update_class_impl(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<SchoolClass>> {
        let Some(existing) = SchoolClasses::find_by_id(class_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询班级", e))?
        else {
            return Ok(None);
        };

        let mut model = existing.into_active_model();
        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(teacher_id) = update.teacher_id {
            model.teacher_id = Set(teacher_id);
        }
        if let Some(year_id) = update.academic_year_id {
            model.academic_year_id = Set(year_id);
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("更新班级", e))?;

        Ok(Some(result.into_class()))
    }

    /// 删除班级，学生、成绩与作业提交在同一事务内一并删除
    pub async fn delete_class_impl(&self, class_id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::from_db("开启事务", e))?;

        let student_ids: Vec<i64> = Students::find()
            .select_only()
            .column(students::Column::Id)
            .filter(students::Column::ClassId.eq(class_id))
            .into_tuple()
            .all(&txn)
            .await
            .map_err(|e| SchoolError::from_db("查询班级学生", e))?;

        delete_students_cascade(&txn, student_ids).await?;

        let result = SchoolClasses::delete_by_id(class_id)
            .exec(&txn)
            .await
            .map_err(|e| SchoolError::from_db("删除班级", e))?;

        txn.commit()
            .await
            .map_err(|e| SchoolError::from_db("提交事务", e))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, Utc};

    use super::super::testing::{memory_storage, user};
    use crate::models::academics::requests::CreateSubjectRequest;
    use crate::models::assessments::entities::{PerformanceLevel, Term};
    use crate::models::assessments::requests::NewAssessmentResult;
    use crate::models::assignments::entities::AssignmentType;
    use crate::models::assignments::requests::CreateAssignmentRequest;
    use crate::models::classes::requests::UpdateClassRequest;
    use crate::models::students::requests::CreateStudentRequest;
    use crate::models::users::entities::UserRole;
    use crate::storage::Storage;

    fn student_req(student_id: &str) -> CreateStudentRequest {
        CreateStudentRequest {
            student_id: student_id.to_string(),
            first_name: "Amani".to_string(),
            last_name: "Kamau".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(2015, 4, 12).unwrap(),
            parent_id: None,
        }
    }

    #[tokio::test]
    async fn test_class_name_unique_per_year() {
        let storage = memory_storage().await;
        let teacher = user(&storage, "teacher1", UserRole::Teacher).await;
        let y1 = storage.create_academic_year("2024-2025", true).await.unwrap();
        let y2 = storage.create_academic_year("2025-2026", false).await.unwrap();

        storage.create_class("Grade 5A", teacher.id, y1.id).await.unwrap();
        storage.create_class("Grade 5A", teacher.id, y2.id).await.unwrap();
        let err = storage
            .create_class("Grade 5A", teacher.id, y1.id)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E014");
    }

    #[tokio::test]
    async fn test_list_classes_counts_students() {
        let storage = memory_storage().await;
        let teacher = user(&storage, "teacher1", UserRole::Teacher).await;
        let other = user(&storage, "teacher2", UserRole::Teacher).await;
        let year = storage.create_academic_year("2024-2025", true).await.unwrap();
        let a = storage.create_class("Grade 5A", teacher.id, year.id).await.unwrap();
        storage.create_class("Grade 5B", teacher.id, year.id).await.unwrap();
        storage.create_class("Grade 6A", other.id, year.id).await.unwrap();

        storage.create_student(a.id, student_req("S001")).await.unwrap();
        storage.create_student(a.id, student_req("S002")).await.unwrap();

        let mine = storage.list_classes(Some(teacher.id), None).await.unwrap();
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].class.name, "Grade 5A");
        assert_eq!(mine[0].student_count, 2);
        assert_eq!(mine[1].student_count, 0);

        let all = storage.list_classes(None, Some(year.id)).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_update_class_keeps_unspecified_fields() {
        let storage = memory_storage().await;
        let teacher = user(&storage, "teacher1", UserRole::Teacher).await;
        let year = storage.create_academic_year("2024-2025", true).await.unwrap();
        let class = storage.create_class("Grade 5A", teacher.id, year.id).await.unwrap();

        let updated = storage
            .update_class(
                class.id,
                UpdateClassRequest {
                    name: Some("Grade 5 Blue".to_string()),
                    teacher_id: None,
                    academic_year_id: None,
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "Grade 5 Blue");
        assert_eq!(updated.teacher_id, teacher.id);

        let missing = storage
            .update_class(
                999,
                UpdateClassRequest {
                    name: Some("x".to_string()),
                    teacher_id: None,
                    academic_year_id: None,
                },
            )
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_delete_class_cascades() {
        let storage = memory_storage().await;
        let teacher = user(&storage, "teacher1", UserRole::Teacher).await;
        let parent = user(&storage, "parent1", UserRole::Parent).await;
        let year = storage.create_academic_year("2024-2025", true).await.unwrap();
        let subject = storage
            .create_subject(CreateSubjectRequest {
                name: "Mathematics".to_string(),
                code: "MATH".to_string(),
            })
            .await
            .unwrap();
        let class = storage.create_class("Grade 5A", teacher.id, year.id).await.unwrap();
        let keep = storage.create_class("Grade 5B", teacher.id, year.id).await.unwrap();

        let mut req = student_req("S001");
        req.parent_id = Some(parent.id);
        let student = storage.create_student(class.id, req).await.unwrap();
        let survivor = storage.create_student(keep.id, student_req("S002")).await.unwrap();

        let result = storage
            .create_result(NewAssessmentResult {
                student_id: student.id,
                subject_id: subject.id,
                term: Term::One,
                academic_year_id: year.id,
                performance_level: PerformanceLevel::Meeting,
                teacher_comment: String::new(),
                recorded_by: teacher.id,
            })
            .await
            .unwrap();

        let assignment = storage
            .create_assignment(
                teacher.id,
                year.id,
                CreateAssignmentRequest {
                    title: "Fractions worksheet".to_string(),
                    description: None,
                    subject_id: subject.id,
                    assignment_type: AssignmentType::Homework,
                    due_date: Utc::now() + Duration::days(7),
                    max_points: 20.0,
                    attachment: None,
                    academic_year_id: None,
                    is_published: true,
                },
            )
            .await
            .unwrap();
        let submission = storage
            .create_submission(
                assignment.id,
                student.id,
                parent.id,
                None,
                Some("done".to_string()),
            )
            .await
            .unwrap();

        assert!(storage.delete_class(class.id).await.unwrap());

        assert!(storage.get_class_by_id(class.id).await.unwrap().is_none());
        assert!(storage.get_student_by_id(student.id).await.unwrap().is_none());
        assert!(storage.get_result_by_id(result.id).await.unwrap().is_none());
        assert!(
            storage
                .get_submission_by_id(submission.id)
                .await
                .unwrap()
                .is_none()
        );
        assert!(storage.get_student_by_id(survivor.id).await.unwrap().is_some());
        assert!(storage.get_assignment_by_id(assignment.id).await.unwrap().is_some());

        assert!(!storage.delete_class(class.id).await.unwrap());
    }
}
