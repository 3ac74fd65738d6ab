//! 评估结果存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::prelude::*;
use crate::entity::{assessment_results, school_classes, students, subjects};
use crate::errors::{Result, SchoolError};
use crate::models::assessments::{
    entities::{AssessmentResult, AssessmentResultDetail},
    requests::{NewAssessmentResult, UpdateResultRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

fn student_name(model: &students::Model) -> String {
    format!("{} {}", model.first_name, model.last_name)
}

/// 组装带科目与学生名称的结果
fn into_details(
    rows: Vec<(assessment_results::Model, Option<subjects::Model>)>,
    names: &HashMap<i64, String>,
) -> Vec<AssessmentResultDetail> {
    rows.into_iter()
        .map(|(result, subject)| {
            let (subject_name, subject_code) = subject
                .map(|s| (s.name, s.code))
                .unwrap_or_default();
            let student_name = names.get(&result.student_id).cloned().unwrap_or_default();
            AssessmentResultDetail {
                result: result.into_result(),
                subject_name,
                subject_code,
                student_name,
            }
        })
        .collect()
}

impl SeaOrmStorage {
    /// 录入评估结果
    pub async fn create_result_impl(&self, new: NewAssessmentResult) -> Result<AssessmentResult> {
        let now = chrono::Utc::now().timestamp();

        let model = AssessmentResultActiveModel {
            student_id: Set(new.student_id),
            subject_id: Set(new.subject_id),
            term: Set(new.term.number()),
            academic_year_id: Set(new.academic_year_id),
            performance_level: Set(new.performance_level.to_string()),
            teacher_comment: Set(new.teacher_comment),
            recorded_by: Set(new.recorded_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("录入评估结果", e))?;

        Ok(result.into_result())
    }

    pub async fn get_result_by_id_impl(&self, id: i64) -> Result<Option<AssessmentResult>> {
        let result = AssessmentResults::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询评估结果", e))?;

        Ok(result.map(|m| m.into_result()))
    }

    /// 修改等级或评语，其余字段不变
    pub async fn update_result_impl(
        &self,
        id: i64,
        update: UpdateResultRequest,
    ) -> Result<Option<AssessmentResult>> {
        let Some(existing) = AssessmentResults::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询评估结果", e))?
        else {
            return Ok(None);
        };

        let mut model = existing.into_active_model();
        if let Some(level) = update.performance_level {
            model.performance_level = Set(level.to_string());
        }
        if let Some(comment) = update.teacher_comment {
            model.teacher_comment = Set(comment);
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("更新评估结果", e))?;

        Ok(Some(result.into_result()))
    }

    /// 学生的全部结果，按 (学期, 科目名称) 升序
    pub async fn list_results_for_student_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<AssessmentResultDetail>> {
        let Some(student) = Students::find_by_id(student_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询学生", e))?
        else {
            return Ok(Vec::new());
        };

        let rows = AssessmentResults::find()
            .filter(assessment_results::Column::StudentId.eq(student_id))
            .find_also_related(Subjects)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询学生成绩", e))?;

        let names = HashMap::from([(student.id, student_name(&student))]);
        let mut details = into_details(rows, &names);
        details.sort_by(|a, b| {
            a.result
                .term
                .cmp(&b.result.term)
                .then_with(|| a.subject_name.cmp(&b.subject_name))
        });
        Ok(details)
    }

    /// 教师所带班级学生的最近结果
    pub async fn list_recent_results_for_teacher_impl(
        &self,
        teacher_id: i64,
        limit: u64,
    ) -> Result<Vec<AssessmentResultDetail>> {
        let taught = Students::find()
            .inner_join(SchoolClasses)
            .filter(school_classes::Column::TeacherId.eq(teacher_id))
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询班级学生", e))?;

        self.recent_results_for(taught, limit).await
    }

    /// 家长名下学生的最近结果
    pub async fn list_recent_results_for_parent_impl(
        &self,
        parent_id: i64,
        limit: u64,
    ) -> Result<Vec<AssessmentResultDetail>> {
        let children = Students::find()
            .filter(students::Column::ParentId.eq(parent_id))
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询家长的学生", e))?;

        self.recent_results_for(children, limit).await
    }

    pub async fn count_results_for_teacher_impl(&self, teacher_id: i64) -> Result<u64> {
        let student_ids: Vec<i64> = Students::find()
            .select_only()
            .column(students::Column::Id)
            .inner_join(SchoolClasses)
            .filter(school_classes::Column::TeacherId.eq(teacher_id))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询班级学生", e))?;

        if student_ids.is_empty() {
            return Ok(0);
        }

        AssessmentResults::find()
            .filter(assessment_results::Column::StudentId.is_in(student_ids))
            .count(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("统计评估结果", e))
    }

    async fn recent_results_for(
        &self,
        scope: Vec<students::Model>,
        limit: u64,
    ) -> Result<Vec<AssessmentResultDetail>> {
        if scope.is_empty() {
            return Ok(Vec::new());
        }

        let names: HashMap<i64, String> = scope.iter().map(|s| (s.id, student_name(s))).collect();
        let student_ids: Vec<i64> = names.keys().copied().collect();

        let rows = AssessmentResults::find()
            .filter(assessment_results::Column::StudentId.is_in(student_ids))
            .order_by_desc(assessment_results::Column::CreatedAt)
            .order_by_desc(assessment_results::Column::Id)
            .limit(limit)
            .find_also_related(Subjects)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询最近成绩", e))?;

        Ok(into_details(rows, &names))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::super::testing::{memory_storage, user};
    use crate::models::academics::requests::CreateSubjectRequest;
    use crate::models::assessments::entities::{PerformanceLevel, Term};
    use crate::models::assessments::requests::{NewAssessmentResult, UpdateResultRequest};
    use crate::models::students::requests::CreateStudentRequest;
    use crate::models::users::entities::UserRole;
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::SeaOrmStorage;

    struct Fixture {
        storage: SeaOrmStorage,
        teacher_id: i64,
        parent_id: i64,
        year_id: i64,
        student_id: i64,
        math_id: i64,
        english_id: i64,
    }

    async fn fixture() -> Fixture {
        let storage = memory_storage().await;
        let teacher = user(&storage, "teacher1", UserRole::Teacher).await;
        let parent = user(&storage, "parent1", UserRole::Parent).await;
        let year = storage.create_academic_year("2024-2025", true).await.unwrap();
        let class = storage.create_class("Grade 5A", teacher.id, year.id).await.unwrap();
        let student = storage
            .create_student(
                class.id,
                CreateStudentRequest {
                    student_id: "S001".to_string(),
                    first_name: "Amani".to_string(),
                    last_name: "Otieno".to_string(),
                    date_of_birth: NaiveDate::from_ymd_opt(2014, 9, 3).unwrap(),
                    parent_id: Some(parent.id),
                },
            )
            .await
            .unwrap();
        let math = storage
            .create_subject(CreateSubjectRequest {
                name: "Mathematics".to_string(),
                code: "MATH".to_string(),
            })
            .await
            .unwrap();
        let english = storage
            .create_subject(CreateSubjectRequest {
                name: "English".to_string(),
                code: "ENG".to_string(),
            })
            .await
            .unwrap();

        Fixture {
            storage,
            teacher_id: teacher.id,
            parent_id: parent.id,
            year_id: year.id,
            student_id: student.id,
            math_id: math.id,
            english_id: english.id,
        }
    }

    fn new_result(f: &Fixture, subject_id: i64, term: Term) -> NewAssessmentResult {
        NewAssessmentResult {
            student_id: f.student_id,
            subject_id,
            term,
            academic_year_id: f.year_id,
            performance_level: PerformanceLevel::Meeting,
            teacher_comment: "Steady progress".to_string(),
            recorded_by: f.teacher_id,
        }
    }

    #[tokio::test]
    async fn test_duplicate_result_is_rejected() {
        let f = fixture().await;
        let first = f
            .storage
            .create_result(new_result(&f, f.math_id, Term::One))
            .await
            .unwrap();

        let mut dup = new_result(&f, f.math_id, Term::One);
        dup.performance_level = PerformanceLevel::Below;
        let err = f.storage.create_result(dup).await.unwrap_err();
        assert_eq!(err.code(), "E014");

        let stored = f.storage.get_result_by_id(first.id).await.unwrap().unwrap();
        assert_eq!(stored.performance_level, PerformanceLevel::Meeting);

        // 不同学期可以录入
        f.storage
            .create_result(new_result(&f, f.math_id, Term::Two))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_results_sorted_by_term_then_subject() {
        let f = fixture().await;
        for (subject, term) in [
            (f.math_id, Term::Two),
            (f.math_id, Term::One),
            (f.english_id, Term::Two),
            (f.english_id, Term::One),
        ] {
            f.storage
                .create_result(new_result(&f, subject, term))
                .await
                .unwrap();
        }

        let details = f.storage.list_results_for_student(f.student_id).await.unwrap();
        let order: Vec<_> = details
            .iter()
            .map(|d| (d.result.term.number(), d.subject_name.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                (1, "English"),
                (1, "Mathematics"),
                (2, "English"),
                (2, "Mathematics"),
            ]
        );
        assert!(details.iter().all(|d| d.student_name == "Amani Otieno"));
    }

    #[tokio::test]
    async fn test_update_result_changes_only_given_fields() {
        let f = fixture().await;
        let created = f
            .storage
            .create_result(new_result(&f, f.math_id, Term::One))
            .await
            .unwrap();

        let updated = f
            .storage
            .update_result(
                created.id,
                UpdateResultRequest {
                    performance_level: Some(PerformanceLevel::Exceeding),
                    teacher_comment: None,
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.performance_level, PerformanceLevel::Exceeding);
        assert_eq!(updated.teacher_comment, "Steady progress");
        assert_eq!(updated.term, Term::One);
    }

    #[tokio::test]
    async fn test_recent_results_and_counts() {
        let f = fixture().await;
        let other_teacher = user(&f.storage, "teacher2", UserRole::Teacher).await;
        for term in Term::ALL {
            f.storage
                .create_result(new_result(&f, f.math_id, *term))
                .await
                .unwrap();
        }

        let recent = f
            .storage
            .list_recent_results_for_teacher(f.teacher_id, 2)
            .await
            .unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].subject_code, "MATH");

        let for_parent = f
            .storage
            .list_recent_results_for_parent(f.parent_id, 10)
            .await
            .unwrap();
        assert_eq!(for_parent.len(), 3);

        assert_eq!(f.storage.count_results_for_teacher(f.teacher_id).await.unwrap(), 3);
        assert_eq!(
            f.storage.count_results_for_teacher(other_teacher.id).await.unwrap(),
            0
        );
        assert!(
            f.storage
                .list_recent_results_for_teacher(other_teacher.id, 5)
                .await
                .unwrap()
                .is_empty()
        );
    }
}
