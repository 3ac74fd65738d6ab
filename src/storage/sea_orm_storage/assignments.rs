//! 作业与作业提交存储操作

use super::SeaOrmStorage;
use crate::entity::prelude::*;
use crate::entity::{assignment_submissions, subject_assignments};
use crate::errors::{Result, SchoolError};
use crate::models::assignments::{
    entities::{AssignmentSubmission, SubjectAssignment},
    requests::{CreateAssignmentRequest, UpdateAssignmentRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建作业
    pub async fn create_assignment_impl(
        &self,
        created_by: i64,
        academic_year_id: i64,
        req: CreateAssignmentRequest,
    ) -> Result<SubjectAssignment> {
        let now = chrono::Utc::now().timestamp();

        let model = AssignmentActiveModel {
            title: Set(req.title),
            description: Set(req.description),
            subject_id: Set(req.subject_id),
            assignment_type: Set(req.assignment_type.to_string()),
            due_date: Set(req.due_date.timestamp()),
            max_points: Set(req.max_points),
            attachment: Set(req.attachment),
            created_by: Set(created_by),
            academic_year_id: Set(academic_year_id),
            is_published: Set(req.is_published),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("创建作业", e))?;

        Ok(result.into_assignment())
    }

    pub async fn get_assignment_by_id_impl(&self, id: i64) -> Result<Option<SubjectAssignment>> {
        let result = SubjectAssignments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询作业", e))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    /// 已发布或由 viewer 创建的作业，按截止时间升序
    pub async fn list_visible_assignments_impl(
        &self,
        viewer_id: i64,
        subject_id: Option<i64>,
    ) -> Result<Vec<SubjectAssignment>> {
        let mut select = SubjectAssignments::find().filter(
            Condition::any()
                .add(subject_assignments::Column::IsPublished.eq(true))
                .add(subject_assignments::Column::CreatedBy.eq(viewer_id)),
        );
        if let Some(subject_id) = subject_id {
            select = select.filter(subject_assignments::Column::SubjectId.eq(subject_id));
        }

        let models = select
            .order_by_asc(subject_assignments::Column::DueDate)
            .order_by_asc(subject_assignments::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询作业列表", e))?;

        Ok(models.into_iter().map(|m| m.into_assignment()).collect())
    }

    pub async fn update_assignment_impl(
        &self,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<SubjectAssignment>> {
        let Some(existing) = SubjectAssignments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询作业", e))?
        else {
            return Ok(None);
        };

        let mut model = existing.into_active_model();
        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(subject_id) = update.subject_id {
            model.subject_id = Set(subject_id);
        }
        if let Some(kind) = update.assignment_type {
            model.assignment_type = Set(kind.to_string());
        }
        if let Some(due_date) = update.due_date {
            model.due_date = Set(due_date.timestamp());
        }
        if let Some(max_points) = update.max_points {
            model.max_points = Set(max_points);
        }
        if let Some(attachment) = update.attachment {
            model.attachment = Set(Some(attachment));
        }
        if let Some(is_published) = update.is_published {
            model.is_published = Set(is_published);
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("更新作业", e))?;

        Ok(Some(result.into_assignment()))
    }

    /// 删除作业，全部提交在同一事务内一并删除
    pub async fn delete_assignment_impl(&self, id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::from_db("开启事务", e))?;

        AssignmentSubmissions::delete_many()
            .filter(assignment_submissions::Column::AssignmentId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| SchoolError::from_db("删除作业提交", e))?;

        let result = SubjectAssignments::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| SchoolError::from_db("删除作业", e))?;

        txn.commit()
            .await
            .map_err(|e| SchoolError::from_db("提交事务", e))?;

        Ok(result.rows_affected > 0)
    }

    /// 创建提交，同一学生重复提交由唯一索引拒绝
    pub async fn create_submission_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
        submitted_by: i64,
        file_path: Option<String>,
        text: Option<String>,
    ) -> Result<AssignmentSubmission> {
        let model = SubmissionActiveModel {
            assignment_id: Set(assignment_id),
            student_id: Set(student_id),
            submitted_by: Set(submitted_by),
            file_path: Set(file_path),
            submission_text: Set(text),
            grade: Set(None),
            feedback: Set(None),
            is_graded: Set(false),
            graded_by: Set(None),
            graded_at: Set(None),
            submitted_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("提交作业", e))?;

        Ok(result.into_submission())
    }

    pub async fn get_submission_by_id_impl(&self, id: i64) -> Result<Option<AssignmentSubmission>> {
        let result = AssignmentSubmissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询作业提交", e))?;

        Ok(result.map(|m| m.into_submission()))
    }

    pub async fn get_submission_for_student_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<AssignmentSubmission>> {
        let result = AssignmentSubmissions::find()
            .filter(assignment_submissions::Column::AssignmentId.eq(assignment_id))
            .filter(assignment_submissions::Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询作业提交", e))?;

        Ok(result.map(|m| m.into_submission()))
    }

    pub async fn list_submissions_for_assignment_impl(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<AssignmentSubmission>> {
        let models = AssignmentSubmissions::find()
            .filter(assignment_submissions::Column::AssignmentId.eq(assignment_id))
            .order_by_asc(assignment_submissions::Column::SubmittedAt)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询作业提交列表", e))?;

        Ok(models.into_iter().map(|m| m.into_submission()).collect())
    }

    /// 批改：已批改的提交再次批改时覆盖分数与评语
    pub async fn grade_submission_impl(
        &self,
        id: i64,
        grade: f64,
        feedback: Option<String>,
        graded_by: i64,
    ) -> Result<Option<AssignmentSubmission>> {
        let Some(existing) = AssignmentSubmissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询作业提交", e))?
        else {
            return Ok(None);
        };

        let mut model = existing.into_active_model();
        model.grade = Set(Some(grade));
        model.feedback = Set(feedback);
        model.is_graded = Set(true);
        model.graded_by = Set(Some(graded_by));
        model.graded_at = Set(Some(chrono::Utc::now().timestamp()));

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("批改作业", e))?;

        Ok(Some(result.into_submission()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, Utc};

    use super::super::testing::{memory_storage, user};
    use crate::models::academics::requests::CreateSubjectRequest;
    use crate::models::assignments::entities::{AssignmentType, SubmissionState};
    use crate::models::assignments::requests::{CreateAssignmentRequest, UpdateAssignmentRequest};
    use crate::models::students::requests::CreateStudentRequest;
    use crate::models::users::entities::UserRole;
    use crate::storage::Storage;

    fn assignment_req(subject_id: i64, title: &str, days: i64, published: bool) -> CreateAssignmentRequest {
        CreateAssignmentRequest {
            title: title.to_string(),
            description: Some("Pages 12-14".to_string()),
            subject_id,
            assignment_type: AssignmentType::Homework,
            due_date: Utc::now() + Duration::days(days),
            max_points: 10.0,
            attachment: None,
            academic_year_id: None,
            is_published: published,
        }
    }

    #[tokio::test]
    async fn test_drafts_visible_only_to_author() {
        let storage = memory_storage().await;
        let author = user(&storage, "teacher1", UserRole::Teacher).await;
        let colleague = user(&storage, "teacher2", UserRole::Teacher).await;
        let year = storage.create_academic_year("2024-2025", true).await.unwrap();
        let math = storage
            .create_subject(CreateSubjectRequest {
                name: "Mathematics".to_string(),
                code: "MATH".to_string(),
            })
            .await
            .unwrap();
        let science = storage
            .create_subject(CreateSubjectRequest {
                name: "Science".to_string(),
                code: "SCI".to_string(),
            })
            .await
            .unwrap();

        storage
            .create_assignment(author.id, year.id, assignment_req(math.id, "Later", 9, true))
            .await
            .unwrap();
        storage
            .create_assignment(author.id, year.id, assignment_req(math.id, "Draft", 3, false))
            .await
            .unwrap();
        storage
            .create_assignment(author.id, year.id, assignment_req(science.id, "Sooner", 1, true))
            .await
            .unwrap();

        let mine = storage.list_visible_assignments(author.id, None).await.unwrap();
        let titles: Vec<_> = mine.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["Sooner", "Draft", "Later"]);

        let theirs = storage
            .list_visible_assignments(colleague.id, None)
            .await
            .unwrap();
        assert_eq!(theirs.len(), 2);
        assert!(theirs.iter().all(|a| a.is_published));

        let math_only = storage
            .list_visible_assignments(colleague.id, Some(math.id))
            .await
            .unwrap();
        assert_eq!(math_only.len(), 1);
        assert_eq!(math_only[0].title, "Later");
    }

    #[tokio::test]
    async fn test_submission_lifecycle() {
        let storage = memory_storage().await;
        let teacher = user(&storage, "teacher1", UserRole::Teacher).await;
        let parent = user(&storage, "parent1", UserRole::Parent).await;
        let year = storage.create_academic_year("2024-2025", true).await.unwrap();
        let class = storage.create_class("Grade 4", teacher.id, year.id).await.unwrap();
        let student = storage
            .create_student(
                class.id,
                CreateStudentRequest {
                    student_id: "S010".to_string(),
                    first_name: "Neema".to_string(),
                    last_name: "Mutua".to_string(),
                    date_of_birth: NaiveDate::from_ymd_opt(2015, 6, 1).unwrap(),
                    parent_id: Some(parent.id),
                },
            )
            .await
            .unwrap();
        let subject = storage
            .create_subject(CreateSubjectRequest {
                name: "English".to_string(),
                code: "ENG".to_string(),
            })
            .await
            .unwrap();
        let assignment = storage
            .create_assignment(teacher.id, year.id, assignment_req(subject.id, "Essay", 5, true))
            .await
            .unwrap();

        let pending = storage
            .get_submission_for_student(assignment.id, student.id)
            .await
            .unwrap();
        assert_eq!(SubmissionState::of(pending.as_ref()), SubmissionState::NoSubmission);

        let submission = storage
            .create_submission(
                assignment.id,
                student.id,
                parent.id,
                None,
                Some("My holiday".to_string()),
            )
            .await
            .unwrap();
        assert_eq!(SubmissionState::of(Some(&submission)), SubmissionState::Submitted);

        let dup = storage
            .create_submission(assignment.id, student.id, parent.id, Some("a.pdf".to_string()), None)
            .await
            .unwrap_err();
        assert_eq!(dup.code(), "E014");

        let graded = storage
            .grade_submission(submission.id, 7.5, Some("Good structure".to_string()), teacher.id)
            .await
            .unwrap()
            .unwrap();
        assert!(graded.is_graded);
        assert_eq!(graded.grade, Some(7.5));
        assert_eq!(graded.graded_by, Some(teacher.id));

        let regraded = storage
            .grade_submission(submission.id, 9.0, None, teacher.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(regraded.grade, Some(9.0));
        assert_eq!(SubmissionState::of(Some(&regraded)), SubmissionState::Graded);

        assert_eq!(
            storage
                .list_submissions_for_assignment(assignment.id)
                .await
                .unwrap()
                .len(),
            1
        );

        assert!(storage.delete_assignment(assignment.id).await.unwrap());
        assert!(storage.get_submission_by_id(submission.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_publish_draft() {
        let storage = memory_storage().await;
        let teacher = user(&storage, "teacher1", UserRole::Teacher).await;
        let year = storage.create_academic_year("2024-2025", true).await.unwrap();
        let subject = storage
            .create_subject(CreateSubjectRequest {
                name: "Art".to_string(),
                code: "ART".to_string(),
            })
            .await
            .unwrap();
        let draft = storage
            .create_assignment(teacher.id, year.id, assignment_req(subject.id, "Collage", 2, false))
            .await
            .unwrap();

        let published = storage
            .update_assignment(
                draft.id,
                UpdateAssignmentRequest {
                    is_published: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert!(published.is_published);
        assert_eq!(published.title, "Collage");
        assert!(storage.update_assignment(999, UpdateAssignmentRequest::default()).await.unwrap().is_none());
    }
}
