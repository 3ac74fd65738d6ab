//! 学年、科目与评语模板存储操作

use super::SeaOrmStorage;
use crate::entity::current_academic_year::{self, SLOT};
use crate::entity::prelude::*;
use crate::entity::{academic_years, report_comments, subjects};
use crate::errors::{Result, SchoolError};
use crate::models::academics::{
    entities::{AcademicYear, ReportComment, Subject},
    requests::{CreateReportCommentRequest, CreateSubjectRequest, ReportCommentQuery},
};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

/// 读取当前学年指针
async fn current_year_id<C: ConnectionTrait>(conn: &C) -> Result<Option<i64>> {
    let pointer = CurrentAcademicYear::find_by_id(SLOT)
        .one(conn)
        .await
        .map_err(|e| SchoolError::from_db("查询当前学年", e))?;
    Ok(pointer.map(|p| p.academic_year_id))
}

/// 将指针指向指定学年：单条 INSERT ... ON CONFLICT DO UPDATE
async fn upsert_current_year<C: ConnectionTrait>(conn: &C, academic_year_id: i64) -> Result<()> {
    let pointer = CurrentAcademicYearActiveModel {
        slot: Set(SLOT),
        academic_year_id: Set(academic_year_id),
        updated_at: Set(chrono::Utc::now().timestamp()),
    };

    CurrentAcademicYear::insert(pointer)
        .on_conflict(
            OnConflict::column(current_academic_year::Column::Slot)
                .update_columns([
                    current_academic_year::Column::AcademicYearId,
                    current_academic_year::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await
        .map_err(|e| SchoolError::from_db("设置当前学年", e))?;
    Ok(())
}

impl SeaOrmStorage {
    /// 创建学年
    pub async fn create_academic_year_impl(
        &self,
        name: &str,
        current: bool,
    ) -> Result<AcademicYear> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::from_db("开启事务", e))?;

        let model = AcademicYearActiveModel {
            name: Set(name.to_string()),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| SchoolError::from_db("创建学年", e))?;

        if current {
            upsert_current_year(&txn, model.id).await?;
        }
        let current_id = current_year_id(&txn).await?;

        txn.commit()
            .await
            .map_err(|e| SchoolError::from_db("提交事务", e))?;

        Ok(model.into_academic_year(current_id))
    }

    pub async fn get_academic_year_by_id_impl(&self, id: i64) -> Result<Option<AcademicYear>> {
        let model = AcademicYears::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询学年", e))?;
        let Some(model) = model else {
            return Ok(None);
        };

        let current_id = current_year_id(&self.db).await?;
        Ok(Some(model.into_academic_year(current_id)))
    }

    pub async fn list_academic_years_impl(&self) -> Result<Vec<AcademicYear>> {
        let models = AcademicYears::find()
            .order_by_desc(academic_years::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询学年列表", e))?;

        let current_id = current_year_id(&self.db).await?;
        Ok(models
            .into_iter()
            .map(|m| m.into_academic_year(current_id))
            .collect())
    }

    pub async fn get_current_academic_year_impl(&self) -> Result<Option<AcademicYear>> {
        let found = CurrentAcademicYear::find_by_id(SLOT)
            .find_also_related(AcademicYears)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询当前学年", e))?;

        Ok(found.and_then(|(pointer, year)| {
            year.map(|y| y.into_academic_year(Some(pointer.academic_year_id)))
        }))
    }

    /// 设置当前学年
    pub async fn set_current_academic_year_impl(&self, id: i64) -> Result<Option<AcademicYear>> {
        let Some(model) = AcademicYears::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询学年", e))?
        else {
            return Ok(None);
        };

        upsert_current_year(&self.db, id).await?;
        Ok(Some(model.into_academic_year(Some(id))))
    }

    /// 创建科目
    pub async fn create_subject_impl(&self, req: CreateSubjectRequest) -> Result<Subject> {
        let model = SubjectActiveModel {
            name: Set(req.name),
            code: Set(req.code),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| SchoolError::from_db("创建科目", e))?;

        Ok(model.into_subject())
    }

    pub async fn get_subject_by_id_impl(&self, id: i64) -> Result<Option<Subject>> {
        let model = Subjects::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询科目", e))?;
        Ok(model.map(|m| m.into_subject()))
    }

    pub async fn list_subjects_impl(&self) -> Result<Vec<Subject>> {
        let models = Subjects::find()
            .order_by_asc(subjects::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询科目列表", e))?;
        Ok(models.into_iter().map(|m| m.into_subject()).collect())
    }

    /// 创建评语模板
    pub async fn create_report_comment_impl(
        &self,
        req: CreateReportCommentRequest,
    ) -> Result<ReportComment> {
        let model = ReportCommentActiveModel {
            subject_id: Set(req.subject_id),
            performance_level: Set(req.performance_level.to_string()),
            template_comment: Set(req.template_comment),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| SchoolError::from_db("创建评语模板", e))?;

        Ok(model.into_report_comment())
    }

    pub async fn list_report_comments_impl(
        &self,
        query: ReportCommentQuery,
    ) -> Result<Vec<ReportComment>> {
        let mut select = ReportComments::find();
        if let Some(subject_id) = query.subject_id {
            select = select.filter(report_comments::Column::SubjectId.eq(subject_id));
        }
        if let Some(level) = query.performance_level {
            select = select.filter(report_comments::Column::PerformanceLevel.eq(level.to_string()));
        }

        let models = select
            .order_by_asc(report_comments::Column::SubjectId)
            .order_by_asc(report_comments::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询评语模板", e))?;
        Ok(models
            .into_iter()
            .map(|m| m.into_report_comment())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::memory_storage;
    use crate::models::academics::requests::{CreateReportCommentRequest, CreateSubjectRequest};
    use crate::models::assessments::entities::PerformanceLevel;
    use crate::models::academics::requests::ReportCommentQuery;
    use crate::storage::Storage;

    #[tokio::test]
    async fn test_at_most_one_current_year() {
        let storage = memory_storage().await;
        assert!(storage.get_current_academic_year().await.unwrap().is_none());

        let y1 = storage.create_academic_year("2023-2024", true).await.unwrap();
        let y2 = storage.create_academic_year("2024-2025", false).await.unwrap();
        let y3 = storage.create_academic_year("2025-2026", true).await.unwrap();
        assert!(y1.current);
        assert!(!y2.current);
        assert!(y3.current);

        storage.set_current_academic_year(y2.id).await.unwrap();
        storage.set_current_academic_year(y2.id).await.unwrap();

        let years = storage.list_academic_years().await.unwrap();
        let current: Vec<_> = years.iter().filter(|y| y.current).collect();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].id, y2.id);
        assert_eq!(
            storage.get_current_academic_year().await.unwrap().map(|y| y.id),
            Some(y2.id)
        );
    }

    #[tokio::test]
    async fn test_set_current_for_missing_year() {
        let storage = memory_storage().await;
        assert!(storage.set_current_academic_year(99).await.unwrap().is_none());
        assert!(storage.get_current_academic_year().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_year_name_rolls_back() {
        let storage = memory_storage().await;
        let first = storage.create_academic_year("2024-2025", true).await.unwrap();
        let err = storage
            .create_academic_year("2024-2025", true)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E014");
        assert_eq!(
            storage.get_current_academic_year().await.unwrap().map(|y| y.id),
            Some(first.id)
        );
    }

    #[tokio::test]
    async fn test_subject_code_unique_and_templates_filter() {
        let storage = memory_storage().await;
        let math = storage
            .create_subject(CreateSubjectRequest {
                name: "Mathematics".to_string(),
                code: "MATH".to_string(),
            })
            .await
            .unwrap();
        let dup = storage
            .create_subject(CreateSubjectRequest {
                name: "Maths".to_string(),
                code: "MATH".to_string(),
            })
            .await;
        assert_eq!(dup.unwrap_err().code(), "E014");

        for (level, text) in [
            (PerformanceLevel::Exceeding, "Excellent number sense."),
            (PerformanceLevel::Below, "Needs support with fractions."),
        ] {
            storage
                .create_report_comment(CreateReportCommentRequest {
                    subject_id: math.id,
                    performance_level: level,
                    template_comment: text.to_string(),
                })
                .await
                .unwrap();
        }

        let below = storage
            .list_report_comments(ReportCommentQuery {
                subject_id: Some(math.id),
                performance_level: Some(PerformanceLevel::Below),
            })
            .await
            .unwrap();
        assert_eq!(below.len(), 1);
        assert_eq!(below[0].template_comment, "Needs support with fractions.");
    }
}
