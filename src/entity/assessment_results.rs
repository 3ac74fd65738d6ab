//! 评估结果实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assessment_results")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    pub term: i32,
    pub academic_year_id: i64,
    pub performance_level: String,
    #[sea_orm(column_type = "Text")]
    pub teacher_comment: String,
    pub recorded_by: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::subjects::Entity",
        from = "Column::SubjectId",
        to = "super::subjects::Column::Id"
    )]
    Subject,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_result(self) -> crate::models::assessments::entities::AssessmentResult {
        use crate::models::assessments::entities::{AssessmentResult, PerformanceLevel, Term};

        AssessmentResult {
            id: self.id,
            student_id: self.student_id,
            subject_id: self.subject_id,
            term: Term::try_from(self.term).unwrap_or(Term::One),
            academic_year_id: self.academic_year_id,
            performance_level: self
                .performance_level
                .parse::<PerformanceLevel>()
                .unwrap_or(PerformanceLevel::Meeting),
            teacher_comment: self.teacher_comment,
            recorded_by: self.recorded_by,
            created_at: super::from_timestamp(self.created_at),
            updated_at: super::from_timestamp(self.updated_at),
        }
    }
}
