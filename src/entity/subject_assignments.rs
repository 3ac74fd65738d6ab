//! 科目作业实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "subject_assignments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub subject_id: i64,
    pub assignment_type: String,
    pub due_date: i64,
    pub max_points: f64,
    pub attachment: Option<String>,
    pub created_by: i64,
    pub academic_year_id: i64,
    pub is_published: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subjects::Entity",
        from = "Column::SubjectId",
        to = "super::subjects::Column::Id"
    )]
    Subject,
    #[sea_orm(has_many = "super::assignment_submissions::Entity")]
    Submissions,
}

impl Related<super::subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl Related<super::assignment_submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submissions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_assignment(self) -> crate::models::assignments::entities::SubjectAssignment {
        use crate::models::assignments::entities::{AssignmentType, SubjectAssignment};

        SubjectAssignment {
            id: self.id,
            title: self.title,
            description: self.description,
            subject_id: self.subject_id,
            assignment_type: self
                .assignment_type
                .parse::<AssignmentType>()
                .unwrap_or(AssignmentType::Homework),
            due_date: super::from_timestamp(self.due_date),
            max_points: self.max_points,
            attachment: self.attachment,
            created_by: self.created_by,
            academic_year_id: self.academic_year_id,
            is_published: self.is_published,
            created_at: super::from_timestamp(self.created_at),
            updated_at: super::from_timestamp(self.updated_at),
        }
    }
}
