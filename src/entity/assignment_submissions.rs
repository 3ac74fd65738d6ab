//! 作业提交实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assignment_submissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    pub submitted_by: i64,
    pub file_path: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub submission_text: Option<String>,
    pub grade: Option<f64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub feedback: Option<String>,
    pub is_graded: bool,
    pub graded_by: Option<i64>,
    pub graded_at: Option<i64>,
    pub submitted_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subject_assignments::Entity",
        from = "Column::AssignmentId",
        to = "super::subject_assignments::Column::Id"
    )]
    Assignment,
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
}

impl Related<super::subject_assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignment.def()
    }
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_submission(self) -> crate::models::assignments::entities::AssignmentSubmission {
        use crate::models::assignments::entities::AssignmentSubmission;

        AssignmentSubmission {
            id: self.id,
            assignment_id: self.assignment_id,
            student_id: self.student_id,
            submitted_by: self.submitted_by,
            file_path: self.file_path,
            text: self.submission_text,
            grade: self.grade,
            feedback: self.feedback,
            is_graded: self.is_graded,
            graded_by: self.graded_by,
            graded_at: self.graded_at.map(super::from_timestamp),
            submitted_at: super::from_timestamp(self.submitted_at),
        }
    }
}
