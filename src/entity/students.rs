//! 学生实体

use chrono::NaiveDate;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    pub class_id: i64,
    pub date_of_birth: NaiveDate,
    pub parent_id: Option<i64>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::school_classes::Entity",
        from = "Column::ClassId",
        to = "super::school_classes::Column::Id"
    )]
    SchoolClass,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::ParentId",
        to = "super::users::Column::Id"
    )]
    Parent,
    #[sea_orm(has_many = "super::assessment_results::Entity")]
    AssessmentResults,
}

impl Related<super::school_classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SchoolClass.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Parent.def()
    }
}

impl Related<super::assessment_results::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AssessmentResults.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_student(self) -> crate::models::students::entities::Student {
        use crate::models::students::entities::Student;

        Student {
            id: self.id,
            student_id: self.student_id,
            first_name: self.first_name,
            last_name: self.last_name,
            class_id: self.class_id,
            date_of_birth: self.date_of_birth,
            parent_id: self.parent_id,
            created_at: super::from_timestamp(self.created_at),
        }
    }
}
