//! 学生联系人实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "student_contacts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub teacher_id: i64,
    pub class_level: String,
    pub child_first_name: String,
    pub child_last_name: String,
    pub parent_name: String,
    pub parent_phone: String,
    pub parent_email: Option<String>,
    pub relationship: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::TeacherId",
        to = "super::users::Column::Id"
    )]
    Teacher,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_contact(self) -> crate::models::contacts::entities::StudentContact {
        use crate::models::contacts::entities::{ClassLevel, StudentContact};

        StudentContact {
            id: self.id,
            teacher_id: self.teacher_id,
            class_level: self
                .class_level
                .parse::<ClassLevel>()
                .unwrap_or(ClassLevel::Pp1),
            child_first_name: self.child_first_name,
            child_last_name: self.child_last_name,
            parent_name: self.parent_name,
            parent_phone: self.parent_phone,
            parent_email: self.parent_email,
            relationship: self.relationship,
            notes: self.notes,
            created_at: super::from_timestamp(self.created_at),
            updated_at: super::from_timestamp(self.updated_at),
        }
    }
}
