//! 学年实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "academic_years")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::school_classes::Entity")]
    SchoolClasses,
}

impl Related<super::school_classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SchoolClasses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// `current_id` 为当前学年指针指向的学年
    pub fn into_academic_year(
        self,
        current_id: Option<i64>,
    ) -> crate::models::academics::entities::AcademicYear {
        use crate::models::academics::entities::AcademicYear;

        AcademicYear {
            current: current_id == Some(self.id),
            id: self.id,
            name: self.name,
            created_at: super::from_timestamp(self.created_at),
        }
    }
}
