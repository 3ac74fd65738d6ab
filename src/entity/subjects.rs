//! 科目实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "subjects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(unique)]
    pub code: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::assessment_results::Entity")]
    AssessmentResults,
}

impl Related<super::assessment_results::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AssessmentResults.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_subject(self) -> crate::models::academics::entities::Subject {
        crate::models::academics::entities::Subject {
            id: self.id,
            name: self.name,
            code: self.code,
        }
    }
}
