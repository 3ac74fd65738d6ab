//! 评语模板实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "report_comments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub subject_id: i64,
    pub performance_level: String,
    #[sea_orm(column_type = "Text")]
    pub template_comment: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subjects::Entity",
        from = "Column::SubjectId",
        to = "super::subjects::Column::Id"
    )]
    Subject,
}

impl Related<super::subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_report_comment(self) -> crate::models::academics::entities::ReportComment {
        use crate::models::academics::entities::ReportComment;
        use crate::models::assessments::entities::PerformanceLevel;

        ReportComment {
            id: self.id,
            subject_id: self.subject_id,
            performance_level: self
                .performance_level
                .parse::<PerformanceLevel>()
                .unwrap_or(PerformanceLevel::Meeting),
            template_comment: self.template_comment,
        }
    }
}
