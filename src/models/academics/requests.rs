use serde::Deserialize;
use ts_rs::TS;

use crate::models::assessments::entities::PerformanceLevel;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "academics.ts")]
pub struct CreateAcademicYearRequest {
    pub name: String,
    /// 为 true 时同时设为当前学年
    #[serde(default)]
    pub current: bool,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "academics.ts")]
pub struct CreateSubjectRequest {
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "academics.ts")]
pub struct CreateReportCommentRequest {
    pub subject_id: i64,
    pub performance_level: PerformanceLevel,
    pub template_comment: String,
}

// 评语模板筛选
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "academics.ts")]
pub struct ReportCommentQuery {
    pub subject_id: Option<i64>,
    pub performance_level: Option<PerformanceLevel>,
}
