use serde::Deserialize;
use ts_rs::TS;

use super::entities::{PerformanceLevel, Term};

// 录入评估结果
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct RecordResultRequest {
    pub subject_id: i64,
    #[ts(type = "number")]
    pub term: Term,
    /// 省略时使用当前学年
    pub academic_year_id: Option<i64>,
    pub performance_level: PerformanceLevel,
    #[serde(default)]
    pub teacher_comment: String,
}

// 修改评估结果
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct UpdateResultRequest {
    pub performance_level: Option<PerformanceLevel>,
    pub teacher_comment: Option<String>,
}

// 存储层使用的新建参数（学年与录入人已由服务层确定）
#[derive(Debug, Clone)]
pub struct NewAssessmentResult {
    pub student_id: i64,
    pub subject_id: i64,
    pub term: Term,
    pub academic_year_id: i64,
    pub performance_level: PerformanceLevel,
    pub teacher_comment: String,
    pub recorded_by: i64,
}
