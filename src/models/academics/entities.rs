use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::assessments::entities::PerformanceLevel;

// 学年
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "academics.ts")]
pub struct AcademicYear {
    pub id: i64,
    pub name: String,
    /// 由当前学年指针推导，不单独存储
    pub current: bool,
    pub created_at: DateTime<Utc>,
}

// 科目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "academics.ts")]
pub struct Subject {
    pub id: i64,
    pub name: String,
    pub code: String,
}

// 评语模板
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "academics.ts")]
pub struct ReportComment {
    pub id: i64,
    pub subject_id: i64,
    pub performance_level: PerformanceLevel,
    pub template_comment: String,
}
