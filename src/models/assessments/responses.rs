use serde::Serialize;
use ts_rs::TS;

use super::entities::{AssessmentResultDetail, PerformanceLevel, Term};
use crate::models::academics::entities::{AcademicYear, ReportComment, Subject};
use crate::models::students::entities::Student;

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct PerformanceLevelOption {
    pub value: PerformanceLevel,
    pub label: String,
}

impl From<PerformanceLevel> for PerformanceLevelOption {
    fn from(level: PerformanceLevel) -> Self {
        Self {
            value: level,
            label: level.label().to_string(),
        }
    }
}

// 录入表单上下文
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct AddResultContext {
    pub student: Student,
    pub current_year: Option<AcademicYear>,
    pub subjects: Vec<Subject>,
    #[ts(type = "Array<number>")]
    pub terms: Vec<Term>,
    pub performance_levels: Vec<PerformanceLevelOption>,
    pub comment_templates: Vec<ReportComment>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct TermResults {
    #[ts(type = "number")]
    pub term: Term,
    pub results: Vec<AssessmentResultDetail>,
}

// 家长查看的学生成绩（按学期分组）
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct StudentResultsResponse {
    pub student: Student,
    pub terms: Vec<TermResults>,
    pub has_results: bool,
}

impl StudentResultsResponse {
    /// 按学期 1..3 分组，保持原有顺序
    pub fn group(student: Student, results: Vec<AssessmentResultDetail>) -> Self {
        let has_results = !results.is_empty();
        let terms = Term::ALL
            .iter()
            .map(|term| TermResults {
                term: *term,
                results: results
                    .iter()
                    .filter(|r| r.result.term == *term)
                    .cloned()
                    .collect(),
            })
            .collect();
        Self {
            student,
            terms,
            has_results,
        }
    }
}
