use serde::Serialize;
use ts_rs::TS;

use crate::models::assessments::entities::AssessmentResultDetail;
use crate::models::classes::entities::SchoolClass;
use crate::models::classes::responses::ClassSummary;
use crate::models::students::entities::Student;
use crate::models::users::entities::UserRole;

// 登录后的落地页
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "dashboard.ts")]
pub struct LandingResponse {
    pub role: UserRole,
    pub redirect_to: String,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "dashboard.ts")]
pub struct TeacherDashboard {
    pub classes: Vec<ClassSummary>,
    pub recent_results: Vec<AssessmentResultDetail>,
    pub total_students: u64,
    pub total_results: u64,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "dashboard.ts")]
pub struct ChildOverview {
    pub student: Student,
    pub class: SchoolClass,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "dashboard.ts")]
pub struct ParentDashboard {
    pub students: Vec<ChildOverview>,
    pub recent_results: Vec<AssessmentResultDetail>,
}
