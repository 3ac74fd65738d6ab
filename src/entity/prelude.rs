//! 预导入模块，方便使用

pub use super::academic_years::{
    ActiveModel as AcademicYearActiveModel, Entity as AcademicYears, Model as AcademicYearModel,
};
pub use super::assessment_results::{
    ActiveModel as AssessmentResultActiveModel, Entity as AssessmentResults,
    Model as AssessmentResultModel,
};
pub use super::assignment_submissions::{
    ActiveModel as SubmissionActiveModel, Entity as AssignmentSubmissions,
    Model as SubmissionModel,
};
pub use super::current_academic_year::{
    ActiveModel as CurrentAcademicYearActiveModel, Entity as CurrentAcademicYear,
};
pub use super::report_comments::{
    ActiveModel as ReportCommentActiveModel, Entity as ReportComments,
    Model as ReportCommentModel,
};
pub use super::school_classes::{
    ActiveModel as SchoolClassActiveModel, Entity as SchoolClasses, Model as SchoolClassModel,
};
pub use super::student_contacts::{
    ActiveModel as StudentContactActiveModel, Entity as StudentContacts,
    Model as StudentContactModel,
};
pub use super::students::{
    ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel,
};
pub use super::subject_assignments::{
    ActiveModel as AssignmentActiveModel, Entity as SubjectAssignments, Model as AssignmentModel,
};
pub use super::subjects::{ActiveModel as SubjectActiveModel, Entity as Subjects, Model as SubjectModel};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
