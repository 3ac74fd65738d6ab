use std::sync::Arc;

use crate::models::{
    academics::{
        entities::{AcademicYear, ReportComment, Subject},
        requests::{CreateReportCommentRequest, CreateSubjectRequest, ReportCommentQuery},
    },
    assessments::{
        entities::{AssessmentResult, AssessmentResultDetail},
        requests::{NewAssessmentResult, UpdateResultRequest},
    },
    assignments::{
        entities::{AssignmentSubmission, SubjectAssignment},
        requests::{CreateAssignmentRequest, UpdateAssignmentRequest},
    },
    classes::{entities::SchoolClass, requests::UpdateClassRequest, responses::ClassSummary},
    contacts::{
        entities::{ClassLevel, StudentContact},
        requests::{CreateContactRequest, UpdateContactRequest},
    },
    students::{entities::Student, requests::CreateStudentRequest},
    users::{
        entities::User,
        requests::{CreateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 分页列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;

    /// 学年与当前学年指针
    // 创建学年，current 为 true 时同一事务内设为当前学年
    async fn create_academic_year(&self, name: &str, current: bool) -> Result<AcademicYear>;
    async fn get_academic_year_by_id(&self, id: i64) -> Result<Option<AcademicYear>>;
    async fn list_academic_years(&self) -> Result<Vec<AcademicYear>>;
    async fn get_current_academic_year(&self) -> Result<Option<AcademicYear>>;
    // 设置当前学年（单条 upsert），学年不存在时返回 None
    async fn set_current_academic_year(&self, id: i64) -> Result<Option<AcademicYear>>;

    /// 科目与评语模板
    async fn create_subject(&self, req: CreateSubjectRequest) -> Result<Subject>;
    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>>;
    async fn list_subjects(&self) -> Result<Vec<Subject>>;
    async fn create_report_comment(&self, req: CreateReportCommentRequest)
    -> Result<ReportComment>;
    async fn list_report_comments(&self, query: ReportCommentQuery) -> Result<Vec<ReportComment>>;

    /// 班级管理方法
    async fn create_class(
        &self,
        name: &str,
        teacher_id: i64,
        academic_year_id: i64,
    ) -> Result<SchoolClass>;
    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<SchoolClass>>;
    // 列出班级及学生人数，可按教师与学年筛选
    async fn list_classes(
        &self,
        teacher_id: Option<i64>,
        academic_year_id: Option<i64>,
    ) -> Result<Vec<ClassSummary>>;
    async fn update_class(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<SchoolClass>>;
    // 删除班级，连同学生、成绩与作业提交
    async fn delete_class(&self, class_id: i64) -> Result<bool>;

    /// 学生管理方法
    async fn create_student(&self, class_id: i64, req: CreateStudentRequest) -> Result<Student>;
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    async fn list_students_by_class(&self, class_id: i64) -> Result<Vec<Student>>;
    async fn list_students_by_parent(&self, parent_id: i64) -> Result<Vec<Student>>;
    // 删除学生，连同成绩与作业提交
    async fn delete_student(&self, id: i64) -> Result<bool>;

    /// 评估结果
    // 重复的 (学生, 科目, 学期, 学年) 返回 UniquenessViolation
    async fn create_result(&self, new: NewAssessmentResult) -> Result<AssessmentResult>;
    async fn get_result_by_id(&self, id: i64) -> Result<Option<AssessmentResult>>;
    async fn update_result(
        &self,
        id: i64,
        update: UpdateResultRequest,
    ) -> Result<Option<AssessmentResult>>;
    // 按 (学期, 科目名称) 升序
    async fn list_results_for_student(&self, student_id: i64)
    -> Result<Vec<AssessmentResultDetail>>;
    async fn list_recent_results_for_teacher(
        &self,
        teacher_id: i64,
        limit: u64,
    ) -> Result<Vec<AssessmentResultDetail>>;
    async fn list_recent_results_for_parent(
        &self,
        parent_id: i64,
        limit: u64,
    ) -> Result<Vec<AssessmentResultDetail>>;
    async fn count_results_for_teacher(&self, teacher_id: i64) -> Result<u64>;

    /// 作业管理方法
    async fn create_assignment(
        &self,
        created_by: i64,
        academic_year_id: i64,
        req: CreateAssignmentRequest,
    ) -> Result<SubjectAssignment>;
    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<SubjectAssignment>>;
    // 列出对 viewer 可见的作业（已发布或本人创建）
    async fn list_visible_assignments(
        &self,
        viewer_id: i64,
        subject_id: Option<i64>,
    ) -> Result<Vec<SubjectAssignment>>;
    async fn update_assignment(
        &self,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<SubjectAssignment>>;
    // 删除作业，连同全部提交
    async fn delete_assignment(&self, id: i64) -> Result<bool>;

    /// 作业提交
    // 同一学生重复提交返回 UniquenessViolation
    async fn create_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
        submitted_by: i64,
        file_path: Option<String>,
        text: Option<String>,
    ) -> Result<AssignmentSubmission>;
    async fn get_submission_by_id(&self, id: i64) -> Result<Option<AssignmentSubmission>>;
    async fn get_submission_for_student(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<AssignmentSubmission>>;
    async fn list_submissions_for_assignment(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<AssignmentSubmission>>;
    async fn grade_submission(
        &self,
        id: i64,
        grade: f64,
        feedback: Option<String>,
        graded_by: i64,
    ) -> Result<Option<AssignmentSubmission>>;

    /// 联系人名录
    async fn create_contact(
        &self,
        teacher_id: i64,
        class_level: ClassLevel,
        req: CreateContactRequest,
    ) -> Result<StudentContact>;
    async fn get_contact_by_id(&self, id: i64) -> Result<Option<StudentContact>>;
    async fn list_contacts(
        &self,
        teacher_id: i64,
        class_level: Option<ClassLevel>,
    ) -> Result<Vec<StudentContact>>;
    async fn count_contacts_by_level(&self, teacher_id: i64) -> Result<Vec<(ClassLevel, u64)>>;
    async fn update_contact(
        &self,
        id: i64,
        update: UpdateContactRequest,
    ) -> Result<Option<StudentContact>>;
    async fn delete_contact(&self, id: i64) -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
