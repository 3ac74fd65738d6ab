//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod academics;
mod assignments;
mod classes;
mod contacts;
mod results;
mod students;
mod users;

use crate::config::{AppConfig, DatabaseConfig};
use crate::errors::{Result, SchoolError};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 按全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        Self::connect(&AppConfig::get().database).await
    }

    /// 连接数据库并运行迁移
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        let storage = Self::from_connection(db).await?;
        info!("SeaORM 存储初始化完成，数据库: {}", db_url);
        Ok(storage)
    }

    /// 基于已有连接创建实例，并确保表结构为最新
    pub async fn from_connection(db: DatabaseConnection) -> Result<Self> {
        Migrator::up(&db, None)
            .await
            .map_err(|e| SchoolError::database_operation(format!("数据库迁移失败: {e}")))?;
        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| SchoolError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| SchoolError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false);

        Database::connect(opt)
            .await
            .map_err(|e| SchoolError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(SchoolError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite:, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    // 学年模块
    async fn create_academic_year(&self, name: &str, current: bool) -> Result<AcademicYear> {
        self.create_academic_year_impl(name, current).await
    }

    async fn get_academic_year_by_id(&self, id: i64) -> Result<Option<AcademicYear>> {
        self.get_academic_year_by_id_impl(id).await
    }

    async fn list_academic_years(&self) -> Result<Vec<AcademicYear>> {
        self.list_academic_years_impl().await
    }

    async fn get_current_academic_year(&self) -> Result<Option<AcademicYear>> {
        self.get_current_academic_year_impl().await
    }

    async fn set_current_academic_year(&self, id: i64) -> Result<Option<AcademicYear>> {
        self.set_current_academic_year_impl(id).await
    }

    // 科目与评语模板
    async fn create_subject(&self, req: CreateSubjectRequest) -> Result<Subject> {
        self.create_subject_impl(req).await
    }

    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>> {
        self.get_subject_by_id_impl(id).await
    }

    async fn list_subjects(&self) -> Result<Vec<Subject>> {
        self.list_subjects_impl().await
    }

    async fn create_report_comment(
        &self,
        req: CreateReportCommentRequest,
    ) -> Result<ReportComment> {
        self.create_report_comment_impl(req).await
    }

    async fn list_report_comments(&self, query: ReportCommentQuery) -> Result<Vec<ReportComment>> {
        self.list_report_comments_impl(query).await
    }

    // 班级模块
    async fn create_class(
        &self,
        name: &str,
        teacher_id: i64,
        academic_year_id: i64,
    ) -> Result<SchoolClass> {
        self.create_class_impl(name, teacher_id, academic_year_id)
            .await
    }

    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<SchoolClass>> {
        self.get_class_by_id_impl(class_id).await
    }

    async fn list_classes(
        &self,
        teacher_id: Option<i64>,
        academic_year_id: Option<i64>,
    ) -> Result<Vec<ClassSummary>> {
        self.list_classes_impl(teacher_id, academic_year_id).await
    }

    async fn update_class(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<SchoolClass>> {
        self.update_class_impl(class_id, update).await
    }

    async fn delete_class(&self, class_id: i64) -> Result<bool> {
        self.delete_class_impl(class_id).await
    }

    // 学生模块
    async fn create_student(&self, class_id: i64, req: CreateStudentRequest) -> Result<Student> {
        self.create_student_impl(class_id, req).await
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(id).await
    }

    async fn list_students_by_class(&self, class_id: i64) -> Result<Vec<Student>> {
        self.list_students_by_class_impl(class_id).await
    }

    async fn list_students_by_parent(&self, parent_id: i64) -> Result<Vec<Student>> {
        self.list_students_by_parent_impl(parent_id).await
    }

    async fn delete_student(&self, id: i64) -> Result<bool> {
        self.delete_student_impl(id).await
    }

    // 评估结果模块
    async fn create_result(&self, new: NewAssessmentResult) -> Result<AssessmentResult> {
        self.create_result_impl(new).await
    }

    async fn get_result_by_id(&self, id: i64) -> Result<Option<AssessmentResult>> {
        self.get_result_by_id_impl(id).await
    }

    async fn update_result(
        &self,
        id: i64,
        update: UpdateResultRequest,
    ) -> Result<Option<AssessmentResult>> {
        self.update_result_impl(id, update).await
    }

    async fn list_results_for_student(
        &self,
        student_id: i64,
    ) -> Result<Vec<AssessmentResultDetail>> {
        self.list_results_for_student_impl(student_id).await
    }

    async fn list_recent_results_for_teacher(
        &self,
        teacher_id: i64,
        limit: u64,
    ) -> Result<Vec<AssessmentResultDetail>> {
        self.list_recent_results_for_teacher_impl(teacher_id, limit)
            .await
    }

    async fn list_recent_results_for_parent(
        &self,
        parent_id: i64,
        limit: u64,
    ) -> Result<Vec<AssessmentResultDetail>> {
        self.list_recent_results_for_parent_impl(parent_id, limit)
            .await
    }

    async fn count_results_for_teacher(&self, teacher_id: i64) -> Result<u64> {
        self.count_results_for_teacher_impl(teacher_id).await
    }

    // 作业模块
    async fn create_assignment(
        &self,
        created_by: i64,
        academic_year_id: i64,
        req: CreateAssignmentRequest,
    ) -> Result<SubjectAssignment> {
        self.create_assignment_impl(created_by, academic_year_id, req)
            .await
    }

    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<SubjectAssignment>> {
        self.get_assignment_by_id_impl(id).await
    }

    async fn list_visible_assignments(
        &self,
        viewer_id: i64,
        subject_id: Option<i64>,
    ) -> Result<Vec<SubjectAssignment>> {
        self.list_visible_assignments_impl(viewer_id, subject_id)
            .await
    }

    async fn update_assignment(
        &self,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<SubjectAssignment>> {
        self.update_assignment_impl(id, update).await
    }

    async fn delete_assignment(&self, id: i64) -> Result<bool> {
        self.delete_assignment_impl(id).await
    }

    // 作业提交模块
    async fn create_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
        submitted_by: i64,
        file_path: Option<String>,
        text: Option<String>,
    ) -> Result<AssignmentSubmission> {
        self.create_submission_impl(assignment_id, student_id, submitted_by, file_path, text)
            .await
    }

    async fn get_submission_by_id(&self, id: i64) -> Result<Option<AssignmentSubmission>> {
        self.get_submission_by_id_impl(id).await
    }

    async fn get_submission_for_student(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<AssignmentSubmission>> {
        self.get_submission_for_student_impl(assignment_id, student_id)
            .await
    }

    async fn list_submissions_for_assignment(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<AssignmentSubmission>> {
        self.list_submissions_for_assignment_impl(assignment_id)
            .await
    }

    async fn grade_submission(
        &self,
        id: i64,
        grade: f64,
        feedback: Option<String>,
        graded_by: i64,
    ) -> Result<Option<AssignmentSubmission>> {
        self.grade_submission_impl(id, grade, feedback, graded_by)
            .await
    }

    // 联系人模块
    async fn create_contact(
        &self,
        teacher_id: i64,
        class_level: ClassLevel,
        req: CreateContactRequest,
    ) -> Result<StudentContact> {
        self.create_contact_impl(teacher_id, class_level, req).await
    }

    async fn get_contact_by_id(&self, id: i64) -> Result<Option<StudentContact>> {
        self.get_contact_by_id_impl(id).await
    }

    async fn list_contacts(
        &self,
        teacher_id: i64,
        class_level: Option<ClassLevel>,
    ) -> Result<Vec<StudentContact>> {
        self.list_contacts_impl(teacher_id, class_level).await
    }

    async fn count_contacts_by_level(&self, teacher_id: i64) -> Result<Vec<(ClassLevel, u64)>> {
        self.count_contacts_by_level_impl(teacher_id).await
    }

    async fn update_contact(
        &self,
        id: i64,
        update: UpdateContactRequest,
    ) -> Result<Option<StudentContact>> {
        self.update_contact_impl(id, update).await
    }

    async fn delete_contact(&self, id: i64) -> Result<bool> {
        self.delete_contact_impl(id).await
    }
}

/// 测试辅助：内存 SQLite 与常用种子数据
#[cfg(test)]
pub(crate) mod testing {
    use super::SeaOrmStorage;
    use crate::models::users::{entities::User, entities::UserRole, requests::CreateUserRequest};
    use crate::storage::Storage;
    use sea_orm::{ConnectOptions, Database};

    pub async fn memory_storage() -> SeaOrmStorage {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        // 内存库每个连接相互独立，只能用单连接
        opt.max_connections(1).min_connections(1).sqlx_logging(false);
        let db = Database::connect(opt).await.unwrap();
        SeaOrmStorage::from_connection(db).await.unwrap()
    }

    pub async fn user(storage: &SeaOrmStorage, username: &str, role: UserRole) -> User {
        storage
            .create_user(CreateUserRequest {
                username: username.to_string(),
                role,
                first_name: username.to_string(),
                last_name: "Test".to_string(),
                email: None,
                phone_number: None,
            })
            .await
            .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("school.db").unwrap(),
            "sqlite://school.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("postgres://u:p@localhost/school").unwrap(),
            "postgres://u:p@localhost/school"
        );
        assert!(SeaOrmStorage::build_database_url("ftp://nowhere").is_err());
    }
}
