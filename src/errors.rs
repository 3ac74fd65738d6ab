//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

use sea_orm::{DbErr, SqlErr};

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_school_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum SchoolError {
            $($variant(String),)*
        }

        impl SchoolError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(SchoolError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(SchoolError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(SchoolError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl SchoolError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        SchoolError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_school_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    Validation("E007", "Validation Error"),
    NotFound("E008", "Resource Not Found"),
    Serialization("E009", "Serialization Error"),
    DateParse("E011", "Date Parse Error"),
    Authentication("E012", "Authentication Error"),
    PermissionDenied("E013", "Permission Denied"),
    UniquenessViolation("E014", "Uniqueness Violation"),
    ReportRender("E015", "Report Render Error"),
}

impl SchoolError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 将数据库错误映射为业务错误
    ///
    /// 唯一约束冲突映射为 `UniquenessViolation`，其余按操作失败处理。
    pub fn from_db(context: &str, err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                SchoolError::UniquenessViolation(format!("{context}: {detail}"))
            }
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                SchoolError::Validation(format!("{context}: {detail}"))
            }
            _ => SchoolError::DatabaseOperation(format!("{context}失败: {err}")),
        }
    }
}

impl fmt::Display for SchoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for SchoolError {}

// 为常见的错误类型实现 From trait
impl From<DbErr> for SchoolError {
    fn from(err: DbErr) -> Self {
        SchoolError::from_db("数据库操作", err)
    }
}

impl From<serde_json::Error> for SchoolError {
    fn from(err: serde_json::Error) -> Self {
        SchoolError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for SchoolError {
    fn from(err: chrono::ParseError) -> Self {
        SchoolError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SchoolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(SchoolError::cache_connection("test").code(), "E001");
        assert_eq!(SchoolError::database_config("test").code(), "E003");
        assert_eq!(SchoolError::validation("test").code(), "E007");
        assert_eq!(SchoolError::not_found("test").code(), "E008");
        assert_eq!(SchoolError::permission_denied("test").code(), "E013");
        assert_eq!(SchoolError::uniqueness_violation("test").code(), "E014");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            SchoolError::uniqueness_violation("test").error_type(),
            "Uniqueness Violation"
        );
        assert_eq!(
            SchoolError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = SchoolError::validation("Term must be 1, 2 or 3");
        assert_eq!(err.message(), "Term must be 1, 2 or 3");
    }

    #[test]
    fn test_format_simple() {
        let err = SchoolError::not_found("Student 42");
        let formatted = err.format_simple();
        assert!(formatted.contains("Resource Not Found"));
        assert!(formatted.contains("Student 42"));
    }

    #[test]
    fn test_plain_db_error_is_operation_error() {
        let err = SchoolError::from_db("查询学生", DbErr::Custom("boom".into()));
        assert_eq!(err.code(), "E005");
        assert!(err.message().contains("查询学生失败"));
    }
}
