//! 业务数据模型
//!
//! 与 `entity` 中的数据库实体分离，面向 API 序列化，并通过 ts-rs 导出 TypeScript 类型。

/// 以字符串存储的固定取值枚举
///
/// 生成 `ALL`、`as_str()`、`Display`、`FromStr` 以及 serde 支持。
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident ($what:literal) {
            $($variant:ident => $value:literal),+ $(,)?
        }
    ) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash,
            serde::Serialize, serde::Deserialize, ts_rs::TS,
        )]
        $(#[$meta])*
        $vis enum $name {
            $(
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value => Ok($name::$variant),)+
                    _ => Err(format!("Invalid {}: '{}'", $what, s)),
                }
            }
        }
    };
}

pub mod academics;
pub mod assessments;
pub mod assignments;
pub mod classes;
pub mod common;
pub mod contacts;
pub mod dashboard;
pub mod students;
pub mod users;

pub use common::{ApiResponse, PaginationInfo, PaginationQuery, RedirectHint};

/// API 响应中的业务错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    InternalServerError = 1500,

    // 用户
    UserNotFound = 2004,
    UserAlreadyExists = 2009,

    // 学年 / 科目 / 评语模板
    AcademicYearNotFound = 3004,
    NoCurrentAcademicYear = 3005,
    SubjectNotFound = 3104,

    // 班级与学生
    ClassNotFound = 4004,
    ClassAlreadyExists = 4009,
    StudentNotFound = 4104,
    StudentIdAlreadyExists = 4109,

    // 评估结果
    ResultNotFound = 5004,
    ResultAlreadyExists = 5009,

    // 作业与提交
    AssignmentNotFound = 6004,
    AssignmentNotPublished = 6005,
    SubmissionNotFound = 6104,
    SubmissionAlreadyExists = 6109,

    // 联系人
    ContactNotFound = 7004,

    // 成绩单
    ReportRenderFailed = 8500,
}
