use serde::Deserialize;
use ts_rs::TS;

// 班级查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "class.ts")]
pub struct ClassQueryParams {
    pub academic_year_id: Option<i64>,
}

// 创建班级请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "class.ts")]
pub struct CreateClassRequest {
    pub name: String,
    /// 教师创建时可省略（默认为自己），管理员必须指定
    pub teacher_id: Option<i64>,
    /// 省略时使用当前学年
    pub academic_year_id: Option<i64>,
}

// 更新班级请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "class.ts")]
pub struct UpdateClassRequest {
    pub name: Option<String>,
    /// 仅管理员可以更换班主任
    pub teacher_id: Option<i64>,
    pub academic_year_id: Option<i64>,
}
