use serde::Serialize;
use ts_rs::TS;

use super::entities::{ClassLevel, StudentContact};

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "contact.ts")]
pub struct ClassLevelOption {
    pub value: ClassLevel,
    pub label: String,
}

impl From<ClassLevel> for ClassLevelOption {
    fn from(level: ClassLevel) -> Self {
        Self {
            value: level,
            label: level.label().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "contact.ts")]
pub struct ClassLevelCount {
    #[serde(flatten)]
    #[ts(flatten)]
    pub level: ClassLevelOption,
    pub count: u64,
}

// 联系人首页：各年级记录数
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "contact.ts")]
pub struct ContactHomeResponse {
    pub levels: Vec<ClassLevelCount>,
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "contact.ts")]
pub struct ContactListResponse {
    pub items: Vec<StudentContact>,
}

// 按年级录入的表单上下文
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "contact.ts")]
pub struct ContactFormContext {
    pub level: ClassLevelOption,
    pub existing: Vec<StudentContact>,
}
