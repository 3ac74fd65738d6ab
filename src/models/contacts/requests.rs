use serde::Deserialize;
use ts_rs::TS;

use super::entities::ClassLevel;

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "contact.ts")]
pub struct ContactListParams {
    pub class_level: Option<ClassLevel>,
}

// 新建联系人（年级取自路径）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "contact.ts")]
pub struct CreateContactRequest {
    pub child_first_name: String,
    pub child_last_name: String,
    pub parent_name: String,
    pub parent_phone: String,
    pub parent_email: Option<String>,
    pub relationship: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "contact.ts")]
pub struct UpdateContactRequest {
    pub class_level: Option<ClassLevel>,
    pub child_first_name: Option<String>,
    pub child_last_name: Option<String>,
    pub parent_name: Option<String>,
    pub parent_phone: Option<String>,
    pub parent_email: Option<String>,
    pub relationship: Option<String>,
    pub notes: Option<String>,
}
