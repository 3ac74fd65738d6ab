use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

string_enum! {
    /// 用户角色，创建后不可修改
    #[ts(export, export_to = "user.ts")]
    pub enum UserRole("user role") {
        Teacher => "teacher",
        Parent => "parent",
        Admin => "admin",
    }
}

impl UserRole {
    pub fn admin_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin]
    }
    pub fn teacher_roles() -> &'static [&'static UserRole] {
        &[&Self::Teacher]
    }
    pub fn parent_roles() -> &'static [&'static UserRole] {
        &[&Self::Parent]
    }
    /// 教职工：教师与管理员
    pub fn staff_roles() -> &'static [&'static UserRole] {
        &[&Self::Teacher, &Self::Admin]
    }

    /// 显示名称
    pub fn label(&self) -> &'static str {
        match self {
            UserRole::Teacher => "Teacher",
            UserRole::Parent => "Parent",
            UserRole::Admin => "Administrator",
        }
    }
}

// 用户实体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub role: UserRole,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn full_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let name = name.trim();
        if name.is_empty() {
            self.username.clone()
        } else {
            name.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_and_display() {
        assert_eq!("parent".parse::<UserRole>().unwrap(), UserRole::Parent);
        assert_eq!(UserRole::Admin.to_string(), "admin");
        assert!("student".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_role_serde_uses_lowercase_tags() {
        let json = serde_json::to_string(&UserRole::Teacher).unwrap();
        assert_eq!(json, "\"teacher\"");
        let role: UserRole = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, UserRole::Admin);
    }

    #[test]
    fn test_full_name_falls_back_to_username() {
        let now = Utc::now();
        let mut user = User {
            id: 1,
            username: "jdoe".to_string(),
            role: UserRole::Parent,
            first_name: String::new(),
            last_name: String::new(),
            email: None,
            phone_number: None,
            created_at: now,
            updated_at: now,
        };
        assert_eq!(user.full_name(), "jdoe");
        user.first_name = "Jane".to_string();
        user.last_name = "Doe".to_string();
        assert_eq!(user.full_name(), "Jane Doe");
    }
}
