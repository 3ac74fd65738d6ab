use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

string_enum! {
    /// 年级
    #[ts(export, export_to = "contact.ts")]
    pub enum ClassLevel("class level") {
        Pp1 => "pp1",
        Pp2 => "pp2",
        Grade1 => "grade_1",
        Grade2 => "grade_2",
        Grade3 => "grade_3",
        Grade4 => "grade_4",
        Grade5 => "grade_5",
        Grade6 => "grade_6",
        Grade7 => "grade_7",
        Grade8 => "grade_8",
        Grade9 => "grade_9",
    }
}

impl ClassLevel {
    pub fn label(&self) -> &'static str {
        match self {
            ClassLevel::Pp1 => "PP1",
            ClassLevel::Pp2 => "PP2",
            ClassLevel::Grade1 => "Grade 1",
            ClassLevel::Grade2 => "Grade 2",
            ClassLevel::Grade3 => "Grade 3",
            ClassLevel::Grade4 => "Grade 4",
            ClassLevel::Grade5 => "Grade 5",
            ClassLevel::Grade6 => "Grade 6",
            ClassLevel::Grade7 => "Grade 7",
            ClassLevel::Grade8 => "Grade 8",
            ClassLevel::Grade9 => "Grade 9",
        }
    }
}

// 学生联系人记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "contact.ts")]
pub struct StudentContact {
    pub id: i64,
    pub teacher_id: i64,
    pub class_level: ClassLevel,
    pub child_first_name: String,
    pub child_last_name: String,
    pub parent_name: String,
    pub parent_phone: String,
    pub parent_email: Option<String>,
    pub relationship: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_level_values() {
        assert_eq!(ClassLevel::ALL.len(), 11);
        assert_eq!("grade_4".parse::<ClassLevel>().unwrap(), ClassLevel::Grade4);
        assert_eq!(ClassLevel::Pp2.label(), "PP2");
        assert!("grade_10".parse::<ClassLevel>().is_err());
    }
}
