use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use ts_rs::TS;

/// 学期，取值 1..=3，序列化为整数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Term {
    One,
    Two,
    Three,
}

impl Term {
    pub const ALL: &'static [Term] = &[Term::One, Term::Two, Term::Three];

    pub fn number(&self) -> i32 {
        match self {
            Term::One => 1,
            Term::Two => 2,
            Term::Three => 3,
        }
    }
}

impl TryFrom<i32> for Term {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Term::One),
            2 => Ok(Term::Two),
            3 => Ok(Term::Three),
            _ => Err(format!("Invalid term: {value}. Term must be 1, 2 or 3")),
        }
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Term {}", self.number())
    }
}

impl Serialize for Term {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.number())
    }
}

impl<'de> Deserialize<'de> for Term {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = i32::deserialize(deserializer)?;
        Term::try_from(value).map_err(serde::de::Error::custom)
    }
}

string_enum! {
    /// 表现等级
    #[ts(export, export_to = "assessment.ts")]
    pub enum PerformanceLevel("performance level") {
        Exceeding => "exceeding",
        Meeting => "meeting",
        Approaching => "approaching",
        Below => "below",
    }
}

impl PerformanceLevel {
    /// 成绩单上显示的名称
    pub fn label(&self) -> &'static str {
        match self {
            PerformanceLevel::Exceeding => "Exceeding Expectations",
            PerformanceLevel::Meeting => "Meeting Expectations",
            PerformanceLevel::Approaching => "Approaching Expectations",
            PerformanceLevel::Below => "Below Expectations",
        }
    }
}

// 评估结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct AssessmentResult {
    pub id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    #[ts(type = "number")]
    pub term: Term,
    pub academic_year_id: i64,
    pub performance_level: PerformanceLevel,
    pub teacher_comment: String,
    pub recorded_by: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// 带科目与学生名称的评估结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct AssessmentResultDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub result: AssessmentResult,
    pub subject_name: String,
    pub subject_code: String,
    pub student_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_accepts_only_one_to_three() {
        assert_eq!(Term::try_from(2).unwrap(), Term::Two);
        assert!(Term::try_from(0).is_err());
        assert!(Term::try_from(4).is_err());
    }

    #[test]
    fn test_term_serializes_as_number() {
        assert_eq!(serde_json::to_string(&Term::Three).unwrap(), "3");
        let term: Term = serde_json::from_str("1").unwrap();
        assert_eq!(term, Term::One);
        assert!(serde_json::from_str::<Term>("5").is_err());
    }

    #[test]
    fn test_performance_level_labels() {
        assert_eq!(PerformanceLevel::Meeting.label(), "Meeting Expectations");
        assert_eq!(
            "approaching".parse::<PerformanceLevel>().unwrap().label(),
            "Approaching Expectations"
        );
        assert!("excellent".parse::<PerformanceLevel>().is_err());
    }
}
