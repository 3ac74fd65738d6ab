//! 成绩单版面：从学生与评估结果组装文档结构，不涉及 PDF

use chrono::NaiveDate;

use crate::models::{
    academics::entities::AcademicYear,
    assessments::entities::{AssessmentResultDetail, Term},
    classes::entities::SchoolClass,
    students::entities::Student,
};

pub const REPORT_TITLE: &str = "ACADEMIC REPORT CARD";
pub const NO_RESULTS: &str = "No assessment results available yet.";
pub const NO_COMMENT: &str = "No comment";
pub const TABLE_HEADER: [&str; 3] = ["Subject", "Performance Level", "Teacher Comment"];

#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    pub title: String,
    /// 学校名称，未配置时为空
    pub subtitle: Option<String>,
    pub info_lines: Vec<String>,
    pub body: ReportBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReportBody {
    Placeholder(String),
    Terms(Vec<TermSection>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TermSection {
    pub term: Term,
    pub heading: String,
    pub rows: Vec<[String; 3]>,
}

pub struct ReportSource<'a> {
    pub school_name: &'a str,
    pub student: &'a Student,
    pub class: &'a SchoolClass,
    pub academic_year: Option<&'a AcademicYear>,
    /// 已按 (学期, 科目名称) 排好序
    pub results: &'a [AssessmentResultDetail],
    pub generated_on: NaiveDate,
}

pub fn build_report(source: &ReportSource<'_>) -> ReportDocument {
    let student = source.student;
    let info_lines = vec![
        format!("Student: {} {}", student.first_name, student.last_name),
        format!("Student ID: {}", student.student_id),
        format!("Class: {}", source.class.name),
        format!(
            "Academic Year: {}",
            source.academic_year.map(|y| y.name.as_str()).unwrap_or("N/A")
        ),
        format!("Date Generated: {}", source.generated_on.format("%Y-%m-%d")),
    ];

    let sections: Vec<TermSection> = Term::ALL
        .iter()
        .filter_map(|term| {
            let rows: Vec<[String; 3]> = source
                .results
                .iter()
                .filter(|r| r.result.term == *term)
                .map(table_row)
                .collect();
            (!rows.is_empty()).then(|| TermSection {
                term: *term,
                heading: format!("TERM {} RESULTS", term.number()),
                rows,
            })
        })
        .collect();

    let body = if sections.is_empty() {
        ReportBody::Placeholder(NO_RESULTS.to_string())
    } else {
        ReportBody::Terms(sections)
    };

    let school_name = source.school_name.trim();
    ReportDocument {
        title: REPORT_TITLE.to_string(),
        subtitle: (!school_name.is_empty()).then(|| school_name.to_string()),
        info_lines,
        body,
    }
}

fn table_row(detail: &AssessmentResultDetail) -> [String; 3] {
    let comment = detail.result.teacher_comment.trim();
    [
        detail.subject_name.clone(),
        detail.result.performance_level.label().to_string(),
        if comment.is_empty() {
            NO_COMMENT.to_string()
        } else {
            comment.to_string()
        },
    ]
}

/// 下载文件名：report_<学号>_<YYYYMMDD>.pdf
pub fn report_filename(student_id: &str, generated_on: NaiveDate) -> String {
    format!("report_{}_{}.pdf", student_id, generated_on.format("%Y%m%d"))
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{NaiveDate, Utc};

    use crate::models::academics::entities::AcademicYear;
    use crate::models::assessments::entities::{
        AssessmentResult, AssessmentResultDetail, PerformanceLevel, Term,
    };
    use crate::models::classes::entities::SchoolClass;
    use crate::models::students::entities::Student;

    pub fn student() -> Student {
        Student {
            id: 1,
            student_id: "S001".to_string(),
            first_name: "Amani".to_string(),
            last_name: "Otieno".to_string(),
            class_id: 1,
            date_of_birth: NaiveDate::from_ymd_opt(2014, 3, 2).unwrap(),
            parent_id: Some(3),
            created_at: Utc::now(),
        }
    }

    pub fn class() -> SchoolClass {
        SchoolClass {
            id: 1,
            name: "Grade 5A".to_string(),
            teacher_id: 2,
            academic_year_id: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    pub fn year() -> AcademicYear {
        AcademicYear {
            id: 1,
            name: "2024-2025".to_string(),
            current: true,
            created_at: Utc::now(),
        }
    }

    pub fn result(
        subject: &str,
        term: Term,
        level: PerformanceLevel,
        comment: &str,
    ) -> AssessmentResultDetail {
        AssessmentResultDetail {
            result: AssessmentResult {
                id: 0,
                student_id: 1,
                subject_id: 0,
                term,
                academic_year_id: 1,
                performance_level: level,
                teacher_comment: comment.to_string(),
                recorded_by: 2,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            subject_name: subject.to_string(),
            subject_code: subject[..3].to_uppercase(),
            student_name: "Amani Otieno".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::models::assessments::entities::PerformanceLevel;

    fn render(results: &[AssessmentResultDetail], school: &str) -> ReportDocument {
        let student = student();
        let class = class();
        let year = year();
        build_report(&ReportSource {
            school_name: school,
            student: &student,
            class: &class,
            academic_year: Some(&year),
            results,
            generated_on: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
        })
    }

    #[test]
    fn test_header_lines() {
        let doc = render(&[], "");
        assert_eq!(doc.title, "ACADEMIC REPORT CARD");
        assert_eq!(doc.subtitle, None);
        assert_eq!(
            doc.info_lines,
            vec![
                "Student: Amani Otieno",
                "Student ID: S001",
                "Class: Grade 5A",
                "Academic Year: 2024-2025",
                "Date Generated: 2025-03-14",
            ]
        );
    }

    #[test]
    fn test_no_results_yields_only_placeholder() {
        let doc = render(&[], "Sunrise Academy");
        assert_eq!(doc.body, ReportBody::Placeholder(NO_RESULTS.to_string()));
        assert_eq!(doc.subtitle.as_deref(), Some("Sunrise Academy"));
    }

    #[test]
    fn test_two_terms_with_blank_comments() {
        let results = vec![
            result("Math", Term::One, PerformanceLevel::Meeting, ""),
            result("Math", Term::Two, PerformanceLevel::Exceeding, "   "),
        ];
        let doc = render(&results, "");

        let ReportBody::Terms(sections) = doc.body else {
            panic!("expected term sections");
        };
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].heading, "TERM 1 RESULTS");
        assert_eq!(
            sections[0].rows,
            vec![[
                "Math".to_string(),
                "Meeting Expectations".to_string(),
                "No comment".to_string()
            ]]
        );
        assert_eq!(sections[1].heading, "TERM 2 RESULTS");
        assert_eq!(sections[1].rows[0][1], "Exceeding Expectations");
        assert_eq!(sections[1].rows[0][2], "No comment");
    }

    #[test]
    fn test_terms_skip_missing_and_keep_fetch_order() {
        let results = vec![
            result("English", Term::One, PerformanceLevel::Below, "Read daily"),
            result("Science", Term::One, PerformanceLevel::Approaching, ""),
            result("Art", Term::Three, PerformanceLevel::Meeting, "Creative"),
        ];
        let doc = render(&results, "");
        let ReportBody::Terms(sections) = doc.body else {
            panic!("expected term sections");
        };
        let headings: Vec<_> = sections.iter().map(|s| s.heading.as_str()).collect();
        assert_eq!(headings, vec!["TERM 1 RESULTS", "TERM 3 RESULTS"]);
        let subjects: Vec<_> = sections[0].rows.iter().map(|r| r[0].as_str()).collect();
        assert_eq!(subjects, vec!["English", "Science"]);
        assert_eq!(sections[0].rows[0][2], "Read daily");
    }

    #[test]
    fn test_filename() {
        let on = NaiveDate::from_ymd_opt(2025, 1, 7).unwrap();
        assert_eq!(report_filename("S001", on), "report_S001_20250107.pdf");
    }
}
