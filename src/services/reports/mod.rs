//! 成绩单渲染：版面组装与 PDF 输出是两个独立的纯步骤

pub mod layout;
pub mod pdf;

pub use layout::{ReportDocument, ReportSource, build_report, report_filename};
pub use pdf::ReportStyle;

use crate::errors::SchoolError;

/// 排版并写出 PDF
pub fn render_pdf(doc: &ReportDocument, style: &ReportStyle) -> Result<Vec<u8>, SchoolError> {
    let pages = pdf::paginate(doc, style);
    pdf::write_pdf(&doc.title, &pages)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::layout::fixtures;
    use super::*;
    use crate::models::assessments::entities::{PerformanceLevel, Term};

    #[test]
    fn test_render_empty_and_populated_reports() {
        let student = fixtures::student();
        let class = fixtures::class();
        let year = fixtures::year();
        let on = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();

        for results in [
            vec![],
            vec![
                fixtures::result("Math", Term::One, PerformanceLevel::Meeting, ""),
                fixtures::result("Math", Term::Two, PerformanceLevel::Exceeding, ""),
            ],
        ] {
            let doc = build_report(&ReportSource {
                school_name: "Sunrise Academy",
                student: &student,
                class: &class,
                academic_year: Some(&year),
                results: &results,
                generated_on: on,
            });
            let bytes = render_pdf(&doc, &ReportStyle::default()).unwrap();
            assert!(bytes.starts_with(b"%PDF"));
        }
    }
}
