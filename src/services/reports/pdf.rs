//! 成绩单 PDF 输出
//!
//! 先把 [`ReportDocument`] 排成逐页的绘制指令（纯函数，可测试），再交给 printpdf 写出。
//! 页面为 US Letter，字体使用内置 Helvetica。坐标单位为毫米，原点在左下角。

use printpdf::{BuiltinFont, Line, Mm, PdfDocument, Point};

use super::layout::{ReportBody, ReportDocument, TABLE_HEADER, TermSection};
use crate::config::ReportConfig;
use crate::errors::SchoolError;

pub const PAGE_WIDTH_MM: f32 = 215.9;
pub const PAGE_HEIGHT_MM: f32 = 279.4;

const PT_TO_MM: f32 = 0.352_778;
// Helvetica 平均字宽约 0.5em，用于估算换行
const AVG_CHAR_EM: f32 = 0.5;
const LINE_SPACING: f32 = 1.4;
const CELL_PADDING_MM: f32 = 1.5;
// 三列宽度比例 2:2:3
const COLUMN_WEIGHTS: [f32; 3] = [2.0, 2.0, 3.0];

#[derive(Debug, Clone, PartialEq)]
pub struct ReportStyle {
    pub title_font_size: f32,
    pub body_font_size: f32,
    pub margin_mm: f32,
}

impl Default for ReportStyle {
    fn default() -> Self {
        Self {
            title_font_size: 18.0,
            body_font_size: 10.0,
            margin_mm: 18.0,
        }
    }
}

impl From<&ReportConfig> for ReportStyle {
    fn from(config: &ReportConfig) -> Self {
        Self {
            title_font_size: config.title_font_size,
            body_font_size: config.body_font_size,
            margin_mm: config.margin_mm,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        text: String,
        x: f32,
        y: f32,
        size: f32,
        bold: bool,
    },
    Rule {
        x1: f32,
        x2: f32,
        y: f32,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    pub ops: Vec<DrawOp>,
}

impl PageLayout {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            DrawOp::Rule { .. } => None,
        })
    }
}

fn line_height(size: f32) -> f32 {
    size * LINE_SPACING * PT_TO_MM
}

fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * AVG_CHAR_EM * PT_TO_MM
}

/// 按估算字宽折行，超长单词硬切
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            lines.push(word.drain(..max_chars).collect());
        }
        let word: String = word.into_iter().collect();
        if word.is_empty() {
            continue;
        }

        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

struct Paginator<'s> {
    style: &'s ReportStyle,
    pages: Vec<PageLayout>,
    y: f32,
    columns: [(f32, f32); 3],
}

impl<'s> Paginator<'s> {
    fn new(style: &'s ReportStyle) -> Self {
        let content_width = PAGE_WIDTH_MM - 2.0 * style.margin_mm;
        let total: f32 = COLUMN_WEIGHTS.iter().sum();
        let mut x = style.margin_mm;
        let mut columns = [(0.0, 0.0); 3];
        for (i, weight) in COLUMN_WEIGHTS.iter().enumerate() {
            let width = content_width * weight / total;
            columns[i] = (x, width);
            x += width;
        }

        Self {
            style,
            pages: vec![PageLayout::default()],
            y: PAGE_HEIGHT_MM - style.margin_mm,
            columns,
        }
    }

    fn fits(&self, height: f32) -> bool {
        self.y - height >= self.style.margin_mm
    }

    fn new_page(&mut self) {
        self.pages.push(PageLayout::default());
        self.y = PAGE_HEIGHT_MM - self.style.margin_mm;
    }

    fn ensure(&mut self, height: f32) {
        if !self.fits(height) {
            self.new_page();
        }
    }

    fn push(&mut self, op: DrawOp) {
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(op);
        }
    }

    fn text_at(&mut self, text: &str, x: f32, size: f32, bold: bool) {
        let baseline = self.y - size * PT_TO_MM;
        self.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y: baseline,
            size,
            bold,
        });
    }

    fn line(&mut self, text: &str, size: f32, bold: bool) {
        let height = line_height(size);
        self.ensure(height);
        self.text_at(text, self.style.margin_mm, size, bold);
        self.y -= height;
    }

    fn centered(&mut self, text: &str, size: f32, bold: bool) {
        let height = line_height(size);
        self.ensure(height);
        let x = ((PAGE_WIDTH_MM - text_width(text, size)) / 2.0).max(self.style.margin_mm);
        self.text_at(text, x, size, bold);
        self.y -= height;
    }

    fn gap(&mut self, mm: f32) {
        self.y -= mm;
    }

    fn rule(&mut self) {
        let x1 = self.style.margin_mm;
        let x2 = PAGE_WIDTH_MM - self.style.margin_mm;
        let y = self.y;
        self.push(DrawOp::Rule { x1, x2, y });
    }

    fn wrap_cells(&self, cells: &[String; 3], size: f32) -> [Vec<String>; 3] {
        let char_width = size * AVG_CHAR_EM * PT_TO_MM;
        std::array::from_fn(|i| {
            let usable = self.columns[i].1 - 2.0 * CELL_PADDING_MM;
            let max_chars = (usable / char_width).floor() as usize;
            wrap_text(&cells[i], max_chars)
        })
    }

    fn row_height(&self, wrapped: &[Vec<String>; 3], size: f32) -> f32 {
        let lines = wrapped.iter().map(Vec::len).max().unwrap_or(1);
        lines as f32 * line_height(size) + 2.0 * CELL_PADDING_MM
    }

    fn draw_row(&mut self, wrapped: &[Vec<String>; 3], size: f32, bold: bool) {
        let height = self.row_height(wrapped, size);
        let top = self.y;
        for (i, lines) in wrapped.iter().enumerate() {
            let x = self.columns[i].0 + CELL_PADDING_MM;
            self.y = top - CELL_PADDING_MM;
            for line in lines {
                self.text_at(line, x, size, bold);
                self.y -= line_height(size);
            }
        }
        self.y = top - height;
        self.rule();
    }

    fn table_header(&mut self) {
        let size = self.style.body_font_size;
        let header = TABLE_HEADER.map(str::to_string);
        let wrapped = self.wrap_cells(&header, size);
        self.rule();
        self.draw_row(&wrapped, size, true);
    }

    fn section(&mut self, section: &TermSection) {
        let size = self.style.body_font_size;
        let heading_size = size + 4.0;
        let header_height = self.row_height(&self.wrap_cells(&TABLE_HEADER.map(str::to_string), size), size);
        let first_row = section
            .rows
            .first()
            .map(|row| self.row_height(&self.wrap_cells(row, size), size))
            .unwrap_or(0.0);

        // 标题不单独留在页底
        self.ensure(line_height(heading_size) + 3.0 + header_height + first_row);
        self.line(&section.heading, heading_size, true);
        self.gap(3.0);
        self.table_header();

        for row in &section.rows {
            let wrapped = self.wrap_cells(row, size);
            if !self.fits(self.row_height(&wrapped, size)) {
                self.new_page();
                self.table_header();
            }
            self.draw_row(&wrapped, size, false);
        }
        self.gap(8.0);
    }
}

/// 把文档排成逐页绘制指令
pub fn paginate(doc: &ReportDocument, style: &ReportStyle) -> Vec<PageLayout> {
    let mut p = Paginator::new(style);
    let body = style.body_font_size;

    p.centered(&doc.title, style.title_font_size, true);
    if let Some(subtitle) = &doc.subtitle {
        p.centered(subtitle, body + 2.0, false);
    }
    p.gap(6.0);

    for info in &doc.info_lines {
        p.line(info, body, false);
        p.gap(2.0);
    }
    p.gap(6.0);

    match &doc.body {
        ReportBody::Placeholder(text) => p.line(text, body, false),
        ReportBody::Terms(sections) => {
            for section in sections {
                p.section(section);
            }
        }
    }

    p.pages
}

/// 写出 PDF 字节
pub fn write_pdf(title: &str, pages: &[PageLayout]) -> Result<Vec<u8>, SchoolError> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        title,
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Page 1",
    );
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| SchoolError::report_render(format!("加载字体失败: {e}")))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| SchoolError::report_render(format!("加载字体失败: {e}")))?;

    for (index, page) in pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_index, layer_index) = doc.add_page(
                Mm(PAGE_WIDTH_MM),
                Mm(PAGE_HEIGHT_MM),
                format!("Page {}", index + 1),
            );
            doc.get_page(page_index).get_layer(layer_index)
        };

        for op in &page.ops {
            match op {
                DrawOp::Text {
                    text,
                    x,
                    y,
                    size,
                    bold: is_bold,
                } => {
                    let font = if *is_bold { &bold } else { &regular };
                    layer.use_text(text.clone(), *size, Mm(*x), Mm(*y), font);
                }
                DrawOp::Rule { x1, x2, y } => {
                    layer.add_line(Line {
                        points: vec![
                            (Point::new(Mm(*x1), Mm(*y)), false),
                            (Point::new(Mm(*x2), Mm(*y)), false),
                        ],
                        is_closed: false,
                    });
                }
            }
        }
    }

    doc.save_to_bytes()
        .map_err(|e| SchoolError::report_render(format!("写出 PDF 失败: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::reports::layout::{NO_RESULTS, REPORT_TITLE};
    use crate::models::assessments::entities::Term;

    fn doc_with_rows(rows: usize) -> ReportDocument {
        ReportDocument {
            title: REPORT_TITLE.to_string(),
            subtitle: None,
            info_lines: vec!["Student: Amani Otieno".to_string()],
            body: ReportBody::Terms(vec![TermSection {
                term: Term::One,
                heading: "TERM 1 RESULTS".to_string(),
                rows: (0..rows)
                    .map(|i| {
                        [
                            format!("Subject {i}"),
                            "Meeting Expectations".to_string(),
                            "Shows steady progress and participates well in class discussions."
                                .to_string(),
                        ]
                    })
                    .collect(),
            }]),
        }
    }

    #[test]
    fn test_wrap_text() {
        assert_eq!(wrap_text("one two three", 7), vec!["one two", "three"]);
        assert_eq!(wrap_text("", 10), vec![""]);
        assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_placeholder_has_no_table() {
        let doc = ReportDocument {
            title: REPORT_TITLE.to_string(),
            subtitle: None,
            info_lines: vec![],
            body: ReportBody::Placeholder(NO_RESULTS.to_string()),
        };
        let pages = paginate(&doc, &ReportStyle::default());
        assert_eq!(pages.len(), 1);
        let texts: Vec<_> = pages[0].texts().collect();
        assert_eq!(texts, vec![REPORT_TITLE, NO_RESULTS]);
        assert!(!pages[0].ops.iter().any(|op| matches!(op, DrawOp::Rule { .. })));
    }

    #[test]
    fn test_long_table_repeats_header_on_each_page() {
        let pages = paginate(&doc_with_rows(60), &ReportStyle::default());
        assert!(pages.len() > 1);
        for page in &pages {
            assert!(page.texts().any(|t| t == "Subject"));
            assert!(page.texts().any(|t| t == "Teacher Comment"));
        }
        // 全部行都被输出
        let rows: usize = pages
            .iter()
            .map(|p| p.texts().filter(|t| t.starts_with("Subject ")).count())
            .sum();
        assert_eq!(rows, 60);
    }

    #[test]
    fn test_content_stays_inside_margins() {
        let style = ReportStyle::default();
        for page in paginate(&doc_with_rows(40), &style) {
            for op in &page.ops {
                if let DrawOp::Text { y, .. } | DrawOp::Rule { y, .. } = op {
                    assert!(*y >= style.margin_mm - 0.01);
                    assert!(*y <= PAGE_HEIGHT_MM - style.margin_mm);
                }
            }
        }
    }

    #[test]
    fn test_writes_pdf_bytes() {
        let style = ReportStyle::default();
        let doc = doc_with_rows(3);
        let bytes = write_pdf(&doc.title, &paginate(&doc, &style)).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
