//! 学年、科目与评语模板

pub mod entities;
pub mod requests;
