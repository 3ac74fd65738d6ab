//! 科目作业与作业提交

pub mod entities;
pub mod requests;
pub mod responses;
