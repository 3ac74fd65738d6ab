//! 教师维护的家长联系人名录

pub mod entities;
pub mod requests;
pub mod responses;
