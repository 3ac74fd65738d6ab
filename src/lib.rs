//! School Reporting - 学校成绩报告后端服务
//!
//! 基于 Actix Web 构建：班级花名册、评估结果、科目作业与提交、
//! 家长可下载的 PDF 成绩单，以及教师私有的学生联系人名录。
//!
//! # 架构
//! - `cache`: 身份缓存（Moka/Redis）
//! - `config`: 分层配置
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误类型
//! - `middlewares`: JWT 身份与角色中间件
//! - `models`: API 数据模型
//! - `routes`: `/api/v1` 路由层
//! - `runtime`: 启动与关闭
//! - `services`: 业务逻辑、访问控制与成绩单渲染
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 提取器、校验与 JWT 工具

pub mod cache;
pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
