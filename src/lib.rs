//! Grader Allocator - 课程助教分配引擎
//!
//! 按学期把候选人分配到课程分组的助教槽位：优先教师推荐，其次上学期助教，
//! 最后按加权评分补位，不足的槽位以空缺行占位。
//!
//! # 架构
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `models`: 数据模型定义
//! - `runtime`: 日志、学期锁与启动流程
//! - `services`: 分配、台账与核查逻辑
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod config;
pub mod entity;
pub mod errors;
pub mod models;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
