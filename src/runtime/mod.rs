//! 运行时支撑：日志初始化、学期锁与启动流程

pub mod lifetime;
pub mod logging;
pub mod semester_lock;

pub use semester_lock::SemesterLocks;
