//! 业务数据模型
//!
//! 与 `entity` 中的数据库实体分离，存储层负责两者之间的转换。

pub mod assignments;
pub mod candidates;
pub mod recommendations;
pub mod sections;
pub mod semesters;

pub use semesters::{Season, Semester, previous_semester};
