use serde::Serialize;

use super::entities::{Assignment, AssignmentStatus};

// 槽位展示行（带分组与候选人冗余字段）
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AssignmentRow {
    pub assignment_id: i64,
    pub section_id: i64,
    pub course_id: String,
    pub section_number: String,
    pub instructor_name: String,
    pub instructor_email: String,
    pub semester: String,
    pub candidate_id: Option<i64>,
    pub candidate_netid: Option<String>,
    pub candidate_name: Option<String>,
    pub status: AssignmentStatus,
    pub score: f64,
    pub manually_assigned: bool,
}

// 单个分组分配失败的记录
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SectionFailure {
    pub section_id: i64,
    pub section_code: String,
    pub error_code: String,
    pub message: String,
}

// 全学期分配结果：成功创建的槽位 + 失败分组列表
#[derive(Debug, Clone, Serialize, Default)]
pub struct SemesterAllocation {
    pub semester: String,
    pub assignments: Vec<Assignment>,
    pub failures: Vec<SectionFailure>,
    pub sections_succeeded: usize,
}

impl SemesterAllocation {
    /// 是否存在部分失败
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }
}
