use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// 授课教师
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Instructor {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Section {
    // 分组ID
    pub id: i64,
    // 课程编号，如 CS1337
    pub course_id: String,
    // 分组编号，如 001
    pub section_number: String,
    pub instructor: Instructor,
    // 需要的助教人数
    pub required_graders: u32,
    // 课程关键词（已规范化）
    pub keywords: BTreeSet<String>,
    // 教师推荐的候选人 netid，按优先顺序
    pub requested_netids: Vec<String>,
    // 所属学期
    pub semester: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Section {
    /// 是否带有推荐候选人
    pub fn has_requests(&self) -> bool {
        !self.requested_netids.is_empty()
    }

    /// 展示用编号，如 CS1337.001
    pub fn display_code(&self) -> String {
        format!("{}.{}", self.course_id, self.section_number)
    }
}
