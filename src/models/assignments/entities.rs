use serde::{Deserialize, Serialize};

// 槽位状态
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    #[default]
    Pending, // 待确认
    Accepted, // 已接受
}

impl AssignmentStatus {
    pub const PENDING: &'static str = "pending";
    pub const ACCEPTED: &'static str = "accepted";
}

impl<'de> Deserialize<'de> for AssignmentStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<AssignmentStatus>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的槽位状态: '{s}'. 支持的状态: pending, accepted"
            ))
        })
    }
}

impl std::fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssignmentStatus::Pending => write!(f, "{}", AssignmentStatus::PENDING),
            AssignmentStatus::Accepted => write!(f, "{}", AssignmentStatus::ACCEPTED),
        }
    }
}

impl std::str::FromStr for AssignmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(AssignmentStatus::Pending),
            "accepted" => Ok(AssignmentStatus::Accepted),
            _ => Err(format!("Invalid assignment status: {s}")),
        }
    }
}

/// 一个助教槽位。`candidate_id` 为空表示空缺
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Assignment {
    pub id: i64,
    pub section_id: i64,
    pub semester: String,
    pub candidate_id: Option<i64>,
    pub status: AssignmentStatus,
    // 分配时记录的分数
    pub score: f64,
    // 是否为人工指派
    pub manually_assigned: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Assignment {
    pub fn is_vacant(&self) -> bool {
        self.candidate_id.is_none()
    }
}
