//! 槽位的创建与修改请求
//!
//! 字段仅在 crate 内可见，外部只能通过构造函数得到合法组合，
//! 保证空缺槽位始终为 `score = 0`、`pending`、非人工指派。

use super::entities::AssignmentStatus;

/// 新建槽位
#[derive(Debug, Clone, PartialEq)]
pub struct NewAssignment {
    pub(crate) section_id: i64,
    pub(crate) semester: String,
    pub(crate) candidate_id: Option<i64>,
    pub(crate) score: f64,
}

impl NewAssignment {
    /// 由分配算法填充的槽位
    pub fn filled(section_id: i64, semester: &str, candidate_id: i64, score: f64) -> Self {
        Self {
            section_id,
            semester: semester.to_string(),
            candidate_id: Some(candidate_id),
            score,
        }
    }

    /// 空缺槽位
    pub fn vacant(section_id: i64, semester: &str) -> Self {
        Self {
            section_id,
            semester: semester.to_string(),
            candidate_id: None,
            score: 0.0,
        }
    }
}

/// 槽位修改，`None` 表示保持不变
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignmentPatch {
    pub(crate) candidate_id: Option<Option<i64>>,
    pub(crate) score: Option<f64>,
    pub(crate) status: Option<AssignmentStatus>,
    pub(crate) manually_assigned: Option<bool>,
}

impl AssignmentPatch {
    /// 清空槽位
    pub fn vacate() -> Self {
        Self {
            candidate_id: Some(None),
            score: Some(0.0),
            status: Some(AssignmentStatus::Pending),
            manually_assigned: Some(false),
        }
    }

    /// 人工换人：分数保持原值
    pub fn manual_swap(candidate_id: i64) -> Self {
        Self {
            candidate_id: Some(Some(candidate_id)),
            manually_assigned: Some(true),
            ..Default::default()
        }
    }

    /// 按评分自动补位
    pub fn auto_fill(candidate_id: i64, score: f64) -> Self {
        Self {
            candidate_id: Some(Some(candidate_id)),
            score: Some(score),
            status: Some(AssignmentStatus::Pending),
            manually_assigned: Some(false),
        }
    }

    /// 接受分配
    pub fn accept() -> Self {
        Self {
            status: Some(AssignmentStatus::Accepted),
            ..Default::default()
        }
    }
}

// 槽位查询条件（用于存储层，全部为精确匹配）
#[derive(Debug, Clone, Default)]
pub struct AssignmentQuery {
    pub semester: Option<String>,
    pub section_id: Option<i64>,
    pub candidate_id: Option<i64>,
    // 仅返回已填充的槽位
    pub filled_only: bool,
}

impl AssignmentQuery {
    pub fn semester(semester: &str) -> Self {
        Self {
            semester: Some(semester.to_string()),
            ..Default::default()
        }
    }

    pub fn section(section_id: i64, semester: &str) -> Self {
        Self {
            semester: Some(semester.to_string()),
            section_id: Some(section_id),
            ..Default::default()
        }
    }

    pub fn filled(mut self) -> Self {
        self.filled_only = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vacant_slot_defaults() {
        let slot = NewAssignment::vacant(7, "Fall 2024");
        assert_eq!(slot.candidate_id, None);
        assert_eq!(slot.score, 0.0);
    }

    #[test]
    fn test_vacate_resets_every_field() {
        let patch = AssignmentPatch::vacate();
        assert_eq!(patch.candidate_id, Some(None));
        assert_eq!(patch.score, Some(0.0));
        assert_eq!(patch.status, Some(AssignmentStatus::Pending));
        assert_eq!(patch.manually_assigned, Some(false));
    }

    #[test]
    fn test_manual_swap_keeps_score() {
        let patch = AssignmentPatch::manual_swap(3);
        assert_eq!(patch.candidate_id, Some(Some(3)));
        assert_eq!(patch.score, None);
        assert_eq!(patch.manually_assigned, Some(true));
    }
}
