//! 槽位台账：查询与人工调整
//!
//! 每个分组在台账中恒有 `required_graders` 行；调整操作只改写已有槽位，
//! 不新增也不删除行（列表查询时的补齐除外）。

pub mod auto_assign;
pub mod list;
pub mod status;
pub mod swap;

use std::sync::Arc;

use crate::errors::{AllocatorError, Result};
use crate::models::assignments::{
    entities::Assignment, requests::AssignmentPatch, responses::AssignmentRow,
};
use crate::services::scoring::ScoringWeights;
use crate::storage::Storage;

pub struct AssignmentService {
    storage: Arc<dyn Storage>,
    weights: ScoringWeights,
}

impl AssignmentService {
    pub fn new(storage: Arc<dyn Storage>, weights: ScoringWeights) -> Self {
        Self { storage, weights }
    }

    pub(crate) fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    pub(crate) fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    // 获取学期内全部槽位（按课程、分组排序）
    pub async fn list_section_assignments(&self, semester: &str) -> Result<Vec<AssignmentRow>> {
        list::list_section_assignments(self, semester).await
    }

    // 人工指定候选人
    pub async fn swap_candidate(&self, assignment_id: i64, candidate_id: i64) -> Result<Assignment> {
        swap::swap_candidate(self, assignment_id, candidate_id).await
    }

    // 用评分最高的空闲候选人填充槽位
    pub async fn auto_assign_slot(&self, assignment_id: i64) -> Result<Assignment> {
        auto_assign::auto_assign_slot(self, assignment_id).await
    }

    // 清空槽位
    pub async fn unassign_slot(&self, assignment_id: i64) -> Result<Assignment> {
        status::unassign_slot(self, assignment_id).await
    }

    // 候选人接受分配
    pub async fn accept_assignment(&self, assignment_id: i64) -> Result<Assignment> {
        status::accept_assignment(self, assignment_id).await
    }
}

pub(crate) async fn load_assignment(storage: &Arc<dyn Storage>, assignment_id: i64) -> Result<Assignment> {
    storage
        .get_assignment_by_id(assignment_id)
        .await?
        .ok_or_else(|| AllocatorError::not_found(format!("Assignment {assignment_id} not found")))
}

pub(crate) async fn apply_patch(
    storage: &Arc<dyn Storage>,
    assignment_id: i64,
    patch: AssignmentPatch,
) -> Result<Assignment> {
    storage
        .update_assignment(assignment_id, patch)
        .await?
        .ok_or_else(|| AllocatorError::not_found(format!("Assignment {assignment_id} not found")))
}
