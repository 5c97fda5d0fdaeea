//! 助教分配引擎
//!
//! - `section`: 单个分组的分层分配（推荐 → 返聘 → 评分补位 → 空缺填充）
//! - `semester`: 整个学期的分组编排
//! - `pool`: 候选池相关查询
//!
//! 分配是贪心、顺序相关的，不做全局最优匹配，也不回滚已完成的分组。

pub mod pool;
pub mod section;
pub mod semester;

use std::collections::HashSet;
use std::sync::Arc;

use crate::errors::Result;
use crate::models::assignments::{entities::Assignment, responses::SemesterAllocation};
use crate::services::scoring::ScoringWeights;
use crate::storage::Storage;

/// 推荐候选人的固定分数
pub const REQUESTED_SCORE: f64 = 3.0;
/// 上学期助教的固定分数
pub const RETURNING_SCORE: f64 = 2.0;

/// 一次分配过程中已被占用的候选人 netid
///
/// 由调用方持有并按引用传递，每次全学期分配都新建一个。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignedCandidates {
    netids: HashSet<String>,
}

impl AssignedCandidates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, netid: &str) -> bool {
        self.netids.contains(netid)
    }

    /// 返回是否为新加入
    pub fn insert(&mut self, netid: &str) -> bool {
        self.netids.insert(netid.to_string())
    }

    pub fn len(&self) -> usize {
        self.netids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.netids.is_empty()
    }
}

impl Extend<String> for AssignedCandidates {
    fn extend<T: IntoIterator<Item = String>>(&mut self, iter: T) {
        self.netids.extend(iter);
    }
}

pub struct AllocationService {
    storage: Arc<dyn Storage>,
    weights: ScoringWeights,
}

impl AllocationService {
    pub fn new(storage: Arc<dyn Storage>, weights: ScoringWeights) -> Self {
        Self { storage, weights }
    }

    pub(crate) fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    pub(crate) fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    // 分配单个分组的全部槽位
    pub async fn allocate_section(
        &self,
        section_id: i64,
        semester: &str,
        import_previous_graders: bool,
        assigned: &mut AssignedCandidates,
    ) -> Result<Vec<Assignment>> {
        section::allocate_section(self, section_id, semester, import_previous_graders, assigned)
            .await
    }

    // 分配整个学期的全部分组
    pub async fn allocate_all_sections(
        &self,
        semester: &str,
        import_previous_graders: bool,
    ) -> Result<SemesterAllocation> {
        semester::allocate_all_sections(self, semester, import_previous_graders).await
    }
}
