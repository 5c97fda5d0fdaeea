use std::sync::Arc;

use crate::models::{
    assignments::{
        entities::Assignment,
        requests::{AssignmentPatch, AssignmentQuery, NewAssignment},
    },
    candidates::{
        entities::Candidate,
        requests::{CandidateQuery, CreateCandidateRequest, UpdateCandidateRequest},
    },
    sections::{
        entities::Section,
        requests::{CreateSectionRequest, SectionQuery},
    },
};

use crate::config::DatabaseConfig;
use crate::errors::Result;

pub mod sea_orm_storage;

/// 存储层契约
///
/// 所有过滤条件均为精确匹配。分配引擎只依赖此 trait，不感知具体数据库。
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 候选人管理方法
    // 创建候选人
    async fn create_candidate(&self, candidate: CreateCandidateRequest) -> Result<Candidate>;
    // 通过ID获取候选人
    async fn get_candidate_by_id(&self, id: i64) -> Result<Option<Candidate>>;
    // 按条件列出候选人（按 netid、ID 排序）
    async fn list_candidates(&self, query: CandidateQuery) -> Result<Vec<Candidate>>;
    // 管理员更正候选人信息
    async fn update_candidate(
        &self,
        id: i64,
        update: UpdateCandidateRequest,
    ) -> Result<Option<Candidate>>;
    // 删除候选人
    async fn delete_candidate(&self, id: i64) -> Result<bool>;
    // 候选人表中出现过的全部学期
    async fn list_candidate_semesters(&self) -> Result<Vec<String>>;

    /// 课程分组管理方法
    // 创建课程分组
    async fn create_section(&self, section: CreateSectionRequest) -> Result<Section>;
    // 通过ID获取课程分组
    async fn get_section_by_id(&self, id: i64) -> Result<Option<Section>>;
    // 按条件列出课程分组（按课程编号、分组编号排序）
    async fn list_sections(&self, query: SectionQuery) -> Result<Vec<Section>>;
    // 删除课程分组（级联删除槽位）
    async fn delete_section(&self, id: i64) -> Result<bool>;
    // 分组表中出现过的全部学期
    async fn list_section_semesters(&self) -> Result<Vec<String>>;

    /// 槽位管理方法
    // 创建槽位
    async fn create_assignment(&self, assignment: NewAssignment) -> Result<Assignment>;
    // 通过ID获取槽位
    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>>;
    // 按条件列出槽位（按 ID 排序）
    async fn list_assignments(&self, query: AssignmentQuery) -> Result<Vec<Assignment>>;
    // 更新槽位
    async fn update_assignment(
        &self,
        id: i64,
        patch: AssignmentPatch,
    ) -> Result<Option<Assignment>>;
    // 按条件删除槽位，返回删除行数
    async fn delete_assignments(&self, query: AssignmentQuery) -> Result<u64>;
    // 删除单个槽位
    async fn delete_assignment(&self, id: i64) -> Result<bool>;
}

pub async fn create_storage(config: &DatabaseConfig) -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async(config).await?;
    Ok(Arc::new(storage))
}
