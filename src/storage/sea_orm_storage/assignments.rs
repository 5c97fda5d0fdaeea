//! 助教槽位存储操作

use super::SeaOrmStorage;
use crate::entity::assignments::{ActiveModel, Column};
use crate::entity::prelude::Assignments;
use crate::errors::{AllocatorError, Result};
use crate::models::assignments::{
    entities::{Assignment, AssignmentStatus},
    requests::{AssignmentPatch, AssignmentQuery, NewAssignment},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 将查询条件转换为过滤条件
    fn assignment_condition(query: AssignmentQuery) -> Condition {
        let mut condition = Condition::all();

        if let Some(semester) = query.semester {
            condition = condition.add(Column::Semester.eq(semester));
        }

        if let Some(section_id) = query.section_id {
            condition = condition.add(Column::SectionId.eq(section_id));
        }

        if let Some(candidate_id) = query.candidate_id {
            condition = condition.add(Column::CandidateId.eq(candidate_id));
        }

        if query.filled_only {
            condition = condition.add(Column::CandidateId.is_not_null());
        }

        condition
    }

    /// 创建槽位（新槽位总是 pending 且非人工指派）
    pub async fn create_assignment_impl(&self, req: NewAssignment) -> Result<Assignment> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            section_id: Set(req.section_id),
            semester: Set(req.semester),
            candidate_id: Set(req.candidate_id),
            status: Set(AssignmentStatus::Pending.to_string()),
            score: Set(req.score),
            manually_assigned: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| AllocatorError::database_operation(format!("创建槽位失败: {e}")))?;

        Ok(result.into_assignment())
    }

    /// 通过 ID 获取槽位
    pub async fn get_assignment_by_id_impl(&self, id: i64) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AllocatorError::database_operation(format!("查询槽位失败: {e}")))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    /// 按条件列出槽位
    pub async fn list_assignments_impl(&self, query: AssignmentQuery) -> Result<Vec<Assignment>> {
        let assignments = Assignments::find()
            .filter(Self::assignment_condition(query))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| AllocatorError::database_operation(format!("查询槽位列表失败: {e}")))?;

        Ok(assignments
            .into_iter()
            .map(|m| m.into_assignment())
            .collect())
    }

    /// 更新槽位（单行读改写）
    pub async fn update_assignment_impl(
        &self,
        id: i64,
        patch: AssignmentPatch,
    ) -> Result<Option<Assignment>> {
        // 先检查槽位是否存在
        let existing = self.get_assignment_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(candidate_id) = patch.candidate_id {
            model.candidate_id = Set(candidate_id);
        }

        if let Some(score) = patch.score {
            model.score = Set(score);
        }

        if let Some(status) = patch.status {
            model.status = Set(status.to_string());
        }

        if let Some(manually_assigned) = patch.manually_assigned {
            model.manually_assigned = Set(manually_assigned);
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| AllocatorError::database_operation(format!("更新槽位失败: {e}")))?;

        Ok(Some(result.into_assignment()))
    }

    /// 按条件删除槽位
    pub async fn delete_assignments_impl(&self, query: AssignmentQuery) -> Result<u64> {
        let result = Assignments::delete_many()
            .filter(Self::assignment_condition(query))
            .exec(&self.db)
            .await
            .map_err(|e| AllocatorError::database_operation(format!("删除槽位失败: {e}")))?;

        Ok(result.rows_affected)
    }

    /// 删除单个槽位
    pub async fn delete_assignment_impl(&self, id: i64) -> Result<bool> {
        let result = Assignments::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| AllocatorError::database_operation(format!("删除槽位失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
