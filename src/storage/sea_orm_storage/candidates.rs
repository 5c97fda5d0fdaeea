//! 候选人存储操作

use super::SeaOrmStorage;
use crate::entity::candidates::{ActiveModel, Column};
use crate::entity::prelude::Candidates;
use crate::errors::{AllocatorError, Result};
use crate::models::{
    assignments::requests::{AssignmentPatch, AssignmentQuery},
    candidates::{
        entities::Candidate,
        requests::{CandidateQuery, CreateCandidateRequest, UpdateCandidateRequest},
    },
};
use crate::utils::keywords::keywords_to_json;
use crate::utils::normalize_keywords;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

impl SeaOrmStorage {
    /// 创建候选人
    pub async fn create_candidate_impl(&self, req: CreateCandidateRequest) -> Result<Candidate> {
        req.validate()?;

        let now = chrono::Utc::now().timestamp();
        let keywords = keywords_to_json(&normalize_keywords(&req.keywords))?;

        let model = ActiveModel {
            netid: Set(req.netid.trim().to_string()),
            name: Set(req.name),
            gpa: Set(req.gpa),
            major: Set(req.major),
            seniority: Set(req.seniority.to_string()),
            has_experience: Set(req.has_experience),
            keywords: Set(keywords),
            fully_qualified: Set(req.fully_qualified),
            semester: Set(req.semester.trim().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| AllocatorError::database_operation(format!("创建候选人失败: {e}")))?;

        Ok(result.into_candidate())
    }

    /// 通过 ID 获取候选人
    pub async fn get_candidate_by_id_impl(&self, id: i64) -> Result<Option<Candidate>> {
        let result = Candidates::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AllocatorError::database_operation(format!("查询候选人失败: {e}")))?;

        Ok(result.map(|m| m.into_candidate()))
    }

    /// 按条件列出候选人
    pub async fn list_candidates_impl(&self, query: CandidateQuery) -> Result<Vec<Candidate>> {
        let mut select = Candidates::find();

        if let Some(semester) = query.semester {
            select = select.filter(Column::Semester.eq(semester));
        }

        if let Some(fully_qualified) = query.fully_qualified {
            select = select.filter(Column::FullyQualified.eq(fully_qualified));
        }

        if let Some(netid) = query.netid {
            select = select.filter(Column::Netid.eq(netid));
        }

        // 固定顺序，保证分配结果可复现
        let candidates = select
            .order_by_asc(Column::Netid)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| AllocatorError::database_operation(format!("查询候选人列表失败: {e}")))?;

        Ok(candidates.into_iter().map(|m| m.into_candidate()).collect())
    }

    /// 更正候选人信息
    pub async fn update_candidate_impl(
        &self,
        id: i64,
        update: UpdateCandidateRequest,
    ) -> Result<Option<Candidate>> {
        // 先检查候选人是否存在
        let existing = self.get_candidate_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }

        if let Some(gpa) = update.gpa {
            model.gpa = Set(gpa);
        }

        if let Some(major) = update.major {
            model.major = Set(major);
        }

        if let Some(seniority) = update.seniority {
            model.seniority = Set(seniority.to_string());
        }

        if let Some(has_experience) = update.has_experience {
            model.has_experience = Set(has_experience);
        }

        if let Some(keywords) = update.keywords {
            model.keywords = Set(keywords_to_json(&normalize_keywords(&keywords))?);
        }

        if let Some(fully_qualified) = update.fully_qualified {
            model.fully_qualified = Set(fully_qualified);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| AllocatorError::database_operation(format!("更新候选人失败: {e}")))?;

        self.get_candidate_by_id_impl(id).await
    }

    /// 删除候选人，其占用的槽位先被重置为空缺
    pub async fn delete_candidate_impl(&self, id: i64) -> Result<bool> {
        let held = self
            .list_assignments_impl(AssignmentQuery {
                candidate_id: Some(id),
                ..Default::default()
            })
            .await?;
        for assignment in held {
            self.update_assignment_impl(assignment.id, AssignmentPatch::vacate())
                .await?;
        }

        let result = Candidates::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| AllocatorError::database_operation(format!("删除候选人失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 候选人表中的全部学期
    pub async fn list_candidate_semesters_impl(&self) -> Result<Vec<String>> {
        let semesters: Vec<String> = Candidates::find()
            .select_only()
            .column(Column::Semester)
            .distinct()
            .order_by_asc(Column::Semester)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| AllocatorError::database_operation(format!("查询学期列表失败: {e}")))?;

        Ok(semesters)
    }
}

#[cfg(test)]
mod tests {
    use crate::models::assignments::requests::{AssignmentQuery, NewAssignment};
    use crate::models::candidates::{
        entities::Seniority,
        requests::{CandidateQuery, UpdateCandidateRequest},
    };
    use crate::storage::sea_orm_storage::test_support::{
        candidate_request, memory_storage, seed_candidate, seed_section,
    };

    const SPRING: &str = "Spring 2025";

    #[tokio::test]
    async fn test_qualified_query_filters_and_orders() {
        let storage = memory_storage().await;
        seed_candidate(&storage, "zed", SPRING).await;
        seed_candidate(&storage, "amy", SPRING).await;
        let mut no = candidate_request("bob", SPRING);
        no.fully_qualified = false;
        storage.create_candidate(no).await.unwrap();
        seed_candidate(&storage, "old", "Fall 2024").await;

        let netids: Vec<String> = storage
            .list_candidates(CandidateQuery::qualified(SPRING))
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.netid)
            .collect();
        assert_eq!(netids, vec!["amy", "zed"]);
    }

    #[tokio::test]
    async fn test_update_candidate_normalizes_keywords() {
        let storage = memory_storage().await;
        let c = seed_candidate(&storage, "111", SPRING).await;

        let updated = storage
            .update_candidate(
                c.id,
                UpdateCandidateRequest {
                    seniority: Some(Seniority::Masters),
                    keywords: Some(vec![" Java ".into(), "SQL".into()]),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.seniority, Seniority::Masters);
        assert!(updated.keywords.contains("java"));
        assert!(updated.keywords.contains("sql"));
        assert_eq!(updated.name, c.name);

        let missing = storage
            .update_candidate(9999, UpdateCandidateRequest::default())
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_delete_candidate_vacates_held_slots() {
        let storage = memory_storage().await;
        let c = seed_candidate(&storage, "111", SPRING).await;
        let s = seed_section(&storage, "CS1337", 1, &[], SPRING).await;
        let slot = storage
            .create_assignment(NewAssignment::filled(s.id, SPRING, c.id, 3.0))
            .await
            .unwrap();

        assert!(storage.delete_candidate(c.id).await.unwrap());
        assert!(!storage.delete_candidate(c.id).await.unwrap());

        let rows = storage
            .list_assignments(AssignmentQuery::section(s.id, SPRING))
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, slot.id);
        assert!(rows[0].is_vacant());
        assert_eq!(rows[0].score, 0.0);
    }

    #[tokio::test]
    async fn test_distinct_candidate_semesters() {
        let storage = memory_storage().await;
        seed_candidate(&storage, "a", SPRING).await;
        seed_candidate(&storage, "b", SPRING).await;
        seed_candidate(&storage, "c", "Fall 2024").await;

        let semesters = storage.list_candidate_semesters().await.unwrap();
        assert_eq!(semesters.len(), 2);
        assert!(semesters.contains(&"Fall 2024".to_string()));
        assert!(semesters.contains(&SPRING.to_string()));
    }
}
