use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use super::AssignmentService;
use crate::errors::{AllocatorError, Result};
use crate::models::assignments::{
    entities::Assignment,
    requests::{AssignmentQuery, NewAssignment},
    responses::AssignmentRow,
};
use crate::models::candidates::{entities::Candidate, requests::CandidateQuery};
use crate::models::sections::{entities::Section, requests::SectionQuery};
use crate::storage::Storage;
use crate::utils::validate::validate_semester;

/// 把分组的槽位数校正为 `required_graders`
///
/// 不足时补空缺行；多余时删除空缺行，已填充的多余行保留。
async fn reconcile_rows(
    storage: &Arc<dyn Storage>,
    section: &Section,
    mut rows: Vec<Assignment>,
) -> Result<Vec<Assignment>> {
    let required = section.required_graders as usize;

    while rows.len() < required {
        rows.push(
            storage
                .create_assignment(NewAssignment::vacant(section.id, &section.semester))
                .await?,
        );
    }

    if rows.len() > required {
        let mut surplus = rows.len() - required;
        // 从最新的空缺行开始删除
        let mut removable: Vec<i64> = rows.iter().filter(|r| r.is_vacant()).map(|r| r.id).collect();
        removable.sort_unstable_by(|a, b| b.cmp(a));
        for id in removable {
            if surplus == 0 {
                break;
            }
            if storage.delete_assignment(id).await? {
                rows.retain(|r| r.id != id);
                surplus -= 1;
            }
        }
        if surplus > 0 {
            warn!(
                "Section {} has {} filled row(s) beyond its {} required slot(s)",
                section.display_code(),
                surplus,
                required
            );
        }
    }

    rows.sort_by_key(|r| r.id);
    Ok(rows)
}

fn to_row(section: &Section, assignment: Assignment, candidate: Option<&Candidate>) -> AssignmentRow {
    AssignmentRow {
        assignment_id: assignment.id,
        section_id: section.id,
        course_id: section.course_id.clone(),
        section_number: section.section_number.clone(),
        instructor_name: section.instructor.name.clone(),
        instructor_email: section.instructor.email.clone(),
        semester: assignment.semester,
        candidate_id: assignment.candidate_id,
        candidate_netid: candidate.map(|c| c.netid.clone()),
        candidate_name: candidate.map(|c| c.name.clone()),
        status: assignment.status,
        score: assignment.score,
        manually_assigned: assignment.manually_assigned,
    }
}

pub async fn list_section_assignments(
    service: &AssignmentService,
    semester: &str,
) -> Result<Vec<AssignmentRow>> {
    validate_semester(semester).map_err(AllocatorError::validation)?;
    let storage = service.storage();

    let sections = storage.list_sections(SectionQuery::semester(semester)).await?;
    if sections.is_empty() {
        return Ok(Vec::new());
    }

    let mut by_section: HashMap<i64, Vec<Assignment>> = HashMap::new();
    for assignment in storage
        .list_assignments(AssignmentQuery::semester(semester))
        .await?
    {
        by_section
            .entry(assignment.section_id)
            .or_default()
            .push(assignment);
    }

    let mut candidates: HashMap<i64, Candidate> = storage
        .list_candidates(CandidateQuery::semester(semester))
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();

    let mut rows = Vec::new();
    for section in &sections {
        let existing = by_section.remove(&section.id).unwrap_or_default();
        let reconciled = reconcile_rows(storage, section, existing).await?;

        for assignment in reconciled {
            if let Some(candidate_id) = assignment.candidate_id
                && !candidates.contains_key(&candidate_id)
            {
                // 引用了其他学期的候选人记录
                if let Some(candidate) = storage.get_candidate_by_id(candidate_id).await? {
                    candidates.insert(candidate_id, candidate);
                }
            }
            let candidate = assignment.candidate_id.and_then(|id| candidates.get(&id));
            rows.push(to_row(section, assignment, candidate));
        }
    }

    debug!(
        "Listed {} slot(s) across {} section(s) for {}",
        rows.len(),
        sections.len(),
        semester
    );
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::scoring::ScoringWeights;
    use crate::storage::sea_orm_storage::test_support::{
        memory_storage, seed_candidate, seed_section,
    };

    const SPRING: &str = "Spring 2025";

    #[tokio::test]
    async fn test_list_pads_every_section_to_required() {
        let storage = memory_storage().await;
        let a = seed_section(&storage, "CS2336", 2, &[], SPRING).await;
        let b = seed_section(&storage, "CS1337", 3, &[], SPRING).await;

        let service = AssignmentService::new(storage.clone(), ScoringWeights::default());
        let rows = service.list_section_assignments(SPRING).await.unwrap();

        assert_eq!(rows.len(), 5);
        assert!(rows.iter().all(|r| r.candidate_id.is_none()));
        // 按课程编号排序
        assert!(rows[..3].iter().all(|r| r.section_id == b.id));
        assert!(rows[3..].iter().all(|r| r.section_id == a.id));
        assert_eq!(rows[0].course_id, "CS1337");
        assert_eq!(rows[0].instructor_name, "Jane Doe");

        // 补齐的行已持久化，再次查询不会重复补齐
        let again = service.list_section_assignments(SPRING).await.unwrap();
        assert_eq!(again.len(), 5);
        let stored = storage
            .list_assignments(AssignmentQuery::semester(SPRING))
            .await
            .unwrap();
        assert_eq!(stored.len(), 5);
    }

    #[tokio::test]
    async fn test_list_trims_surplus_vacant_rows_only() {
        let storage = memory_storage().await;
        let c1 = seed_candidate(&storage, "111", SPRING).await;
        let c2 = seed_candidate(&storage, "222", SPRING).await;
        let s = seed_section(&storage, "CS1337", 1, &[], SPRING).await;
        for id in [c1.id, c2.id] {
            storage
                .create_assignment(NewAssignment::filled(s.id, SPRING, id, 1.0))
                .await
                .unwrap();
        }
        storage
            .create_assignment(NewAssignment::vacant(s.id, SPRING))
            .await
            .unwrap();

        let rows = AssignmentService::new(storage.clone(), ScoringWeights::default())
            .list_section_assignments(SPRING)
            .await
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.candidate_id.is_some()));
        assert_eq!(rows[0].candidate_netid.as_deref(), Some("111"));
        assert_eq!(rows[1].candidate_name.as_deref(), Some("Candidate 222"));
    }

    #[tokio::test]
    async fn test_list_empty_semester() {
        let service = AssignmentService::new(memory_storage().await, ScoringWeights::default());
        assert!(service.list_section_assignments(SPRING).await.unwrap().is_empty());
        assert_eq!(
            service.list_section_assignments("").await.unwrap_err().code(),
            "E006"
        );
    }
}
