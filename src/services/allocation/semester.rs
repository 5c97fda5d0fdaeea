use tracing::{info, warn};

use super::{AllocationService, AssignedCandidates, section::allocate_loaded_section};
use crate::errors::{AllocatorError, Result};
use crate::models::assignments::{
    requests::AssignmentQuery,
    responses::{SectionFailure, SemesterAllocation},
};
use crate::models::sections::{entities::Section, requests::SectionQuery};
use crate::services::recommendations::verify::audit_sections;
use crate::utils::validate::validate_semester;

/// 有推荐名单的分组优先，其余保持存储顺序
pub(crate) fn order_sections(mut sections: Vec<Section>) -> Vec<Section> {
    sections.sort_by_key(|s| !s.has_requests());
    sections
}

pub async fn allocate_all_sections(
    service: &AllocationService,
    semester: &str,
    import_previous_graders: bool,
) -> Result<SemesterAllocation> {
    validate_semester(semester).map_err(AllocatorError::validation)?;
    let storage = service.storage();

    let sections = storage.list_sections(SectionQuery::semester(semester)).await?;
    if sections.is_empty() {
        return Err(AllocatorError::not_found(format!(
            "No sections found for {semester}"
        )));
    }

    // 仅提示，不阻止分配
    let audits = audit_sections(storage, semester, &sections).await?;
    if !audits.is_empty() {
        warn!(
            "{} section(s) in {} reference unknown candidates",
            audits.len(),
            semester
        );
    }

    let cleared = storage
        .delete_assignments(AssignmentQuery::semester(semester))
        .await?;
    info!(
        "Allocating {} section(s) for {} (cleared {} existing row(s), import previous graders: {})",
        sections.len(),
        semester,
        cleared,
        import_previous_graders
    );

    let mut assigned = AssignedCandidates::new();
    let mut result = SemesterAllocation {
        semester: semester.to_string(),
        ..Default::default()
    };

    for section in order_sections(sections) {
        match allocate_loaded_section(service, &section, import_previous_graders, &mut assigned)
            .await
        {
            Ok(rows) => {
                result.sections_succeeded += 1;
                result.assignments.extend(rows);
            }
            Err(e) => {
                warn!(
                    "Section {} allocation failed: {}",
                    section.display_code(),
                    e.format_simple()
                );
                result.failures.push(SectionFailure {
                    section_id: section.id,
                    section_code: section.display_code(),
                    error_code: e.code().to_string(),
                    message: e.message().to_string(),
                });
            }
        }
    }

    if result.sections_succeeded == 0 {
        return Err(AllocatorError::exhaustion(format!(
            "No assignments were created for {semester}"
        )));
    }

    info!(
        "{} allocation finished: {} section(s) succeeded, {} failed, {} candidate(s) placed",
        semester,
        result.sections_succeeded,
        result.failures.len(),
        assigned.len()
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assignments::requests::NewAssignment;
    use crate::services::scoring::ScoringWeights;
    use crate::services::scoring::tests::section;
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::test_support::{
        memory_storage, seed_candidate, seed_section,
    };
    use std::collections::HashSet;
    use std::sync::Arc;

    const SPRING: &str = "Spring 2025";

    fn service(storage: Arc<dyn Storage>) -> AllocationService {
        AllocationService::new(storage, ScoringWeights::default())
    }

    #[test]
    fn test_order_sections_puts_requests_first() {
        let mut a = section(&[]);
        a.id = 1;
        let mut b = section(&[]);
        b.id = 2;
        b.requested_netids = vec!["x".into()];
        let mut c = section(&[]);
        c.id = 3;
        let mut d = section(&[]);
        d.id = 4;
        d.requested_netids = vec!["y".into()];

        let order: Vec<i64> = order_sections(vec![a, b, c, d]).iter().map(|s| s.id).collect();
        assert_eq!(order, vec![2, 4, 1, 3]);
    }

    #[tokio::test]
    async fn test_no_sections_is_not_found() {
        let err = service(memory_storage().await)
            .allocate_all_sections(SPRING, false)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E007");
    }

    #[tokio::test]
    async fn test_blank_semester_is_rejected() {
        let err = service(memory_storage().await)
            .allocate_all_sections("", false)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E006");
    }

    #[tokio::test]
    async fn test_contested_candidate_goes_to_requesting_section() {
        let storage = memory_storage().await;
        // A 在存储顺序中靠前，但 B 推荐了 Y
        seed_candidate(&storage, "Y", SPRING).await;
        let a = seed_section(&storage, "CS1337", 1, &[], SPRING).await;
        let b = seed_section(&storage, "CS2336", 1, &["Y"], SPRING).await;

        let result = service(storage.clone())
            .allocate_all_sections(SPRING, false)
            .await
            .unwrap();

        assert_eq!(result.sections_succeeded, 1);
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].section_id, a.id);
        assert_eq!(result.failures[0].error_code, "E009");
        assert!(result.is_partial());

        let b_rows = storage
            .list_assignments(AssignmentQuery::section(b.id, SPRING))
            .await
            .unwrap();
        assert_eq!(b_rows.len(), 1);
        assert_eq!(b_rows[0].score, 3.0);

        // 失败的分组仍保持 N 行空缺
        let a_rows = storage
            .list_assignments(AssignmentQuery::section(a.id, SPRING))
            .await
            .unwrap();
        assert_eq!(a_rows.len(), 1);
        assert!(a_rows[0].is_vacant());
    }

    #[tokio::test]
    async fn test_every_candidate_placed_at_most_once() {
        let storage = memory_storage().await;
        let mut ids = std::collections::HashMap::new();
        for netid in ["a", "b", "c", "d", "e"] {
            ids.insert(netid, seed_candidate(&storage, netid, SPRING).await.id);
        }
        let first = seed_section(&storage, "CS1337", 2, &["a", "b"], SPRING).await;
        let second = seed_section(&storage, "CS2336", 2, &["b", "c"], SPRING).await;
        seed_section(&storage, "CS3345", 2, &[], SPRING).await;

        let result = service(storage.clone())
            .allocate_all_sections(SPRING, false)
            .await
            .unwrap();

        assert_eq!(result.assignments.len(), 6);
        let filled: Vec<i64> = result
            .assignments
            .iter()
            .filter_map(|a| a.candidate_id)
            .collect();
        let unique: HashSet<i64> = filled.iter().copied().collect();
        assert_eq!(filled.len(), 5);
        assert_eq!(unique.len(), 5);

        // 两个分组都推荐了 b，先处理的 CS1337 得到 b
        let rows_of = |section_id: i64| -> Vec<(Option<i64>, f64)> {
            result
                .assignments
                .iter()
                .filter(|a| a.section_id == section_id)
                .map(|a| (a.candidate_id, a.score))
                .collect()
        };
        let first_rows = rows_of(first.id);
        assert!(first_rows.contains(&(Some(ids["b"]), 3.0)));
        assert!(first_rows.contains(&(Some(ids["a"]), 3.0)));

        // CS2336 只剩 c 来自推荐，另一个槽位由评分补位
        let second_rows = rows_of(second.id);
        assert_eq!(second_rows.len(), 2);
        assert!(second_rows.iter().all(|(id, _)| *id != Some(ids["b"])));
        assert!(second_rows.contains(&(Some(ids["c"]), 3.0)));
        assert!(second_rows.contains(&(Some(ids["d"]), 0.0)));
    }

    #[tokio::test]
    async fn test_rerun_clears_previous_semester_rows() {
        let storage = memory_storage().await;
        seed_candidate(&storage, "a", SPRING).await;
        let s = seed_section(&storage, "CS1337", 1, &[], SPRING).await;
        // 残留的多余行会被清除
        storage
            .create_assignment(NewAssignment::vacant(s.id, SPRING))
            .await
            .unwrap();
        storage
            .create_assignment(NewAssignment::vacant(s.id, SPRING))
            .await
            .unwrap();

        let svc = service(storage.clone());
        svc.allocate_all_sections(SPRING, false).await.unwrap();
        svc.allocate_all_sections(SPRING, false).await.unwrap();

        let rows = storage
            .list_assignments(AssignmentQuery::semester(SPRING))
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert!(!rows[0].is_vacant());
    }

    #[tokio::test]
    async fn test_all_sections_failing_is_exhaustion() {
        let storage = memory_storage().await;
        seed_section(&storage, "CS1337", 1, &[], SPRING).await;
        seed_section(&storage, "CS2336", 2, &[], SPRING).await;

        let err = service(storage.clone())
            .allocate_all_sections(SPRING, false)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E009");

        let rows = storage
            .list_assignments(AssignmentQuery::semester(SPRING))
            .await
            .unwrap();
        assert_eq!(rows.len(), 3);
    }
}
