use std::collections::HashSet;
use std::sync::Arc;

use tracing::warn;

use super::RecommendationService;
use crate::errors::{AllocatorError, Result};
use crate::models::candidates::requests::CandidateQuery;
use crate::models::recommendations::SectionRecommendationAudit;
use crate::models::sections::{entities::Section, requests::SectionQuery};
use crate::storage::Storage;
use crate::utils::validate::validate_semester;

/// 按输入顺序返回不在 `known` 中的 netid，去重
pub fn missing_netids(requested: &[String], known: &HashSet<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    requested
        .iter()
        .filter(|netid| !known.contains(*netid))
        .filter(|netid| seen.insert(netid.as_str()))
        .cloned()
        .collect()
}

async fn semester_netids(storage: &Arc<dyn Storage>, semester: &str) -> Result<HashSet<String>> {
    Ok(storage
        .list_candidates(CandidateQuery::semester(semester))
        .await?
        .into_iter()
        .map(|c| c.netid)
        .collect())
}

/// 对已加载的分组逐一核查，只返回存在缺失的分组
pub(crate) async fn audit_sections(
    storage: &Arc<dyn Storage>,
    semester: &str,
    sections: &[Section],
) -> Result<Vec<SectionRecommendationAudit>> {
    if sections.iter().all(|s| !s.has_requests()) {
        return Ok(Vec::new());
    }

    let known = semester_netids(storage, semester).await?;
    let mut audits = Vec::new();
    for section in sections {
        let missing = missing_netids(&section.requested_netids, &known);
        if missing.is_empty() {
            continue;
        }
        warn!(
            "Section {}: recommended candidate(s) not in the {} pool: {}",
            section.display_code(),
            semester,
            missing.join(", ")
        );
        audits.push(SectionRecommendationAudit {
            section_id: section.id,
            section_code: section.display_code(),
            missing_netids: missing,
        });
    }
    Ok(audits)
}

pub async fn verify_recommended(
    service: &RecommendationService,
    requested_netids: &[String],
    semester: &str,
) -> Result<Vec<String>> {
    validate_semester(semester).map_err(AllocatorError::validation)?;
    if requested_netids.is_empty() {
        return Ok(Vec::new());
    }

    let known = semester_netids(service.storage(), semester).await?;
    Ok(missing_netids(requested_netids, &known))
}

pub async fn audit_semester(
    service: &RecommendationService,
    semester: &str,
) -> Result<Vec<SectionRecommendationAudit>> {
    validate_semester(semester).map_err(AllocatorError::validation)?;

    let storage = service.storage();
    let sections = storage.list_sections(SectionQuery::semester(semester)).await?;
    audit_sections(storage, semester, &sections).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::test_support::{
        candidate_request, memory_storage, seed_candidate, seed_section,
    };

    const SPRING: &str = "Spring 2025";

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_missing_netids_keeps_order_and_dedupes() {
        let known: HashSet<String> = ["b".to_string()].into_iter().collect();
        let missing = missing_netids(&ids(&["c", "b", "a", "c"]), &known);
        assert_eq!(missing, ids(&["c", "a"]));
    }

    #[tokio::test]
    async fn test_verify_counts_unqualified_candidates_as_present() {
        let storage = memory_storage().await;
        seed_candidate(&storage, "111", SPRING).await;
        let mut unqualified = candidate_request("222", SPRING);
        unqualified.fully_qualified = false;
        storage.create_candidate(unqualified).await.unwrap();
        seed_candidate(&storage, "333", "Fall 2024").await;

        let service = RecommendationService::new(storage);
        let missing = service
            .verify_recommended(&ids(&["111", "222", "333", "444"]), SPRING)
            .await
            .unwrap();
        assert_eq!(missing, ids(&["333", "444"]));
    }

    #[tokio::test]
    async fn test_verify_rejects_blank_semester() {
        let service = RecommendationService::new(memory_storage().await);
        let err = service.verify_recommended(&ids(&["111"]), " ").await.unwrap_err();
        assert_eq!(err.code(), "E006");
    }

    #[tokio::test]
    async fn test_audit_reports_only_sections_with_gaps() {
        let storage = memory_storage().await;
        seed_candidate(&storage, "111", SPRING).await;
        seed_section(&storage, "CS1337", 1, &["111"], SPRING).await;
        let gap = seed_section(&storage, "CS2336", 1, &["111", "ghost"], SPRING).await;
        seed_section(&storage, "CS3345", 1, &[], SPRING).await;

        let audits = RecommendationService::new(storage)
            .audit_semester(SPRING)
            .await
            .unwrap();
        assert_eq!(audits.len(), 1);
        assert_eq!(audits[0].section_id, gap.id);
        assert_eq!(audits[0].section_code, "CS2336.001");
        assert_eq!(audits[0].missing_netids, ids(&["ghost"]));
    }
}
