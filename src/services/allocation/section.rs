use tracing::{debug, info, warn};

use super::{AllocationService, AssignedCandidates, REQUESTED_SCORE, RETURNING_SCORE, pool};
use crate::errors::{AllocatorError, Result};
use crate::models::assignments::{
    entities::Assignment,
    requests::{AssignmentQuery, NewAssignment},
};
use crate::models::candidates::{entities::Candidate, requests::CandidateQuery};
use crate::models::sections::entities::Section;
use crate::services::scoring::{ScoringWeights, rank_candidates};
use crate::utils::validate::validate_semester;
use std::collections::HashSet;

/// 一次选中
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Selection<'a> {
    pub candidate: &'a Candidate,
    pub score: f64,
}

/// 第一层：按推荐顺序选取
pub(crate) fn select_requested<'a>(
    section: &Section,
    pool: &'a [Candidate],
    assigned: &mut AssignedCandidates,
    limit: usize,
) -> Vec<Selection<'a>> {
    let mut picks = Vec::new();
    for netid in &section.requested_netids {
        if picks.len() >= limit {
            break;
        }
        if assigned.contains(netid) {
            continue;
        }
        if let Some(candidate) = pool.iter().find(|c| &c.netid == netid) {
            assigned.insert(&candidate.netid);
            picks.push(Selection {
                candidate,
                score: REQUESTED_SCORE,
            });
        }
    }
    picks
}

/// 第二层：上学期担任过助教的候选人，按候选池顺序选取
pub(crate) fn select_returning<'a>(
    pool: &'a [Candidate],
    returning: &HashSet<String>,
    assigned: &mut AssignedCandidates,
    limit: usize,
) -> Vec<Selection<'a>> {
    let mut picks = Vec::new();
    for candidate in pool {
        if picks.len() >= limit {
            break;
        }
        if returning.contains(&candidate.netid) && assigned.insert(&candidate.netid) {
            picks.push(Selection {
                candidate,
                score: RETURNING_SCORE,
            });
        }
    }
    picks
}

/// 第三层：对剩余候选人评分，取最高分
pub(crate) fn select_scored<'a>(
    section: &Section,
    pool: &'a [Candidate],
    weights: &ScoringWeights,
    assigned: &mut AssignedCandidates,
    limit: usize,
) -> Vec<Selection<'a>> {
    let remaining = pool.iter().filter(|c| !assigned.contains(&c.netid));
    let mut picks = Vec::new();
    for (candidate, score) in rank_candidates(remaining, section, weights) {
        if picks.len() >= limit {
            break;
        }
        // 同一 netid 的重复记录只取排名最高的一条
        if assigned.insert(&candidate.netid) {
            picks.push(Selection { candidate, score });
        }
    }
    picks
}

pub async fn allocate_section(
    service: &AllocationService,
    section_id: i64,
    semester: &str,
    import_previous_graders: bool,
    assigned: &mut AssignedCandidates,
) -> Result<Vec<Assignment>> {
    validate_semester(semester).map_err(AllocatorError::validation)?;

    let section = service
        .storage()
        .get_section_by_id(section_id)
        .await?
        .ok_or_else(|| AllocatorError::not_found(format!("Section {section_id} not found")))?;

    if section.semester != semester {
        return Err(AllocatorError::validation(format!(
            "Section {} belongs to {}, not {}",
            section.display_code(),
            section.semester,
            semester
        )));
    }

    allocate_loaded_section(service, &section, import_previous_graders, assigned).await
}

/// 分配已加载的分组：清空旧槽位后逐层选人，最后补齐空缺
pub(crate) async fn allocate_loaded_section(
    service: &AllocationService,
    section: &Section,
    import_previous_graders: bool,
    assigned: &mut AssignedCandidates,
) -> Result<Vec<Assignment>> {
    let storage = service.storage();
    let semester = section.semester.as_str();
    let required = section.required_graders as usize;

    // 全量重跑，不做增量更新
    let removed = storage
        .delete_assignments(AssignmentQuery::section(section.id, semester))
        .await?;
    debug!(
        "Section {}: removed {} existing assignment(s)",
        section.display_code(),
        removed
    );

    let eligible = storage
        .list_candidates(CandidateQuery::qualified(semester))
        .await?;

    // 其他分组已占用的候选人同样不可再选
    assigned.extend(pool::held_netids(storage, semester, None).await?);

    let mut selections = select_requested(section, &eligible, assigned, required);
    let requested_count = selections.len();

    if import_previous_graders && selections.len() < required {
        let returning = pool::returning_netids(storage, semester).await?;
        debug!(
            "Section {}: {} returning grader(s) from the previous semester",
            section.display_code(),
            returning.len()
        );
        let limit = required - selections.len();
        selections.extend(select_returning(&eligible, &returning, assigned, limit));
    }
    let returning_count = selections.len() - requested_count;

    if selections.len() < required {
        let limit = required - selections.len();
        selections.extend(select_scored(
            section,
            &eligible,
            service.weights(),
            assigned,
            limit,
        ));
    }
    let scored_count = selections.len() - requested_count - returning_count;

    let mut created = Vec::with_capacity(required);
    for selection in &selections {
        let assignment = storage
            .create_assignment(NewAssignment::filled(
                section.id,
                semester,
                selection.candidate.id,
                selection.score,
            ))
            .await?;
        created.push(assignment);
    }

    // 候选人不足时以空缺槽位补齐
    let vacant_count = required.saturating_sub(created.len());
    for _ in 0..vacant_count {
        created.push(
            storage
                .create_assignment(NewAssignment::vacant(section.id, semester))
                .await?,
        );
    }

    if required > 0 && selections.is_empty() {
        warn!(
            "Section {}: no eligible candidates, {} slot(s) left vacant",
            section.display_code(),
            vacant_count
        );
        return Err(AllocatorError::exhaustion(format!(
            "No candidates available for section {}",
            section.display_code()
        )));
    }

    info!(
        "Section {} allocated: {} requested, {} returning, {} scored, {} vacant",
        section.display_code(),
        requested_count,
        returning_count,
        scored_count,
        vacant_count
    );

    Ok(created)
}
