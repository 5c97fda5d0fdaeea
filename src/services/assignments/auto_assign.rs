use tracing::info;

use super::{AssignmentService, apply_patch, load_assignment};
use crate::errors::{AllocatorError, Result};
use crate::models::assignments::{entities::Assignment, requests::AssignmentPatch};
use crate::models::candidates::requests::CandidateQuery;
use crate::services::allocation::pool::held_netids;
use crate::services::scoring::rank_candidates;

/// 只使用评分层：推荐与返聘在单槽位补位时不参与
pub async fn auto_assign_slot(service: &AssignmentService, assignment_id: i64) -> Result<Assignment> {
    let storage = service.storage();
    let assignment = load_assignment(storage, assignment_id).await?;

    let section = storage
        .get_section_by_id(assignment.section_id)
        .await?
        .ok_or_else(|| {
            AllocatorError::not_found(format!("Section {} not found", assignment.section_id))
        })?;

    let held = held_netids(storage, &assignment.semester, Some(assignment.id)).await?;
    let eligible = storage
        .list_candidates(CandidateQuery::qualified(&assignment.semester))
        .await?;
    let free = eligible.iter().filter(|c| !held.contains(&c.netid));

    let Some((best, score)) = rank_candidates(free, &section, service.weights())
        .into_iter()
        .next()
    else {
        return Err(AllocatorError::exhaustion(format!(
            "No unassigned candidates left for section {}",
            section.display_code()
        )));
    };

    let updated = apply_patch(storage, assignment.id, AssignmentPatch::auto_fill(best.id, score)).await?;
    info!(
        "Assignment {} in {} auto-filled with {} (score {:.3})",
        updated.id,
        section.display_code(),
        best.netid,
        score
    );
    Ok(updated)
}
