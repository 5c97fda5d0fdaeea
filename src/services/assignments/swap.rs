use tracing::info;

use super::{AssignmentService, apply_patch, load_assignment};
use crate::errors::{AllocatorError, Result};
use crate::models::assignments::{entities::Assignment, requests::AssignmentPatch};
use crate::services::allocation::pool::held_netids;

pub async fn swap_candidate(
    service: &AssignmentService,
    assignment_id: i64,
    candidate_id: i64,
) -> Result<Assignment> {
    let storage = service.storage();
    let assignment = load_assignment(storage, assignment_id).await?;

    let candidate = storage
        .get_candidate_by_id(candidate_id)
        .await?
        .ok_or_else(|| AllocatorError::not_found(format!("Candidate {candidate_id} not found")))?;

    if candidate.semester != assignment.semester {
        return Err(AllocatorError::validation(format!(
            "Candidate {} belongs to {}, not {}",
            candidate.netid, candidate.semester, assignment.semester
        )));
    }

    // 同一 netid 不能在本学期占用两个槽位
    let held = held_netids(storage, &assignment.semester, Some(assignment.id)).await?;
    if held.contains(&candidate.netid) {
        return Err(AllocatorError::conflict(format!(
            "Candidate {} is already assigned in {}",
            candidate.netid, assignment.semester
        )));
    }

    let updated = apply_patch(storage, assignment.id, AssignmentPatch::manual_swap(candidate.id)).await?;
    info!(
        "Assignment {} manually set to candidate {} (previously {:?})",
        updated.id, candidate.netid, assignment.candidate_id
    );
    Ok(updated)
}
