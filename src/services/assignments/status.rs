use tracing::info;

use super::{AssignmentService, apply_patch, load_assignment};
use crate::errors::{AllocatorError, Result};
use crate::models::assignments::{entities::Assignment, requests::AssignmentPatch};

pub async fn unassign_slot(service: &AssignmentService, assignment_id: i64) -> Result<Assignment> {
    let storage = service.storage();
    let assignment = load_assignment(storage, assignment_id).await?;

    let updated = apply_patch(storage, assignment.id, AssignmentPatch::vacate()).await?;
    if assignment.candidate_id.is_some() {
        info!(
            "Assignment {} vacated (was candidate {:?})",
            updated.id, assignment.candidate_id
        );
    }
    Ok(updated)
}

pub async fn accept_assignment(service: &AssignmentService, assignment_id: i64) -> Result<Assignment> {
    let storage = service.storage();
    let assignment = load_assignment(storage, assignment_id).await?;

    if assignment.is_vacant() {
        return Err(AllocatorError::validation(format!(
            "Assignment {assignment_id} has no candidate to accept"
        )));
    }

    apply_patch(storage, assignment.id, AssignmentPatch::accept()).await
}
