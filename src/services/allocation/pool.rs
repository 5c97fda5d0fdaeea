//! 候选池查询
//!
//! 唯一性按 netid 判断：同一 netid 在同一学期可能存在多条候选人记录。

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use crate::errors::Result;
use crate::models::assignments::{entities::Assignment, requests::AssignmentQuery};
use crate::models::candidates::requests::CandidateQuery;
use crate::models::Semester;
use crate::storage::Storage;

/// 把已填充槽位映射为候选人 netid
async fn netids_of(
    storage: &Arc<dyn Storage>,
    semester: &str,
    assignments: &[Assignment],
) -> Result<HashSet<String>> {
    let candidate_ids: HashSet<i64> = assignments.iter().filter_map(|a| a.candidate_id).collect();
    if candidate_ids.is_empty() {
        return Ok(HashSet::new());
    }

    let by_id: HashMap<i64, String> = storage
        .list_candidates(CandidateQuery::semester(semester))
        .await?
        .into_iter()
        .map(|c| (c.id, c.netid))
        .collect();

    let mut netids = HashSet::with_capacity(candidate_ids.len());
    for id in candidate_ids {
        match by_id.get(&id) {
            Some(netid) => {
                netids.insert(netid.clone());
            }
            // 槽位引用了其他学期的候选人记录
            None => {
                if let Some(candidate) = storage.get_candidate_by_id(id).await? {
                    netids.insert(candidate.netid);
                }
            }
        }
    }
    Ok(netids)
}

/// 本学期已占用槽位的 netid，可排除某个槽位自身
pub async fn held_netids(
    storage: &Arc<dyn Storage>,
    semester: &str,
    exclude_assignment: Option<i64>,
) -> Result<HashSet<String>> {
    let held: Vec<Assignment> = storage
        .list_assignments(AssignmentQuery::semester(semester).filled())
        .await?
        .into_iter()
        .filter(|a| Some(a.id) != exclude_assignment)
        .collect();
    netids_of(storage, semester, &held).await
}

/// 已存储的学期名中与 `target` 指同一学期的写法（季节大小写、空白可能不同）
async fn stored_names_of(storage: &Arc<dyn Storage>, target: Semester) -> Result<BTreeSet<String>> {
    let mut names: BTreeSet<String> = storage.list_section_semesters().await?.into_iter().collect();
    names.extend(storage.list_candidate_semesters().await?);
    names.retain(|name| name.parse::<Semester>().ok() == Some(target));
    Ok(names)
}

/// 上学期担任过助教的 netid；学期无法识别或没有上一学期时为空
pub async fn returning_netids(storage: &Arc<dyn Storage>, semester: &str) -> Result<HashSet<String>> {
    let Some(previous) = semester
        .parse::<Semester>()
        .ok()
        .and_then(|current| current.previous())
    else {
        return Ok(HashSet::new());
    };

    let mut netids = HashSet::new();
    for name in stored_names_of(storage, previous).await? {
        let previous_rows = storage
            .list_assignments(AssignmentQuery::semester(&name).filled())
            .await?;
        netids.extend(netids_of(storage, &name, &previous_rows).await?);
    }
    Ok(netids)
}
