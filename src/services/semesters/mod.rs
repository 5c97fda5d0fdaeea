use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::errors::Result;
use crate::models::Semester;
use crate::storage::Storage;

/// 按时间顺序排序；无法识别的学期名排在最后并按字母序
pub fn sort_semesters(semesters: &mut [String]) {
    semesters.sort_by(|a, b| match (a.parse::<Semester>(), b.parse::<Semester>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    });
}

pub struct SemesterService {
    storage: Arc<dyn Storage>,
}

impl SemesterService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    // 分组与候选人中出现过的全部学期
    pub async fn list_semesters(&self) -> Result<Vec<String>> {
        let mut known: BTreeSet<String> = self.storage.list_section_semesters().await?.into_iter().collect();
        known.extend(self.storage.list_candidate_semesters().await?);

        let mut semesters: Vec<String> = known.into_iter().filter(|s| !s.trim().is_empty()).collect();
        sort_semesters(&mut semesters);
        Ok(semesters)
    }
}
