pub mod verify;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::recommendations::SectionRecommendationAudit;
use crate::storage::Storage;

pub use verify::missing_netids;

/// 推荐名单核查，只读，仅作提示
pub struct RecommendationService {
    storage: Arc<dyn Storage>,
}

impl RecommendationService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub(crate) fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    // 返回在本学期候选人中不存在的推荐 netid
    pub async fn verify_recommended(
        &self,
        requested_netids: &[String],
        semester: &str,
    ) -> Result<Vec<String>> {
        verify::verify_recommended(self, requested_netids, semester).await
    }

    // 核查本学期所有分组的推荐名单
    pub async fn audit_semester(&self, semester: &str) -> Result<Vec<SectionRecommendationAudit>> {
        verify::audit_semester(self, semester).await
    }
}
