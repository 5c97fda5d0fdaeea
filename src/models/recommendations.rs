use serde::Serialize;

// 单个分组的推荐核查结果
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SectionRecommendationAudit {
    pub section_id: i64,
    pub section_code: String,
    // 在本学期候选人中找不到的推荐 netid
    pub missing_netids: Vec<String>,
}
