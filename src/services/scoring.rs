//! 候选人评分
//!
//! 纯函数，无副作用。分数为四项加权和：
//! GPA、年级数值、助教经历、关键词重合比例。

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::config::WeightsConfig;
use crate::models::candidates::entities::Candidate;
use crate::models::sections::entities::Section;

/// 评分权重
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub gpa: f64,
    pub seniority: f64,
    pub experience: f64,
    pub keywords: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self::from(&WeightsConfig::default())
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            gpa: config.gpa,
            seniority: config.seniority,
            experience: config.experience,
            keywords: config.keywords,
        }
    }
}

/// 分组关键词中被候选人覆盖的比例，分组无关键词时为 0
pub fn keyword_ratio(candidate: &Candidate, section: &Section) -> f64 {
    if section.keywords.is_empty() {
        return 0.0;
    }
    let matched = section
        .keywords
        .iter()
        .filter(|k| candidate.keywords.contains(*k))
        .count();
    matched as f64 / section.keywords.len() as f64
}

/// 计算候选人对某分组的适配分数
pub fn score(candidate: &Candidate, section: &Section, weights: &ScoringWeights) -> f64 {
    let experience = if candidate.has_experience {
        weights.experience
    } else {
        0.0
    };

    candidate.gpa * weights.gpa
        + candidate.seniority.scale() * weights.seniority
        + experience
        + keyword_ratio(candidate, section) * weights.keywords
}

/// 分数降序；同分按 netid 升序，再按 ID 升序
pub fn compare_ranked(a: (&Candidate, f64), b: (&Candidate, f64)) -> Ordering {
    b.1.total_cmp(&a.1)
        .then_with(|| a.0.netid.cmp(&b.0.netid))
        .then_with(|| a.0.id.cmp(&b.0.id))
}

/// 对候选人评分并排序
pub fn rank_candidates<'a, I>(
    candidates: I,
    section: &Section,
    weights: &ScoringWeights,
) -> Vec<(&'a Candidate, f64)>
where
    I: IntoIterator<Item = &'a Candidate>,
{
    let mut ranked: Vec<(&Candidate, f64)> = candidates
        .into_iter()
        .map(|c| (c, score(c, section, weights)))
        .collect();
    ranked.sort_by(|a, b| compare_ranked(*a, *b));
    ranked
}
