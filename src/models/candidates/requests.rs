use serde::Deserialize;

use super::entities::Seniority;
use crate::errors::{AllocatorError, Result};
use crate::utils::validate::{validate_netid, validate_semester};

// 创建候选人请求（由外部导入层提供）
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCandidateRequest {
    pub netid: String,
    pub name: String,
    pub gpa: f64,
    pub major: String,
    pub seniority: Seniority,
    #[serde(default)]
    pub has_experience: bool,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub fully_qualified: bool,
    pub semester: String,
}

impl CreateCandidateRequest {
    pub fn validate(&self) -> Result<()> {
        validate_netid(&self.netid).map_err(AllocatorError::validation)?;
        validate_semester(&self.semester).map_err(AllocatorError::validation)?;
        if !self.gpa.is_finite() || self.gpa < 0.0 {
            return Err(AllocatorError::validation(format!(
                "Invalid GPA for candidate {}: {}",
                self.netid, self.gpa
            )));
        }
        Ok(())
    }
}

// 更新候选人请求（仅用于管理员更正）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCandidateRequest {
    pub name: Option<String>,
    pub gpa: Option<f64>,
    pub major: Option<String>,
    pub seniority: Option<Seniority>,
    pub has_experience: Option<bool>,
    pub keywords: Option<Vec<String>>,
    pub fully_qualified: Option<bool>,
}

// 候选人查询条件（用于存储层，全部为精确匹配）
#[derive(Debug, Clone, Default)]
pub struct CandidateQuery {
    pub semester: Option<String>,
    pub fully_qualified: Option<bool>,
    pub netid: Option<String>,
}

impl CandidateQuery {
    /// 某学期全部候选人
    pub fn semester(semester: &str) -> Self {
        Self {
            semester: Some(semester.to_string()),
            ..Default::default()
        }
    }

    /// 某学期满足全部资格的候选人
    pub fn qualified(semester: &str) -> Self {
        Self {
            semester: Some(semester.to_string()),
            fully_qualified: Some(true),
            ..Default::default()
        }
    }
}
