use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// 候选人年级
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Seniority {
    Junior,       // 大三
    Senior,       // 大四
    Masters,      // 硕士
    Doctorate,    // 博士
    Unrecognized, // 无法识别
}

impl Seniority {
    pub const JUNIOR: &'static str = "junior";
    pub const SENIOR: &'static str = "senior";
    pub const MASTERS: &'static str = "masters";
    pub const DOCTORATE: &'static str = "doctorate";
    pub const UNRECOGNIZED: &'static str = "unrecognized";

    /// 评分使用的年级数值
    pub fn scale(&self) -> f64 {
        match self {
            Seniority::Junior => 0.25,
            Seniority::Senior => 0.5,
            Seniority::Masters => 1.0,
            Seniority::Doctorate => 1.5,
            Seniority::Unrecognized => 0.0,
        }
    }

    /// 宽松解析：导入数据中的任意文本，无法识别时归为 Unrecognized
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or(Seniority::Unrecognized)
    }
}

impl<'de> Deserialize<'de> for Seniority {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Seniority::parse_lenient(&s))
    }
}

impl std::fmt::Display for Seniority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Seniority::Junior => write!(f, "{}", Seniority::JUNIOR),
            Seniority::Senior => write!(f, "{}", Seniority::SENIOR),
            Seniority::Masters => write!(f, "{}", Seniority::MASTERS),
            Seniority::Doctorate => write!(f, "{}", Seniority::DOCTORATE),
            Seniority::Unrecognized => write!(f, "{}", Seniority::UNRECOGNIZED),
        }
    }
}

impl std::str::FromStr for Seniority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "junior" => Ok(Seniority::Junior),
            "senior" => Ok(Seniority::Senior),
            "masters" | "master" => Ok(Seniority::Masters),
            "doctorate" | "phd" => Ok(Seniority::Doctorate),
            _ => Err(format!("Invalid seniority: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Candidate {
    // 候选人ID
    pub id: i64,
    // 外部标识（校园 netid）
    pub netid: String,
    // 姓名
    pub name: String,
    pub gpa: f64,
    // 专业
    pub major: String,
    // 年级
    pub seniority: Seniority,
    // 是否有助教经历
    pub has_experience: bool,
    // 简历关键词（已规范化）
    pub keywords: BTreeSet<String>,
    // 是否满足全部资格（由外部计算）
    pub fully_qualified: bool,
    // 所属学期
    pub semester: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seniority_scale() {
        assert_eq!(Seniority::Junior.scale(), 0.25);
        assert_eq!(Seniority::Senior.scale(), 0.5);
        assert_eq!(Seniority::Masters.scale(), 1.0);
        assert_eq!(Seniority::Doctorate.scale(), 1.5);
        assert_eq!(Seniority::Unrecognized.scale(), 0.0);
    }

    #[test]
    fn test_seniority_lenient_parse() {
        assert_eq!(Seniority::parse_lenient("Masters"), Seniority::Masters);
        assert_eq!(Seniority::parse_lenient(" PhD "), Seniority::Doctorate);
        assert_eq!(Seniority::parse_lenient("sophomore"), Seniority::Unrecognized);
    }

    #[test]
    fn test_seniority_display_round_trip() {
        for s in [
            Seniority::Junior,
            Seniority::Senior,
            Seniority::Masters,
            Seniority::Doctorate,
        ] {
            assert_eq!(Seniority::parse_lenient(&s.to_string()), s);
        }
    }
}
