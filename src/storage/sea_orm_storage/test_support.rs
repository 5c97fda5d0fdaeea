//! 测试辅助：内存 SQLite 存储与数据构造

use std::sync::Arc;

use super::SeaOrmStorage;
use crate::config::DatabaseConfig;
use crate::models::candidates::{
    entities::{Candidate, Seniority},
    requests::CreateCandidateRequest,
};
use crate::models::sections::{
    entities::{Instructor, Section},
    requests::CreateSectionRequest,
};
use crate::storage::Storage;

/// 创建已完成迁移的内存存储
pub async fn memory_storage() -> Arc<dyn Storage> {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        pool_size: 1,
        timeout: 5,
    };
    Arc::new(
        SeaOrmStorage::new_async(&config)
            .await
            .expect("in-memory storage"),
    )
}

pub fn candidate_request(netid: &str, semester: &str) -> CreateCandidateRequest {
    CreateCandidateRequest {
        netid: netid.to_string(),
        name: format!("Candidate {netid}"),
        gpa: 3.5,
        major: "Computer Science".to_string(),
        seniority: Seniority::Unrecognized,
        has_experience: false,
        keywords: vec![],
        fully_qualified: true,
        semester: semester.to_string(),
    }
}

pub fn section_request(course_id: &str, required_graders: u32, semester: &str) -> CreateSectionRequest {
    CreateSectionRequest {
        course_id: course_id.to_string(),
        section_number: "001".to_string(),
        instructor: Instructor {
            name: "Jane Doe".to_string(),
            email: "jane.doe@example.edu".to_string(),
        },
        required_graders,
        keywords: vec![],
        requested_netids: vec![],
        semester: semester.to_string(),
    }
}

/// 插入一个满足资格、无经验、无关键词的候选人
pub async fn seed_candidate(storage: &Arc<dyn Storage>, netid: &str, semester: &str) -> Candidate {
    storage
        .create_candidate(candidate_request(netid, semester))
        .await
        .expect("seed candidate")
}

pub async fn seed_section(
    storage: &Arc<dyn Storage>,
    course_id: &str,
    required_graders: u32,
    requested: &[&str],
    semester: &str,
) -> Section {
    let mut req = section_request(course_id, required_graders, semester);
    req.requested_netids = requested.iter().map(|id| id.to_string()).collect();
    storage.create_section(req).await.expect("seed section")
}
