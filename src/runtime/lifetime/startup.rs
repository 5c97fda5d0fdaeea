use std::sync::Arc;

use dotenv::dotenv;
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::errors::Result;
use crate::runtime::SemesterLocks;
use crate::services::{
    AllocationService, AssignmentService, RecommendationService, ScoringWeights, SemesterService,
};
use crate::storage::Storage;

/// 引擎运行所需的全部服务
pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub allocation: AllocationService,
    pub assignments: AssignmentService,
    pub recommendations: RecommendationService,
    pub semesters: SemesterService,
    pub locks: SemesterLocks,
    /// 整学期分配时是否默认导入上学期助教
    pub import_previous_graders: bool,
}

/// 用已有的存储构建服务
pub fn build_context(config: &AppConfig, storage: Arc<dyn Storage>) -> StartupContext {
    let weights = ScoringWeights::from(&config.allocation.weights);
    debug!(
        "Scoring weights: gpa={}, seniority={}, experience={}, keywords={}",
        weights.gpa, weights.seniority, weights.experience, weights.keywords
    );

    StartupContext {
        allocation: AllocationService::new(storage.clone(), weights),
        assignments: AssignmentService::new(storage.clone(), weights),
        recommendations: RecommendationService::new(storage.clone()),
        semesters: SemesterService::new(storage.clone()),
        locks: SemesterLocks::new(),
        import_previous_graders: config.allocation.import_previous_graders,
        storage,
    }
}

/// 准备引擎启动的上下文
/// 包括环境变量、配置、存储连接与迁移
pub async fn prepare_engine_startup() -> Result<StartupContext> {
    dotenv().ok();
    let config = AppConfig::get();

    warn!(
        "Preparing {} {} ({} environment)",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        config.app.environment
    );

    let storage = crate::storage::create_storage(&config.database).await?;
    warn!("Storage backend initialized and migrations completed");

    Ok(build_context(config, storage))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WeightsConfig;
    use crate::storage::sea_orm_storage::test_support::{
        memory_storage, seed_candidate, seed_section,
    };

    #[tokio::test]
    async fn test_context_uses_configured_weights() {
        let mut config = AppConfig::default();
        config.allocation.weights = WeightsConfig {
            gpa: 1.0,
            seniority: 0.0,
            experience: 0.0,
            keywords: 0.0,
        };
        config.allocation.import_previous_graders = true;

        let storage = memory_storage().await;
        seed_candidate(&storage, "111", "Spring 2025").await;
        let section = seed_section(&storage, "CS1337", 1, &[], "Spring 2025").await;

        let ctx = build_context(&config, storage);
        assert!(ctx.import_previous_graders);

        let _guard = ctx.locks.lock("Spring 2025").await;
        let result = ctx
            .allocation
            .allocate_all_sections("Spring 2025", ctx.import_previous_graders)
            .await
            .unwrap();
        assert_eq!(result.assignments.len(), 1);
        assert_eq!(result.assignments[0].section_id, section.id);
        // 只计 GPA：3.5 * 1.0
        assert!((result.assignments[0].score - 3.5).abs() < 1e-9);

        let semesters = ctx.semesters.list_semesters().await.unwrap();
        assert_eq!(semesters, vec!["Spring 2025"]);
    }
}
