//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assignments;
mod candidates;
mod sections;

#[cfg(test)]
pub(crate) mod test_support;

use crate::config::DatabaseConfig;
use crate::errors::{AllocatorError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例并运行迁移
    pub async fn new_async(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| AllocatorError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| AllocatorError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        // 内存库随最后一个连接关闭而消失，连接不能被回收
        let in_memory = url.contains(":memory:");
        let (idle_timeout, max_lifetime) = if in_memory {
            (None, None)
        } else {
            (
                Some(Duration::from_secs(300)),
                Some(Duration::from_secs(1800)),
            )
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(config.pool_size.max(1))
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(idle_timeout)
            .max_lifetime(max_lifetime)
            .connect_with(opt)
            .await
            .map_err(|e| AllocatorError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| AllocatorError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(AllocatorError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    assignments::{
        entities::Assignment,
        requests::{AssignmentPatch, AssignmentQuery, NewAssignment},
    },
    candidates::{
        entities::Candidate,
        requests::{CandidateQuery, CreateCandidateRequest, UpdateCandidateRequest},
    },
    sections::{
        entities::Section,
        requests::{CreateSectionRequest, SectionQuery},
    },
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 候选人模块
    async fn create_candidate(&self, candidate: CreateCandidateRequest) -> Result<Candidate> {
        self.create_candidate_impl(candidate).await
    }

    async fn get_candidate_by_id(&self, id: i64) -> Result<Option<Candidate>> {
        self.get_candidate_by_id_impl(id).await
    }

    async fn list_candidates(&self, query: CandidateQuery) -> Result<Vec<Candidate>> {
        self.list_candidates_impl(query).await
    }

    async fn update_candidate(
        &self,
        id: i64,
        update: UpdateCandidateRequest,
    ) -> Result<Option<Candidate>> {
        self.update_candidate_impl(id, update).await
    }

    async fn delete_candidate(&self, id: i64) -> Result<bool> {
        self.delete_candidate_impl(id).await
    }

    async fn list_candidate_semesters(&self) -> Result<Vec<String>> {
        self.list_candidate_semesters_impl().await
    }

    // 课程分组模块
    async fn create_section(&self, section: CreateSectionRequest) -> Result<Section> {
        self.create_section_impl(section).await
    }

    async fn get_section_by_id(&self, id: i64) -> Result<Option<Section>> {
        self.get_section_by_id_impl(id).await
    }

    async fn list_sections(&self, query: SectionQuery) -> Result<Vec<Section>> {
        self.list_sections_impl(query).await
    }

    async fn delete_section(&self, id: i64) -> Result<bool> {
        self.delete_section_impl(id).await
    }

    async fn list_section_semesters(&self) -> Result<Vec<String>> {
        self.list_section_semesters_impl().await
    }

    // 槽位模块
    async fn create_assignment(&self, assignment: NewAssignment) -> Result<Assignment> {
        self.create_assignment_impl(assignment).await
    }

    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(id).await
    }

    async fn list_assignments(&self, query: AssignmentQuery) -> Result<Vec<Assignment>> {
        self.list_assignments_impl(query).await
    }

    async fn update_assignment(
        &self,
        id: i64,
        patch: AssignmentPatch,
    ) -> Result<Option<Assignment>> {
        self.update_assignment_impl(id, patch).await
    }

    async fn delete_assignments(&self, query: AssignmentQuery) -> Result<u64> {
        self.delete_assignments_impl(query).await
    }

    async fn delete_assignment(&self, id: i64) -> Result<bool> {
        self.delete_assignment_impl(id).await
    }
}
