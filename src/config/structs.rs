use serde::{Deserialize, Serialize};

/// 应用配置结构体
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub allocation: AllocationConfig,
}

/// 应用设置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub system_name: String,
    pub environment: String,
    pub log_level: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            system_name: "Grader Allocator".to_string(),
            environment: "development".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,    // 数据库连接 URL（从 scheme 自动推断类型）
    pub pool_size: u32, // 连接池大小
    pub timeout: u64,   // 连接超时 (秒)
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "grader-allocator.db".to_string(),
            pool_size: 8,
            timeout: 30,
        }
    }
}

/// 分配引擎配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationConfig {
    /// 评分权重
    pub weights: WeightsConfig,
    /// 全量分配时是否默认导入上学期助教
    pub import_previous_graders: bool,
}

/// 评分权重配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightsConfig {
    pub gpa: f64,
    pub seniority: f64,
    pub experience: f64,
    pub keywords: f64,
}

impl Default for WeightsConfig {
    // GPA 权重按现行政策为 0，保留字段用于后续调参
    fn default() -> Self {
        Self {
            gpa: 0.0,
            seniority: 0.2,
            experience: 0.8,
            keywords: 0.3,
        }
    }
}
