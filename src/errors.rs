//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_allocator_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum AllocatorError {
            $($variant(String),)*
        }

        impl AllocatorError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(AllocatorError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(AllocatorError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(AllocatorError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl AllocatorError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        AllocatorError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_allocator_errors! {
    Configuration("E001", "Configuration Error"),
    DatabaseConfig("E002", "Database Configuration Error"),
    DatabaseConnection("E003", "Database Connection Error"),
    DatabaseOperation("E004", "Database Operation Error"),
    Serialization("E005", "Serialization Error"),
    Validation("E006", "Validation Error"),
    NotFound("E007", "Resource Not Found"),
    Conflict("E008", "Assignment Conflict"),
    Exhaustion("E009", "Candidate Pool Exhausted"),
}

impl AllocatorError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 是否属于业务错误（调用方可据此区分存储故障）
    pub fn is_domain_error(&self) -> bool {
        matches!(
            self,
            AllocatorError::Validation(_)
                | AllocatorError::NotFound(_)
                | AllocatorError::Conflict(_)
                | AllocatorError::Exhaustion(_)
        )
    }
}

impl fmt::Display for AllocatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for AllocatorError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for AllocatorError {
    fn from(err: sea_orm::DbErr) -> Self {
        AllocatorError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for AllocatorError {
    fn from(err: serde_json::Error) -> Self {
        AllocatorError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for AllocatorError {
    fn from(err: config::ConfigError) -> Self {
        AllocatorError::Configuration(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AllocatorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(AllocatorError::configuration("test").code(), "E001");
        assert_eq!(AllocatorError::database_operation("test").code(), "E004");
        assert_eq!(AllocatorError::validation("test").code(), "E006");
        assert_eq!(AllocatorError::conflict("test").code(), "E008");
        assert_eq!(AllocatorError::exhaustion("test").code(), "E009");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            AllocatorError::not_found("test").error_type(),
            "Resource Not Found"
        );
        assert_eq!(
            AllocatorError::exhaustion("test").error_type(),
            "Candidate Pool Exhausted"
        );
    }

    #[test]
    fn test_error_message() {
        let err = AllocatorError::conflict("candidate already assigned");
        assert_eq!(err.message(), "candidate already assigned");
    }

    #[test]
    fn test_format_simple() {
        let err = AllocatorError::validation("semester is required");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("semester is required"));
    }

    #[test]
    fn test_domain_error_classification() {
        assert!(AllocatorError::not_found("x").is_domain_error());
        assert!(AllocatorError::exhaustion("x").is_domain_error());
        assert!(!AllocatorError::database_connection("x").is_domain_error());
    }
}
