use tracing_appender::non_blocking::WorkerGuard;

use crate::config::AppConfig;
use crate::errors::{AllocatorError, Result};

/// 初始化全局日志
///
/// 开发环境输出文件与行号，其他环境输出 JSON。返回的 guard 需要持有到进程结束，
/// 否则缓冲中的日志会丢失。
pub fn init_tracing(config: &AppConfig) -> Result<WorkerGuard> {
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(std::io::stdout());
    let filter = tracing_subscriber::EnvFilter::try_new(&config.app.log_level)
        .map_err(|e| AllocatorError::configuration(format!("Invalid log level: {e}")))?;
    let tracing_format = tracing_subscriber::fmt::format()
        .with_level(true)
        .with_ansi(config.is_development());

    let tracing_builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking_writer)
        .event_format(tracing_format);

    let installed = if config.is_development() {
        tracing_builder
            .with_file(true)
            .with_line_number(true)
            .try_init()
    } else {
        tracing_builder.json().try_init()
    };
    installed.map_err(|e| AllocatorError::configuration(format!("Failed to install logger: {e}")))?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_log_level_is_rejected() {
        let mut config = AppConfig::default();
        config.app.log_level = "allocator=verbose".to_string();
        let err = init_tracing(&config).unwrap_err();
        assert_eq!(err.code(), "E001");
    }
}
