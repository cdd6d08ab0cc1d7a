//! # 日志模块
//!
//! 基于 `tracing-subscriber` 的日志初始化，日志写入标准错误，
//! 标准输出只保留面向用户的结果提示。

use clap::ValueEnum;
use tracing::level_filters::LevelFilter;

/// 命令行 `--log-level` 可选的日志级别，从最安静到最详细。
#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// 转换为 `tracing` 的级别过滤器。
    pub fn as_filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

/// 安装全局日志订阅者。
///
/// 日志只写入标准错误，不带模块路径；编解码器的 `debug` 事件和
/// 处理流程的 `info` 事件都经由这里输出。重复调用时保留第一次的设置。
pub fn init_logging(level: LogLevel) {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level.as_filter())
        .with_target(false)
        .try_init();
}
