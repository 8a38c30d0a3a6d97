//! 日志初始化
//!
//! `RUST_LOG` 设置时优先使用，否则使用传入的级别（通常来自 `MENU_LOG_LEVEL`）。
//! 可以重复调用，已经安装过订阅者时直接返回。

use tracing_subscriber::{fmt, EnvFilter};

/// 初始化全局日志订阅者，返回是否由本次调用完成安装
pub fn init_logging(level: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
