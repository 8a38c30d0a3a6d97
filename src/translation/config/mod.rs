//! 翻译配置管理模块
//!
//! 配置按优先级从低到高叠加：内置默认值、配置文件、`.env` 文件、环境变量。

pub mod manager;

// 重新导出主要类型
pub use manager::{ConfigManager, TranslationConfig};

/// 配置常量
pub mod constants {
    use std::time::Duration;

    // 语言
    pub const DEFAULT_SOURCE_LANG: &str = "it";
    pub const DEFAULT_TARGET_LANG: &str = "en";

    // 远程端点
    pub const DEFAULT_API_URL: &str = "https://translate.googleapis.com/translate_a/single";
    pub const DEFAULT_CLOUD_API_URL: &str =
        "https://translation.googleapis.com/language/translate/v2";
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
    pub const MAX_TIMEOUT_SECS: u64 = 120;

    // 批量重新翻译
    pub const BATCH_DELAY_MS: u64 = 100;

    // 数据库
    pub const DEFAULT_DB_PATH: &str = "ristorante.db";

    // 配置文件搜索路径
    pub const CONFIG_PATHS: &[&str] = &[
        "menu-translation.toml",
        "translation-config.toml",
        "~/.config/menu-translation/config.toml",
        "/etc/menu-translation/config.toml",
    ];

    // .env 文件（先找到的优先）
    pub const ENV_FILES: &[&str] = &[".env.local", ".env"];
}

/// 加载完整配置，失败时退回默认值
///
/// 服务启动路径使用这个函数：配置错误只记录日志，翻译照常以默认设置工作。
pub fn load_translation_config() -> TranslationConfig {
    match ConfigManager::new() {
        Ok(manager) => manager.into_config(),
        Err(e) => {
            tracing::warn!("配置加载失败，使用默认配置: {}", e);
            TranslationConfig::default()
        }
    }
}
