//! 翻译系统核心模块
//!
//! - **后端层** (`backend.rs`): 远程翻译端点，每次调用返回 `TranslationResult`
//! - **翻译器** (`translator.rs`): 缓存 → 词典 → 远程 → 放弃 的解析顺序
//!
//! ```text
//! Translator (translator.rs)
//!     ├── TranslationCache (storage/cache.rs)
//!     ├── FallbackDictionary (dictionary.rs)
//!     └── Vec<Box<dyn TranslationBackend>> (backend.rs)
//!             ├── GoogleFreeBackend
//!             └── GoogleCloudBackend（仅在配置了密钥时）
//! ```

pub mod backend;
pub mod translator;

/// 远程后端
pub use backend::{
    backends_from_config, build_http_client, GoogleCloudBackend, GoogleFreeBackend,
    TranslationBackend,
};

/// 翻译器及其统计
pub use translator::{
    build_text_translator, NoopTranslator, Resolution, ResolutionSource, TextTranslator,
    Translator, TranslatorStats, TranslatorStatsSnapshot,
};
