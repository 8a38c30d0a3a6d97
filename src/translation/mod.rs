//! 翻译模块
//!
//! 把员工录入的菜单文本（默认意大利语）翻译成目标语言（默认英语）：
//! - **core**: 翻译器和远程后端
//! - **dictionary**: 常见菜单词汇的备用词典
//! - **storage**: 进程内缓存
//! - **config**: 配置管理
//! - **error**: 错误处理
//!
//! 翻译是尽力而为的：[`TextTranslator::translate`] 总是返回可用的文本，
//! 远程服务不可用时退回原文。
//!
//! # 基本用法
//!
//! ```rust,no_run
//! use menu_translation::translation::{build_text_translator, load_translation_config};
//!
//! let config = load_translation_config();
//! let translator = build_text_translator(&config).unwrap();
//! let name = translator.translate("Primi Piatti", "en");
//! assert_eq!(name, "First Courses");
//! ```

// ============================================================================
// 子模块声明
// ============================================================================

/// 配置管理模块 - 语言、端点、超时、额外词典
pub mod config;

/// 核心翻译模块 - 翻译器与远程后端
pub mod core;

/// 备用词典
pub mod dictionary;

/// 错误处理模块 - 统一的错误类型和处理机制
pub mod error;

/// 存储管理模块 - 翻译结果缓存
pub mod storage;

// ============================================================================
// 核心API导出
// ============================================================================

pub use core::{
    build_text_translator, NoopTranslator, Resolution, ResolutionSource, TextTranslator,
    TranslationBackend, Translator, TranslatorStatsSnapshot,
};

pub use config::{constants, load_translation_config, ConfigManager, TranslationConfig};

pub use dictionary::FallbackDictionary;

pub use error::{ErrorCategory, ErrorSeverity, TranslationError, TranslationResult};

pub use storage::{CacheStats, TranslationCache};
