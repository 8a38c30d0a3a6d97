//! # Menu Translation Library
//!
//! 餐厅菜单后台的翻译子系统：员工用意大利语录入产品、类别、过敏原和配料，
//! 公开菜单可以按英语展示。
//!
//! ## 模块组织
//!
//! - `translation` - 翻译器：缓存、备用词典、远程后端、降级
//! - `menu` - 菜单实体、存储、译文写回和批量重新翻译
//! - `env` - 类型安全的环境变量
//! - `logging` - 日志初始化

pub mod env;
pub mod logging;
pub mod menu;
pub mod translation;

// Re-export commonly used items for convenience
pub use menu::{
    BatchReport, BatchRetranslator, EntityKind, MenuStore, SqliteMenuStore, StoreError,
    TranslatableEntity, TranslatedFields, TranslationWriter,
};
pub use translation::{
    build_text_translator, load_translation_config, NoopTranslator, TextTranslator,
    TranslationConfig, Translator,
};
