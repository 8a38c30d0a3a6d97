//! 存储模块
//!
//! 提供进程内的翻译缓存。

pub mod cache;

pub use cache::{CacheEntry, CacheKey, CacheStats, TranslationCache};
