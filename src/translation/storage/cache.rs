//! 翻译缓存模块
//!
//! 进程生命周期内的翻译结果缓存。键为 `(去除首尾空白的原文, 目标语言)`。
//!
//! 缓存没有容量上限，也不会过期或失效：同一个键在进程存活期间始终映射到同一个值。
//! 菜单词汇量有限，条目数量随不同菜单文本线性增长；这是已知的限制，
//! 如果以后需要上限，应在这里加入驱逐策略。

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use dashmap::DashMap;

// ============================================================================
// 核心类型
// ============================================================================

/// 缓存键
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub text: String,
    pub target_lang: String,
}

impl CacheKey {
    /// 生成缓存键，原文会去除首尾空白
    pub fn new(text: &str, target_lang: &str) -> Self {
        Self {
            text: text.trim().to_string(),
            target_lang: target_lang.to_string(),
        }
    }
}

/// 缓存条目
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub translated_text: String,
    pub created_at: Instant,
}

/// 缓存统计信息
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub total_requests: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub total_entries: usize,
}

impl CacheStats {
    /// 计算缓存命中率
    pub fn hit_rate(&self) -> f64 {
        if self.total_requests == 0 {
            0.0
        } else {
            self.cache_hits as f64 / self.total_requests as f64
        }
    }
}

/// 翻译缓存
///
/// 并发安全：多个请求线程可以同时读写。两个线程同时填充同一个键时，
/// 先写入的值生效，后来者的结果被丢弃。
#[derive(Debug, Default)]
pub struct TranslationCache {
    entries: DashMap<CacheKey, CacheEntry>,
    requests: AtomicU64,
    hits: AtomicU64,
}

// ============================================================================
// 实现
// ============================================================================

impl TranslationCache {
    /// 创建新的翻译缓存
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取缓存条目
    pub fn get(&self, text: &str, target_lang: &str) -> Option<String> {
        self.requests.fetch_add(1, Ordering::Relaxed);

        let key = CacheKey::new(text, target_lang);
        let hit = self
            .entries
            .get(&key)
            .map(|entry| entry.translated_text.clone());

        if hit.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        }
        hit
    }

    /// 插入缓存条目，返回该键最终对应的值
    ///
    /// 键已存在时保留原值。
    pub fn insert(&self, text: &str, target_lang: &str, translated: String) -> String {
        let key = CacheKey::new(text, target_lang);
        self.entries
            .entry(key)
            .or_insert_with(|| CacheEntry {
                translated_text: translated,
                created_at: Instant::now(),
            })
            .translated_text
            .clone()
    }

    /// 检查是否包含指定键（不计入统计）
    pub fn contains(&self, text: &str, target_lang: &str) -> bool {
        self.entries.contains_key(&CacheKey::new(text, target_lang))
    }

    /// 获取缓存大小
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 获取统计信息
    pub fn get_stats(&self) -> CacheStats {
        let total_requests = self.requests.load(Ordering::Relaxed);
        let cache_hits = self.hits.load(Ordering::Relaxed);
        CacheStats {
            total_requests,
            cache_hits,
            cache_misses: total_requests.saturating_sub(cache_hits),
            total_entries: self.entries.len(),
        }
    }
}
