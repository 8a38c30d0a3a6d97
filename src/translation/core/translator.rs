//! 翻译器
//!
//! 把 `(文本, 目标语言)` 解析为尽力而为的译文。解析顺序，先命中者生效：
//!
//! 1. 进程内缓存
//! 2. 备用词典（精确匹配，命中后写入缓存）
//! 3. 远程后端，按配置顺序逐个尝试（成功且非空时写入缓存）
//! 4. 放弃：返回原文，并缓存 `原文 -> 原文`，避免同一进程内重复请求远程服务
//!
//! 空白输入原样返回，不查缓存也不写缓存。[`Translator::translate`] 永远返回文本，
//! 远程错误只在内部以 [`TranslationResult`](crate::translation::TranslationResult) 传递。

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::translation::config::TranslationConfig;
use crate::translation::core::backend::{backends_from_config, TranslationBackend};
use crate::translation::dictionary::FallbackDictionary;
use crate::translation::error::{helpers, TranslationResult};
use crate::translation::storage::TranslationCache;

/// 文本翻译接口
///
/// 持久化适配器和批处理驱动只依赖这个接口，因此可以换成 [`NoopTranslator`]。
pub trait TextTranslator: Send + Sync {
    fn translate(&self, text: &str, target_lang: &str) -> String;
}

impl<T: TextTranslator + ?Sized> TextTranslator for Arc<T> {
    fn translate(&self, text: &str, target_lang: &str) -> String {
        (**self).translate(text, target_lang)
    }
}

/// 译文来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionSource {
    /// 空白输入，原样返回
    Blank,
    Cache,
    Dictionary,
    /// 远程后端（名称）
    Remote(&'static str),
    /// 所有步骤都没有结果，返回原文
    GiveUp,
}

impl ResolutionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionSource::Blank => "blank",
            ResolutionSource::Cache => "cache",
            ResolutionSource::Dictionary => "dictionary",
            ResolutionSource::Remote(name) => *name,
            ResolutionSource::GiveUp => "give-up",
        }
    }

    /// 是否属于降级结果
    pub fn is_degraded(&self) -> bool {
        matches!(self, ResolutionSource::GiveUp)
    }
}

/// 一次解析的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub text: String,
    pub source: ResolutionSource,
}

/// 翻译器运行统计
#[derive(Debug, Default)]
pub struct TranslatorStats {
    pub requests: AtomicUsize,
    pub blank_inputs: AtomicUsize,
    pub cache_hits: AtomicUsize,
    pub dictionary_hits: AtomicUsize,
    pub remote_successes: AtomicUsize,
    pub remote_failures: AtomicUsize,
    pub give_ups: AtomicUsize,
}

impl TranslatorStats {
    fn inc(counter: &AtomicUsize) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// 获取统计数据快照
    pub fn snapshot(&self) -> TranslatorStatsSnapshot {
        TranslatorStatsSnapshot {
            requests: self.requests.load(Ordering::Relaxed),
            blank_inputs: self.blank_inputs.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            dictionary_hits: self.dictionary_hits.load(Ordering::Relaxed),
            remote_successes: self.remote_successes.load(Ordering::Relaxed),
            remote_failures: self.remote_failures.load(Ordering::Relaxed),
            give_ups: self.give_ups.load(Ordering::Relaxed),
        }
    }
}

/// 统计数据的不可变快照
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranslatorStatsSnapshot {
    pub requests: usize,
    pub blank_inputs: usize,
    pub cache_hits: usize,
    pub dictionary_hits: usize,
    pub remote_successes: usize,
    pub remote_failures: usize,
    pub give_ups: usize,
}

impl TranslatorStatsSnapshot {
    /// 远程调用总次数
    pub fn remote_calls(&self) -> usize {
        self.remote_successes + self.remote_failures
    }
}

/// 翻译器
///
/// 在进程启动时构造一次，通过 `Arc` 共享给所有调用方。缓存归翻译器所有，
/// 生命周期与翻译器相同。
pub struct Translator {
    source_lang: String,
    cache: TranslationCache,
    dictionary: FallbackDictionary,
    backends: Vec<Box<dyn TranslationBackend>>,
    stats: TranslatorStats,
}

impl std::fmt::Debug for Translator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Translator")
            .field("source_lang", &self.source_lang)
            .field("cache_entries", &self.cache.len())
            .field("dictionary_terms", &self.dictionary.len())
            .field(
                "backends",
                &self.backends.iter().map(|b| b.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Translator {
    /// 使用给定的词典和后端创建翻译器
    pub fn new(
        source_lang: &str,
        dictionary: FallbackDictionary,
        backends: Vec<Box<dyn TranslationBackend>>,
    ) -> Self {
        Self {
            source_lang: source_lang.to_string(),
            cache: TranslationCache::new(),
            dictionary,
            backends,
            stats: TranslatorStats::default(),
        }
    }

    /// 根据配置创建翻译器（内置词典 + 配置中的额外词条 + 远程后端）
    pub fn from_config(config: &TranslationConfig) -> TranslationResult<Self> {
        config.validate()?;

        let dictionary = FallbackDictionary::with_extra(&config.dictionary);
        let backends = backends_from_config(config)?;

        tracing::info!(
            "翻译器初始化: {} -> {}，词典 {} 条，后端 {} 个",
            config.source_lang,
            config.target_lang,
            dictionary.len(),
            backends.len()
        );

        Ok(Self::new(&config.source_lang, dictionary, backends))
    }

    pub fn source_lang(&self) -> &str {
        &self.source_lang
    }

    pub fn cache(&self) -> &TranslationCache {
        &self.cache
    }

    pub fn dictionary(&self) -> &FallbackDictionary {
        &self.dictionary
    }

    pub fn stats(&self) -> TranslatorStatsSnapshot {
        self.stats.snapshot()
    }

    /// 解析译文并报告来源
    pub fn resolve(&self, text: &str, target_lang: &str) -> Resolution {
        TranslatorStats::inc(&self.stats.requests);

        let trimmed = text.trim();
        if trimmed.is_empty() {
            TranslatorStats::inc(&self.stats.blank_inputs);
            return Resolution {
                text: text.to_string(),
                source: ResolutionSource::Blank,
            };
        }

        if let Some(cached) = self.cache.get(trimmed, target_lang) {
            TranslatorStats::inc(&self.stats.cache_hits);
            metrics::counter!("menu_translation_cache_hits_total").increment(1);
            tracing::debug!("缓存命中: {:?} -> {:?}", trimmed, cached);
            return Resolution {
                text: cached,
                source: ResolutionSource::Cache,
            };
        }

        if let Some(term) = self.dictionary.lookup(trimmed, target_lang) {
            TranslatorStats::inc(&self.stats.dictionary_hits);
            metrics::counter!("menu_translation_dictionary_hits_total").increment(1);
            tracing::debug!("词典命中: {:?} -> {:?}", trimmed, term);
            return Resolution {
                text: self.cache.insert(trimmed, target_lang, term.to_string()),
                source: ResolutionSource::Dictionary,
            };
        }

        for backend in &self.backends {
            match backend.translate(trimmed, &self.source_lang, target_lang) {
                Ok(translated) => {
                    TranslatorStats::inc(&self.stats.remote_successes);
                    metrics::counter!(
                        "menu_translation_remote_calls_total",
                        "backend" => backend.name(),
                        "outcome" => "success"
                    )
                    .increment(1);
                    tracing::debug!("{} 翻译成功: {:?} -> {:?}", backend.name(), trimmed, translated);
                    return Resolution {
                        text: self.cache.insert(trimmed, target_lang, translated),
                        source: ResolutionSource::Remote(backend.name()),
                    };
                }
                Err(error) => {
                    TranslatorStats::inc(&self.stats.remote_failures);
                    metrics::counter!(
                        "menu_translation_remote_calls_total",
                        "backend" => backend.name(),
                        "outcome" => error.label()
                    )
                    .increment(1);
                    helpers::log_degraded(backend.name(), &error);
                }
            }
        }

        TranslatorStats::inc(&self.stats.give_ups);
        metrics::counter!("menu_translation_give_ups_total").increment(1);
        tracing::info!("无法翻译 {:?} 到 {}，保留原文", trimmed, target_lang);

        Resolution {
            text: self
                .cache
                .insert(trimmed, target_lang, trimmed.to_string()),
            source: ResolutionSource::GiveUp,
        }
    }
}

impl TextTranslator for Translator {
    fn translate(&self, text: &str, target_lang: &str) -> String {
        self.resolve(text, target_lang).text
    }
}

/// 不做任何翻译的实现，原样返回输入
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTranslator;

impl TextTranslator for NoopTranslator {
    fn translate(&self, text: &str, _target_lang: &str) -> String {
        text.to_string()
    }
}

/// 根据配置创建翻译器；`enabled = false` 时返回 [`NoopTranslator`]
pub fn build_text_translator(
    config: &TranslationConfig,
) -> TranslationResult<Arc<dyn TextTranslator>> {
    if !config.enabled {
        tracing::info!("翻译已禁用，使用空操作翻译器");
        return Ok(Arc::new(NoopTranslator));
    }

    Ok(Arc::new(Translator::from_config(config)?))
}
