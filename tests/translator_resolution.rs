//! 翻译器解析顺序集成测试
//!
//! 缓存、词典、远程后端、放弃回退，以及远程服务不可达时的降级行为

use std::sync::Arc;
use std::time::{Duration, Instant};

use menu_translation::translation::{
    build_text_translator, ResolutionSource, TextTranslator, TranslationConfig, Translator,
};

#[allow(dead_code)]
mod common {
    include!("common/mod.rs");
}

use common::{translator_with, MockBackend};

#[test]
fn test_second_call_is_served_from_cache() {
    let backend = MockBackend::with_responses("mock", &[("Carbonara", "Carbonara pasta")]);
    let translator = translator_with(&[backend.clone()]);

    let first = translator.translate("Carbonara", "en");
    let second = translator.translate("Carbonara", "en");

    assert_eq!(first, "Carbonara pasta");
    assert_eq!(second, first);
    assert_eq!(backend.calls(), 1, "second call must not reach the remote backend");
    println!("✅ 缓存命中不再调用远程服务");
}

#[test]
fn test_blank_input_returned_unchanged() {
    let backend = MockBackend::with_responses("mock", &[]);
    let translator = translator_with(&[backend.clone()]);

    for input in ["", "   ", "\n\t"] {
        assert_eq!(translator.translate(input, "en"), input);
        assert_eq!(translator.translate(input, "en"), input);
    }

    assert!(translator.cache().is_empty());
    assert_eq!(backend.calls(), 0);
    println!("✅ 空白输入原样返回且不缓存");
}

#[test]
fn test_dictionary_used_when_remote_unreachable() {
    let backend = MockBackend::failing("mock");
    let translator = translator_with(&[backend.clone()]);

    let resolution = translator.resolve("Pizza Margherita", "en");

    assert_eq!(resolution.text, "Pizza Margherita");
    assert_eq!(resolution.source, ResolutionSource::Dictionary);
    assert_eq!(backend.calls(), 0);
    println!("✅ 词典在远程调用之前生效");
}

#[test]
fn test_give_up_result_is_cached() {
    let backend = MockBackend::failing("mock");
    let translator = translator_with(&[backend.clone()]);

    assert_eq!(translator.translate("Scaloppine", "en"), "Scaloppine");
    assert_eq!(backend.calls(), 1);

    assert_eq!(translator.translate("Scaloppine", "en"), "Scaloppine");
    assert_eq!(backend.calls(), 1, "give-up result must be cached");

    let stats = translator.stats();
    assert_eq!(stats.give_ups, 1);
    assert_eq!(stats.cache_hits, 1);
    println!("✅ 放弃回退的结果被缓存");
}

#[test]
fn test_give_up_sticks_after_remote_recovers() {
    let backend = MockBackend::with_responses("mock", &[("Ossobuco", "Braised veal shank")]);
    backend.set_failing(true);
    let translator = translator_with(&[backend.clone()]);

    assert_eq!(translator.translate("Ossobuco", "en"), "Ossobuco");

    // 缓存没有失效路径：同一进程内结果保持不变
    backend.set_failing(false);
    assert_eq!(translator.translate("Ossobuco", "en"), "Ossobuco");
    assert_eq!(backend.calls(), 1);
}

#[test]
fn test_secondary_backend_after_primary_failure() {
    let free = MockBackend::failing("free");
    let cloud = MockBackend::with_responses("cloud", &[("Panna cotta", "Cooked cream")]);
    let translator = translator_with(&[free.clone(), cloud.clone()]);

    let resolution = translator.resolve("Panna cotta", "en");

    assert_eq!(resolution.text, "Cooked cream");
    assert_eq!(resolution.source, ResolutionSource::Remote("cloud"));
    assert_eq!((free.calls(), cloud.calls()), (1, 1));
}

#[test]
fn test_primary_success_skips_secondary() {
    let free = MockBackend::with_responses("free", &[("Carpaccio", "Carpaccio")]);
    let cloud = MockBackend::with_responses("cloud", &[("Carpaccio", "Raw beef")]);
    let translator = translator_with(&[free.clone(), cloud.clone()]);

    assert_eq!(translator.translate("Carpaccio", "en"), "Carpaccio");
    assert_eq!(cloud.calls(), 0);
}

#[test]
fn test_cache_key_uses_trimmed_text() {
    let backend = MockBackend::with_responses("mock", &[("Risotto ai funghi", "Mushroom risotto")]);
    let translator = translator_with(&[backend.clone()]);

    assert_eq!(translator.translate("  Risotto ai funghi  ", "en"), "Mushroom risotto");
    assert_eq!(translator.translate("Risotto ai funghi", "en"), "Mushroom risotto");
    assert_eq!(backend.calls(), 1);
}

#[test]
fn test_concurrent_callers_share_cache() {
    let backend = MockBackend::with_responses("mock", &[("Gnocchi", "Potato dumplings")]);
    let translator = Arc::new(translator_with(&[backend.clone()]));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let translator = Arc::clone(&translator);
            std::thread::spawn(move || translator.translate("Gnocchi", "en"))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), "Potato dumplings");
    }
    assert_eq!(translator.cache().len(), 1);
    // 竞争时可能有多余的远程调用，但结果一致
    assert!(backend.calls() >= 1);
}

#[test]
fn test_real_backend_unreachable_degrades() {
    let config = TranslationConfig {
        // 本地未监听的端口，连接会立即被拒绝
        api_url: "http://127.0.0.1:9/translate_a/single".to_string(),
        timeout_secs: 2,
        ..TranslationConfig::default()
    };
    let translator = Translator::from_config(&config).unwrap();

    let started = Instant::now();
    let resolution = translator.resolve("Saltimbocca alla romana", "en");

    assert_eq!(resolution.text, "Saltimbocca alla romana");
    assert_eq!(resolution.source, ResolutionSource::GiveUp);
    assert!(started.elapsed() < Duration::from_secs(10));
    assert_eq!(translator.stats().remote_failures, 1);
    println!("✅ 远程服务不可达时退回原文");
}

#[test]
fn test_disabled_translation_is_noop() {
    let config = TranslationConfig {
        enabled: false,
        ..TranslationConfig::default()
    };
    let translator = build_text_translator(&config).unwrap();

    assert_eq!(translator.translate("Antipasti", "en"), "Antipasti");
}
