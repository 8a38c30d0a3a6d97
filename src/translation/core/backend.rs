//! 远程翻译后端
//!
//! 两个后端共享同一个带超时的阻塞 HTTP 客户端：
//!
//! - [`GoogleFreeBackend`]：无需密钥的公共端点，响应为嵌套 JSON 数组
//! - [`GoogleCloudBackend`]：需要 API 密钥的端点，仅在配置了密钥时启用
//!
//! 后端只负责一次请求并返回 [`TranslationResult`]；降级逻辑在翻译器中处理。

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::translation::config::TranslationConfig;
use crate::translation::error::{helpers, TranslationError, TranslationResult};

/// 远程翻译后端接口
pub trait TranslationBackend: Send + Sync {
    /// 后端名称，用于日志和指标标签
    fn name(&self) -> &'static str;

    /// 翻译一段文本
    fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> TranslationResult<String>;
}

/// 创建带超时的 HTTP 客户端
pub fn build_http_client(timeout: Duration) -> TranslationResult<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("menu-translation/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| helpers::config_error(format!("HTTP客户端创建失败: {}", e)))
}

/// 根据配置组装后端链：免费端点在前，认证端点（如有密钥）在后
pub fn backends_from_config(
    config: &TranslationConfig,
) -> TranslationResult<Vec<Box<dyn TranslationBackend>>> {
    let client = build_http_client(config.timeout())?;

    let mut backends: Vec<Box<dyn TranslationBackend>> = vec![Box::new(GoogleFreeBackend::new(
        client.clone(),
        &config.api_url,
    ))];

    match config.api_key.as_deref().map(str::trim) {
        Some(key) if !key.is_empty() => {
            backends.push(Box::new(GoogleCloudBackend::new(
                client,
                &config.cloud_api_url,
                key,
            )));
        }
        _ => tracing::debug!("未配置 API 密钥，跳过认证翻译端点"),
    }

    Ok(backends)
}

/// 发送 GET 请求并返回 2xx 响应体
fn fetch(client: &Client, url: &str, query: &[(&str, &str)]) -> TranslationResult<String> {
    let response = client.get(url).query(query).send()?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().unwrap_or_default();
        return Err(TranslationError::HttpStatus {
            status: status.as_u16(),
            body: body.chars().take(200).collect(),
        });
    }

    Ok(response.text()?)
}

fn non_empty(text: String) -> TranslationResult<String> {
    if text.trim().is_empty() {
        Err(TranslationError::EmptyResult)
    } else {
        Ok(text)
    }
}

// ============================================================================
// 免费端点
// ============================================================================

/// 无密钥的公共翻译端点
#[derive(Debug, Clone)]
pub struct GoogleFreeBackend {
    client: Client,
    url: String,
}

impl GoogleFreeBackend {
    pub fn new(client: Client, url: &str) -> Self {
        Self {
            client,
            url: url.to_string(),
        }
    }
}

impl TranslationBackend for GoogleFreeBackend {
    fn name(&self) -> &'static str {
        "google-free"
    }

    fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> TranslationResult<String> {
        let body = fetch(
            &self.client,
            &self.url,
            &[
                ("client", "gtx"),
                ("sl", source_lang),
                ("tl", target_lang),
                ("dt", "t"),
                ("q", text),
            ],
        )?;

        let value: serde_json::Value = serde_json::from_str(&body)?;
        parse_free_response(&value)
    }
}

/// 解析免费端点的响应
///
/// 响应形如 `[[["译文1","原文1",...],["译文2","原文2",...]],null,"it",...]`，
/// 多句文本会被拆成多段，译文是所有段第 0 个元素的拼接。
pub fn parse_free_response(value: &serde_json::Value) -> TranslationResult<String> {
    let segments = value
        .get(0)
        .and_then(serde_json::Value::as_array)
        .ok_or_else(|| helpers::malformed("缺少译文段落数组"))?;

    let mut translated = String::new();
    for segment in segments {
        if let Some(part) = segment.get(0).and_then(serde_json::Value::as_str) {
            translated.push_str(part);
        }
    }

    non_empty(translated)
}

// ============================================================================
// 认证端点
// ============================================================================

#[derive(Debug, Deserialize)]
struct CloudResponse {
    data: CloudData,
}

#[derive(Debug, Deserialize)]
struct CloudData {
    translations: Vec<CloudTranslation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CloudTranslation {
    translated_text: String,
}

/// 需要 API 密钥的翻译端点
#[derive(Clone)]
pub struct GoogleCloudBackend {
    client: Client,
    url: String,
    api_key: String,
}

impl std::fmt::Debug for GoogleCloudBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleCloudBackend")
            .field("url", &self.url)
            .field("api_key", &"[redacted]")
            .finish()
    }
}

impl GoogleCloudBackend {
    pub fn new(client: Client, url: &str, api_key: &str) -> Self {
        Self {
            client,
            url: url.to_string(),
            api_key: api_key.to_string(),
        }
    }
}

impl TranslationBackend for GoogleCloudBackend {
    fn name(&self) -> &'static str {
        "google-cloud"
    }

    fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> TranslationResult<String> {
        let body = fetch(
            &self.client,
            &self.url,
            &[
                ("key", self.api_key.as_str()),
                ("q", text),
                ("target", target_lang),
                ("source", source_lang),
                ("format", "text"),
            ],
        )?;

        parse_cloud_response(&body)
    }
}

/// 解析认证端点的响应，取 `data.translations[0].translatedText`
pub fn parse_cloud_response(body: &str) -> TranslationResult<String> {
    let response: CloudResponse = serde_json::from_str(body)?;

    let translation = response
        .data
        .translations
        .into_iter()
        .next()
        .ok_or_else(|| helpers::malformed("响应中没有译文"))?;

    non_empty(translation.translated_text)
}
