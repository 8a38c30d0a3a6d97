//! 配置管理器
//!
//! 提供统一的配置接口，支持文件配置、环境变量和默认值

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::constants;
use crate::translation::error::{TranslationError, TranslationResult};

/// 翻译配置
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TranslationConfig {
    // 基础配置
    pub enabled: bool,
    pub source_lang: String,
    pub target_lang: String,

    // 远程服务
    pub api_url: String,
    pub cloud_api_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub timeout_secs: u64,

    // 批量重新翻译
    pub batch_delay_ms: u64,

    // 存储
    pub db_path: String,

    /// 额外的词典条目：目标语言 -> (源文本 -> 译文)
    pub dictionary: HashMap<String, HashMap<String, String>>,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            source_lang: constants::DEFAULT_SOURCE_LANG.to_string(),
            target_lang: constants::DEFAULT_TARGET_LANG.to_string(),

            api_url: constants::DEFAULT_API_URL.to_string(),
            cloud_api_url: constants::DEFAULT_CLOUD_API_URL.to_string(),
            api_key: None,
            timeout_secs: constants::DEFAULT_TIMEOUT.as_secs(),

            batch_delay_ms: constants::BATCH_DELAY_MS,

            db_path: constants::DEFAULT_DB_PATH.to_string(),

            dictionary: HashMap::new(),
        }
    }
}

impl TranslationConfig {
    /// 验证配置
    pub fn validate(&self) -> TranslationResult<()> {
        if self.source_lang.trim().is_empty() || self.target_lang.trim().is_empty() {
            return Err(TranslationError::ConfigError("语言代码不能为空".to_string()));
        }

        if self.source_lang.eq_ignore_ascii_case(&self.target_lang) {
            return Err(TranslationError::ConfigError(format!(
                "源语言与目标语言相同: {}",
                self.source_lang
            )));
        }

        validate_endpoint("api_url", &self.api_url)?;
        validate_endpoint("cloud_api_url", &self.cloud_api_url)?;

        if self.timeout_secs == 0 {
            return Err(TranslationError::ConfigError("超时时间不能为0".to_string()));
        }

        if self.timeout_secs > constants::MAX_TIMEOUT_SECS {
            return Err(TranslationError::ConfigError(format!(
                "超时时间不能超过 {} 秒",
                constants::MAX_TIMEOUT_SECS
            )));
        }

        Ok(())
    }

    /// 应用环境变量覆盖
    ///
    /// 只有显式设置的变量才会覆盖文件中的值；值无法解析时记录警告并保留原值。
    pub fn apply_env_overrides(&mut self) {
        use crate::env::{database, google, translation, EnvVar};

        fn take<T, V: EnvVar<T>>() -> Option<T> {
            if !V::is_set() {
                return None;
            }
            match V::get() {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!("忽略无效的环境变量: {}", e);
                    None
                }
            }
        }

        if let Some(enabled) = take::<bool, translation::Enabled>() {
            self.enabled = enabled;
        }

        if let Some(source_lang) = take::<String, translation::SourceLang>() {
            self.source_lang = source_lang;
        }

        if let Some(target_lang) = take::<String, translation::TargetLang>() {
            self.target_lang = target_lang;
        }

        if let Some(api_url) = take::<String, translation::ApiUrl>() {
            self.api_url = api_url;
            tracing::info!("环境变量覆盖 API URL: {}", self.api_url);
        }

        if let Some(cloud_api_url) = take::<String, translation::CloudApiUrl>() {
            self.cloud_api_url = cloud_api_url;
        }

        if let Some(api_key) = take::<String, google::ApiKey>() {
            self.api_key = Some(api_key);
        }

        if let Some(timeout) = take::<Duration, translation::Timeout>() {
            self.timeout_secs = timeout.as_secs();
        }

        if let Some(delay) = take::<u64, translation::BatchDelayMs>() {
            self.batch_delay_ms = delay;
        }

        if let Some(db_path) = take::<String, database::Path>() {
            self.db_path = db_path;
        }
    }

    /// 是否配置了认证端点的密钥
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_deref()
            .map_or(false, |key| !key.trim().is_empty())
    }

    /// 转换为Duration类型
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }
}

fn validate_endpoint(field: &str, value: &str) -> TranslationResult<()> {
    let parsed = url::Url::parse(value)
        .map_err(|e| TranslationError::ConfigError(format!("{} 不是合法的URL: {}", field, e)))?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(TranslationError::ConfigError(format!(
            "{} 只支持 http/https，当前为 {}",
            field, other
        ))),
    }
}

/// 配置管理器
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: TranslationConfig,
}

impl ConfigManager {
    /// 创建新的配置管理器
    pub fn new() -> TranslationResult<Self> {
        Self::load_dotenv();

        let mut config = Self::load_config()?;
        config.apply_env_overrides();
        config.validate()?;

        Ok(Self { config })
    }

    /// 从指定文件创建，`.env` 文件和环境变量覆盖与 [`ConfigManager::new`] 相同
    pub fn from_file<P: AsRef<Path>>(path: P) -> TranslationResult<Self> {
        Self::load_dotenv();

        let mut config = Self::load_from_file(path.as_ref())?;
        config.apply_env_overrides();
        config.validate()?;

        Ok(Self { config })
    }

    /// 直接使用给定配置
    pub fn with_config(config: TranslationConfig) -> TranslationResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// 获取配置
    pub fn get_config(&self) -> &TranslationConfig {
        &self.config
    }

    pub fn into_config(self) -> TranslationConfig {
        self.config
    }

    /// 按搜索路径加载配置文件
    fn load_config() -> TranslationResult<TranslationConfig> {
        for path in constants::CONFIG_PATHS {
            let expanded_path = shellexpand::tilde(path);
            if Path::new(expanded_path.as_ref()).exists() {
                tracing::info!("加载配置文件: {}", expanded_path);
                return Self::load_from_file(Path::new(expanded_path.as_ref()));
            }
        }

        tracing::info!("未找到配置文件，使用默认配置");
        Ok(TranslationConfig::default())
    }

    /// 从指定文件加载配置（`.toml` 按 TOML 解析，其余按 JSON）
    fn load_from_file(path: &Path) -> TranslationResult<TranslationConfig> {
        let content = std::fs::read_to_string(path)?;

        let is_toml = path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("toml"));

        if is_toml {
            Ok(toml::from_str(&content)?)
        } else {
            serde_json::from_str(&content)
                .map_err(|e| TranslationError::ParseError(format!("JSON解析错误: {}", e)))
        }
    }

    /// 加载 .env 文件
    fn load_dotenv() {
        for env_file in constants::ENV_FILES {
            if Path::new(env_file).exists() && dotenv::from_filename(env_file).is_ok() {
                tracing::info!("已加载环境变量文件: {}", env_file);
                break;
            }
        }
    }

    /// 生成示例配置文件
    pub fn generate_example_config<P: AsRef<Path>>(path: P) -> TranslationResult<()> {
        let mut config = TranslationConfig::default();
        config.dictionary.insert(
            constants::DEFAULT_TARGET_LANG.to_string(),
            HashMap::from([("Tiramisù".to_string(), "Tiramisu".to_string())]),
        );

        let content = toml::to_string_pretty(&config)
            .map_err(|e| TranslationError::ConfigError(format!("序列化配置失败: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }
}
