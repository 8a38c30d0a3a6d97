//! 统一的环境变量管理系统
//!
//! 提供类型安全、可验证的环境变量访问。每个变量都是一个实现了 [`EnvVar`] 的零大小类型，
//! 带有名称、默认值、说明和解析规则。

use std::env;
use std::fmt;
use std::time::Duration;

/// 环境变量解析错误
#[derive(Debug, Clone)]
pub struct EnvError {
    pub variable: String,
    pub message: String,
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Environment variable '{}': {}", self.variable, self.message)
    }
}

impl std::error::Error for EnvError {}

pub type EnvResult<T> = Result<T, EnvError>;

/// 环境变量访问器特性
pub trait EnvVar<T> {
    const NAME: &'static str;
    const DEFAULT: Option<T>;
    const DESCRIPTION: &'static str;

    fn parse(value: &str) -> EnvResult<T>;

    fn get() -> EnvResult<T> {
        match env::var(Self::NAME) {
            Ok(value) => Self::parse(&value),
            Err(_) => {
                if let Some(default) = Self::DEFAULT {
                    Ok(default)
                } else {
                    Err(EnvError {
                        variable: Self::NAME.to_string(),
                        message: "Required environment variable not set".to_string(),
                    })
                }
            }
        }
    }

    /// 变量是否在当前进程环境中被显式设置
    fn is_set() -> bool {
        env::var_os(Self::NAME).is_some()
    }
}

/// 核心环境变量定义
pub mod core {
    use super::*;

    /// 日志级别
    pub struct LogLevel;
    impl EnvVar<String> for LogLevel {
        const NAME: &'static str = "MENU_LOG_LEVEL";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Log level: trace, debug, info, warn, error";

        fn get() -> EnvResult<String> {
            or_default::<Self>("info")
        }

        fn parse(value: &str) -> EnvResult<String> {
            match value.to_lowercase().as_str() {
                "trace" | "debug" | "info" | "warn" | "error" => Ok(value.to_lowercase()),
                _ => Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!(
                        "Invalid log level '{}'. Use: trace, debug, info, warn, error",
                        value
                    ),
                }),
            }
        }
    }
}

/// 翻译相关环境变量
pub mod translation {
    use super::*;

    /// 翻译功能启用状态
    pub struct Enabled;
    impl EnvVar<bool> for Enabled {
        const NAME: &'static str = "MENU_TRANSLATION_ENABLED";
        const DEFAULT: Option<bool> = Some(true);
        const DESCRIPTION: &'static str = "Enable translation of menu texts";

        fn parse(value: &str) -> EnvResult<bool> {
            parse_bool(value, Self::NAME)
        }
    }

    /// 源语言（员工录入菜单所用的语言）
    pub struct SourceLang;
    impl EnvVar<String> for SourceLang {
        const NAME: &'static str = "MENU_TRANSLATION_SOURCE_LANG";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Language staff enter menu texts in (ISO 639-1 code)";

        fn get() -> EnvResult<String> {
            or_default::<Self>("it")
        }

        fn parse(value: &str) -> EnvResult<String> {
            parse_lang(value, Self::NAME)
        }
    }

    /// 目标语言
    pub struct TargetLang;
    impl EnvVar<String> for TargetLang {
        const NAME: &'static str = "MENU_TRANSLATION_TARGET_LANG";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Language translated fields are stored in (ISO 639-1 code)";

        fn get() -> EnvResult<String> {
            or_default::<Self>("en")
        }

        fn parse(value: &str) -> EnvResult<String> {
            parse_lang(value, Self::NAME)
        }
    }

    /// 免费翻译端点
    pub struct ApiUrl;
    impl EnvVar<String> for ApiUrl {
        const NAME: &'static str = "MENU_TRANSLATION_API_URL";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Keyless translation endpoint URL";

        fn get() -> EnvResult<String> {
            or_default::<Self>("https://translate.googleapis.com/translate_a/single")
        }

        fn parse(value: &str) -> EnvResult<String> {
            parse_http_url(value, Self::NAME)
        }
    }

    /// 需要密钥的翻译端点
    pub struct CloudApiUrl;
    impl EnvVar<String> for CloudApiUrl {
        const NAME: &'static str = "MENU_TRANSLATION_CLOUD_API_URL";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Authenticated translation endpoint URL";

        fn get() -> EnvResult<String> {
            or_default::<Self>("https://translation.googleapis.com/language/translate/v2")
        }

        fn parse(value: &str) -> EnvResult<String> {
            parse_http_url(value, Self::NAME)
        }
    }

    /// 请求超时
    pub struct Timeout;
    impl EnvVar<Duration> for Timeout {
        const NAME: &'static str = "MENU_TRANSLATION_TIMEOUT";
        const DEFAULT: Option<Duration> = Some(Duration::from_secs(10));
        const DESCRIPTION: &'static str = "Per-request timeout for remote translation, in seconds";

        fn parse(value: &str) -> EnvResult<Duration> {
            let seconds = parse_bounded_usize(value, Self::NAME, 1, 120)?;
            Ok(Duration::from_secs(seconds as u64))
        }
    }

    /// 批量重新翻译时每行之间的间隔
    pub struct BatchDelayMs;
    impl EnvVar<u64> for BatchDelayMs {
        const NAME: &'static str = "MENU_TRANSLATION_BATCH_DELAY_MS";
        const DEFAULT: Option<u64> = Some(100);
        const DESCRIPTION: &'static str = "Pause between rows during batch retranslation, in milliseconds";

        fn parse(value: &str) -> EnvResult<u64> {
            let ms = parse_bounded_usize(value, Self::NAME, 0, 60_000)?;
            Ok(ms as u64)
        }
    }
}

/// 第三方服务凭据
pub mod google {
    use super::*;

    /// Google Translate API 密钥
    pub struct ApiKey;
    impl EnvVar<String> for ApiKey {
        const NAME: &'static str = "GOOGLE_TRANSLATE_API_KEY";
        const DEFAULT: Option<String> = None; // 无默认值，未设置时跳过认证端点
        const DESCRIPTION: &'static str = "API key for the authenticated translation endpoint";

        fn parse(value: &str) -> EnvResult<String> {
            let key = value.trim();
            if key.is_empty() {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "API key cannot be empty".to_string(),
                });
            }
            Ok(key.to_string())
        }
    }
}

/// 数据库相关环境变量
pub mod database {
    use super::*;

    /// 菜单数据库路径
    pub struct Path;
    impl EnvVar<String> for Path {
        const NAME: &'static str = "MENU_DB_PATH";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Path of the SQLite menu database";

        fn get() -> EnvResult<String> {
            or_default::<Self>("ristorante.db")
        }

        fn parse(value: &str) -> EnvResult<String> {
            let path = value.trim();
            if path.is_empty() {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Database path cannot be empty".to_string(),
                });
            }
            Ok(shellexpand::tilde(path).into_owned())
        }
    }
}

/// 未设置时使用给定默认值的字符串变量
fn or_default<V: EnvVar<String>>(default: &str) -> EnvResult<String> {
    env::var(V::NAME).map_or_else(|_| Ok(default.to_string()), |value| V::parse(&value))
}

/// 辅助函数
fn parse_bool(value: &str, var_name: &str) -> EnvResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" | "enabled" => Ok(true),
        "false" | "0" | "no" | "off" | "disabled" => Ok(false),
        _ => Err(EnvError {
            variable: var_name.to_string(),
            message: format!(
                "Invalid boolean value '{}'. Use: true/false, 1/0, yes/no, on/off, enabled/disabled",
                value
            ),
        }),
    }
}

fn parse_lang(value: &str, var_name: &str) -> EnvResult<String> {
    let lang = value.trim().to_lowercase();
    if lang.len() != 2 || !lang.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: "Language code must be 2 letters (ISO 639-1)".to_string(),
        });
    }
    Ok(lang)
}

fn parse_http_url(value: &str, var_name: &str) -> EnvResult<String> {
    let url = value.trim();
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(url.to_string())
    } else {
        Err(EnvError {
            variable: var_name.to_string(),
            message: "URL must start with http:// or https://".to_string(),
        })
    }
}

fn parse_bounded_usize(value: &str, var_name: &str, min: usize, max: usize) -> EnvResult<usize> {
    let num: usize = value.trim().parse().map_err(|_| EnvError {
        variable: var_name.to_string(),
        message: "Must be a valid positive number".to_string(),
    })?;

    if num < min {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: format!("Value {} is below minimum {}", num, min),
        });
    }

    if num > max {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: format!("Value {} exceeds maximum {}", num, max),
        });
    }

    Ok(num)
}

/// 环境变量配置汇总
#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub log_level: String,

    // 翻译配置
    pub translation_enabled: bool,
    pub source_lang: String,
    pub target_lang: String,
    pub api_url: String,
    pub cloud_api_url: String,
    pub timeout: Duration,
    pub batch_delay_ms: u64,

    // 凭据
    pub api_key: Option<String>,

    // 数据库
    pub db_path: String,
}

impl EnvConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> EnvResult<Self> {
        Ok(Self {
            log_level: core::LogLevel::get()?,

            translation_enabled: translation::Enabled::get()?,
            source_lang: translation::SourceLang::get()?,
            target_lang: translation::TargetLang::get()?,
            api_url: translation::ApiUrl::get()?,
            cloud_api_url: translation::CloudApiUrl::get()?,
            timeout: translation::Timeout::get()?,
            batch_delay_ms: translation::BatchDelayMs::get()?,

            api_key: google::ApiKey::get().ok(),

            db_path: database::Path::get()?,
        })
    }

    /// 配置摘要（隐藏敏感信息）
    pub fn summary(&self) -> String {
        format!(
            "translation={} {}->{} timeout={}s db={} api_key={}",
            if self.translation_enabled { "enabled" } else { "disabled" },
            self.source_lang,
            self.target_lang,
            self.timeout.as_secs(),
            self.db_path,
            if self.api_key.is_some() { "[configured]" } else { "[none]" },
        )
    }
}

/// 环境变量文档生成器
pub fn generate_env_docs() -> String {
    let mut docs = String::new();
    docs.push_str("# Environment Variables Documentation\n\n");

    docs.push_str("## Core Configuration\n\n");
    docs.push_str(&format!(
        "- `{}`: {} (default: info)\n",
        core::LogLevel::NAME,
        core::LogLevel::DESCRIPTION
    ));

    docs.push_str("\n## Translation Configuration\n\n");
    docs.push_str(&format!(
        "- `{}`: {} (default: {:?})\n",
        translation::Enabled::NAME,
        translation::Enabled::DESCRIPTION,
        translation::Enabled::DEFAULT
    ));
    docs.push_str(&format!(
        "- `{}`: {} (default: it)\n",
        translation::SourceLang::NAME,
        translation::SourceLang::DESCRIPTION
    ));
    docs.push_str(&format!(
        "- `{}`: {} (default: en)\n",
        translation::TargetLang::NAME,
        translation::TargetLang::DESCRIPTION
    ));
    docs.push_str(&format!(
        "- `{}`: {}\n",
        translation::ApiUrl::NAME,
        translation::ApiUrl::DESCRIPTION
    ));
    docs.push_str(&format!(
        "- `{}`: {}\n",
        translation::CloudApiUrl::NAME,
        translation::CloudApiUrl::DESCRIPTION
    ));
    docs.push_str(&format!(
        "- `{}`: {} (default: {:?})\n",
        translation::Timeout::NAME,
        translation::Timeout::DESCRIPTION,
        translation::Timeout::DEFAULT
    ));
    docs.push_str(&format!(
        "- `{}`: {} (default: {:?})\n",
        translation::BatchDelayMs::NAME,
        translation::BatchDelayMs::DESCRIPTION,
        translation::BatchDelayMs::DEFAULT
    ));
    docs.push_str(&format!(
        "- `{}`: {} (default: unset)\n",
        google::ApiKey::NAME,
        google::ApiKey::DESCRIPTION
    ));

    docs.push_str("\n## Database Configuration\n\n");
    docs.push_str(&format!(
        "- `{}`: {} (default: ristorante.db)\n",
        database::Path::NAME,
        database::Path::DESCRIPTION
    ));

    docs
}
