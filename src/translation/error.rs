//! 翻译模块统一错误处理
//!
//! 翻译子系统内部使用结构化错误在各个解析步骤之间传递"没有结果"的原因，
//! 但这些错误永远不会越过 [`Translator::translate`](crate::translation::Translator::translate) 的边界。

use thiserror::Error;

/// 翻译错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslationError {
    /// 配置错误
    #[error("配置错误: {0}")]
    ConfigError(String),

    /// 网络错误（连接失败、DNS、TLS 等）
    #[error("网络错误: {0}")]
    NetworkError(String),

    /// 超时错误
    #[error("操作超时: {0}")]
    TimeoutError(String),

    /// 远程服务返回非 2xx 状态码
    #[error("翻译服务返回状态码 {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// 响应体无法解析或结构不符合预期
    #[error("响应格式错误: {0}")]
    MalformedResponse(String),

    /// 远程服务返回了空译文
    #[error("翻译服务返回空结果")]
    EmptyResult,

    /// 配置文件解析错误
    #[error("解析错误: {0}")]
    ParseError(String),

    /// 读写配置文件失败
    #[error("IO错误: {0}")]
    IoError(String),
}

impl TranslationError {
    /// 获取错误的严重程度
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            TranslationError::ConfigError(_) => ErrorSeverity::Critical,
            TranslationError::NetworkError(_) => ErrorSeverity::Warning,
            TranslationError::TimeoutError(_) => ErrorSeverity::Warning,
            TranslationError::HttpStatus { .. } => ErrorSeverity::Warning,
            TranslationError::MalformedResponse(_) => ErrorSeverity::Error,
            TranslationError::EmptyResult => ErrorSeverity::Info,
            TranslationError::ParseError(_) => ErrorSeverity::Error,
            TranslationError::IoError(_) => ErrorSeverity::Error,
        }
    }

    /// 获取错误类别
    pub fn category(&self) -> ErrorCategory {
        match self {
            TranslationError::ConfigError(_) => ErrorCategory::Configuration,
            TranslationError::NetworkError(_) => ErrorCategory::Network,
            TranslationError::TimeoutError(_) => ErrorCategory::Timeout,
            TranslationError::HttpStatus { .. } => ErrorCategory::Service,
            TranslationError::MalformedResponse(_) => ErrorCategory::Parsing,
            TranslationError::EmptyResult => ErrorCategory::Service,
            TranslationError::ParseError(_) => ErrorCategory::Parsing,
            TranslationError::IoError(_) => ErrorCategory::Io,
        }
    }

    /// 用于指标标签的简短名称
    pub fn label(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => "config",
            ErrorCategory::Network => "network",
            ErrorCategory::Timeout => "timeout",
            ErrorCategory::Service => "service",
            ErrorCategory::Parsing => "parsing",
            ErrorCategory::Io => "io",
        }
    }
}

/// 错误严重程度
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

/// 错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Timeout,
    Service,
    Parsing,
    Io,
}

/// 从 reqwest 错误转换，区分超时和其他网络故障
impl From<reqwest::Error> for TranslationError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            TranslationError::TimeoutError(error.to_string())
        } else if error.is_decode() {
            TranslationError::MalformedResponse(error.to_string())
        } else {
            TranslationError::NetworkError(error.to_string())
        }
    }
}

impl From<std::io::Error> for TranslationError {
    fn from(error: std::io::Error) -> Self {
        TranslationError::IoError(error.to_string())
    }
}

impl From<serde_json::Error> for TranslationError {
    fn from(error: serde_json::Error) -> Self {
        TranslationError::MalformedResponse(format!("JSON解析错误: {}", error))
    }
}

impl From<toml::de::Error> for TranslationError {
    fn from(error: toml::de::Error) -> Self {
        TranslationError::ParseError(format!("TOML解析错误: {}", error))
    }
}

/// 错误结果类型别名
pub type TranslationResult<T> = Result<T, TranslationError>;

/// 错误处理助手函数
pub mod helpers {
    use super::*;

    /// 按严重程度记录一次降级（错误被吞掉，解析继续向下一步）
    pub fn log_degraded(backend: &str, error: &TranslationError) {
        match error.severity() {
            ErrorSeverity::Info => tracing::debug!("翻译后端 {} 无结果: {}", backend, error),
            ErrorSeverity::Warning => tracing::warn!("翻译后端 {} 调用失败: {}", backend, error),
            ErrorSeverity::Error | ErrorSeverity::Critical => {
                tracing::error!("翻译后端 {} 返回异常: {}", backend, error)
            }
        }
    }

    /// 创建配置错误
    pub fn config_error<T: std::fmt::Display>(msg: T) -> TranslationError {
        TranslationError::ConfigError(msg.to_string())
    }

    /// 创建响应格式错误
    pub fn malformed<T: std::fmt::Display>(msg: T) -> TranslationError {
        TranslationError::MalformedResponse(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_category() {
        let missing = TranslationError::HttpStatus {
            status: 404,
            body: "not found".to_string(),
        };
        assert_eq!(missing.category(), ErrorCategory::Service);
        assert_eq!(missing.severity(), ErrorSeverity::Warning);
        assert_eq!(missing.label(), "service");
    }

    #[test]
    fn test_config_file_errors() {
        let io: TranslationError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
        assert!(matches!(io, TranslationError::IoError(_)));
        assert_eq!(io.label(), "io");

        let toml_err: TranslationError = toml::from_str::<toml::Value>("a = ")
            .unwrap_err()
            .into();
        assert!(matches!(toml_err, TranslationError::ParseError(_)));
        assert_eq!(toml_err.label(), "parsing");
    }

    #[test]
    fn test_severity_ordering() {
        assert!(ErrorSeverity::Critical > ErrorSeverity::Warning);
        assert_eq!(
            TranslationError::ConfigError("x".into()).severity(),
            ErrorSeverity::Critical
        );
        assert_eq!(TranslationError::EmptyResult.label(), "service");
    }

    #[test]
    fn test_json_error_is_malformed() {
        let err: TranslationError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, TranslationError::MalformedResponse(_)));
    }
}
