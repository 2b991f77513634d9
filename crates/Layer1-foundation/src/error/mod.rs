//! Error types for Pluggable
//!
//! 런타임의 모든 에러를 중앙에서 관리

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Pluggable 에러 타입
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // 매니페스트 / 활성화 관련
    // ========================================================================
    #[error("Invalid manifest: {plugin} plugin does not have any activation points set up in its manifest")]
    InvalidManifest { plugin: String },

    #[error("Activation point {activation_point} was triggered but does not exist on plugin {plugin}")]
    MissingActivationHandler {
        plugin: String,
        activation_point: String,
    },

    #[error("Importer failed for {url}: {message}")]
    Importer { url: String, message: String },

    #[error("Runtime not configured: {0}")]
    NotConfigured(String),

    // ========================================================================
    // 확장 포인트 관련
    // ========================================================================
    #[error("No extension point found with name {0}")]
    ExtensionPointNotFound(String),

    #[error("Handler {handler} on extension point {extension_point} failed: {source}")]
    HandlerFailed {
        extension_point: String,
        handler: String,
        #[source]
        source: Box<Error>,
    },

    // ========================================================================
    // 설정 관련
    // ========================================================================
    #[error("Configuration error: {0}")]
    Config(String),

    // ========================================================================
    // 일반
    // ========================================================================
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ========================================================================
    // 외부 에러 변환
    // ========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ========================================================================
    // 기타
    // ========================================================================
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// 매니페스트 검증 에러 생성 헬퍼
    pub fn invalid_manifest(plugin: impl Into<String>) -> Self {
        Error::InvalidManifest {
            plugin: plugin.into(),
        }
    }

    /// 활성화 핸들러 누락 에러 생성 헬퍼
    pub fn missing_activation_handler(
        plugin: impl Into<String>,
        activation_point: impl Into<String>,
    ) -> Self {
        Error::MissingActivationHandler {
            plugin: plugin.into(),
            activation_point: activation_point.into(),
        }
    }

    /// Importer 에러 생성 헬퍼
    pub fn importer(url: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Importer {
            url: url.into(),
            message: message.into(),
        }
    }

    /// 핸들러 실패 에러 생성 헬퍼
    pub fn handler_failed(
        extension_point: impl Into<String>,
        handler: impl Into<String>,
        source: Error,
    ) -> Self {
        Error::HandlerFailed {
            extension_point: extension_point.into(),
            handler: handler.into(),
            source: Box::new(source),
        }
    }

    /// 호스트/사용자에게 그대로 보여줄 수 있는 에러인지 확인
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Error::InvalidManifest { .. }
                | Error::MissingActivationHandler { .. }
                | Error::ExtensionPointNotFound(_)
                | Error::NotConfigured(_)
                | Error::InvalidInput(_)
        )
    }

    /// 플러그인 코드 쪽에서 발생한 에러인지 확인
    pub fn is_plugin_fault(&self) -> bool {
        matches!(
            self,
            Error::MissingActivationHandler { .. }
                | Error::Importer { .. }
                | Error::HandlerFailed { .. }
        )
    }
}

// ============================================================================
// From 구현 (추가 변환)
// ============================================================================

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Internal(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Internal(s.to_string())
    }
}


