use std::io;
use thiserror::Error;

/// 应用程序错误类型
#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Network error: {message}")]
    Network { message: String },

    /// 构建号缺失或格式不正确
    #[error("Malformed build {build}.  Must be of the form 3.1.0-97 or 3.1.0-97-EE")]
    MalformedBuild { build: String },

    #[error("Build is None, aborting...")]
    MissingBuild,

    #[error("Repository error: {path} - {reason}")]
    Repository { path: String, reason: String },

    #[error("Extension error: {path} - {reason}")]
    Extension { path: String, reason: String },

    #[error("Extraction error: {archive} - {reason}")]
    Extraction { archive: String, reason: String },
}

/// 应用程序 Result 类型
pub type AppResult<T> = Result<T, AppError>;

/// 便捷的错误创建函数
impl AppError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn repository(path: &std::path::Path, reason: impl Into<String>) -> Self {
        Self::Repository {
            path: path.display().to_string(),
            reason: reason.into(),
        }
    }

    pub fn extension(path: &std::path::Path, reason: impl Into<String>) -> Self {
        Self::Extension {
            path: path.display().to_string(),
            reason: reason.into(),
        }
    }

    pub fn extraction(archive: &std::path::Path, reason: impl Into<String>) -> Self {
        Self::Extraction {
            archive: archive.display().to_string(),
            reason: reason.into(),
        }
    }

    /// 构建号相关错误（缺失或格式错误）
    pub fn is_build_error(&self) -> bool {
        matches!(self, Self::MalformedBuild { .. } | Self::MissingBuild)
    }
}

impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        let message = if error.is_timeout() {
            format!("request timed out: {error}")
        } else if error.is_connect() {
            format!("connection failed: {error}")
        } else {
            error.to_string()
        };
        Self::Network { message }
    }
}
