use crate::core::constants::build::{COMMIT_TAG, ENTERPRISE_SUFFIX};
use crate::error::{AppError, AppResult};
use crate::infrastructure::repository::RepositoryReader;
use std::fmt;
use std::path::Path;

/// 规范化后的构建号，形如 `3.1.0-97` 或 `3.1.0-97-EE`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildIdentifier {
    raw: String,
    parts: Vec<String>,
}

impl BuildIdentifier {
    /// 校验构建号：至少包含两个以 `-` 分隔的非空部分
    pub fn parse(build: &str) -> AppResult<Self> {
        if build.is_empty() {
            return Err(AppError::MissingBuild);
        }

        let parts: Vec<String> = build.split('-').map(str::to_string).collect();
        if parts.len() < 2 || parts[0].is_empty() || parts[1].is_empty() {
            return Err(AppError::MalformedBuild {
                build: build.to_string(),
            });
        }

        Ok(Self {
            raw: build.to_string(),
            parts,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    pub fn version(&self) -> &str {
        &self.parts[0]
    }

    pub fn build_number(&self) -> &str {
        &self.parts[1]
    }

    pub fn is_enterprise(&self) -> bool {
        self.raw.ends_with(ENTERPRISE_SUFFIX)
    }
}

impl fmt::Display for BuildIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// 从提交信息中提取 `Build-To-Use:` 行的值，多行匹配时以最后一行为准
pub fn build_from_commit_message(message: &str) -> String {
    let mut build = String::new();
    for line in message.lines() {
        if line.starts_with(COMMIT_TAG) {
            build = line.split(':').nth(1).unwrap_or("").trim().to_string();
        }
    }
    build
}

/// 构建号来源
#[derive(Debug, Clone)]
pub enum BuildSource<'a> {
    /// 命令行直接指定，原样使用
    Explicit(&'a str),
    /// 从仓库最新提交中读取
    Repository { path: &'a Path, enterprise: bool },
}

/// 解析并校验构建号
pub fn resolve_build(
    source: BuildSource<'_>,
    reader: &dyn RepositoryReader,
) -> AppResult<BuildIdentifier> {
    let build = match source {
        BuildSource::Explicit(build) => build.to_string(),
        BuildSource::Repository { path, enterprise } => {
            let message = reader.latest_commit_message(path)?;
            let mut build = build_from_commit_message(&message);
            tracing::debug!(repo = %path.display(), build = %build, "build read from commit message");
            // 未找到时保持为空，交给校验报错
            if enterprise && !build.is_empty() {
                build.push_str(ENTERPRISE_SUFFIX);
            }
            build
        }
    };

    BuildIdentifier::parse(&build)
}
