//! 输出目录布局扩展
//!
//! 使用方可以在扩展目录中放置 `platform_fetch.toml`，按 (os, abi) 为每个变体
//! 指定下载后的子目录。没有扩展文件时所有产物直接解压到输出目录。
//!
//! ```toml
//! [[rule]]
//! os = "android"
//! path = "android/lib/{{abi}}"
//!
//! [[rule]]
//! os = "windows"
//! abi = "x86_64"
//! path = "win/x64"
//! ```

use crate::core::constants::extension::FILE_NAME;
use crate::error::{AppError, AppResult};
use handlebars::Handlebars;
use serde::Deserialize;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// 根据 (os, abi) 决定产物子目录的策略
pub trait SubdirectoryStrategy: Send + Sync {
    fn subdirectory_for_variant(&self, os: &str, abi: &str) -> Option<PathBuf>;
}

/// 默认布局：不使用子目录
#[derive(Debug, Default, Clone, Copy)]
pub struct FlatLayout;

impl SubdirectoryStrategy for FlatLayout {
    fn subdirectory_for_variant(&self, _os: &str, _abi: &str) -> Option<PathBuf> {
        None
    }
}

impl<F> SubdirectoryStrategy for F
where
    F: Fn(&str, &str) -> Option<PathBuf> + Send + Sync,
{
    fn subdirectory_for_variant(&self, os: &str, abi: &str) -> Option<PathBuf> {
        self(os, abi)
    }
}

/// 单条布局规则
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutRule {
    pub os: String,
    #[serde(default)]
    pub abi: Option<String>,
    /// handlebars 模板，可使用 `os` 和 `abi` 变量
    pub path: String,
}

impl LayoutRule {
    fn matches(&self, os: &str, abi: &str) -> bool {
        self.os == os && self.abi.as_deref().map_or(true, |a| a == abi)
    }
}

#[derive(Debug, Default, Deserialize)]
struct ExtensionFile {
    #[serde(default, rename = "rule")]
    rules: Vec<LayoutRule>,
}

/// 从扩展文件加载的规则表，第一条匹配的规则生效
pub struct RuleTable {
    rules: Vec<LayoutRule>,
    handlebars: Handlebars<'static>,
}

impl RuleTable {
    pub fn new(rules: Vec<LayoutRule>) -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);
        Self { rules, handlebars }
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        let file: ExtensionFile = toml::from_str(content)?;
        Ok(Self::new(file.rules))
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    fn render(&self, rule: &LayoutRule, os: &str, abi: &str) -> Option<PathBuf> {
        let data = serde_json::json!({ "os": os, "abi": abi });
        let rendered = match self.handlebars.render_template(&rule.path, &data) {
            Ok(rendered) => rendered,
            Err(e) => {
                tracing::warn!(template = %rule.path, "layout template failed to render: {e}");
                return None;
            }
        };

        let rendered = rendered.trim().trim_matches('/');
        if rendered.is_empty() {
            return None;
        }

        let path = PathBuf::from(rendered);
        // 子目录必须留在输出目录内
        let escapes = path
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            tracing::warn!(path = %path.display(), "ignoring layout path outside the output directory");
            return None;
        }
        Some(path)
    }
}

impl SubdirectoryStrategy for RuleTable {
    fn subdirectory_for_variant(&self, os: &str, abi: &str) -> Option<PathBuf> {
        self.rules
            .iter()
            .find(|rule| rule.matches(os, abi))
            .and_then(|rule| self.render(rule, os, abi))
    }
}

/// 规范化扩展目录：相对路径相对于本程序所在目录
pub fn resolve_platform_path(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }

    let base = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join(path)
}

fn read_rule_table(file: &Path) -> AppResult<RuleTable> {
    let content = fs::read_to_string(file)?;
    RuleTable::from_toml(&content).map_err(|e| AppError::extension(file, e.to_string()))
}

/// 加载扩展目录中的布局规则；不存在或无法使用时退回到平铺布局
pub fn load_extension(dir: &Path) -> Box<dyn SubdirectoryStrategy> {
    let file = dir.join(FILE_NAME);
    if !file.is_file() {
        tracing::debug!(path = %file.display(), "no platform extension found");
        return Box::new(FlatLayout);
    }

    match read_rule_table(&file) {
        Ok(table) if !table.is_empty() => {
            tracing::debug!(path = %file.display(), "loaded platform extension");
            Box::new(table)
        }
        Ok(_) => Box::new(FlatLayout),
        Err(e) => {
            tracing::warn!("{e}");
            Box::new(FlatLayout)
        }
    }
}
