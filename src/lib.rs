// 核心模块
pub mod cli;
pub mod core;
pub mod error;
pub mod infrastructure;

pub use cli::*;
pub use error::*;
pub use infrastructure::*;
pub use crate::core::build::{resolve_build, BuildIdentifier, BuildSource};
pub use crate::core::download_url::build_download_folder;
pub use crate::core::orchestrator::{FetchOrchestrator, FetchPlan};
pub use crate::core::variant::{calculate_variants, Variant, VariantToken};
// 使用命名空间导入常量，避免冲突
pub use crate::core::constants as app_constants;
