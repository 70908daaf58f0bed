use crate::cli::output::Reporter;
use crate::core::build::BuildIdentifier;
use crate::core::download_url::build_download_folder;
use crate::core::variant::Variant;
use crate::infrastructure::remote::fetcher::{ArtifactFetcher, FetchRequest};
use std::path::PathBuf;

/// 一次运行的获取计划，URL 只计算一次并在所有变体间复用
#[derive(Debug, Clone)]
pub struct FetchPlan {
    pub build: BuildIdentifier,
    pub folder_url: String,
    pub debug: bool,
    pub dry_run: bool,
    pub output_dir: PathBuf,
}

impl FetchPlan {
    pub fn new(build: BuildIdentifier, debug: bool, dry_run: bool, output_dir: PathBuf) -> Self {
        let folder_url = build_download_folder(&build);
        Self {
            build,
            folder_url,
            debug,
            dry_run,
            output_dir,
        }
    }

    fn request(&self, variant: Variant) -> FetchRequest<'_> {
        FetchRequest {
            folder_url: &self.folder_url,
            variant,
            build: &self.build,
            debug: self.debug,
            output_dir: &self.output_dir,
        }
    }
}

/// 按顺序逐个检查或下载变体，统计失败数量
pub struct FetchOrchestrator<'a> {
    fetcher: &'a dyn ArtifactFetcher,
    reporter: Reporter,
}

impl<'a> FetchOrchestrator<'a> {
    pub fn new(fetcher: &'a dyn ArtifactFetcher, reporter: Reporter) -> Self {
        Self { fetcher, reporter }
    }

    /// 返回失败的变体数量；单个失败不会中断后续变体
    pub async fn run(&self, variants: &[Variant], plan: &FetchPlan) -> u32 {
        self.reporter
            .info(format!("--- Using URL {}/<filename>", plan.folder_url));

        let mut failed_count = 0;
        for &variant in variants {
            let request = plan.request(variant);
            let result = if plan.dry_run {
                self.fetcher.check_variant(&request).await
            } else {
                self.fetcher.download_variant(&request).await
            };
            tracing::debug!(%variant, dry_run = plan.dry_run, result, "variant processed");
            failed_count += result;
        }

        if failed_count > 0 {
            tracing::debug!(failed_count, total = variants.len(), "some variants failed");
        }
        failed_count
    }
}
