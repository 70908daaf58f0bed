use crate::cli::output::Reporter;
use crate::core::build::BuildIdentifier;
use crate::core::constants::server::ARTIFACT_PREFIX;
use crate::core::download_url::artifact_url;
use crate::core::variant::Variant;
use crate::error::AppResult;
use crate::infrastructure::archive::extract_archive;
use crate::infrastructure::extension::{FlatLayout, SubdirectoryStrategy};
use crate::infrastructure::remote::download::download_to_file;
use crate::infrastructure::remote::http_client::HttpClient;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// 单个变体的检查或下载请求
#[derive(Debug, Clone, Copy)]
pub struct FetchRequest<'a> {
    pub folder_url: &'a str,
    pub variant: Variant,
    pub build: &'a BuildIdentifier,
    pub debug: bool,
    pub output_dir: &'a Path,
}

impl FetchRequest<'_> {
    /// 产物文件名：`couchbase-lite-core-<build>-<variant>[-debug].<ext>`
    pub fn filename(&self) -> String {
        let debug = if self.debug { "-debug" } else { "" };
        format!(
            "{ARTIFACT_PREFIX}-{}-{}{debug}.{}",
            self.build,
            self.variant,
            self.variant.archive_format().extension()
        )
    }

    pub fn url(&self) -> String {
        artifact_url(self.folder_url, &self.filename())
    }
}

/// 产物获取能力，返回 0 表示成功，1 表示失败
#[async_trait]
pub trait ArtifactFetcher: Send + Sync {
    /// 只检查远端产物是否存在
    async fn check_variant(&self, request: &FetchRequest<'_>) -> u32;

    /// 下载并解压到输出目录
    async fn download_variant(&self, request: &FetchRequest<'_>) -> u32;
}

/// 基于 HTTP 的产物获取实现
pub struct HttpArtifactFetcher {
    client: HttpClient,
    layout: Box<dyn SubdirectoryStrategy>,
    reporter: Reporter,
}

impl HttpArtifactFetcher {
    pub fn new(client: HttpClient, reporter: Reporter) -> Self {
        Self {
            client,
            layout: Box::new(FlatLayout),
            reporter,
        }
    }

    /// 指定输出目录布局
    pub fn with_layout(mut self, layout: Box<dyn SubdirectoryStrategy>) -> Self {
        self.layout = layout;
        self
    }

    /// 变体最终解压到的目录
    pub fn destination(&self, request: &FetchRequest<'_>) -> PathBuf {
        let variant = request.variant;
        match self.layout.subdirectory_for_variant(variant.os(), variant.abi()) {
            Some(subdir) => request.output_dir.join(subdir),
            None => request.output_dir.to_path_buf(),
        }
    }

    async fn download_and_extract(&self, request: &FetchRequest<'_>, url: &str) -> AppResult<PathBuf> {
        let temp_dir = tempfile::tempdir()?;
        let archive_path = temp_dir.path().join(request.filename());

        let pb = self.reporter.progress_bar(0);
        let size = download_to_file(&self.client, url, &archive_path, |downloaded, total| {
            if total > 0 {
                pb.set_length(total);
            }
            pb.set_position(downloaded);
        })
        .await;
        pb.finish_and_clear();
        let size = size?;
        tracing::debug!(url, size, "download complete");

        let dest = self.destination(request);
        extract_archive(request.variant.archive_format(), &archive_path, &dest)?;
        Ok(dest)
    }
}

#[async_trait]
impl ArtifactFetcher for HttpArtifactFetcher {
    async fn check_variant(&self, request: &FetchRequest<'_>) -> u32 {
        let url = request.url();
        match self.client.exists(&url).await {
            Ok(true) => {
                self.reporter.always(format!("--- Checking {url}... found"));
                0
            }
            Ok(false) => {
                self.reporter.always(format!("--- Checking {url}... NOT FOUND"));
                1
            }
            Err(e) => {
                tracing::debug!(url = %url, "existence check failed: {e}");
                self.reporter.always(format!("--- Checking {url}... NOT FOUND ({e})"));
                1
            }
        }
    }

    async fn download_variant(&self, request: &FetchRequest<'_>) -> u32 {
        let url = request.url();
        self.reporter.info(format!("--- Downloading {url}"));

        match self.download_and_extract(request, &url).await {
            Ok(dest) => {
                self.reporter
                    .info(format!("--- Extracted {} to {}", request.variant, dest.display()));
                0
            }
            Err(e) => {
                tracing::debug!(variant = %request.variant, "download failed: {e}");
                self.reporter.error(format!("Failed to fetch {url}: {e}"));
                1
            }
        }
    }
}
