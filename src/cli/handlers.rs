use crate::cli::commands::Cli;
use crate::cli::output::Reporter;
use crate::core::build::resolve_build;
use crate::core::constants::exit_code::{BAD_BUILD, MISSING_SOURCE};
use crate::core::orchestrator::{FetchOrchestrator, FetchPlan};
use crate::core::variant::{calculate_variants, Variant};
use crate::error::AppError;
use crate::infrastructure::extension::{load_extension, resolve_platform_path};
use crate::infrastructure::remote::fetcher::{ArtifactFetcher, HttpArtifactFetcher};
use crate::infrastructure::remote::http_client::HttpClient;
use crate::infrastructure::repository::{GitCliReader, RepositoryReader};
use clap::CommandFactory;
use std::path::PathBuf;

/// 命令处理器，返回值即进程退出码
pub struct CommandHandler {
    reader: Box<dyn RepositoryReader>,
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandHandler {
    pub fn new() -> Self {
        Self::with_reader(Box::new(GitCliReader::new()))
    }

    pub fn with_reader(reader: Box<dyn RepositoryReader>) -> Self {
        Self { reader }
    }

    /// 处理命令：解析构建号、加载扩展并下载
    pub async fn handle(&self, cli: Cli) -> i32 {
        let reporter = Reporter::new(cli.quiet);
        let (variants, plan) = match self.prepare(&cli, reporter) {
            Ok(prepared) => prepared,
            Err(code) => return code,
        };

        let ext_path = cli.ext_path.clone().unwrap_or_else(current_dir);
        let layout = load_extension(&resolve_platform_path(&ext_path));

        let client = match HttpClient::new() {
            Ok(client) => client,
            Err(e) => {
                reporter.error(e);
                return 1;
            }
        };
        let fetcher = HttpArtifactFetcher::new(client, reporter).with_layout(layout);

        Self::execute(&fetcher, &variants, &plan, reporter).await
    }

    /// 使用指定的获取实现处理命令
    pub async fn handle_with(&self, cli: Cli, fetcher: &dyn ArtifactFetcher) -> i32 {
        let reporter = Reporter::new(cli.quiet);
        match self.prepare(&cli, reporter) {
            Ok((variants, plan)) => Self::execute(fetcher, &variants, &plan, reporter).await,
            Err(code) => code,
        }
    }

    /// 校验参数并确定构建号，失败时返回退出码
    fn prepare(&self, cli: &Cli, reporter: Reporter) -> Result<(Vec<Variant>, FetchPlan), i32> {
        let Some(source) = cli.build_source() else {
            reporter.error("Neither CE repo path nor build defined, aborting...");
            println!("{}", Cli::command().render_usage());
            return Err(MISSING_SOURCE);
        };

        let build = resolve_build(source, self.reader.as_ref()).map_err(|e| {
            match &e {
                AppError::MissingBuild => println!("{e}"),
                _ => reporter.error(&e),
            }
            BAD_BUILD
        })?;
        tracing::debug!(build = %build, "resolved build");

        let variants = calculate_variants(&cli.variants);
        let output_dir = cli.output.clone().unwrap_or_else(current_dir);
        let plan = FetchPlan::new(build, cli.debug, cli.dry_run, output_dir);
        Ok((variants, plan))
    }

    async fn execute(
        fetcher: &dyn ArtifactFetcher,
        variants: &[Variant],
        plan: &FetchPlan,
        reporter: Reporter,
    ) -> i32 {
        let failed = FetchOrchestrator::new(fetcher, reporter).run(variants, plan).await;
        i32::try_from(failed).unwrap_or(i32::MAX)
    }
}

fn current_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppResult;
    use crate::infrastructure::remote::fetcher::FetchRequest;
    use async_trait::async_trait;
    use clap::Parser;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct CountingReader {
        reads: AtomicUsize,
    }

    impl RepositoryReader for CountingReader {
        fn latest_commit_message(&self, _repo: &Path) -> AppResult<String> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            Ok("Bump\n\nBuild-To-Use: 3.1.0-97\n".to_string())
        }
    }

    /// 只检查 linux 存在的假实现
    #[derive(Default)]
    struct FakeFetcher {
        checks: Mutex<Vec<String>>,
        downloads: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ArtifactFetcher for FakeFetcher {
        async fn check_variant(&self, request: &FetchRequest<'_>) -> u32 {
            self.checks.lock().unwrap().push(request.filename());
            u32::from(request.variant != Variant::Linux)
        }

        async fn download_variant(&self, request: &FetchRequest<'_>) -> u32 {
            self.downloads.lock().unwrap().push(request.filename());
            0
        }
    }

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["litecore-fetch"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[tokio::test]
    async fn test_dry_run_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().to_str().unwrap();
        let handler = CommandHandler::with_reader(Box::new(CountingReader::default()));
        let fetcher = FakeFetcher::default();

        let cli = parse(&[
            "--variants", "linux", "macosx", "--dry-run", "--build", "3.1.0-97", "-o", output,
        ]);
        let code = handler.handle_with(cli, &fetcher).await;

        assert_eq!(code, 1);
        assert_eq!(
            *fetcher.checks.lock().unwrap(),
            vec![
                "couchbase-lite-core-3.1.0-97-linux.tar.gz".to_string(),
                "couchbase-lite-core-3.1.0-97-macosx.zip".to_string(),
            ]
        );
        assert!(fetcher.downloads.lock().unwrap().is_empty());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_missing_build_and_repo() {
        let handler = CommandHandler::with_reader(Box::new(CountingReader::default()));
        let fetcher = FakeFetcher::default();

        let code = handler.handle_with(parse(&["-v", "linux", "-q"]), &fetcher).await;

        assert_eq!(code, MISSING_SOURCE);
        assert!(fetcher.checks.lock().unwrap().is_empty());
        assert!(fetcher.downloads.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_build_exits_with_one() {
        let handler = CommandHandler::with_reader(Box::new(CountingReader::default()));
        let fetcher = FakeFetcher::default();

        let code = handler
            .handle_with(parse(&["-v", "linux", "-b", "3.1.0", "-D"]), &fetcher)
            .await;

        assert_eq!(code, BAD_BUILD);
        assert!(fetcher.checks.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_build_with_repo_is_rejected() {
        let handler = CommandHandler::with_reader(Box::new(CountingReader::default()));
        let fetcher = FakeFetcher::default();

        let code = handler
            .handle_with(parse(&["-v", "linux", "-b", "", "-r", "/src/ce", "-D", "-q"]), &fetcher)
            .await;

        assert_eq!(code, BAD_BUILD);
        assert!(fetcher.checks.lock().unwrap().is_empty());
        assert!(fetcher.downloads.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_build_from_repo_with_ee() {
        let handler = CommandHandler::with_reader(Box::new(CountingReader::default()));
        let fetcher = FakeFetcher::default();

        let code = handler
            .handle_with(parse(&["-v", "linux", "-r", "/src/ce", "--ee", "-D", "-q"]), &fetcher)
            .await;

        assert_eq!(code, 0);
        assert_eq!(
            *fetcher.checks.lock().unwrap(),
            vec!["couchbase-lite-core-3.1.0-97-EE-linux.tar.gz".to_string()]
        );
    }

    #[tokio::test]
    async fn test_explicit_build_ignores_ee() {
        let handler = CommandHandler::with_reader(Box::new(CountingReader::default()));
        let fetcher = FakeFetcher::default();

        let code = handler
            .handle_with(parse(&["-v", "windows", "-b", "3.0.0-5", "--ee", "-q"]), &fetcher)
            .await;

        assert_eq!(code, 0);
        let downloads = fetcher.downloads.lock().unwrap();
        assert_eq!(downloads.len(), 5);
        assert_eq!(downloads[0], "couchbase-lite-core-3.0.0-5-windows-arm-store.zip");
    }
}
