use crate::core::build::BuildSource;
use crate::core::variant::VariantToken;
use clap::Parser;
use std::path::PathBuf;

/// litecore-fetch CLI 应用程序
#[derive(Parser, Debug)]
#[command(name = "litecore-fetch")]
#[command(about = "Fetch a specific prebuilt LiteCore by build version", long_about = None)]
#[command(version)]
pub struct Cli {
    /// A space separated list of variants to download
    #[arg(short = 'v', long, num_args = 1.., required = true, value_name = "PLATFORM")]
    pub variants: Vec<VariantToken>,

    /// If specified, download debug variants
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Check for existence of indicated artifacts, but do not perform download
    #[arg(short = 'D', long)]
    pub dry_run: bool,

    /// The build version to download (e.g. 3.1.0-97 or 3.1.0-97-EE).  Required if repo is not specified.
    #[arg(short = 'b', long)]
    pub build: Option<String>,

    /// If specified, download the enterprise variant of LiteCore
    #[arg(long)]
    pub ee: bool,

    /// The path to the CE LiteCore repo.  Required if build not specified.
    #[arg(short = 'r', long)]
    pub repo: Option<PathBuf>,

    /// The directory containing platform_fetch.toml.  Relative paths are resolved against the
    /// directory of this executable.  Defaults to the current working directory.
    #[arg(short = 'x', long, value_name = "DIR")]
    pub ext_path: Option<PathBuf>,

    /// The directory in which to save the downloaded artifacts (default: current directory)
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Suppress all output except during dry run
    #[arg(short = 'q', long)]
    pub quiet: bool,
}

impl Cli {
    /// 构建号来源：显式构建号优先，其次是仓库
    pub fn build_source(&self) -> Option<BuildSource<'_>> {
        match (&self.build, &self.repo) {
            (Some(build), _) if !build.is_empty() => Some(BuildSource::Explicit(build)),
            // 空构建号仍优先于仓库，交给校验报错
            (Some(build), Some(_)) => Some(BuildSource::Explicit(build)),
            (None, Some(repo)) => Some(BuildSource::Repository {
                path: repo,
                enterprise: self.ee,
            }),
            _ => None,
        }
    }
}
