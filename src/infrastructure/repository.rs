use crate::error::{AppError, AppResult};
use std::path::{Path, PathBuf};
use std::process::Command;

/// 读取源码仓库最新提交信息的能力
pub trait RepositoryReader {
    fn latest_commit_message(&self, repo: &Path) -> AppResult<String>;
}

/// 通过本机 git 命令读取提交信息
#[derive(Debug, Default)]
pub struct GitCliReader {
    git: Option<PathBuf>,
}

impl GitCliReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用指定的 git 可执行文件
    pub fn with_git(git: PathBuf) -> Self {
        Self { git: Some(git) }
    }

    fn git_executable(&self, repo: &Path) -> AppResult<PathBuf> {
        match &self.git {
            Some(git) => Ok(git.clone()),
            None => which::which("git")
                .map_err(|e| AppError::repository(repo, format!("git not found on PATH: {e}"))),
        }
    }
}

impl RepositoryReader for GitCliReader {
    fn latest_commit_message(&self, repo: &Path) -> AppResult<String> {
        if !repo.is_dir() {
            return Err(AppError::repository(repo, "directory does not exist"));
        }

        let git = self.git_executable(repo)?;
        tracing::debug!(git = %git.display(), repo = %repo.display(), "reading latest commit");

        let output = Command::new(&git)
            .arg("-C")
            .arg(repo)
            .args(["log", "-1", "--format=%B"])
            .output()
            .map_err(|e| AppError::repository(repo, format!("failed to run git: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::repository(repo, stderr.trim().to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
