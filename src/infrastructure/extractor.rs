//! 解压器 - 基础设施层
//!
//! 唯一接触外部解压工具的地方，只暴露"把压缩包解到某个目录"的能力。
//! 本模块不理解压缩格式，格式全部交给 7z 处理。

use crate::config::Config;
use crate::error::ExtractError;
use crate::infrastructure::fs_ops::absolute_path;
use std::future::Future;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

/// 解压能力
///
/// 职责：
/// - 把 `archive` 完整解压到已存在的 `output_dir`
/// - 不关心学生、工作区、报告
pub trait Extractor {
    fn extract(
        &self,
        archive: &Path,
        output_dir: &Path,
    ) -> impl Future<Output = Result<(), ExtractError>> + Send;
}

/// 调用 `7z x <archive> -o<dir>` 的解压器
#[derive(Debug, Clone)]
pub struct SevenZip {
    program: String,
    timeout: Duration,
}

impl SevenZip {
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.sevenzip_bin.clone(), config.extract_timeout())
    }
}

impl Extractor for SevenZip {
    async fn extract(&self, archive: &Path, output_dir: &Path) -> Result<(), ExtractError> {
        let output_dir = absolute_path(output_dir).map_err(|source| ExtractError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        debug!("解压 {} → {}", archive.display(), output_dir.display());

        let mut command = Command::new(&self.program);
        command
            .arg("x")
            .arg(archive)
            .arg(format!("-o{}", output_dir.display()));

        run_with_timeout(command, self.timeout).await
    }
}

/// 运行外部命令并等待结束，超时后杀掉子进程
///
/// 输出全部丢弃，只看退出码。
pub async fn run_with_timeout(mut command: Command, limit: Duration) -> Result<(), ExtractError> {
    let program = command.as_std().get_program().to_string_lossy().to_string();

    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| ExtractError::Spawn {
            program: program.clone(),
            source,
        })?;

    match timeout(limit, child.wait()).await {
        Ok(Ok(status)) if status.success() => Ok(()),
        Ok(Ok(status)) => Err(ExtractError::ExitStatus {
            code: status.code(),
        }),
        Ok(Err(source)) => Err(ExtractError::Spawn { program, source }),
        Err(_) => {
            let _ = child.kill().await;
            Err(ExtractError::Timeout { limit })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let extractor = SevenZip::new("definitely-not-a-real-7z-binary", Duration::from_secs(5));

        let err = extractor
            .extract(&dir.path().join("a.zip"), dir.path())
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit_is_reported() {
        let command = Command::new("false");
        let err = run_with_timeout(command, Duration::from_secs(5)).await.unwrap_err();
        assert!(matches!(err, ExtractError::ExitStatus { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_slow_command_times_out() {
        let mut command = Command::new("sleep");
        command.arg("5");

        let started = std::time::Instant::now();
        let err = run_with_timeout(command, Duration::from_millis(100)).await.unwrap_err();

        assert!(matches!(err, ExtractError::Timeout { .. }));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_successful_command() {
        let command = Command::new("true");
        assert!(run_with_timeout(command, Duration::from_secs(5)).await.is_ok());
    }
}
