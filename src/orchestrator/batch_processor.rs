//! 批量提交处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责一次完整的批处理。
//!
//! ## 核心功能
//!
//! 1. **准备目录**：按 [`ExistingDirPolicy`] 处理已存在的解压目录，创建工作区根目录
//! 2. **解压总压缩包**：失败即终止整次运行；复用已有解压目录时跳过
//! 3. **加载元数据**：整次运行只加载一次
//! 4. **逐个处理**：按目录名顺序依次交给 `SubmissionFlow`，单个学生的问题不会中断批处理
//! 5. **全局统计**：汇总正常 / 兜底 / 跳过数量，并列出被跳过的目录
//!
//! 顺序执行；不支持对同一个工作区根目录并行运行多个实例。

use crate::config::{Config, ExistingDirPolicy, NameErrorPolicy};
use crate::error::ResolveError;
use crate::infrastructure::{list_subdirectories, Extractor};
use crate::models::load_metadata;
use crate::services::{ArchiveResolver, NameParser, TrailingText, WorkspaceBuilder};
use crate::utils::logging;
use crate::workflow::{ProcessResult, SubmissionCtx, SubmissionFlow};
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, warn};

/// 一次批处理任务
#[derive(Debug, Clone)]
pub struct BatchJob {
    /// 总压缩包
    pub master_archive: PathBuf,
    /// 总压缩包的解压目录
    pub extract_dir: PathBuf,
    /// 所有学生工作区的根目录
    pub workspaces_root: PathBuf,
    /// 作业元数据文件
    pub metadata_path: PathBuf,
    pub on_existing: ExistingDirPolicy,
    pub on_name_error: NameErrorPolicy,
    pub trailing_text: TrailingText,
}

impl BatchJob {
    /// 根据工作目录推导解压目录和工作区目录
    ///
    /// - 解压目录：`work_dir/<压缩包文件名第一个点之前的部分>`
    /// - 工作区目录：`work_dir/workspaces`
    pub fn from_work_dir(
        work_dir: &Path,
        master_archive: impl Into<PathBuf>,
        metadata_path: impl Into<PathBuf>,
    ) -> Self {
        let master_archive = master_archive.into();
        let base_name = master_archive
            .file_name()
            .map(|name| name.to_string_lossy().split('.').next().unwrap_or_default().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "submissions".to_string());

        Self {
            extract_dir: work_dir.join(base_name),
            workspaces_root: work_dir.join("workspaces"),
            master_archive,
            metadata_path: metadata_path.into(),
            on_existing: ExistingDirPolicy::default(),
            on_name_error: NameErrorPolicy::default(),
            trailing_text: TrailingText::default(),
        }
    }
}

/// 处理统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchStats {
    pub total: usize,
    pub clean: usize,
    pub degraded: usize,
    pub skipped: usize,
    /// 目录名无法解析而被跳过的提交目录
    pub skipped_dirs: Vec<String>,
}

/// 应用主结构
pub struct App<E> {
    job: BatchJob,
    flow: SubmissionFlow<E>,
}

impl<E: Extractor> App<E> {
    pub fn new(config: &Config, job: BatchJob, extractor: E) -> Self {
        let resolver = ArchiveResolver::new(extractor, config);
        let flow = SubmissionFlow::new(
            NameParser::new(job.trailing_text),
            WorkspaceBuilder::new(resolver),
            job.workspaces_root.clone(),
            job.on_name_error,
        );
        Self { job, flow }
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<BatchStats> {
        logging::log_startup(&self.job);

        if self.prepare_directories().await? {
            info!("♻️ 复用已有解压结果，跳过总压缩包解压");
        } else {
            self.extract_master_archive().await?;
        }

        let metadata = load_metadata(&self.job.metadata_path).await?;

        let submissions = list_subdirectories(&self.job.extract_dir)
            .await
            .with_context(|| format!("无法读取解压目录: {}", self.job.extract_dir.display()))?;

        let mut stats = BatchStats {
            total: submissions.len(),
            ..Default::default()
        };

        if submissions.is_empty() {
            warn!("⚠️ 总压缩包中没有任何提交目录，程序结束");
            return Ok(stats);
        }

        logging::log_submissions_found(stats.total);

        for (idx, submission_dir) in submissions.into_iter().enumerate() {
            let ctx = SubmissionCtx::new(submission_dir, idx + 1, stats.total);
            logging::log_submission_start(&ctx);

            match self.flow.run(&ctx, &metadata).await? {
                ProcessResult::Clean => stats.clean += 1,
                ProcessResult::Degraded => stats.degraded += 1,
                ProcessResult::Skipped => {
                    stats.skipped += 1;
                    stats.skipped_dirs.push(ctx.dir_name());
                }
            }
        }

        logging::print_final_stats(&stats);

        Ok(stats)
    }

    /// 准备解压目录和工作区根目录
    ///
    /// # 返回
    /// 复用了已存在的解压目录时返回 true，此时不再解压总压缩包
    async fn prepare_directories(&self) -> Result<bool> {
        let extract_dir = &self.job.extract_dir;
        let mut reused = false;

        if fs::try_exists(extract_dir).await? {
            match self.job.on_existing {
                ExistingDirPolicy::Abort => bail!(
                    "{} 已存在，请使用 --on-existing clear 或 --on-existing reuse",
                    extract_dir.display()
                ),
                ExistingDirPolicy::Clear => {
                    info!("🗑️ 删除已存在的解压目录: {}", extract_dir.display());
                    fs::remove_dir_all(extract_dir)
                        .await
                        .with_context(|| format!("无法删除: {}", extract_dir.display()))?;
                }
                ExistingDirPolicy::Reuse => {
                    info!("♻️ 复用已存在的解压目录: {}", extract_dir.display());
                    reused = true;
                }
            }
        }

        fs::create_dir_all(extract_dir)
            .await
            .with_context(|| format!("无法创建解压目录: {}", extract_dir.display()))?;
        fs::create_dir_all(self.flow.workspaces_root())
            .await
            .with_context(|| {
                format!("无法创建工作区目录: {}", self.flow.workspaces_root().display())
            })?;

        Ok(reused)
    }

    async fn extract_master_archive(&self) -> Result<()> {
        info!("\n📦 正在解压总压缩包...");

        self.flow
            .extractor()
            .extract(&self.job.master_archive, &self.job.extract_dir)
            .await
            .map_err(|source| ResolveError::BadArchive {
                archive: self.job.master_archive.clone(),
                source,
            })
            .context("总压缩包解压失败")?;

        Ok(())
    }
}
