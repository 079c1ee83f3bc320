//! 单份提交处理流程 - 流程层
//!
//! 流程顺序：
//! 1. 解析目录名 → 学生身份
//! 2. 构建工作区（解压 / 兜底搬运）
//! 3. 写入报告

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, warn};

use crate::config::NameErrorPolicy;
use crate::infrastructure::Extractor;
use crate::models::AssignmentMetadata;
use crate::services::{NameParser, ReportWriter, WorkspaceBuilder};
use crate::workflow::submission_ctx::SubmissionCtx;

/// 提交处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessResult {
    /// 找到源代码并整理完成
    Clean,
    /// 解析失败，已兜底搬运原始内容并写入评论
    Degraded,
    /// 目录名无法解析，已跳过
    Skipped,
}

/// 单份提交处理流程
///
/// - 编排解析、构建工作区、写报告三个步骤
/// - 决定目录名解析失败时跳过还是终止
/// - 不持有元数据，元数据由编排层加载后传入
pub struct SubmissionFlow<E> {
    parser: NameParser,
    builder: WorkspaceBuilder<E>,
    report_writer: ReportWriter,
    workspaces_root: PathBuf,
    on_name_error: NameErrorPolicy,
}

impl<E: Extractor> SubmissionFlow<E> {
    pub fn new(
        parser: NameParser,
        builder: WorkspaceBuilder<E>,
        workspaces_root: impl Into<PathBuf>,
        on_name_error: NameErrorPolicy,
    ) -> Self {
        Self {
            parser,
            builder,
            report_writer: ReportWriter::new(),
            workspaces_root: workspaces_root.into(),
            on_name_error,
        }
    }

    pub fn extractor(&self) -> &E {
        self.builder.resolver().extractor()
    }

    pub fn workspaces_root(&self) -> &Path {
        &self.workspaces_root
    }

    pub async fn run(
        &self,
        ctx: &SubmissionCtx,
        metadata: &AssignmentMetadata,
    ) -> Result<ProcessResult> {
        let dir_name = ctx.dir_name();

        let identity = match self.parser.parse(&dir_name) {
            Ok(identity) => identity,
            Err(e) => match self.on_name_error {
                NameErrorPolicy::Skip => {
                    warn!("{} ⚠️ 无法解析目录名，跳过: {}", ctx, e);
                    return Ok(ProcessResult::Skipped);
                }
                NameErrorPolicy::Abort => {
                    return Err(e).with_context(|| format!("{} 目录名解析失败", ctx));
                }
            },
        };

        info!("{} 学生: {} <{}>", ctx, identity, identity.email());
        if let Some(submitted_at) = &identity.submitted_at {
            if submitted_at.to_naive().is_none() {
                warn!("{} ⚠️ 提交时间不是合法日期: {}", ctx, submitted_at);
            }
        }

        let student_dir = self.workspaces_root.join(&identity.matricule);
        fs::create_dir_all(&student_dir)
            .await
            .with_context(|| format!("无法创建学生目录: {}", student_dir.display()))?;

        let workspace = self
            .builder
            .build(ctx.submission_dir(), &student_dir, &identity)
            .await
            .with_context(|| format!("{} 构建工作区失败", ctx))?;

        let report_path = self
            .report_writer
            .write(
                &student_dir,
                &identity,
                &workspace.path,
                &workspace.comments,
                metadata,
            )
            .await
            .with_context(|| format!("{} 写入报告失败", ctx))?;

        if workspace.is_degraded() {
            warn!("{} ⚠️ 已兜底处理，报告: {}", ctx, report_path.display());
            Ok(ProcessResult::Degraded)
        } else {
            info!("{} ✓ 处理完成，报告: {}", ctx, report_path.display());
            Ok(ProcessResult::Clean)
        }
    }
}
