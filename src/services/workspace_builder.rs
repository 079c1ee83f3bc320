//! 工作区构建服务 - 业务能力层
//!
//! 为每份提交创建独立的工作区，解析失败时把原始提交内容整体搬进工作区，
//! 保证任何提交都不会丢失。

use crate::error::ResolveError;
use crate::infrastructure::{find_free_name, move_all_entries, Extractor};
use crate::models::SubmissionIdentity;
use crate::services::archive_resolver::ArchiveResolver;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::error;

/// 学生工作区
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    /// 工作区目录
    pub path: PathBuf,
    /// 找到的源代码文件（移动之前的位置）；解析失败时为 None
    pub source: Option<PathBuf>,
    /// 构建过程中产生的评论
    pub comments: Vec<String>,
}

impl Workspace {
    /// 是否走了兜底流程
    pub fn is_degraded(&self) -> bool {
        self.source.is_none()
    }
}

/// 工作区构建器
pub struct WorkspaceBuilder<E> {
    resolver: ArchiveResolver<E>,
}

impl<E: Extractor> WorkspaceBuilder<E> {
    pub fn new(resolver: ArchiveResolver<E>) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &ArchiveResolver<E> {
        &self.resolver
    }

    /// 在 `student_dir` 下创建工作区并填充内容
    ///
    /// 只有文件系统错误会返回 Err，作业本身的问题都会降级为评论。
    pub async fn build(
        &self,
        submission_dir: &Path,
        student_dir: &Path,
        identity: &SubmissionIdentity,
    ) -> io::Result<Workspace> {
        let path = find_free_name(student_dir, "workspace", None);
        fs::create_dir(&path).await?;

        match self.resolver.resolve_workspace(submission_dir, &path).await {
            Ok(source) => Ok(Workspace {
                path,
                source: Some(source),
                comments: Vec::new(),
            }),
            Err(ResolveError::Io(e)) => Err(e),
            Err(e) => {
                let comment = self.failure_comment(&e);
                error!("ERROR with {}:\n   {}\n", identity, comment);

                move_all_entries(submission_dir, &path).await?;

                Ok(Workspace {
                    path,
                    source: None,
                    comments: vec![comment],
                })
            }
        }
    }

    fn failure_comment(&self, err: &ResolveError) -> String {
        match err {
            ResolveError::NoPayloadFound { .. } => {
                format!("No {} file found", source_kind(self.resolver.source_extension()))
            }
            ResolveError::BadArchive { .. }
            | ResolveError::NestingTooDeep { .. }
            | ResolveError::Io(_) => err.to_string(),
        }
    }
}

/// 源代码类型的可读名称，例如 `.py` → `python`
fn source_kind(extension: &str) -> String {
    match extension.trim_start_matches('.') {
        "py" => "python".to_string(),
        other => other.to_string(),
    }
}
