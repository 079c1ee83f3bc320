//! 提交处理上下文
//!
//! 封装"我正在处理第几份提交、目录在哪里"这一信息

use std::fmt::Display;
use std::path::{Path, PathBuf};

/// 提交处理上下文
#[derive(Debug, Clone)]
pub struct SubmissionCtx {
    /// 提交目录
    pub submission_dir: PathBuf,

    /// 提交索引（从1开始，仅用于日志显示）
    pub index: usize,

    /// 提交总数
    pub total: usize,
}

impl SubmissionCtx {
    pub fn new(submission_dir: PathBuf, index: usize, total: usize) -> Self {
        Self {
            submission_dir,
            index,
            total,
        }
    }

    pub fn submission_dir(&self) -> &Path {
        &self.submission_dir
    }

    /// 提交目录名（即待解析的学生信息）
    pub fn dir_name(&self) -> String {
        self.submission_dir
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

impl Display for SubmissionCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[提交 {}/{} {}]", self.index, self.total, self.dir_name())
    }
}
