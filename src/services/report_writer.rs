//! 报告写入服务 - 业务能力层
//!
//! 只负责"写 report.json"能力，不关心流程

use crate::error::ReportError;
use crate::infrastructure::find_free_name;
use crate::models::{AssignmentMetadata, SubmissionIdentity};
use serde::Serialize;
use serde_json::{json, Map, Value as JsonValue};
use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// 报告写入服务
///
/// 职责：
/// - 合并身份信息、工作区、评论和作业元数据
/// - 每次写入一个新文件，绝不覆盖已有报告
pub struct ReportWriter {
    file_prefix: String,
}

impl ReportWriter {
    pub fn new() -> Self {
        Self {
            file_prefix: "report".to_string(),
        }
    }

    /// 写入学生报告
    ///
    /// # 参数
    /// - `student_dir`: 学生目录，报告写在这里
    /// - `identity`: 由目录名解析出的学生身份
    /// - `workspace`: 工作区路径
    /// - `comments`: 构建工作区时产生的评论
    /// - `metadata`: 作业元数据
    ///
    /// # 返回
    /// 新写入的报告路径（`report.json`、`report_2.json` ...）
    pub async fn write(
        &self,
        student_dir: &Path,
        identity: &SubmissionIdentity,
        workspace: &Path,
        comments: &[String],
        metadata: &AssignmentMetadata,
    ) -> Result<PathBuf, ReportError> {
        let report = build_report(identity, workspace, comments, metadata);
        let body = to_tab_indented_json(&report)?;

        let report_path = find_free_name(student_dir, &self.file_prefix, Some("json"));
        debug!("写入报告: {}", report_path.display());

        let write_failed = |source: std::io::Error| ReportError::WriteFailed {
            path: report_path.clone(),
            source,
        };

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&report_path)
            .await
            .map_err(write_failed)?;
        file.write_all(&body).await.map_err(write_failed)?;
        file.flush().await.map_err(write_failed)?;

        Ok(report_path)
    }
}

impl Default for ReportWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// 构建报告内容
///
/// 字段顺序：name, matricule, email, [datetime], workspace, comment，然后叠加元数据。
/// 元数据可以覆盖同名字段，但 comment 始终是本地评论在前、元数据评论在后。
pub fn build_report(
    identity: &SubmissionIdentity,
    workspace: &Path,
    comments: &[String],
    metadata: &AssignmentMetadata,
) -> Map<String, JsonValue> {
    let mut report = Map::new();
    report.insert("name".into(), json!(identity.display_name));
    report.insert("matricule".into(), json!(identity.matricule));
    report.insert("email".into(), json!(identity.email()));
    if let Some(submitted_at) = &identity.submitted_at {
        report.insert("datetime".into(), json!(submitted_at.to_string()));
    }
    report.insert("workspace".into(), json!(workspace.to_string_lossy()));
    report.insert("comment".into(), JsonValue::Null);

    for (key, value) in &metadata.fields {
        report.insert(key.clone(), value.clone());
    }

    let merged: Vec<&String> = comments.iter().chain(metadata.comments.iter()).collect();
    report.insert("comment".into(), json!(merged));

    report
}

fn to_tab_indented_json(report: &Map<String, JsonValue>) -> Result<Vec<u8>, ReportError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    report.serialize(&mut serializer)?;
    Ok(buf)
}
