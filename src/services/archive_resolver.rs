//! 压缩包解析服务 - 业务能力层
//!
//! 在提交目录里寻找作业文件：先找源代码，找不到再找压缩包。
//! 找到压缩包就解压到新的 `extract` 子目录，然后在其中继续寻找，直到找到源代码。

use crate::config::Config;
use crate::error::ResolveError;
use crate::infrastructure::{find_free_name, move_all_entries, Extractor};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};
use walkdir::WalkDir;

/// 压缩包解析器
pub struct ArchiveResolver<E> {
    extractor: E,
    /// 候选扩展名，按优先级排列（源代码在最前）
    extensions: Vec<String>,
    source_extension: String,
    max_nesting_depth: usize,
}

impl<E: Extractor> ArchiveResolver<E> {
    pub fn new(extractor: E, config: &Config) -> Self {
        let extensions = config.payload_extensions();
        Self {
            extractor,
            source_extension: extensions[0].clone(),
            extensions,
            max_nesting_depth: config.max_nesting_depth,
        }
    }

    pub fn extractor(&self) -> &E {
        &self.extractor
    }

    pub fn source_extension(&self) -> &str {
        &self.source_extension
    }

    /// 在目录树中查找作业文件
    ///
    /// 按扩展名优先级依次遍历整棵目录树，返回遍历顺序中第一个匹配的文件。
    pub fn resolve(&self, dir: &Path) -> Result<PathBuf, ResolveError> {
        for extension in &self.extensions {
            let found = WalkDir::new(dir)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
                .find(|e| e.file_name().to_string_lossy().ends_with(extension.as_str()));

            if let Some(entry) = found {
                debug!("找到 {} 文件: {}", extension, entry.path().display());
                return Ok(entry.into_path());
            }
        }

        Err(ResolveError::NoPayloadFound {
            dir: dir.to_path_buf(),
            extensions: self.extensions.clone(),
        })
    }

    /// 解析提交目录并把源代码移动到工作区
    ///
    /// 遇到压缩包就解压到当前目录下的 `extract[_N]` 并继续查找，最多解压
    /// `max_nesting_depth` 次。
    ///
    /// # 参数
    /// - `dir`: 提交目录
    /// - `workspace`: 已创建的空工作区
    ///
    /// # 返回
    /// 找到的源代码文件路径（移动之前的位置）
    pub async fn resolve_workspace(
        &self,
        dir: &Path,
        workspace: &Path,
    ) -> Result<PathBuf, ResolveError> {
        let mut current = dir.to_path_buf();
        let mut depth = 0;

        loop {
            let payload = self.resolve(&current)?;

            if self.is_source(&payload) {
                let source_dir = payload.parent().unwrap_or(&current);
                move_all_entries(source_dir, workspace).await?;
                return Ok(payload);
            }

            if depth >= self.max_nesting_depth {
                return Err(ResolveError::NestingTooDeep {
                    depth: self.max_nesting_depth,
                    archive: payload,
                });
            }

            let extract_dir = find_free_name(&current, "extract", None);
            fs::create_dir(&extract_dir).await?;

            info!("📦 解压 {}", payload.display());
            self.extractor
                .extract(&payload, &extract_dir)
                .await
                .map_err(|source| ResolveError::BadArchive {
                    archive: payload.clone(),
                    source,
                })?;

            depth += 1;
            current = extract_dir;
        }
    }

    fn is_source(&self, path: &Path) -> bool {
        path.file_name()
            .map(|name| name.to_string_lossy().ends_with(self.source_extension.as_str()))
            .unwrap_or(false)
    }
}
