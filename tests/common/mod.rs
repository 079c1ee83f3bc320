//! 集成测试共用的假解压器

use extract_all::{ExtractError, Extractor};
use std::collections::HashMap;
use std::path::Path;

/// 按压缩包文件名生成预先登记的文件，未登记的压缩包视为损坏
#[derive(Default)]
pub struct FakeExtractor {
    archives: HashMap<String, Vec<(String, String)>>,
}

impl FakeExtractor {
    pub fn with(mut self, archive: &str, files: &[(&str, &str)]) -> Self {
        self.archives.insert(
            archive.to_string(),
            files
                .iter()
                .map(|(path, body)| (path.to_string(), body.to_string()))
                .collect(),
        );
        self
    }
}

impl Extractor for FakeExtractor {
    async fn extract(&self, archive: &Path, output_dir: &Path) -> Result<(), ExtractError> {
        let name = archive
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let files = self
            .archives
            .get(&name)
            .ok_or(ExtractError::ExitStatus { code: Some(2) })?;

        for (path, body) in files {
            let target = output_dir.join(path);
            std::fs::create_dir_all(target.parent().unwrap()).unwrap();
            std::fs::write(target, body).unwrap();
        }
        Ok(())
    }
}
