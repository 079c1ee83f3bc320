use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// 默认的压缩包扩展名（按优先级排列）
pub const DEFAULT_ARCHIVE_EXTENSIONS: [&str; 6] = [".zip", ".rar", ".7z", ".tar", ".tar.gz", ".tgz"];

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 解压工具可执行文件
    pub sevenzip_bin: String,
    /// 单次解压的超时时间（秒）
    pub extract_timeout_secs: u64,
    /// 压缩包最大嵌套层数
    pub max_nesting_depth: usize,
    /// 源代码文件扩展名
    pub source_extension: String,
    /// 压缩包扩展名，按优先级排列
    pub archive_extensions: Vec<String>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sevenzip_bin: "7z".to_string(),
            extract_timeout_secs: 300,
            max_nesting_depth: 8,
            source_extension: ".py".to_string(),
            archive_extensions: DEFAULT_ARCHIVE_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_overrides(env_lookup)
    }

    /// 从 TOML 文件加载配置，环境变量优先级更高
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        Self::load_file(path, env_lookup)
    }

    /// 从 TOML 文件加载配置，再用 `lookup` 提供的值覆盖
    ///
    /// # 参数
    /// - `path`: 配置文件路径
    /// - `lookup`: 按变量名取覆盖值，通常是环境变量
    ///
    /// # 返回
    /// 校验通过的配置；扩展名为空时返回 [`ConfigError::EmptyExtension`]
    pub fn load_file(
        path: &Path,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.to_path_buf(),
            source,
        })?;
        config.with_overrides(lookup)
    }

    fn with_overrides(self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let config = Self {
            sevenzip_bin: lookup("SEVENZIP_BIN").unwrap_or(self.sevenzip_bin),
            extract_timeout_secs: lookup("EXTRACT_TIMEOUT_SECS").and_then(|v| v.parse().ok()).unwrap_or(self.extract_timeout_secs),
            max_nesting_depth: lookup("MAX_NESTING_DEPTH").and_then(|v| v.parse().ok()).unwrap_or(self.max_nesting_depth),
            source_extension: lookup("SOURCE_EXTENSION").map(normalize_extension).unwrap_or(self.source_extension),
            archive_extensions: self.archive_extensions,
            verbose_logging: lookup("VERBOSE_LOGGING").and_then(|v| v.parse().ok()).unwrap_or(self.verbose_logging),
        };
        config.validate()
    }

    // 空扩展名会让 `ends_with` 匹配任意文件
    fn validate(self) -> Result<Self, ConfigError> {
        if is_blank_extension(&self.source_extension) {
            return Err(ConfigError::EmptyExtension { key: "source_extension" });
        }
        if self.archive_extensions.iter().any(|e| is_blank_extension(e)) {
            return Err(ConfigError::EmptyExtension { key: "archive_extensions" });
        }
        Ok(self)
    }

    pub fn extract_timeout(&self) -> Duration {
        Duration::from_secs(self.extract_timeout_secs)
    }

    /// 按优先级返回所有候选扩展名：源代码优先，其次是压缩包
    pub fn payload_extensions(&self) -> Vec<String> {
        let mut extensions = vec![normalize_extension(self.source_extension.clone())];
        extensions.extend(self.archive_extensions.iter().cloned().map(normalize_extension));
        extensions
    }
}

/// 解压目录已存在时的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ExistingDirPolicy {
    /// 直接退出
    #[default]
    Abort,
    /// 删除后重新解压
    Clear,
    /// 保留已有内容，不再解压总压缩包
    Reuse,
}

/// 目录名无法解析时的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum NameErrorPolicy {
    /// 跳过该提交，继续处理其它学生
    #[default]
    Skip,
    /// 终止整个批处理
    Abort,
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn is_blank_extension(extension: &str) -> bool {
    extension.trim().trim_start_matches('.').is_empty()
}

/// 补全扩展名前缀的点，例如 `py` → `.py`
pub fn normalize_extension(extension: String) -> String {
    if extension.is_empty() || extension.starts_with('.') {
        extension
    } else {
        format!(".{}", extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_payload_extensions_put_source_first() {
        let config = Config::default();
        let extensions = config.payload_extensions();
        assert_eq!(extensions[0], ".py");
        assert_eq!(extensions[1], ".zip");
        assert_eq!(extensions.len(), 7);
    }

    #[test]
    fn test_normalize_extension() {
        assert_eq!(normalize_extension("py".to_string()), ".py");
        assert_eq!(normalize_extension(".java".to_string()), ".java");
        assert_eq!(normalize_extension(String::new()), "");
    }

    #[test]
    fn test_from_file_fills_missing_keys_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "source_extension = \"java\"\nmax_nesting_depth = 3").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.max_nesting_depth, 3);
        assert_eq!(config.archive_extensions.len(), 6);
        assert_eq!(config.payload_extensions()[0], ".java");
    }

    #[test]
    fn test_from_file_rejects_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_nesting_depth = \"deep\"").unwrap();

        let err = Config::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::TomlParseFailed { .. }));
    }

    #[test]
    fn test_environment_overrides_file_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "source_extension = \"java\"\nmax_nesting_depth = 3").unwrap();

        let lookup = |key: &str| match key {
            "MAX_NESTING_DEPTH" => Some("5".to_string()),
            "SEVENZIP_BIN" => Some("/opt/7zz".to_string()),
            _ => None,
        };
        let config = Config::load_file(file.path(), lookup).unwrap();

        assert_eq!(config.max_nesting_depth, 5);
        assert_eq!(config.sevenzip_bin, "/opt/7zz");
        assert_eq!(config.source_extension, "java");
        assert_eq!(config.extract_timeout_secs, 300);
    }

    #[test]
    fn test_empty_source_extension_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "source_extension = \"\"").unwrap();
        let err = Config::load_file(file.path(), |_| None).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyExtension { key: "source_extension" }));

        let err = Config::default()
            .with_overrides(|key| (key == "SOURCE_EXTENSION").then(|| ".".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::EmptyExtension { key: "source_extension" }));
    }

    #[test]
    fn test_empty_archive_extension_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "archive_extensions = [\".zip\", \"\"]").unwrap();
        let err = Config::load_file(file.path(), |_| None).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyExtension { key: "archive_extensions" }));
    }
}
