//! 错误类型
//!
//! 服务层与基础设施层使用带类型的错误，编排层统一折叠为 `anyhow::Error`。
//! 写进学生报告的错误信息保持英文。

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// 目录名解析错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NameParseError {
    /// 无法读取学号
    #[error("Unable to parse {name}")]
    NoMatricule { name: String },
    /// 严格模式下存在无法识别的尾部文本
    #[error("Unable to parse {name}: unexpected trailing text {rest:?}")]
    TrailingInput { name: String, rest: String },
}

/// 外部解压工具错误
#[derive(Debug, Error)]
pub enum ExtractError {
    /// 无法启动解压工具
    #[error("cannot run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    /// 解压工具返回非零状态码
    #[error("extractor exited with status {code:?}")]
    ExitStatus { code: Option<i32> },
    /// 解压超时
    #[error("extraction timed out after {limit:?}")]
    Timeout { limit: Duration },
}

/// 压缩包解析错误
#[derive(Debug, Error)]
pub enum ResolveError {
    /// 目录树中没有源代码文件或压缩包
    #[error("no {extensions:?} file found in {}", .dir.display())]
    NoPayloadFound { dir: PathBuf, extensions: Vec<String> },
    /// 解压失败
    #[error("Unable to extract from {}", .archive.display())]
    BadArchive {
        archive: PathBuf,
        #[source]
        source: ExtractError,
    },
    /// 压缩包嵌套层数过深
    #[error("Archive nesting deeper than {depth} levels ({})", .archive.display())]
    NestingTooDeep { depth: usize, archive: PathBuf },
    /// 文件系统错误，不可恢复
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// 作业元数据错误
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("读取元数据文件失败 ({}): {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("元数据 JSON 解析失败 ({}): {source}", .path.display())]
    JsonParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("元数据必须是 JSON 对象: {}", .path.display())]
    NotAnObject { path: PathBuf },
    #[error("元数据中的 comment 字段必须是字符串数组: {}", .path.display())]
    BadComment { path: PathBuf },
}

/// 报告写入错误
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("报告序列化失败: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("写入报告失败 ({}): {source}", .path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("读取配置文件失败 ({}): {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("TOML解析失败 ({}): {source}", .path.display())]
    TomlParseFailed {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("扩展名不能为空: {key}")]
    EmptyExtension { key: &'static str },
}
