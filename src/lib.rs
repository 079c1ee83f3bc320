//! # Extract All
//!
//! 批量整理学生作业提交的命令行工具：解压总压缩包，按目录名识别学生，
//! 逐层解压每位学生的提交，整理到独立工作区，并为每份提交写一份 JSON 报告。
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 接触外部世界的能力
//! - `Extractor` / `SevenZip` - 调用外部 7z，带超时
//! - `fs_ops` - 不覆盖的命名、平移目录内容
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单份提交
//! - `NameParser` - 目录名 → 学生身份
//! - `ArchiveResolver` - 寻找源代码，逐层解压（有层数上限）
//! - `WorkspaceBuilder` - 创建工作区，失败时兜底搬运
//! - `ReportWriter` - 写 report.json
//!
//! ### ③ 流程层（Workflow）
//! - `SubmissionFlow` - 一份提交：解析 → 工作区 → 报告
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 准备目录、解压总压缩包、逐个处理、统计

pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::{Config, ExistingDirPolicy, NameErrorPolicy};
pub use error::{ExtractError, NameParseError, ResolveError};
pub use infrastructure::{Extractor, SevenZip};
pub use models::{AssignmentMetadata, SubmissionIdentity};
pub use orchestrator::{App, BatchJob, BatchStats};
pub use services::{parse_dir_name, TrailingText};
pub use workflow::{ProcessResult, SubmissionCtx, SubmissionFlow};
