//! 编排层（Orchestration Layer）
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理整个总压缩包)
//!     ↓
//! workflow::SubmissionFlow (处理单份提交)
//!     ↓
//! services (能力层：name_parser / archive_resolver / workspace_builder / report_writer)
//!     ↓
//! infrastructure (基础设施：Extractor / fs_ops)
//! ```

pub mod batch_processor;

pub use batch_processor::{App, BatchJob, BatchStats};
