//! 日志工具模块
//!
//! 提供日志初始化、格式化和输出的辅助函数

use crate::orchestrator::batch_processor::{BatchJob, BatchStats};
use crate::workflow::SubmissionCtx;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// 优先使用 `RUST_LOG`，否则根据 `verbose` 选择 info 或 debug
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(job: &BatchJob) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 程序启动 - {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("📦 总压缩包: {}", job.master_archive.display());
    info!("📁 解压目录: {}", job.extract_dir.display());
    info!("📁 工作区目录: {}", job.workspaces_root.display());
    info!("{}", "=".repeat(60));
}

/// 记录提交加载信息
pub fn log_submissions_found(total: usize) {
    info!("✓ 找到 {} 份待处理的提交\n", total);
}

/// 记录单份提交开始
pub fn log_submission_start(ctx: &SubmissionCtx) {
    info!("\n{}", "─".repeat(60));
    info!("{} 开始处理", ctx);
}

/// 打印最终统计信息
pub fn print_final_stats(stats: &BatchStats) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 正常: {}/{}", stats.clean, stats.total);
    info!("⚠️ 兜底: {}", stats.degraded);
    info!("⏭️ 跳过: {}", stats.skipped);
    for dir_name in &stats.skipped_dirs {
        info!("   - {}", dir_name);
    }
    info!("{}", "=".repeat(60));
}
