use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use extract_all::services::TrailingText;
use extract_all::utils::logging;
use extract_all::{App, BatchJob, Config, ExistingDirPolicy, NameErrorPolicy, SevenZip};
use std::path::PathBuf;

const USAGE: &str = "Usage: extract_all workDir zip json";

/// 批量解压并整理学生作业提交
#[derive(Parser, Debug)]
#[command(name = "extract_all", version)]
struct Cli {
    /// 工作目录
    work_dir: PathBuf,
    /// 总压缩包
    master_archive: PathBuf,
    /// 作业元数据（JSON）
    metadata: PathBuf,
    /// 解压目录已存在时的处理方式
    #[arg(long, value_enum, default_value_t = ExistingDirPolicy::Abort)]
    on_existing: ExistingDirPolicy,
    /// 目录名无法解析时的处理方式
    #[arg(long, value_enum, default_value_t = NameErrorPolicy::Skip)]
    on_name_error: NameErrorPolicy,
    /// 拒绝带有无法识别尾部文本的目录名
    #[arg(long)]
    strict_names: bool,
    /// TOML 配置文件
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::MissingRequiredArgument
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                println!("{}", USAGE);
                return Ok(());
            }
            _ => e.exit(),
        },
    };

    // 加载配置
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };

    // 初始化日志
    logging::init(config.verbose_logging);

    let mut job = BatchJob::from_work_dir(&cli.work_dir, cli.master_archive, cli.metadata);
    job.on_existing = cli.on_existing;
    job.on_name_error = cli.on_name_error;
    if cli.strict_names {
        job.trailing_text = TrailingText::Reject;
    }

    let extractor = SevenZip::from_config(&config);
    App::new(&config, job, extractor).run().await?;

    Ok(())
}
