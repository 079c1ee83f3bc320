//! 文件系统辅助函数

use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::error;

/// 在 `root` 下找一个尚不存在的名字：`prefix`、`prefix_2`、`prefix_3` ...
///
/// 只读取文件系统状态，不创建任何东西；连续调用两次会得到同一个结果。
///
/// # 参数
/// - `root`: 在哪个目录下找
/// - `prefix`: 名字前缀，例如 `workspace`
/// - `extension`: 可选扩展名（不带点），例如 `Some("json")`
///
/// # 返回
/// `root` 下第一个不存在的路径
pub fn find_free_name(root: &Path, prefix: &str, extension: Option<&str>) -> PathBuf {
    let extension = match extension {
        Some(ext) if !ext.is_empty() && !ext.starts_with('.') => format!(".{}", ext),
        Some(ext) => ext.to_string(),
        None => String::new(),
    };

    let mut candidate = root.join(format!("{}{}", prefix, extension));
    let mut index = 2;
    while candidate.exists() {
        candidate = root.join(format!("{}_{}{}", prefix, index, extension));
        index += 1;
    }
    candidate
}

/// 把 `src` 下的所有条目（文件和子目录）平移到 `dst` 下
///
/// 目标已存在同名条目时失败，不会覆盖。
pub async fn move_all_entries(src: &Path, dst: &Path) -> io::Result<()> {
    let mut entries = fs::read_dir(src).await?;

    while let Some(entry) = entries.next_entry().await? {
        let from = entry.path();
        let to = dst.join(entry.file_name());

        if let Err(e) = move_entry(&from, &to).await {
            error!(
                "移动 {} 时出错，是否超出了路径长度限制？({})",
                from.display(),
                e
            );
            return Err(e);
        }
    }

    Ok(())
}

async fn move_entry(from: &Path, to: &Path) -> io::Result<()> {
    if fs::try_exists(to).await? {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} already exists", to.display()),
        ));
    }

    if fs::rename(from, to).await.is_ok() {
        return Ok(());
    }

    // rename 跨设备时会失败，退回到复制后删除
    if fs::metadata(from).await?.is_dir() {
        copy_dir_all(from, to).await?;
        fs::remove_dir_all(from).await
    } else {
        fs::copy(from, to).await?;
        fs::remove_file(from).await
    }
}

async fn copy_dir_all(from: &Path, to: &Path) -> io::Result<()> {
    let mut pending = vec![(from.to_path_buf(), to.to_path_buf())];

    while let Some((src, dst)) = pending.pop() {
        fs::create_dir_all(&dst).await?;
        let mut entries = fs::read_dir(&src).await?;
        while let Some(entry) = entries.next_entry().await? {
            let target = dst.join(entry.file_name());
            if entry.file_type().await?.is_dir() {
                pending.push((entry.path(), target));
            } else {
                fs::copy(entry.path(), target).await?;
            }
        }
    }

    Ok(())
}

/// 列出 `dir` 的直接子目录，按名称排序
pub async fn list_subdirectories(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut subdirs = Vec::new();
    let mut entries = fs::read_dir(dir).await?;

    while let Some(entry) = entries.next_entry().await? {
        if entry.file_type().await?.is_dir() {
            subdirs.push(entry.path());
        }
    }

    subdirs.sort();
    Ok(subdirs)
}

pub fn absolute_path(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
