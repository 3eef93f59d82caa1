use crate::domain::model::{FileInfo, FileKind};
use crate::utils::error::{AppError, Result};
use crate::utils::validation::validate_path;
use chrono::{DateTime, Local};
use std::fs::{self, Metadata};
use std::io::ErrorKind;
use std::path::Path;
use std::time::SystemTime;

/// 讀取檔案資訊；路徑不存在時 `exists = false`，其餘欄位為 None
pub fn inspect(path: impl AsRef<Path>) -> Result<FileInfo> {
    let path = path.as_ref();
    validate_path("path", &path.to_string_lossy())?;

    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let mut info = FileInfo {
        path: path.to_path_buf(),
        absolute,
        exists: false,
        kind: None,
        size_bytes: None,
        created: None,
        modified: None,
        accessed: None,
        parent: path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf),
        file_name: path.file_name().map(|n| n.to_string_lossy().into_owned()),
        stem: path.file_stem().map(|s| s.to_string_lossy().into_owned()),
        extension: path.extension().map(|e| e.to_string_lossy().into_owned()),
    };

    let link_meta = match fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("Path does not exist: {}", path.display());
            return Ok(info);
        }
        Err(e) => return Err(AppError::Io(e)),
    };

    // symlink 取目標的大小與時間；斷掉的連結就用連結本身
    let meta = fs::metadata(path).unwrap_or_else(|_| link_meta.clone());

    info.exists = true;
    info.kind = Some(kind_of(&link_meta));
    info.size_bytes = Some(meta.len());
    info.created = meta.created().ok().map(to_local);
    info.modified = meta.modified().ok().map(to_local);
    info.accessed = meta.accessed().ok().map(to_local);
    Ok(info)
}

fn kind_of(meta: &Metadata) -> FileKind {
    let file_type = meta.file_type();
    if file_type.is_symlink() {
        FileKind::Symlink
    } else if file_type.is_dir() {
        FileKind::Directory
    } else if file_type.is_file() {
        FileKind::File
    } else {
        FileKind::Other
    }
}

fn to_local(time: SystemTime) -> DateTime<Local> {
    DateTime::<Local>::from(time)
}

pub fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["KiB", "MiB", "GiB", "TiB", "PiB"];
    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}
