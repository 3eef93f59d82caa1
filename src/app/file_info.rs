use crate::core::file_info::human_size;
use crate::domain::model::{FileInfo, FileKind};
use chrono::{DateTime, Local};

fn timestamp(value: Option<DateTime<Local>>) -> String {
    value
        .map(|t| t.format("%Y-%m-%d %H:%M:%S %Z").to_string())
        .unwrap_or_else(|| "n/a".to_string())
}

fn text(value: Option<&str>) -> String {
    value.unwrap_or("n/a").to_string()
}

/// 整理成 (標籤, 值) 方便輸出
pub fn describe(info: &FileInfo) -> Vec<(String, String)> {
    let mut lines = vec![
        ("path".to_string(), info.path.display().to_string()),
        ("absolute".to_string(), info.absolute.display().to_string()),
        ("exists".to_string(), info.exists.to_string()),
        (
            "parent".to_string(),
            info.parent
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| ".".to_string()),
        ),
        ("file name".to_string(), text(info.file_name.as_deref())),
        ("stem".to_string(), text(info.stem.as_deref())),
        ("extension".to_string(), text(info.extension.as_deref())),
    ];

    if !info.exists {
        return lines;
    }

    let kind = match info.kind {
        Some(FileKind::File) => "file",
        Some(FileKind::Directory) => "directory",
        Some(FileKind::Symlink) => "symlink",
        Some(FileKind::Other) | None => "other",
    };
    lines.push(("kind".to_string(), kind.to_string()));
    lines.push((
        "size".to_string(),
        info.size_bytes
            .map(|b| format!("{} ({} bytes)", human_size(b), b))
            .unwrap_or_else(|| "n/a".to_string()),
    ));
    lines.push(("created".to_string(), timestamp(info.created)));
    lines.push(("modified".to_string(), timestamp(info.modified)));
    lines.push(("accessed".to_string(), timestamp(info.accessed)));
    lines
}
