//! アップロード対象ファイルの選択
//!
//! 画像は中身を検証せず、バイト列として扱う。

use crate::error::{AiDetectError, Result};
use std::path::Path;

/// 選択されたファイル
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub size: u64,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let content_type = content_type_for(&name).to_string();
        Self {
            size: bytes.len() as u64,
            name,
            content_type,
            bytes,
        }
    }

    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}

const IMAGE_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("bmp", "image/bmp"),
];

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// 拡張子からMIMEタイプを推定（大文字小文字は無視）
pub fn content_type_for(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase());

    ext.and_then(|ext| {
        IMAGE_TYPES
            .iter()
            .find(|(known, _)| *known == ext)
            .map(|(_, mime)| *mime)
    })
    .unwrap_or(FALLBACK_CONTENT_TYPE)
}

/// ファイルを読み込んでアップロード用に選択
pub fn select_file(path: &Path) -> Result<SelectedFile> {
    if !path.is_file() {
        return Err(AiDetectError::FileNotFound(path.display().to_string()));
    }

    let bytes = std::fs::read(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    Ok(SelectedFile::from_bytes(name, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("photo.jpg"), "image/jpeg");
        assert_eq!(content_type_for("PHOTO.JPEG"), "image/jpeg");
        assert_eq!(content_type_for("scan.png"), "image/png");
        assert_eq!(content_type_for("anim.webp"), "image/webp");
        assert_eq!(content_type_for("notes.txt"), FALLBACK_CONTENT_TYPE);
        assert_eq!(content_type_for("no_extension"), FALLBACK_CONTENT_TYPE);
    }

    #[test]
    fn test_from_bytes() {
        let file = SelectedFile::from_bytes("face.png", vec![0u8; 2048]);
        assert_eq!(file.size, 2048);
        assert_eq!(file.content_type, "image/png");
        assert!(file.is_image());
    }
}
