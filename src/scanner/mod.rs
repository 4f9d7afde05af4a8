mod resize;

pub use resize::prepare_for_upload;

use crate::error::{MiamzError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct ImageInfo {
    pub path: PathBuf,
    pub file_name: String,
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "JPG", "JPEG", "PNG"];

/// 写真1枚、またはフォルダ直下の写真を列挙
pub fn scan_path(path: &Path) -> Result<Vec<ImageInfo>> {
    if !path.exists() {
        return Err(MiamzError::FileNotFound(path.display().to_string()));
    }

    if path.is_file() {
        if !has_image_extension(path) {
            return Err(MiamzError::ImageLoad(format!(
                "format non pris en charge : {}",
                path.display()
            )));
        }
        return Ok(vec![image_info(path)]);
    }

    let mut images = Vec::new();

    for entry in WalkDir::new(path)
        .max_depth(1)  // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if path.is_file() && has_image_extension(path) {
            images.push(image_info(path));
        }
    }

    // ファイル名でソート
    images.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    Ok(images)
}

fn image_info(path: &Path) -> ImageInfo {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    ImageInfo {
        path: path.to_path_buf(),
        file_name,
    }
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| is_image_extension(&ext.to_string_lossy()))
        .unwrap_or(false)
}

fn is_image_extension(ext: &str) -> bool {
    IMAGE_EXTENSIONS.contains(&ext)
}
