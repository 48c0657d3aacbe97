//! Image capture staging.
//!
//! Two intake modes replace the old camera/upload split: explicit file
//! arguments, or a folder scan that picks up every image directly inside it.
//! Selected files are copied into the store's `images/` directory under
//! timestamped names so later deletion of the originals cannot dangle the
//! record.

use crate::error::{ArborError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "JPG", "JPEG", "PNG"];

fn is_image_extension(ext: &str) -> bool {
    IMAGE_EXTENSIONS.contains(&ext)
}

/// Scan a folder (non-recursive) for image files, sorted by file name.
pub fn collect_from_folder(folder: &Path) -> Result<Vec<PathBuf>> {
    if !folder.exists() {
        return Err(ArborError::FolderNotFound(folder.display().to_string()));
    }

    let mut images = Vec::new();
    for entry in WalkDir::new(folder)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(ext) = path.extension() {
            if is_image_extension(&ext.to_string_lossy()) {
                images.push(path.to_path_buf());
            }
        }
    }

    images.sort_by_key(|p| p.file_name().map(|n| n.to_os_string()));
    Ok(images)
}

/// Copy the selected images into `images_dir`, returning the staged paths in
/// input order. Fails before copying anything if a source is missing, and
/// enforces the per-request cap.
pub fn stage_images(sources: &[PathBuf], images_dir: &Path, max_images: usize) -> Result<Vec<String>> {
    if sources.is_empty() {
        return Err(ArborError::NoImagesFound("no image files selected".into()));
    }
    if sources.len() > max_images {
        return Err(ArborError::TooManyImages(sources.len(), max_images));
    }
    for src in sources {
        if !src.is_file() {
            return Err(ArborError::FileNotFound(src.display().to_string()));
        }
    }

    std::fs::create_dir_all(images_dir)?;

    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let mut staged = Vec::new();
    for (index, src) in sources.iter().enumerate() {
        let file_name = src
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "image".to_string());
        let dest = images_dir.join(format!("{}_{:02}_{}", stamp, index, file_name));
        std::fs::copy(src, &dest)?;
        staged.push(dest.display().to_string());
    }

    Ok(staged)
}
