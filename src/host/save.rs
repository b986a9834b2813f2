// Writes flattened snapshots as PNG files.
// Default names carry a timestamp; custom names are sanitised and never
// overwrite an existing file (a _1, _2, ... suffix is added instead).

use std::path::{Path, PathBuf};

use image::RgbImage;

use super::error::Error;

/// Save under `dir`, creating it if needed. Returns the path written.
pub fn save_snapshot(img: &RgbImage, dir: &Path, name: Option<&str>) -> Result<PathBuf, Error> {
    std::fs::create_dir_all(dir).map_err(|e| Error::Save(format!("create {}: {e}", dir.display())))?;

    let stem = match name {
        Some(n) => sanitize(n),
        None => format!("artwork_{}", chrono::Local::now().format("%Y%m%d_%H%M%S")),
    };
    let path = unique_path(dir, &stem);
    img.save(&path)
        .map_err(|e| Error::Save(format!("write {}: {e}", path.display())))?;
    log::info!("saved {}x{} snapshot to {}", img.width(), img.height(), path.display());
    Ok(path)
}

/// Keep ASCII letters, digits, `_` and `-`; everything else becomes `_`.
pub fn sanitize(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
        .collect();
    if cleaned.is_empty() { "artwork".to_string() } else { cleaned }
}

fn unique_path(dir: &Path, stem: &str) -> PathBuf {
    let first = dir.join(format!("{stem}.png"));
    if !first.exists() {
        return first;
    }
    (1..)
        .map(|n| dir.join(format!("{stem}_{n}.png")))
        .find(|p| !p.exists())
        .unwrap_or(first)
}
