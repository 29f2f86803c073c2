use std::path::{Component, Path, PathBuf};

use image::ImageEncoder as _;

use crate::foundation::error::{CarnetError, CarnetResult};
use crate::render::surface::CardSurface;

/// File name used when the name field is empty.
pub const DEFAULT_EXPORT_NAME: &str = "carnet.png";

/// `carnet-<name>.png` with each whitespace run turned into `-` and the name lowercased.
///
/// Non-ASCII characters are kept as-is (`"Ana López"` -> `carnet-ana-lópez.png`). Path
/// separators become `-` so the result is always a single file name.
pub fn export_filename(name: &str) -> String {
    if name.is_empty() {
        return DEFAULT_EXPORT_NAME.to_string();
    }
    let mut slug = String::with_capacity(name.len());
    let mut in_space = false;
    for c in name.chars() {
        if c.is_whitespace() {
            if !in_space {
                slug.push('-');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        slug.push(if matches!(c, '/' | '\\') { '-' } else { c });
    }
    // Whole-string lowercasing keeps context rules such as the final sigma.
    format!("carnet-{}.png", slug.to_lowercase())
}

/// Encode the surface as an RGBA8 PNG.
pub fn encode_png(surface: &CardSurface) -> CarnetResult<Vec<u8>> {
    let rgba = surface.to_straight_rgba8();
    let mut out = Vec::new();
    image::codecs::png::PngEncoder::new(&mut out)
        .write_image(
            &rgba,
            surface.width(),
            surface.height(),
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| CarnetError::export(format!("png encode failed: {e}")))?;
    Ok(out)
}

/// Write the surface to `dir/filename`, creating `dir` when missing.
pub fn save_png(surface: &CardSurface, dir: &Path, filename: &str) -> CarnetResult<PathBuf> {
    let mut components = Path::new(filename).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => {}
        _ => {
            return Err(CarnetError::export(format!(
                "export file name '{filename}' must be a plain file name"
            )));
        }
    }

    let bytes = encode_png(surface)?;
    std::fs::create_dir_all(dir).map_err(|e| {
        CarnetError::export(format!("create output dir '{}': {e}", dir.display()))
    })?;
    let path = dir.join(filename);
    std::fs::write(&path, bytes)
        .map_err(|e| CarnetError::export(format!("write png '{}': {e}", path.display())))?;
    tracing::info!(path = %path.display(), "card exported");
    Ok(path)
}

#[cfg(test)]
#[path = "../../tests/unit/export/png.rs"]
mod tests;
