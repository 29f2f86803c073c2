use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::{CarnetError, CarnetResult};

/// MIME type used for SVG sources; decoded through `usvg`/`resvg` instead of `image`.
pub const SVG_MIME: &str = "image/svg+xml";

// SVGs are rasterized at their intrinsic size, capped so a hostile viewBox cannot allocate
// unbounded memory.
const MAX_SVG_EDGE: u32 = 4096;

/// Fully decoded raster image in premultiplied RGBA8 form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl DecodedImage {
    /// Wrap already premultiplied RGBA8 pixels.
    pub fn from_premul(width: u32, height: u32, rgba8_premul: Vec<u8>) -> CarnetResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| CarnetError::decode("image buffer size overflow"))?;
        if width == 0 || height == 0 || rgba8_premul.len() != expected {
            return Err(CarnetError::decode(format!(
                "image buffer for {width}x{height} has {} bytes",
                rgba8_premul.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }

    /// Build an image from straight-alpha RGBA8 pixels.
    pub fn from_straight(width: u32, height: u32, mut rgba8: Vec<u8>) -> CarnetResult<Self> {
        premultiply_rgba8_in_place(&mut rgba8);
        Self::from_premul(width, height, rgba8)
    }
}

/// Decode `bytes` according to `mime`: SVG through `usvg`, everything else through `image`.
pub fn decode_for_mime(bytes: &[u8], mime: &str) -> CarnetResult<DecodedImage> {
    if mime.eq_ignore_ascii_case(SVG_MIME) {
        decode_svg(bytes)
    } else {
        decode_image(bytes)
    }
}

/// Decode encoded raster bytes (PNG, JPEG, GIF, WebP, ...) and convert to premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> CarnetResult<DecodedImage> {
    let dyn_img = image::load_from_memory(bytes)
        .context("decode image from memory")
        .map_err(|e| CarnetError::decode(format!("{e:#}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    DecodedImage::from_straight(width, height, rgba.into_raw())
}

/// Parse SVG bytes and rasterize them at their intrinsic size.
pub fn decode_svg(bytes: &[u8]) -> CarnetResult<DecodedImage> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts)
        .map_err(|e| CarnetError::decode(format!("parse svg tree: {e}")))?;

    let size = tree.size();
    let to_px = |v: f32| -> CarnetResult<u32> {
        if !v.is_finite() || v <= 0.0 {
            return Err(CarnetError::decode("svg has invalid width/height"));
        }
        Ok((v.ceil() as u32).clamp(1, MAX_SVG_EDGE))
    };
    let width = to_px(size.width())?;
    let height = to_px(size.height())?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| CarnetError::decode("failed to allocate svg pixmap"))?;
    let sx = (width as f32) / size.width();
    let sy = (height as f32) / size.height();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(sx, sy),
        &mut pixmap.as_mut(),
    );

    // tiny-skia pixmaps are already premultiplied RGBA8.
    DecodedImage::from_premul(width, height, pixmap.data().to_vec())
}

/// Guess a MIME type from a file extension. Unknown extensions map to
/// `application/octet-stream` so the `image/*` check rejects them.
pub fn mime_for_path(path: &Path) -> &'static str {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return "application/octet-stream";
    };
    if ext.eq_ignore_ascii_case("svg") {
        return SVG_MIME;
    }
    match image::ImageFormat::from_extension(ext) {
        Some(fmt) => fmt.to_mime_type(),
        None => "application/octet-stream",
    }
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
