use std::path::Path;

use anyhow::Context;

use crate::{
    foundation::error::{DissolveError, DissolveResult},
    surface::{PixelBuffer, PixelSurface},
};

/// Decode any format the `image` crate knows into straight RGBA8.
pub fn decode_image(bytes: &[u8]) -> DissolveResult<PixelBuffer> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(PixelBuffer::from_rgba_image(dyn_img.to_rgba8()))
}

/// Read and decode an image file into straight RGBA8.
pub fn load_image(path: &Path) -> DissolveResult<PixelBuffer> {
    let dyn_img = image::open(path).with_context(|| format!("open image '{}'", path.display()))?;
    Ok(PixelBuffer::from_rgba_image(dyn_img.to_rgba8()))
}

/// Load the two endpoints of a transition, which must share dimensions.
pub fn load_image_pair(from: &Path, to: &Path) -> DissolveResult<(PixelBuffer, PixelBuffer)> {
    let a = load_image(from)?;
    let b = load_image(to)?;
    if a.dimensions() != b.dimensions() {
        return Err(DissolveError::buffer_mismatch(format!(
            "images must be the same size: '{}' is {}x{}, '{}' is {}x{}",
            from.display(),
            a.width(),
            a.height(),
            to.display(),
            b.width(),
            b.height()
        )));
    }
    Ok((a, b))
}

/// Create the parent directory of `path` if needed.
pub fn ensure_parent_dir(path: &Path) -> DissolveResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Write a 1, 3 or 4 byte-per-pixel buffer as PNG.
pub fn write_png(path: &Path, buf: &PixelBuffer) -> DissolveResult<()> {
    let color = match buf.bytes_per_pixel() {
        1 => image::ColorType::L8,
        3 => image::ColorType::Rgb8,
        4 => image::ColorType::Rgba8,
        n => {
            return Err(DissolveError::validation(format!(
                "cannot write {n}-byte pixels as png"
            )));
        }
    };
    ensure_parent_dir(path)?;
    image::save_buffer_with_format(
        path,
        buf.data(),
        buf.width(),
        buf.height(),
        color,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/surface/assets.rs"]
mod tests;
