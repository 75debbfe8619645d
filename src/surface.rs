use crate::{
    foundation::core::{Coord, Domain},
    foundation::error::{DissolveError, DissolveResult},
};

/// A pixel grid the transition can copy between.
///
/// The pixel format is opaque: a pixel is `bytes_per_pixel` raw bytes and is
/// only ever copied whole.
pub trait PixelSurface {
    /// `(width, height)` in pixels.
    fn dimensions(&self) -> (u32, u32);

    /// Size of one pixel in bytes.
    fn bytes_per_pixel(&self) -> usize;

    /// Length of the backing pixel storage in bytes.
    ///
    /// Must equal `width * height * bytes_per_pixel` for the surface to bind.
    fn byte_len(&self) -> usize;

    /// Copy the pixel at `c` from `src`. Both surfaces must share dimensions and format.
    fn copy_pixel_from(&mut self, src: &Self, c: Coord);

    /// Overwrite every pixel with `src`'s. Both surfaces must share dimensions and format.
    fn copy_all_from(&mut self, src: &Self);
}

/// Owned, tightly packed, row-major pixel buffer of any format.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    bytes_per_pixel: usize,
    // Always `width * height * bytes_per_pixel` long.
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Zero-filled buffer.
    pub fn new(width: u32, height: u32, bytes_per_pixel: usize) -> DissolveResult<Self> {
        let len = buffer_len(width, height, bytes_per_pixel)?;
        Ok(Self {
            width,
            height,
            bytes_per_pixel,
            data: vec![0; len],
        })
    }

    /// Wrap existing bytes, checking the length against the dimensions.
    pub fn from_raw(
        width: u32,
        height: u32,
        bytes_per_pixel: usize,
        data: Vec<u8>,
    ) -> DissolveResult<Self> {
        let len = buffer_len(width, height, bytes_per_pixel)?;
        if data.len() != len {
            return Err(DissolveError::buffer_mismatch(format!(
                "{width}x{height}x{bytes_per_pixel} expects {len} bytes, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            bytes_per_pixel,
            data,
        })
    }

    /// Buffer with every pixel set to `pixel`.
    pub fn filled(width: u32, height: u32, pixel: &[u8]) -> DissolveResult<Self> {
        let mut buf = Self::new(width, height, pixel.len())?;
        for px in buf.data.chunks_exact_mut(pixel.len()) {
            px.copy_from_slice(pixel);
        }
        Ok(buf)
    }

    /// Straight RGBA8 copy of a decoded image.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            bytes_per_pixel: 4,
            data: img.into_raw(),
        }
    }

    /// Convert back into an `image` buffer; only 4-byte pixels qualify.
    pub fn into_rgba_image(self) -> DissolveResult<image::RgbaImage> {
        if self.bytes_per_pixel != 4 {
            return Err(DissolveError::buffer_mismatch(format!(
                "rgba8 image needs 4 bytes per pixel, got {}",
                self.bytes_per_pixel
            )));
        }
        image::RgbaImage::from_raw(self.width, self.height, self.data)
            .ok_or_else(|| DissolveError::buffer_mismatch("rgba8 buffer length mismatch"))
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw row-major pixel bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw pixel bytes. The length is fixed.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Give up the buffer, returning its raw bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Bytes of the pixel at `c`.
    pub fn pixel(&self, c: Coord) -> &[u8] {
        let start = self.byte_offset(c);
        &self.data[start..start + self.bytes_per_pixel]
    }

    /// Mutable bytes of the pixel at `c`.
    pub fn pixel_mut(&mut self, c: Coord) -> &mut [u8] {
        let start = self.byte_offset(c);
        let bpp = self.bytes_per_pixel;
        &mut self.data[start..start + bpp]
    }

    fn byte_offset(&self, c: Coord) -> usize {
        let grid = Domain {
            width: self.width,
            height: self.height,
        };
        grid.offset_of(c) * self.bytes_per_pixel
    }
}

fn buffer_len(width: u32, height: u32, bytes_per_pixel: usize) -> DissolveResult<usize> {
    if bytes_per_pixel == 0 {
        return Err(DissolveError::buffer_mismatch("bytes_per_pixel must be > 0"));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(bytes_per_pixel))
        .ok_or_else(|| DissolveError::buffer_mismatch("buffer size overflows usize"))
}

impl PixelSurface for PixelBuffer {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn bytes_per_pixel(&self) -> usize {
        self.bytes_per_pixel
    }

    fn byte_len(&self) -> usize {
        self.data.len()
    }

    fn copy_pixel_from(&mut self, src: &Self, c: Coord) {
        let start = self.byte_offset(c);
        let end = start + self.bytes_per_pixel;
        self.data[start..end].copy_from_slice(&src.data[start..end]);
    }

    fn copy_all_from(&mut self, src: &Self) {
        self.data.copy_from_slice(&src.data);
    }
}

impl PixelSurface for image::RgbaImage {
    fn dimensions(&self) -> (u32, u32) {
        image::RgbaImage::dimensions(self)
    }

    fn bytes_per_pixel(&self) -> usize {
        4
    }

    fn byte_len(&self) -> usize {
        self.as_raw().len()
    }

    fn copy_pixel_from(&mut self, src: &Self, c: Coord) {
        self.put_pixel(c.x, c.y, *src.get_pixel(c.x, c.y));
    }

    fn copy_all_from(&mut self, src: &Self) {
        (**self).copy_from_slice(src.as_raw());
    }
}

/// Outgoing, incoming and output surfaces checked against each other.
///
/// The output is borrowed mutably for the binding's lifetime; read it through
/// [`FrameBinding::output`] between ticks.
#[derive(Debug)]
pub struct FrameBinding<'a, S: PixelSurface> {
    outgoing: &'a S,
    incoming: &'a S,
    output: &'a mut S,
    domain: Domain,
}

impl<'a, S: PixelSurface> FrameBinding<'a, S> {
    /// Bind three surfaces that agree on dimensions and pixel format.
    ///
    /// Each surface's storage must also hold exactly one pixel per grid cell.
    pub fn new(outgoing: &'a S, incoming: &'a S, output: &'a mut S) -> DissolveResult<Self> {
        let (width, height) = outgoing.dimensions();
        let bpp = outgoing.bytes_per_pixel();
        let expected = buffer_len(width, height, bpp)?;
        for (name, s) in [
            ("outgoing", outgoing),
            ("incoming", incoming),
            ("output", &*output),
        ] {
            if s.dimensions() != (width, height) {
                let (w, h) = s.dimensions();
                return Err(DissolveError::buffer_mismatch(format!(
                    "{name} is {w}x{h}, outgoing is {width}x{height}"
                )));
            }
            if s.bytes_per_pixel() != bpp {
                return Err(DissolveError::buffer_mismatch(format!(
                    "{name} has {} bytes per pixel, outgoing has {bpp}",
                    s.bytes_per_pixel()
                )));
            }
            if s.byte_len() != expected {
                return Err(DissolveError::buffer_mismatch(format!(
                    "{name} holds {} bytes, {width}x{height}x{bpp} needs {expected}",
                    s.byte_len()
                )));
            }
        }
        let domain = Domain::new(width, height)
            .map_err(|e| DissolveError::buffer_mismatch(e.to_string()))?;
        Ok(Self {
            outgoing,
            incoming,
            output,
            domain,
        })
    }

    /// Shared grid of the bound surfaces.
    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// Current composited output.
    pub fn output(&self) -> &S {
        self.output
    }

    pub(crate) fn reveal(&mut self, c: Coord) {
        self.output.copy_pixel_from(self.incoming, c);
    }

    pub(crate) fn restore_outgoing(&mut self) {
        self.output.copy_all_from(self.outgoing);
    }

    pub(crate) fn show_incoming(&mut self) {
        self.output.copy_all_from(self.incoming);
    }
}

#[cfg(test)]
#[path = "../tests/unit/surface/binding.rs"]
mod tests;
