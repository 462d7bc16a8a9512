use crate::CaptureError;

/// Row order of a source pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOrder {
    /// First row is the top of the image (wgpu readback, image files).
    TopDown,
    /// First row is the bottom of the image (GL-style framebuffers).
    BottomUp,
}

/// Tightly packed 8-bit RGB image, always stored top-down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Frame {
    /// Wrap `pixels` (3 bytes per pixel, no padding), flipping bottom-up input.
    pub fn new(
        width: u32,
        height: u32,
        mut pixels: Vec<u8>,
        order: RowOrder,
    ) -> Result<Self, CaptureError> {
        if width == 0 || height == 0 {
            return Err(CaptureError::Empty { width, height });
        }
        let expected = width as usize * height as usize * 3;
        if pixels.len() != expected {
            return Err(CaptureError::LengthMismatch {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        if order == RowOrder::BottomUp {
            flip_rows(&mut pixels, width as usize * 3);
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row `y` counted from the top.
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.width as usize * 3;
        let start = y as usize * stride;
        &self.pixels[start..start + stride]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.pixels.chunks_exact(self.width as usize * 3)
    }
}

fn flip_rows(pixels: &mut [u8], stride: usize) {
    let rows = pixels.len() / stride;
    for y in 0..rows / 2 {
        let (upper, lower) = pixels.split_at_mut((rows - 1 - y) * stride);
        upper[y * stride..(y + 1) * stride].swap_with_slice(&mut lower[..stride]);
    }
}
