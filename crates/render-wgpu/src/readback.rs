//! Copy a rendered colour texture back to the CPU as tightly packed RGB rows.

/// Errors from reading a texture back to the CPU.
#[derive(Debug, thiserror::Error)]
pub enum ReadbackError {
    #[error("unsupported colour format for readback: {0:?}")]
    UnsupportedFormat(wgpu::TextureFormat),
    #[error("buffer mapping failed: {0}")]
    Map(#[from] wgpu::BufferAsyncError),
    #[error("buffer mapping callback was dropped")]
    CallbackDropped,
}

/// Top-down RGB pixels, 3 bytes per pixel, no row padding.
#[derive(Debug, Clone)]
pub struct RgbPixels {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// Row stride of a 4-byte-per-pixel copy, padded to the copy alignment.
pub fn padded_bytes_per_row(width: u32) -> u32 {
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    (width * 4).div_ceil(align) * align
}

/// Whether the format stores blue in the first byte. `None` if the format
/// is not 8-bit, 4-channel colour.
fn channel_order(format: wgpu::TextureFormat) -> Option<bool> {
    use wgpu::TextureFormat as F;
    match format {
        F::Rgba8Unorm | F::Rgba8UnormSrgb => Some(false),
        F::Bgra8Unorm | F::Bgra8UnormSrgb => Some(true),
        _ => None,
    }
}

/// Strip row padding and alpha from 4-byte pixels, swizzling BGRA to RGB.
pub fn unpad_rows(padded: &[u8], width: u32, height: u32, padded_row: u32, bgra: bool) -> Vec<u8> {
    let mut rgb = Vec::with_capacity((width * height * 3) as usize);
    for row in 0..height {
        let start = (row * padded_row) as usize;
        let end = start + (width * 4) as usize;
        for px in padded[start..end].chunks_exact(4) {
            if bgra {
                rgb.extend_from_slice(&[px[2], px[1], px[0]]);
            } else {
                rgb.extend_from_slice(&px[..3]);
            }
        }
    }
    rgb
}

/// A pending texture-to-buffer copy.
pub struct Readback {
    buffer: wgpu::Buffer,
    width: u32,
    height: u32,
    padded_row: u32,
    bgra: bool,
}

impl Readback {
    /// Record a copy of `texture` into a mappable buffer on `encoder`.
    /// The texture needs `COPY_SRC` usage.
    pub fn encode(
        device: &wgpu::Device,
        encoder: &mut wgpu::CommandEncoder,
        texture: &wgpu::Texture,
    ) -> Result<Self, ReadbackError> {
        let format = texture.format();
        let bgra = channel_order(format).ok_or(ReadbackError::UnsupportedFormat(format))?;
        let width = texture.width();
        let height = texture.height();
        let padded_row = padded_bytes_per_row(width);

        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("capture_readback"),
            size: u64::from(padded_row) * u64::from(height),
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_row),
                    rows_per_image: Some(height),
                },
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );

        Ok(Self {
            buffer,
            width,
            height,
            padded_row,
            bgra,
        })
    }

    /// Block until the copy is done and return the pixels.
    /// The encoder holding the copy must already be submitted.
    pub fn finish(self, device: &wgpu::Device) -> Result<RgbPixels, ReadbackError> {
        let slice = self.buffer.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        let _ = device.poll(wgpu::Maintain::Wait);
        rx.recv().map_err(|_| ReadbackError::CallbackDropped)??;

        let data = {
            let mapped = slice.get_mapped_range();
            unpad_rows(&mapped, self.width, self.height, self.padded_row, self.bgra)
        };
        self.buffer.unmap();

        Ok(RgbPixels {
            width: self.width,
            height: self.height,
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_pad_to_alignment() {
        assert_eq!(padded_bytes_per_row(64), 256);
        assert_eq!(padded_bytes_per_row(65), 512);
        assert_eq!(padded_bytes_per_row(1024), 4096);
        assert_eq!(padded_bytes_per_row(1), 256);
    }

    #[test]
    fn unpad_drops_padding_and_alpha() {
        // 2x2 image, rows padded to 12 bytes
        let padded = [
            1, 2, 3, 255, 4, 5, 6, 255, 0, 0, 0, 0, //
            7, 8, 9, 255, 10, 11, 12, 255, 0, 0, 0, 0,
        ];
        let rgb = unpad_rows(&padded, 2, 2, 12, false);
        assert_eq!(rgb, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
    }

    #[test]
    fn unpad_swizzles_bgra() {
        let padded = [30, 20, 10, 255];
        assert_eq!(unpad_rows(&padded, 1, 1, 4, true), vec![10, 20, 30]);
    }

    #[test]
    fn only_8bit_colour_formats_read_back() {
        assert_eq!(channel_order(wgpu::TextureFormat::Bgra8UnormSrgb), Some(true));
        assert_eq!(channel_order(wgpu::TextureFormat::Rgba8Unorm), Some(false));
        assert_eq!(channel_order(wgpu::TextureFormat::Rgba16Float), None);
    }
}
