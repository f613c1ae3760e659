//! In-memory, render-ready image representation.
//!
//! Fetched bytes are decoded up front and premultiplied; holding the fully
//! decoded pixels is what guarantees the compositor never rasterizes
//! against a half-loaded image.
use image::RgbaImage;

/// A decoded image with premultiplied alpha, ready for compositing.
#[derive(Debug, Clone)]
pub struct EmbeddableImage {
    rgba: RgbaImage,
}

impl EmbeddableImage {
    /// Decode raw encoded bytes (PNG, JPEG, ...) into a premultiplied
    /// RGBA image. Fails on non-image content.
    pub fn decode(bytes: &[u8]) -> Result<Self, image::ImageError> {
        let decoded = image::load_from_memory(bytes)?;
        let mut rgba = decoded.to_rgba8();
        premultiply_rgba8_in_place(&mut rgba);
        Ok(EmbeddableImage { rgba })
    }

    pub fn width(&self) -> u32 {
        self.rgba.width()
    }

    pub fn height(&self) -> u32 {
        self.rgba.height()
    }

    /// Bilinear sample at continuous pixel coordinates, clamped to the
    /// image edges. Returns a premultiplied RGBA pixel.
    pub(crate) fn sample_bilinear(&self, sx: f32, sy: f32) -> [u8; 4] {
        let max_x = (self.width() - 1) as f32;
        let max_y = (self.height() - 1) as f32;

        let x = (sx - 0.5).clamp(0.0, max_x);
        let y = (sy - 0.5).clamp(0.0, max_y);

        let x0 = x.floor() as u32;
        let y0 = y.floor() as u32;
        let x1 = (x0 + 1).min(self.width() - 1);
        let y1 = (y0 + 1).min(self.height() - 1);
        let tx = x - x0 as f32;
        let ty = y - y0 as f32;

        let p00 = self.rgba.get_pixel(x0, y0).0;
        let p10 = self.rgba.get_pixel(x1, y0).0;
        let p01 = self.rgba.get_pixel(x0, y1).0;
        let p11 = self.rgba.get_pixel(x1, y1).0;

        let mut out = [0u8; 4];
        for i in 0..4 {
            let top = p00[i] as f32 + (p10[i] as f32 - p00[i] as f32) * tx;
            let bottom = p01[i] as f32 + (p11[i] as f32 - p01[i] as f32) * tx;
            out[i] = (top + (bottom - top) * ty).round().clamp(0.0, 255.0) as u8;
        }
        out
    }

    #[cfg(test)]
    pub(crate) fn from_rgba_for_tests(rgba: RgbaImage) -> Self {
        let mut rgba = rgba;
        premultiply_rgba8_in_place(&mut rgba);
        EmbeddableImage { rgba }
    }
}

fn premultiply_rgba8_in_place(rgba: &mut RgbaImage) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        if a == 255 {
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}
