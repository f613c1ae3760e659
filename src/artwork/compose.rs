//! Deterministic compositing of fetched artwork into the fixed frame.
//!
//! The frame design is a 800x800 logical canvas rendered at 50% scale, so
//! the raster output is 400x400. The artwork is cover-fitted into a square
//! sub-region rotated clockwise about its own center, between the base
//! template and a full-canvas decorative overlay. Geometry and layering are
//! pure functions of the inputs: identical inputs produce bit-identical
//! artifacts.
use std::io::Cursor;

use base64::{engine::general_purpose, Engine as _};
use image::RgbaImage;

use super::embed::EmbeddableImage;
use crate::error::{AppError, AppResult};

/// Raster output size in pixels.
pub const OUTPUT_SIZE: u32 = 400;

/// Suggested download filename carried by every artifact.
pub const ARTIFACT_FILENAME: &str = "Nanacita.png";

// Artwork placement as fractions of the canvas, from the frame design.
const ART_SIZE_FRAC: f32 = 0.4901;
const ART_LEFT_FRAC: f32 = 0.4365;
const ART_TOP_FRAC: f32 = 0.1690;
const ART_ROTATION_DEG: f32 = 14.6;

/// The two fixed decorative layers surrounding the artwork.
pub struct FrameTemplate {
    base: EmbeddableImage,
    overlay: EmbeddableImage,
}

impl FrameTemplate {
    /// Build a template from already-decoded layers.
    pub fn new(base: EmbeddableImage, overlay: EmbeddableImage) -> Self {
        FrameTemplate { base, overlay }
    }

    /// Read and decode the two fixed layers from disk paths.
    pub fn load(base_path: &str, overlay_path: &str) -> AppResult<Self> {
        let base = load_layer(base_path)?;
        let overlay = load_layer(overlay_path)?;
        Ok(FrameTemplate { base, overlay })
    }
}

fn load_layer(path: &str) -> AppResult<EmbeddableImage> {
    let bytes = std::fs::read(path)
        .map_err(|e| AppError::Render(format!("cannot read template layer {}: {}", path, e)))?;
    EmbeddableImage::decode(&bytes)
        .map_err(|e| AppError::Render(format!("cannot decode template layer {}: {}", path, e)))
}

/// The final flattened raster, encoded as a PNG data URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeArtifact {
    pub data_uri: String,
    pub filename: String,
}

impl CompositeArtifact {
    /// Raw PNG bytes recovered from the data URI, for disk writes.
    pub fn png_bytes(&self) -> AppResult<Vec<u8>> {
        let payload = self
            .data_uri
            .strip_prefix("data:image/png;base64,")
            .ok_or_else(|| AppError::Render("artifact is not a png data uri".to_string()))?;
        general_purpose::STANDARD
            .decode(payload)
            .map_err(|e| AppError::Render(e.to_string()))
    }
}

/// Flatten base, artwork, and overlay into one raster artifact.
pub fn compose(template: &FrameTemplate, art: &EmbeddableImage) -> AppResult<CompositeArtifact> {
    let size = OUTPUT_SIZE;
    let mut canvas = RgbaImage::new(size, size);

    let full = Region {
        left: 0.0,
        top: 0.0,
        width: size as f32,
        height: size as f32,
        rotation_deg: 0.0,
    };
    let art_region = Region {
        left: ART_LEFT_FRAC * size as f32,
        top: ART_TOP_FRAC * size as f32,
        width: ART_SIZE_FRAC * size as f32,
        height: ART_SIZE_FRAC * size as f32,
        rotation_deg: ART_ROTATION_DEG,
    };

    draw_layer(&mut canvas, &template.base, &full);
    draw_layer(&mut canvas, art, &art_region);
    draw_layer(&mut canvas, &template.overlay, &full);

    encode_artifact(canvas)
}

struct Region {
    left: f32,
    top: f32,
    width: f32,
    height: f32,
    rotation_deg: f32,
}

/// Cover-fit `layer` into `region` (rotated clockwise about the region
/// center) and blend it over the canvas.
fn draw_layer(canvas: &mut RgbaImage, layer: &EmbeddableImage, region: &Region) {
    let center_x = region.left + region.width / 2.0;
    let center_y = region.top + region.height / 2.0;
    let (sin, cos) = region.rotation_deg.to_radians().sin_cos();

    // Cover fit: region pixels per source pixel, overflow cropped centered.
    let scale = (region.width / layer.width() as f32).max(region.height / layer.height() as f32);
    let half_w = region.width / 2.0;
    let half_h = region.height / 2.0;
    let src_cx = layer.width() as f32 / 2.0;
    let src_cy = layer.height() as f32 / 2.0;

    for py in 0..canvas.height() {
        for px in 0..canvas.width() {
            let dx = px as f32 + 0.5 - center_x;
            let dy = py as f32 + 0.5 - center_y;

            // Inverse of the clockwise rotation about the region center.
            let lx = dx * cos + dy * sin;
            let ly = -dx * sin + dy * cos;
            if lx < -half_w || lx > half_w || ly < -half_h || ly > half_h {
                continue;
            }

            let src = layer.sample_bilinear(lx / scale + src_cx, ly / scale + src_cy);
            let dst = canvas.get_pixel_mut(px, py);
            dst.0 = over(dst.0, src);
        }
    }
}

/// Source-over blend of two premultiplied RGBA pixels.
fn over(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    if src[3] == 0 {
        return dst;
    }
    if src[3] == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255(u16::from(dst[i]), inv));
    }
    out
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

fn encode_artifact(mut canvas: RgbaImage) -> AppResult<CompositeArtifact> {
    unpremultiply_rgba8_in_place(&mut canvas);

    let mut png = Vec::new();
    image::DynamicImage::ImageRgba8(canvas)
        .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .map_err(|e| AppError::Render(e.to_string()))?;

    Ok(CompositeArtifact {
        data_uri: format!("data:image/png;base64,{}", general_purpose::STANDARD.encode(&png)),
        filename: ARTIFACT_FILENAME.to_string(),
    })
}

fn unpremultiply_rgba8_in_place(rgba: &mut RgbaImage) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        for i in 0..3 {
            px[i] = ((px[i] as u16 * 255 + a / 2) / a).min(255) as u8;
        }
    }
}
