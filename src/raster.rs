use std::io::Cursor;

use egui::{Color32, Pos2, pos2};
use futures::FutureExt;
use image::{ImageFormat, Rgba, RgbaImage};

use crate::brush::LineStyle;
use crate::error::SurfaceError;
use crate::surface::{DecodeFuture, RenderTarget, Snapshot};

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// In-memory RGBA surface that snapshots itself as PNG.
///
/// Pixels are sampled at their centers without anti-aliasing. Every mutation
/// bumps [`RasterSurface::revision`] so the UI can tell when to re-upload.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    image: RgbaImage,
    revision: u64,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: blank(width, height),
            revision: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> [u32; 2] {
        [self.image.width(), self.image.height()]
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Unmultiplied RGBA at `(x, y)`, or `None` outside the surface
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.image.get_pixel_checked(x, y).map(|p| p.0)
    }

    pub fn to_png(&self) -> Result<Vec<u8>, SurfaceError> {
        let mut bytes = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(SurfaceError::Encode)?;
        Ok(bytes)
    }

    pub fn to_color_image(&self) -> egui::ColorImage {
        egui::ColorImage::from_rgba_unmultiplied(
            [self.image.width() as usize, self.image.height() as usize],
            self.image.as_raw(),
        )
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// Visits every pixel whose center lies inside the box `[min, max]`
    fn for_each_pixel_in(&mut self, min: Pos2, max: Pos2, mut visit: impl FnMut(Pos2, &mut Rgba<u8>)) {
        let (width, height) = (self.image.width() as f32, self.image.height() as f32);
        let x0 = min.x.floor().clamp(0.0, width) as u32;
        let x1 = max.x.ceil().clamp(0.0, width) as u32;
        let y0 = min.y.floor().clamp(0.0, height) as u32;
        let y1 = max.y.ceil().clamp(0.0, height) as u32;

        for y in y0..y1 {
            for x in x0..x1 {
                let center = pos2(x as f32 + 0.5, y as f32 + 0.5);
                visit(center, self.image.get_pixel_mut(x, y));
            }
        }
    }
}

fn blank(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, TRANSPARENT)
}

fn decode_png(bytes: &[u8], expected: [u32; 2]) -> Result<RgbaImage, SurfaceError> {
    let image = image::load_from_memory_with_format(bytes, ImageFormat::Png)
        .map_err(SurfaceError::Decode)?
        .to_rgba8();
    let found = [image.width(), image.height()];
    if found != expected {
        return Err(SurfaceError::SizeMismatch { expected, found });
    }
    Ok(image)
}

/// Source-over compositing of `src` (scaled by `alpha`) onto `dst`, both unmultiplied
fn blend(dst: &mut Rgba<u8>, src: Color32, alpha: f32) {
    let src = src.to_srgba_unmultiplied();
    let src_a = (src[3] as f32 / 255.0) * alpha.clamp(0.0, 1.0);
    if src_a <= 0.0 {
        return;
    }
    let dst_a = dst[3] as f32 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    for channel in 0..3 {
        let value =
            (src[channel] as f32 * src_a + dst[channel] as f32 * dst_a * (1.0 - src_a)) / out_a;
        dst[channel] = value.round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
}

impl RenderTarget for RasterSurface {
    type Decoded = RgbaImage;

    fn encode_snapshot(&self) -> Result<Snapshot, SurfaceError> {
        Ok(Snapshot::new(self.to_png()?))
    }

    fn decode_snapshot(&self, snapshot: &Snapshot) -> DecodeFuture<RgbaImage> {
        let bytes = snapshot.shared_bytes();
        let expected = self.dimensions();
        async move { decode_png(&bytes, expected) }.boxed_local()
    }

    fn draw_decoded(&mut self, decoded: RgbaImage) {
        self.image = decoded;
        self.touch();
    }

    fn clear(&mut self) {
        self.image = blank(self.image.width(), self.image.height());
        self.touch();
    }

    /// Butt-capped segment; a dash pattern restarts at `from`
    fn draw_line(&mut self, from: Pos2, to: Pos2, style: &LineStyle) {
        let delta = to - from;
        let length = delta.length();
        let half_width = style.width / 2.0;
        if length <= f32::EPSILON || half_width <= 0.0 || style.alpha <= 0.0 {
            return;
        }
        let direction = delta / length;
        let min = pos2(from.x.min(to.x) - half_width, from.y.min(to.y) - half_width);
        let max = pos2(from.x.max(to.x) + half_width, from.y.max(to.y) + half_width);

        self.for_each_pixel_in(min, max, |center, pixel| {
            let offset = center - from;
            let along = offset.dot(direction);
            if along < 0.0 || along > length {
                return;
            }
            let across = (offset.x * direction.y - offset.y * direction.x).abs();
            if across > half_width {
                return;
            }
            if let Some(dash) = style.dash {
                if !dash.is_on(along) {
                    return;
                }
            }
            blend(pixel, style.color, style.alpha);
        });
        self.touch();
    }

    fn fill_rect(&mut self, center: Pos2, size: f32, color: Color32) {
        if size <= 0.0 {
            return;
        }
        let half = size / 2.0;
        let min = pos2(center.x - half, center.y - half);
        let max = pos2(center.x + half, center.y + half);

        self.for_each_pixel_in(min, max, |p, pixel| {
            if p.x >= min.x && p.x < max.x && p.y >= min.y && p.y < max.y {
                blend(pixel, color, 1.0);
            }
        });
        self.touch();
    }

    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32, alpha: f32) {
        if radius <= 0.0 {
            return;
        }
        let min = pos2(center.x - radius, center.y - radius);
        let max = pos2(center.x + radius, center.y + radius);

        self.for_each_pixel_in(min, max, |p, pixel| {
            if (p - center).length() <= radius {
                blend(pixel, color, alpha);
            }
        });
        self.touch();
    }
}
