use std::path::Path;
use std::sync::Arc;

use crate::foundation::core::Color;
use crate::foundation::error::{VizError, VizResult};
use crate::scene::shape::Scene;

/// A rasterized frame as straight-alpha RGBA8 pixels, row-major.
#[derive(Clone, Debug)]
pub struct FrameRgba {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

#[derive(Clone, Debug)]
pub struct RasterOpts {
    /// Physical pixels per logical pixel.
    pub pixel_ratio: f32,
    /// Opaque backdrop; `None` keeps transparency.
    pub background: Option<Color>,
}

impl Default for RasterOpts {
    fn default() -> Self {
        Self {
            pixel_ratio: 1.0,
            background: Some(Color::WHITE),
        }
    }
}

/// Rasterize a scene through `usvg`/`resvg`.
#[tracing::instrument(skip(scene), fields(shapes = scene.shape_count()))]
pub fn rasterize(scene: &Scene, opts: &RasterOpts) -> VizResult<FrameRgba> {
    let ratio = opts.pixel_ratio;
    if !(ratio.is_finite() && ratio > 0.0) {
        return Err(VizError::validation("pixel_ratio must be > 0"));
    }

    let width = ((scene.canvas.width as f32) * ratio).ceil().max(1.0) as u32;
    let height = ((scene.canvas.height as f32) * ratio).ceil().max(1.0) as u32;
    const MAX_DIM: u32 = 16_384;
    if width > MAX_DIM || height > MAX_DIM {
        return Err(VizError::render(format!(
            "raster size too large: {width}x{height} (max {MAX_DIM}x{MAX_DIM})"
        )));
    }

    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    let usvg_opts = usvg::Options {
        fontdb: Arc::new(db),
        ..Default::default()
    };
    let svg = scene.to_svg();
    let tree = usvg::Tree::from_str(&svg, &usvg_opts)
        .map_err(|e| VizError::render(format!("parse svg tree: {e}")))?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| VizError::render("failed to allocate pixmap"))?;
    if let Some(bg) = opts.background {
        pixmap.fill(resvg::tiny_skia::Color::from_rgba8(bg.r, bg.g, bg.b, 255));
    }

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(sx, sy),
        &mut pixmap.as_mut(),
    );

    let mut data = pixmap.take();
    demultiply_rgba8_in_place(&mut data);
    Ok(FrameRgba {
        width,
        height,
        data,
    })
}

impl FrameRgba {
    pub fn save_png(&self, path: impl AsRef<Path>) -> VizResult<()> {
        let path = path.as_ref();
        image::save_buffer_with_format(
            path,
            &self.data,
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .map_err(|e| VizError::render(format!("write png '{}': {e}", path.display())))
    }
}

fn demultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}
