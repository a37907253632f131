use std::sync::Arc;

use crate::foundation::error::{VideoGenError, VideoGenResult};
use crate::render::svg::to_svg;
use crate::scene::node::RenderTree;

/// Rasterizer configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterOpts {
    /// Color the canvas is cleared to before drawing (straight RGBA8).
    pub background: [u8; 4],
    /// Load the host's fonts so text nodes produce glyphs.
    pub system_fonts: bool,
}

impl Default for RasterOpts {
    fn default() -> Self {
        Self {
            background: [255, 255, 255, 255],
            system_fonts: true,
        }
    }
}

/// Rendered frame pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// RGBA of the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + x as usize) * 4;
        self.data.get(i..i + 4).map(|p| [p[0], p[1], p[2], p[3]])
    }

    /// Pixel data with straight alpha, as PNG encoders expect.
    pub fn to_straight_alpha(&self) -> Vec<u8> {
        if !self.premultiplied {
            return self.data.clone();
        }
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }
}

/// SVG rasterizer. Cheap to clone; clones share the font database.
#[derive(Clone)]
pub struct Rasterizer {
    fontdb: Arc<usvg::fontdb::Database>,
    background: [u8; 4],
}

impl std::fmt::Debug for Rasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rasterizer")
            .field("font_faces", &self.fontdb.len())
            .field("background", &self.background)
            .finish()
    }
}

impl Rasterizer {
    /// Build a rasterizer, loading fonts once.
    pub fn new(opts: &RasterOpts) -> Self {
        let mut db = usvg::fontdb::Database::new();
        if opts.system_fonts {
            db.load_system_fonts();
        }
        tracing::debug!(faces = db.len(), "font database ready");
        Self {
            fontdb: Arc::new(db),
            background: opts.background,
        }
    }

    /// Number of font faces available to text nodes.
    pub fn font_faces(&self) -> usize {
        self.fontdb.len()
    }

    /// Rasterize a render tree at its canvas size.
    pub fn render_tree(&self, tree: &RenderTree) -> VideoGenResult<FrameRGBA> {
        self.render_svg(&to_svg(tree), tree.canvas.width, tree.canvas.height)
    }

    /// Parse an SVG document against this rasterizer's fonts.
    pub fn parse_svg(&self, svg: &str) -> VideoGenResult<usvg::Tree> {
        let opts = usvg::Options {
            fontdb: Arc::clone(&self.fontdb),
            ..Default::default()
        };
        usvg::Tree::from_str(svg, &opts).map_err(|e| VideoGenError::render(format!("parse svg: {e}")))
    }

    /// Rasterize an SVG document into a `width` x `height` frame.
    pub fn render_svg(&self, svg: &str, width: u32, height: u32) -> VideoGenResult<FrameRGBA> {
        let tree = self.parse_svg(svg)?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| VideoGenError::render(format!("failed to allocate {width}x{height} pixmap")))?;
        let [r, g, b, a] = self.background;
        pixmap.fill(resvg::tiny_skia::Color::from_rgba8(r, g, b, a));

        let sx = (width as f32) / tree.size().width();
        let sy = (height as f32) / tree.size().height();
        let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);
        resvg::render(&tree, xform, &mut pixmap.as_mut());

        Ok(FrameRGBA {
            width,
            height,
            data: pixmap.take(),
            premultiplied: true,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
