//! Fixed-resolution Cairo bitmap the page is drawn on.

use super::color::{Color, WHITE};
use super::style::StrokeStyle;
use crate::history::HistoryEntry;
use crate::util::Point;
use std::fs::File;
use std::io::{BufWriter, Cursor};
use std::path::Path;
use thiserror::Error;

/// Pixel dimensions of the drawable page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSize {
    pub width: u32,
    pub height: u32,
}

impl PageSize {
    /// A4 at 300 DPI.
    pub const A4_300_DPI: PageSize = PageSize {
        width: 2480,
        height: 3508,
    };

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::A4_300_DPI
    }
}

/// Compositing used when painting a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintMode {
    /// Paint the stroke color over existing content
    Draw,
    /// Remove existing content along the segment (destination-out)
    Erase,
}

/// Errors raised by Cairo while drawing or (de)serializing the page.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("PNG encoding error: {0}")]
    Png(#[from] cairo::IoError),

    #[error("Failed to write page image: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot is {actual_width}x{actual_height}, page is {expected_width}x{expected_height}")]
    SizeMismatch {
        expected_width: i32,
        expected_height: i32,
        actual_width: i32,
        actual_height: i32,
    },

    #[error("Page size {0}x{1} is not supported")]
    InvalidSize(u32, u32),
}

/// The drawable page bitmap plus its persistent stroke style.
///
/// The bitmap resolution is fixed at creation and independent of how large
/// the page appears on screen.
pub struct RenderSurface {
    surface: cairo::ImageSurface,
    size: PageSize,
    style: StrokeStyle,
}

impl RenderSurface {
    /// Allocates the bitmap and fills it with opaque white.
    pub fn new(size: PageSize) -> Result<Self, SurfaceError> {
        let width = i32::try_from(size.width)
            .map_err(|_| SurfaceError::InvalidSize(size.width, size.height))?;
        let height = i32::try_from(size.height)
            .map_err(|_| SurfaceError::InvalidSize(size.width, size.height))?;
        if width == 0 || height == 0 {
            return Err(SurfaceError::InvalidSize(size.width, size.height));
        }

        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height)?;
        let mut render = Self {
            surface,
            size,
            style: StrokeStyle::default(),
        };
        render.fill_blank()?;

        log::debug!("Created {}x{} render surface", size.width, size.height);
        Ok(render)
    }

    pub fn size(&self) -> PageSize {
        self.size
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    /// Replaces the persistent stroke style used by subsequent paints.
    pub fn apply_style(&mut self, style: StrokeStyle) {
        self.style = style;
    }

    /// Covers the whole page with opaque white.
    pub fn fill_blank(&mut self) -> Result<(), SurfaceError> {
        let ctx = cairo::Context::new(&self.surface)?;
        ctx.set_operator(cairo::Operator::Source);
        ctx.set_source_rgba(WHITE.r, WHITE.g, WHITE.b, WHITE.a);
        ctx.paint()?;
        Ok(())
    }

    /// Draws one line segment with the current style.
    ///
    /// In [`PaintMode::Erase`] the pixels under the segment become fully
    /// transparent instead of taking the stroke color.
    pub fn paint_segment(
        &mut self,
        from: Point,
        to: Point,
        mode: PaintMode,
    ) -> Result<(), SurfaceError> {
        let ctx = cairo::Context::new(&self.surface)?;
        ctx.set_line_cap(cairo::LineCap::Round);
        ctx.set_line_join(cairo::LineJoin::Round);

        match mode {
            PaintMode::Draw => {
                if let Some(glow) = self.style.glow {
                    stroke_segment(&ctx, from, to, glow.color, self.style.width + glow.width * 2.0)?;
                }
                stroke_segment(&ctx, from, to, self.style.color, self.style.width)?;
            }
            PaintMode::Erase => {
                ctx.set_operator(cairo::Operator::DestOut);
                // Only source alpha matters for destination-out.
                stroke_segment(&ctx, from, to, Color::new(0.0, 0.0, 0.0, 1.0), self.style.width)?;
            }
        }

        Ok(())
    }

    /// Serializes the current pixels into a history entry.
    pub fn snapshot(&self) -> Result<HistoryEntry, SurfaceError> {
        self.surface.flush();
        let mut bytes = Vec::new();
        self.surface.write_to_png(&mut bytes)?;
        Ok(HistoryEntry::from_png(bytes))
    }

    /// Replaces every pixel with the content of a snapshot.
    pub fn restore(&mut self, entry: &HistoryEntry) -> Result<(), SurfaceError> {
        let mut reader = Cursor::new(entry.as_bytes());
        let decoded = cairo::ImageSurface::create_from_png(&mut reader)?;

        if decoded.width() != self.surface.width() || decoded.height() != self.surface.height() {
            return Err(SurfaceError::SizeMismatch {
                expected_width: self.surface.width(),
                expected_height: self.surface.height(),
                actual_width: decoded.width(),
                actual_height: decoded.height(),
            });
        }

        let ctx = cairo::Context::new(&self.surface)?;
        ctx.set_operator(cairo::Operator::Source);
        ctx.set_source_surface(&decoded, 0.0, 0.0)?;
        ctx.paint()?;
        Ok(())
    }

    /// Writes the current page to a PNG file.
    pub fn write_png(&self, path: &Path) -> Result<(), SurfaceError> {
        self.surface.flush();
        let mut writer = BufWriter::new(File::create(path)?);
        self.surface.write_to_png(&mut writer)?;
        log::info!("Wrote page image to {}", path.display());
        Ok(())
    }

    /// Reads one pixel as straight (non-premultiplied) RGBA bytes.
    ///
    /// Returns `None` outside the page or while the bitmap is borrowed.
    pub fn pixel_at(&mut self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }

        self.surface.flush();
        let stride = self.surface.stride() as usize;
        let data = self.surface.data().ok()?;
        let offset = y as usize * stride + x as usize * 4;
        let word = u32::from_ne_bytes(data.get(offset..offset + 4)?.try_into().ok()?);

        let a = (word >> 24) as u8;
        let unpremultiply = |channel: u32| -> u8 {
            if a == 0 {
                0
            } else {
                ((channel & 0xff) * 255 / a as u32).min(255) as u8
            }
        };
        Some([
            unpremultiply(word >> 16),
            unpremultiply(word >> 8),
            unpremultiply(word),
            a,
        ])
    }
}

fn stroke_segment(
    ctx: &cairo::Context,
    from: Point,
    to: Point,
    color: Color,
    width: f64,
) -> Result<(), SurfaceError> {
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    ctx.set_line_width(width);
    ctx.move_to(from.x, from.y);
    ctx.line_to(to.x, to.y);
    ctx.stroke()?;
    Ok(())
}
