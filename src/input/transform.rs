//! Device-to-canvas coordinate mapping.
//!
//! The page bitmap is shown inside a viewport rectangle, shifted by the pan
//! offset (screen pixels) and magnified by the zoom factor. Pointer events
//! arrive in device coordinates and have to be mapped back into bitmap pixels.

use crate::draw::PageSize;
use crate::util::Point;
use serde::{Deserialize, Serialize};

/// On-screen placement and display size of the page element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewportRect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// A viewport that shows the page at one device pixel per bitmap pixel.
    pub fn native(page: PageSize) -> Self {
        Self::new(0.0, 0.0, page.width as f64, page.height as f64)
    }

    /// Bitmap pixels per displayed pixel on each axis.
    ///
    /// A degenerate axis (zero or negative display size) uses a scale of 1.
    pub fn pixel_scale(&self, page: PageSize) -> (f64, f64) {
        let axis = |canvas: u32, display: f64| {
            if display > 0.0 {
                canvas as f64 / display
            } else {
                1.0
            }
        };
        (axis(page.width, self.width), axis(page.height, self.height))
    }
}

/// Pan offset in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PanOffset {
    pub x: f64,
    pub y: f64,
}

impl PanOffset {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Maps a device coordinate to canvas space.
///
/// The viewport origin and pan offset are removed first, then the result is
/// scaled from display pixels to bitmap pixels and divided by the zoom.
pub fn to_canvas_point(
    device_x: f64,
    device_y: f64,
    viewport: &ViewportRect,
    pan: PanOffset,
    zoom: f64,
    page: PageSize,
) -> Point {
    let (scale_x, scale_y) = viewport.pixel_scale(page);
    Point {
        x: (device_x - viewport.left - pan.x) * scale_x / zoom,
        y: (device_y - viewport.top - pan.y) * scale_y / zoom,
    }
}

/// Projects a canvas point back to device coordinates.
///
/// Exact inverse of [`to_canvas_point`] for the same view parameters.
pub fn to_screen_point(
    point: Point,
    viewport: &ViewportRect,
    pan: PanOffset,
    zoom: f64,
    page: PageSize,
) -> (f64, f64) {
    let (scale_x, scale_y) = viewport.pixel_scale(page);
    (
        point.x * zoom / scale_x + viewport.left + pan.x,
        point.y * zoom / scale_y + viewport.top + pan.y,
    )
}
