//! Drawing session state: tool and view settings, history and the page bitmap.

use crate::config::Config;
use crate::convert::{ConvertedText, PlaceholderConverter, TextConverter};
use crate::draw::{
    Color, PageSize, PenStyle, RenderSurface, StrokeStyle,
    color::BLACK,
    style::{MAX_BRUSH_SIZE, MIN_BRUSH_SIZE},
};
use crate::history::History;
use crate::input::stroke::{DEFAULT_MIN_STROKE_POINTS, StrokeRecorder};
use crate::input::tool::Tool;
use crate::input::transform::{self, PanOffset, ViewportRect};
use crate::util::Point;
use log::{debug, info, warn};

/// Smallest zoom factor the view accepts.
pub const MIN_ZOOM: f64 = 0.5;
/// Largest zoom factor the view accepts.
pub const MAX_ZOOM: f64 = 3.0;

/// Pen settings picked in the toolbar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolState {
    pub tool: Tool,
    pub color: Color,
    /// Always within 1.0 - 20.0
    pub brush_size: f64,
    pub pen_style: PenStyle,
}

/// Zoom and pan applied to the page on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    /// Always within 0.5 - 3.0
    pub zoom: f64,
    pub pan_offset: PanOffset,
}

/// Values a session starts with and returns to on clear.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    pub default_color: Color,
    pub default_brush_size: f64,
    pub default_pen_style: PenStyle,
    pub default_zoom: f64,
    pub zoom_step: f64,
    pub page: PageSize,
    /// Strokes need strictly more points than this to be committed
    pub min_stroke_points: usize,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            default_color: BLACK,
            default_brush_size: 2.0,
            default_pen_style: PenStyle::Ballpoint,
            default_zoom: 1.0,
            zoom_step: 0.1,
            page: PageSize::A4_300_DPI,
            min_stroke_points: DEFAULT_MIN_STROKE_POINTS,
        }
    }
}

impl SessionSettings {
    /// Derives session defaults from a validated config.
    pub fn from_config(config: &Config) -> Self {
        Self {
            default_color: config.drawing.default_color.to_color(),
            default_brush_size: config.drawing.default_brush_size,
            default_pen_style: config.drawing.default_pen_style,
            default_zoom: config.view.default_zoom,
            zoom_step: config.view.zoom_step,
            page: config.page.page_size(),
            min_stroke_points: config.page.min_stroke_points,
        }
    }

    fn tool_state(&self) -> ToolState {
        ToolState {
            tool: Tool::Pen,
            color: self.default_color,
            brush_size: self.default_brush_size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE),
            pen_style: self.default_pen_style,
        }
    }

    fn view_state(&self) -> ViewState {
        ViewState {
            zoom: self.default_zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            pan_offset: PanOffset::default(),
        }
    }
}

/// State for one drawing session.
///
/// Owns the page bitmap, the undo history and the converted text, and is the
/// only way tool and view settings change. Pointer handling lives in the
/// `pointer` module.
pub struct DrawingSession {
    pub(super) settings: SessionSettings,
    pub(super) tool_state: ToolState,
    pub(super) view: ViewState,
    pub(super) viewport: ViewportRect,
    /// `None` until [`DrawingSession::initialize_surface`] succeeds
    pub(super) surface: Option<RenderSurface>,
    pub(super) history: History,
    pub(super) recorder: StrokeRecorder,
    /// Last device position seen during a pan drag
    pub(super) pan_anchor: Option<Point>,
    pub(super) converted_text: ConvertedText,
    pub(super) converter: Box<dyn TextConverter>,
}

impl DrawingSession {
    /// Creates a session with default tool and view state.
    ///
    /// The page bitmap is not allocated yet; drawing input is ignored until
    /// [`initialize_surface`](Self::initialize_surface) is called.
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            tool_state: settings.tool_state(),
            view: settings.view_state(),
            viewport: ViewportRect::native(settings.page),
            surface: None,
            history: History::new(),
            recorder: StrokeRecorder::new(settings.min_stroke_points),
            pan_anchor: None,
            converted_text: ConvertedText::new(),
            converter: Box::new(PlaceholderConverter),
            settings,
        }
    }

    /// Replaces the stroke-to-text converter.
    pub fn with_converter(mut self, converter: Box<dyn TextConverter>) -> Self {
        self.converter = converter;
        self
    }

    /// Allocates the blank page and seeds the history with it.
    ///
    /// Returns whether the surface is ready. Failure is logged and leaves the
    /// session without a surface.
    pub fn initialize_surface(&mut self) -> bool {
        if self.surface.is_some() {
            return true;
        }

        match RenderSurface::new(self.settings.page) {
            Ok(surface) => {
                self.surface = Some(surface);
                self.rebuild_style();
                self.push_snapshot();
                info!(
                    "Drawing surface ready ({}x{})",
                    self.settings.page.width, self.settings.page.height
                );
                true
            }
            Err(err) => {
                warn!("Failed to create drawing surface: {err}");
                false
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        self.surface.is_some()
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn tool_state(&self) -> &ToolState {
        &self.tool_state
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn viewport(&self) -> &ViewportRect {
        &self.viewport
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn converted_text(&self) -> &str {
        self.converted_text.as_str()
    }

    pub fn surface(&self) -> Option<&RenderSurface> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut RenderSurface> {
        self.surface.as_mut()
    }

    /// Whether a pen or eraser stroke is in progress.
    pub fn is_capturing(&self) -> bool {
        self.recorder.is_capturing()
    }

    /// Maps a device coordinate into canvas space with the current view.
    pub fn canvas_point(&self, device_x: f64, device_y: f64) -> Point {
        transform::to_canvas_point(
            device_x,
            device_y,
            &self.viewport,
            self.view.pan_offset,
            self.view.zoom,
            self.settings.page,
        )
    }

    // ------------------------------------------------------------------
    // Tool state setters
    // ------------------------------------------------------------------

    pub fn set_tool(&mut self, tool: Tool) {
        if self.tool_state.tool != tool {
            debug!("Tool changed: {} -> {}", self.tool_state.tool, tool);
        }
        self.tool_state.tool = tool;
        self.pan_anchor = None;
    }

    /// Sets the pen color from an RGB string such as `#1e40af`.
    ///
    /// Unparseable strings are ignored; returns whether the color was applied.
    pub fn set_color(&mut self, color: &str) -> bool {
        match Color::parse(color) {
            Some(parsed) => {
                self.set_color_value(parsed);
                true
            }
            None => {
                warn!("Ignoring unrecognized color '{color}'");
                false
            }
        }
    }

    pub fn set_color_value(&mut self, color: Color) {
        self.tool_state.color = color;
        self.rebuild_style();
    }

    /// Sets the brush size, clamped to 1.0 - 20.0. Non-finite values are ignored.
    pub fn set_brush_size(&mut self, size: f64) {
        if !size.is_finite() {
            warn!("Ignoring non-finite brush size {size}");
            return;
        }
        let clamped = size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE);
        if clamped != size {
            debug!("Brush size {size} clamped to {clamped}");
        }
        self.tool_state.brush_size = clamped;
        self.rebuild_style();
    }

    pub fn set_pen_style(&mut self, pen_style: PenStyle) {
        self.tool_state.pen_style = pen_style;
        self.rebuild_style();
    }

    /// Rebuilds the surface stroke style from the current tool state.
    ///
    /// Safe to call at any time; a missing surface makes it a no-op.
    pub fn rebuild_style(&mut self) {
        let style = StrokeStyle::build(
            self.tool_state.color,
            self.tool_state.brush_size,
            self.tool_state.pen_style,
        );
        if let Some(surface) = self.surface.as_mut() {
            surface.apply_style(style);
        }
    }

    // ------------------------------------------------------------------
    // View state setters
    // ------------------------------------------------------------------

    /// Sets the zoom factor, clamped to 0.5 - 3.0. Non-finite values are ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if !zoom.is_finite() {
            warn!("Ignoring non-finite zoom {zoom}");
            return;
        }
        let clamped = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        if clamped != zoom {
            debug!("Zoom {zoom} clamped to {clamped}");
        }
        self.view.zoom = clamped;
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.view.zoom + self.settings.zoom_step);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.view.zoom - self.settings.zoom_step);
    }

    pub fn set_pan_offset(&mut self, offset: PanOffset) {
        if !offset.x.is_finite() || !offset.y.is_finite() {
            warn!("Ignoring non-finite pan offset ({}, {})", offset.x, offset.y);
            return;
        }
        self.view.pan_offset = offset;
    }

    /// Updates the on-screen placement of the page (after layout or resize).
    pub fn set_viewport(&mut self, viewport: ViewportRect) {
        self.viewport = viewport;
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    /// Snapshots the page onto the history. No-op without a surface.
    pub(super) fn push_snapshot(&mut self) {
        let Some(surface) = self.surface.as_ref() else {
            return;
        };
        match surface.snapshot() {
            Ok(entry) => {
                debug!("History snapshot: {} bytes", entry.len());
                self.history.push(entry);
            }
            Err(err) => warn!("Failed to snapshot drawing surface: {err}"),
        }
    }

    /// Steps back one history entry and restores the page from it.
    ///
    /// Any stroke in progress is dropped. Returns whether anything changed;
    /// undo at the first entry does nothing. If the previous page cannot be
    /// restored the history index is left where it was.
    pub fn undo(&mut self) -> bool {
        self.recorder.discard();

        let Some(entry) = self.history.previous() else {
            debug!("Nothing to undo");
            return false;
        };

        if let Some(surface) = self.surface.as_mut()
            && let Err(err) = surface.restore(entry)
        {
            warn!("Failed to restore drawing surface, keeping current page: {err}");
            return false;
        }

        self.history.undo();
        debug!("Undo to history index {:?}", self.history.index());
        true
    }

    /// Wipes the page and resets tools, view, history and converted text.
    ///
    /// The history is left empty; the blank page is not re-seeded.
    pub fn clear(&mut self) {
        self.recorder.discard();
        self.pan_anchor = None;
        self.history.clear();
        self.converted_text.clear();
        self.tool_state = self.settings.tool_state();
        self.view = self.settings.view_state();
        self.rebuild_style();

        if let Some(surface) = self.surface.as_mut()
            && let Err(err) = surface.fill_blank()
        {
            warn!("Failed to wipe drawing surface: {err}");
        }
        info!("Canvas cleared");
    }
}
