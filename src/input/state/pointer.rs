use crate::draw::PaintMode;
use crate::input::events::{PointerEvent, PointerPhase};
use crate::input::stroke::{Stroke, StrokeOutcome};
use crate::input::tool::Tool;
use crate::input::transform::PanOffset;
use crate::util::Point;
use log::{debug, info, warn};

use super::DrawingSession;

impl DrawingSession {
    /// Routes a mouse or touch event to the pointer handlers.
    pub fn handle_pointer_event(&mut self, event: &PointerEvent) {
        match event.phase() {
            Some(PointerPhase::Down(x, y)) => self.on_pointer_down(x, y),
            Some(PointerPhase::Move(x, y)) => self.on_pointer_move(x, y),
            Some(PointerPhase::Up) => self.on_pointer_up(),
            None => debug!("Ignoring touch event without touch points"),
        }
    }

    /// Processes a pointer press at device coordinates.
    ///
    /// # Behavior
    /// - Pen / eraser: starts capturing a stroke (only once the surface is ready)
    /// - Pan: remembers the device position as the drag anchor
    /// - Rectangle / circle: nothing
    pub fn on_pointer_down(&mut self, x: f64, y: f64) {
        let point = self.canvas_point(x, y);
        let tool = self.tool_state.tool;

        match tool {
            Tool::Pan => {
                self.pan_anchor = Some(Point::new(x, y));
            }
            _ if tool.captures_strokes() => {
                if self.surface.is_none() {
                    debug!("Drawing surface not ready; ignoring {tool} press");
                    return;
                }
                self.recorder.begin(tool, point);
            }
            _ => {
                debug!("{tool} tool has no drawing behaviour");
            }
        }
    }

    /// Processes pointer motion at device coordinates.
    ///
    /// # Behavior
    /// - Pan drag: adds the device movement since the anchor to the pan offset
    /// - Pen stroke: paints the new segment in the stroke color
    /// - Eraser stroke: removes pixels along the new segment
    /// - Otherwise: nothing
    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        // Pan offset is in screen pixels, so the anchor stays in device space
        if let Some(anchor) = self.pan_anchor {
            let pan = self.view.pan_offset;
            self.set_pan_offset(PanOffset::new(
                pan.x + (x - anchor.x),
                pan.y + (y - anchor.y),
            ));
            self.pan_anchor = Some(Point::new(x, y));
            return;
        }

        let point = self.canvas_point(x, y);

        let Some(tool) = self.recorder.capturing_tool() else {
            return;
        };
        let Some(previous) = self.recorder.append(point) else {
            return;
        };

        let mode = match tool {
            Tool::Eraser => PaintMode::Erase,
            _ => PaintMode::Draw,
        };
        self.paint(previous, point, mode);
    }

    /// Processes pointer release (also used for pointer leave and touch end).
    ///
    /// Ends a pan drag, or finalizes the captured stroke: long strokes are
    /// snapshotted onto the history and sent for text conversion, short ones
    /// are dropped.
    pub fn on_pointer_up(&mut self) {
        self.pan_anchor = None;

        match self.recorder.finish() {
            StrokeOutcome::Committed(stroke) => self.commit_stroke(stroke),
            StrokeOutcome::Discarded { points } => {
                debug!("Discarding {points}-point stroke as a tap");
            }
            StrokeOutcome::Idle => {}
        }
    }

    fn paint(&mut self, from: Point, to: Point, mode: PaintMode) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        if let Err(err) = surface.paint_segment(from, to, mode) {
            warn!("Failed to paint segment: {err}");
        }
    }

    fn commit_stroke(&mut self, stroke: Stroke) {
        debug!(
            "Committing {} stroke: {} points, {:.1}px long",
            stroke.tool(),
            stroke.len(),
            stroke.path_length()
        );

        self.push_snapshot();

        let fragment = self.converter.convert(&stroke);
        self.converted_text.append(&fragment);

        if stroke.tool() == Tool::Pen {
            info!("Stroke captured, converting to text");
        }
    }
}
