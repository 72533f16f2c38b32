//! Capture lifecycle for a single freehand stroke.

use super::tool::Tool;
use crate::util::Point;

/// Strokes need strictly more points than this to be committed.
pub const DEFAULT_MIN_STROKE_POINTS: usize = 5;

/// A completed pointer drag, in the order the points were sampled.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    tool: Tool,
    points: Vec<Point>,
}

impl Stroke {
    pub fn new(tool: Tool, points: Vec<Point>) -> Self {
        Self { tool, points }
    }

    /// Tool that produced the stroke (pen or eraser).
    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Total path length in canvas pixels.
    pub fn path_length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| pair[0].distance_to(pair[1]))
            .sum()
    }
}

/// What happened to the captured points when the pointer was released.
#[derive(Debug, Clone, PartialEq)]
pub enum StrokeOutcome {
    /// Long enough to keep
    Committed(Stroke),
    /// Too short, treated as an accidental tap
    Discarded { points: usize },
    /// Nothing was being captured
    Idle,
}

#[derive(Debug, Default)]
enum RecorderState {
    #[default]
    Idle,
    Capturing {
        tool: Tool,
        points: Vec<Point>,
    },
}

/// Accumulates points between pointer-down and pointer-up.
#[derive(Debug)]
pub struct StrokeRecorder {
    state: RecorderState,
    min_points: usize,
}

impl Default for StrokeRecorder {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_STROKE_POINTS)
    }
}

impl StrokeRecorder {
    /// Creates a recorder that commits strokes with more than `min_points` points.
    pub fn new(min_points: usize) -> Self {
        Self {
            state: RecorderState::Idle,
            min_points,
        }
    }

    pub fn is_capturing(&self) -> bool {
        matches!(self.state, RecorderState::Capturing { .. })
    }

    /// Tool of the stroke in progress.
    pub fn capturing_tool(&self) -> Option<Tool> {
        match &self.state {
            RecorderState::Capturing { tool, .. } => Some(*tool),
            RecorderState::Idle => None,
        }
    }

    /// Points gathered so far for the stroke in progress.
    pub fn points(&self) -> &[Point] {
        match &self.state {
            RecorderState::Capturing { points, .. } => points,
            RecorderState::Idle => &[],
        }
    }

    /// Starts a new stroke, dropping any stroke still in progress.
    pub fn begin(&mut self, tool: Tool, point: Point) {
        if self.is_capturing() {
            log::debug!("Starting a new stroke while one was in progress; dropping it");
        }
        self.state = RecorderState::Capturing {
            tool,
            points: vec![point],
        };
    }

    /// Adds a point and returns the previous one so the segment can be painted.
    ///
    /// Returns `None` when no stroke is being captured.
    pub fn append(&mut self, point: Point) -> Option<Point> {
        match &mut self.state {
            RecorderState::Capturing { points, .. } => {
                let previous = points.last().copied();
                points.push(point);
                previous
            }
            RecorderState::Idle => None,
        }
    }

    /// Ends the capture and applies the commit policy.
    pub fn finish(&mut self) -> StrokeOutcome {
        match std::mem::take(&mut self.state) {
            RecorderState::Capturing { tool, points } => {
                if points.len() > self.min_points {
                    StrokeOutcome::Committed(Stroke::new(tool, points))
                } else {
                    StrokeOutcome::Discarded {
                        points: points.len(),
                    }
                }
            }
            RecorderState::Idle => StrokeOutcome::Idle,
        }
    }

    /// Drops the stroke in progress without applying the commit policy.
    pub fn discard(&mut self) {
        self.state = RecorderState::Idle;
    }
}
