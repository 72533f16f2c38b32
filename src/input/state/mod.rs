mod core;
mod pointer;
#[cfg(test)]
mod tests;

pub use self::core::{DrawingSession, MAX_ZOOM, MIN_ZOOM, SessionSettings, ToolState, ViewState};
