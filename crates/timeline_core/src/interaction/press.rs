//! Press gesture classification: short tap versus long press.
//!
//! Time is supplied by the caller as an offset from any fixed epoch, so
//! the tracker is deterministic and never reads a clock itself.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

/// How long a press must be held to count as a long press.
pub const LONG_PRESS_THRESHOLD: Duration = Duration::from_millis(500);

/// How far (in pixels, per axis) a press may drift before it is cancelled.
pub const MOVE_TOLERANCE: f32 = 10.0;

/// A pointer position in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl Point {
    /// Creates a point.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Result of a completed press gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PressOutcome {
    /// Released before the threshold without drifting.
    Tap,
    /// Held past the threshold without drifting.
    LongPress,
}

#[derive(Debug, Clone, Copy)]
struct ActivePress {
    origin: Point,
    started_at: Duration,
    fired: bool,
}

/// Tracks one press at a time and classifies it.
///
/// A single press yields at most one outcome: once a long press has
/// fired, the release produces nothing.
#[derive(Debug, Clone)]
pub struct PressTracker {
    threshold: Duration,
    move_tolerance: f32,
    active: Option<ActivePress>,
}

impl PressTracker {
    /// Creates a tracker with the default thresholds.
    #[instrument]
    pub fn new() -> Self {
        Self::with_thresholds(LONG_PRESS_THRESHOLD, MOVE_TOLERANCE)
    }

    /// Creates a tracker with custom thresholds.
    #[instrument]
    pub fn with_thresholds(threshold: Duration, move_tolerance: f32) -> Self {
        Self {
            threshold,
            move_tolerance,
            active: None,
        }
    }

    /// Begins a press.
    #[instrument(skip(self))]
    pub fn press(&mut self, at_point: Point, at: Duration) {
        self.active = Some(ActivePress {
            origin: at_point,
            started_at: at,
            fired: false,
        });
    }

    /// Reports pointer movement; drifting too far cancels the press.
    #[instrument(skip(self))]
    pub fn moved(&mut self, to: Point) {
        let Some(active) = self.active else {
            return;
        };
        let dx = (to.x - active.origin.x).abs();
        let dy = (to.y - active.origin.y).abs();
        if dx > self.move_tolerance || dy > self.move_tolerance {
            debug!(dx, dy, "Press cancelled by movement");
            self.active = None;
        }
    }

    /// Checks the long-press timer.
    ///
    /// Returns `LongPress` exactly once, the first time it is polled at or
    /// past the threshold.
    #[instrument(skip(self))]
    pub fn poll(&mut self, now: Duration) -> Option<PressOutcome> {
        let active = self.active.as_mut()?;
        if !active.fired && now.saturating_sub(active.started_at) >= self.threshold {
            active.fired = true;
            debug!("Long press triggered");
            return Some(PressOutcome::LongPress);
        }
        None
    }

    /// Ends the press.
    ///
    /// Returns `Tap` for a quick clean release, `LongPress` if the
    /// threshold passed but was never polled, and `None` if the press was
    /// cancelled or its long press already fired.
    #[instrument(skip(self))]
    pub fn release(&mut self, at: Duration) -> Option<PressOutcome> {
        let active = self.active.take()?;
        if active.fired {
            return None;
        }
        if at.saturating_sub(active.started_at) >= self.threshold {
            Some(PressOutcome::LongPress)
        } else {
            Some(PressOutcome::Tap)
        }
    }

    /// Abandons the press (pointer left the target).
    #[instrument(skip(self))]
    pub fn cancel(&mut self) {
        self.active = None;
    }

    /// Returns true while a press is being tracked.
    pub fn is_pressing(&self) -> bool {
        self.active.is_some_and(|a| !a.fired)
    }
}

impl Default for PressTracker {
    fn default() -> Self {
        Self::new()
    }
}
