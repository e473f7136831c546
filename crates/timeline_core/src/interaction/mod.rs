//! Interaction adapter.
//!
//! Translates drag gestures or tap-select-then-tap-target sequences into
//! [`Intent`](crate::Intent) values. The controllers hold only transient
//! UI state; dropping them at any point leaves the game untouched.

mod drag;
mod press;
mod tap;

pub use drag::{DragController, DragTarget};
pub use press::{LONG_PRESS_THRESHOLD, MOVE_TOLERANCE, Point, PressOutcome, PressTracker};
pub use tap::{TapController, TapResponse};

use crate::game::GameState;
use crate::types::HistoricalEvent;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Viewport width below which a device counts as a phone.
pub const MOBILE_BREAKPOINT: u32 = 768;

/// Input modality, chosen once per session.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum InteractionMode {
    /// Continuous pointer drag.
    #[default]
    Drag,
    /// Tap to select, tap to place.
    Tap,
}

/// Capabilities of the input device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeviceProfile {
    /// Viewport width in pixels.
    pub viewport_width: u32,
    /// Whether touch input is available.
    pub touch: bool,
    /// Whether the primary pointer is coarse (a finger).
    pub coarse_pointer: bool,
}

impl InteractionMode {
    /// Picks the mode for a device.
    ///
    /// Phones (narrow + touch) and tablets (wide + touch-primary) tap;
    /// everything else, touch laptops included, drags.
    #[instrument]
    pub fn detect(profile: DeviceProfile) -> Self {
        let narrow = profile.viewport_width < MOBILE_BREAKPOINT;
        let phone = narrow && profile.touch;
        let tablet = !narrow && profile.touch && profile.coarse_pointer;
        let mode = if phone || tablet { Self::Tap } else { Self::Drag };
        debug!(?mode, phone, tablet, "Interaction mode detected");
        mode
    }
}

/// A card the user can press on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardRef {
    /// Card at this index in the current player's hand.
    Hand(usize),
    /// Card at this index on the timeline.
    Timeline(usize),
    /// Insertion target at this timeline index (tap mode only).
    Target(usize),
}

/// Read-only view opened by a long press.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDetails {
    /// The card being inspected.
    pub event: HistoricalEvent,
    /// Timeline cards show their year; held cards keep it hidden.
    pub reveal_year: bool,
}

impl CardDetails {
    /// Looks up the card a press landed on.
    #[instrument(skip(state))]
    pub fn lookup(state: &GameState, card: CardRef) -> Option<Self> {
        match card {
            CardRef::Hand(index) => state
                .current_player()
                .and_then(|p| p.hand.get(index))
                .map(|event| Self {
                    event: event.clone(),
                    reveal_year: false,
                }),
            CardRef::Timeline(index) => state.timeline().get(index).map(|event| Self {
                event: event.clone(),
                reveal_year: true,
            }),
            CardRef::Target(_) => None,
        }
    }
}

/// Controller for whichever mode the session runs in.
#[derive(Debug, Clone)]
pub enum Controller {
    /// Drag mode.
    Drag(DragController),
    /// Tap mode.
    Tap(TapController),
}

impl Controller {
    /// Creates an idle controller for `mode`.
    #[instrument]
    pub fn for_mode(mode: InteractionMode) -> Self {
        match mode {
            InteractionMode::Drag => Self::Drag(DragController::new()),
            InteractionMode::Tap => Self::Tap(TapController::new()),
        }
    }

    /// Returns the mode this controller serves.
    pub fn mode(&self) -> InteractionMode {
        match self {
            Self::Drag(_) => InteractionMode::Drag,
            Self::Tap(_) => InteractionMode::Tap,
        }
    }

    /// Discards all transient state.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        match self {
            Self::Drag(drag) => drag.cancel(),
            Self::Tap(tap) => tap.clear(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(viewport_width: u32, touch: bool, coarse_pointer: bool) -> DeviceProfile {
        DeviceProfile {
            viewport_width,
            touch,
            coarse_pointer,
        }
    }

    #[test]
    fn test_phone_taps() {
        assert_eq!(InteractionMode::detect(profile(390, true, true)), InteractionMode::Tap);
    }

    #[test]
    fn test_tablet_taps() {
        assert_eq!(InteractionMode::detect(profile(1024, true, true)), InteractionMode::Tap);
    }

    #[test]
    fn test_touch_laptop_drags() {
        assert_eq!(InteractionMode::detect(profile(1440, true, false)), InteractionMode::Drag);
    }

    #[test]
    fn test_narrow_desktop_window_drags() {
        assert_eq!(InteractionMode::detect(profile(500, false, false)), InteractionMode::Drag);
    }

    #[test]
    fn test_controller_matches_mode() {
        assert_eq!(Controller::for_mode(InteractionMode::Tap).mode(), InteractionMode::Tap);
        assert_eq!(Controller::for_mode(InteractionMode::Drag).mode(), InteractionMode::Drag);
    }

    #[test]
    fn test_mode_parses() {
        assert_eq!("TAP".parse::<InteractionMode>().ok(), Some(InteractionMode::Tap));
    }
}
