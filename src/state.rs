//! Mask activation state.

/// Whether the illumination overlay is on.
///
/// The controller never caches this; the overlay endpoint holds the
/// authoritative value for every observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaskState {
    /// Overlay off.
    #[default]
    Disabled,
    /// Overlay on for a capture.
    Enabled,
}

impl MaskState {
    /// The value written to the overlay endpoint for this state.
    pub fn overlay_value(self) -> i32 {
        match self {
            MaskState::Disabled => 0,
            MaskState::Enabled => 1,
        }
    }
}
