//! Illumination mask control for optical under-display fingerprint sensors.
//!
//! Before a capture, the sensor area needs the panel driven to a known mask
//! brightness, the touch panel told where the sensor is, and the
//! illumination overlay switched on. This crate performs that sequence
//! against the panel driver's control files.
//!
//! # Requirements
//!
//! - A panel driver exposing the mask endpoints (see [`PanelEndpoints`])
//! - Write access to those endpoints
//!
//! # Example
//!
//! ```no_run
//! use udfps_mask::{MaskController, OpticalMask};
//!
//! let mask = OpticalMask::new();
//!
//! // Before the capture
//! mask.enable_mask();
//! println!("mask brightness: {}", mask.actual_mask_brightness());
//!
//! // After the capture
//! mask.disable_mask();
//! ```
//!
//! # Testing
//!
//! Use [`MockDeviceFiles`] to drive the controller without a panel:
//!
//! ```
//! use udfps_mask::{MaskController, MaskEndpoints, MockDeviceFiles, OpticalMask, PanelEndpoints};
//!
//! let endpoints = PanelEndpoints::new();
//! let files = MockDeviceFiles::new().with_file(endpoints.display_brightness(), "2000");
//! let mask = OpticalMask::with_parts(files, endpoints, Default::default());
//!
//! mask.enable_mask();
//! assert_eq!(mask.actual_mask_brightness(), 1214);
//! ```
//!
//! # Concurrency
//!
//! Every operation is a short sequence of blocking file accesses with no
//! internal locking and no timeout. Callers must serialize calls and apply
//! their own deadline if the filesystem can stall.

#![warn(missing_docs)]

mod config;
mod controller;
mod device_file;
mod endpoints;
mod error;
mod mock;
mod state;

// Re-export public API
pub use config::{FloorPolicy, FodRect, MaskConfig, ScaleFactor};
pub use controller::{MaskController, OpticalMask};
pub use device_file::{DeviceFiles, SysfsFiles};
pub use endpoints::{Endpoint, MaskEndpoints, PanelEndpoints};
pub use error::MaskError;
pub use mock::MockDeviceFiles;
pub use state::MaskState;

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_mask(brightness: &str) -> OpticalMask<MockDeviceFiles, PanelEndpoints> {
        let endpoints = PanelEndpoints::new();
        let files = MockDeviceFiles::new()
            .with_file(endpoints.display_brightness(), brightness)
            .with_file(endpoints.fp_green_circle(), "0");
        OpticalMask::with_parts(files, endpoints, MaskConfig::default())
    }

    #[test]
    fn test_mock_mask_enable_disable_cycle() {
        let mask = mock_mask("1000");
        let overlay = mask.endpoints().fp_green_circle().to_path_buf();

        mask.enable_mask();
        assert_eq!(
            mask.files().read_int(&overlay, -1),
            MaskState::Enabled.overlay_value()
        );

        mask.disable_mask();
        assert_eq!(
            mask.files().read_int(&overlay, -1),
            MaskState::Disabled.overlay_value()
        );

        mask.enable_mask();
        assert_eq!(mask.files().read_int(&overlay, -1), 1);
    }

    #[test]
    fn test_state_follows_endpoint_not_memory() {
        let mask = mock_mask("1000");
        let ep = mask.endpoints().clone();

        mask.enable_mask();
        // Another observer resets the overlay behind the controller's back.
        mask.files().write_int(ep.fp_green_circle(), 0);
        mask.disable_mask();

        let overlay_writes: Vec<_> = mask
            .files()
            .writes()
            .into_iter()
            .filter(|(path, _)| path == ep.fp_green_circle())
            .map(|(_, value)| value)
            .collect();
        assert_eq!(overlay_writes, vec!["1\n", "0\n", "0\n"]);
    }

    #[test]
    fn test_manual_override_then_enable() {
        let mask = mock_mask("1500");
        let ep = mask.endpoints().clone();

        mask.set_mask_brightness(100);
        assert_eq!(mask.files().read_int(ep.mask_brightness(), -1), 100);
        assert_eq!(mask.actual_mask_brightness(), 0);

        mask.enable_mask();
        assert_eq!(mask.files().read_int(ep.mask_brightness(), -1), 910);
        assert_eq!(mask.actual_mask_brightness(), 910);
    }

    #[test]
    fn test_mask_state_values() {
        assert_eq!(MaskState::default(), MaskState::Disabled);
        assert_eq!(MaskState::Disabled.overlay_value(), 0);
        assert_eq!(MaskState::Enabled.overlay_value(), 1);
    }

    #[test]
    fn test_controller_as_trait_object() {
        let mask: Box<dyn MaskController> = Box::new(mock_mask("200"));
        mask.enable_mask();
        assert_eq!(mask.actual_mask_brightness(), 121);
    }
}
