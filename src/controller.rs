//! Fingerprint mask controller implementation.

use crate::config::MaskConfig;
use crate::device_file::{DeviceFiles, SysfsFiles};
use crate::endpoints::{Endpoint, MaskEndpoints, PanelEndpoints};
use crate::state::MaskState;

use log::{error, info, warn};

/// Value reported for the display brightness when it cannot be read.
const UNREADABLE_BRIGHTNESS: i32 = -1;

// =============================================================================
// Mask Controller Trait
// =============================================================================

/// Trait for fingerprint mask controllers.
///
/// None of the operations fail: problems are logged and the operation
/// returns. The controller holds no lock; callers must serialize calls.
pub trait MaskController: Send + Sync {
    /// Raise the mask for a capture.
    fn enable_mask(&self);

    /// Drop the mask after a capture.
    fn disable_mask(&self);

    /// Write a mask brightness directly, bypassing the calibration.
    fn set_mask_brightness(&self, brightness: i32);

    /// The last applied mask brightness, or 0 if it cannot be read.
    fn actual_mask_brightness(&self) -> i32;
}

// =============================================================================
// OpticalMask
// =============================================================================

/// Mask controller for optical under-display sensors.
///
/// # Example
///
/// ```
/// use udfps_mask::{MaskController, MaskEndpoints, MockDeviceFiles, OpticalMask, PanelEndpoints};
///
/// let endpoints = PanelEndpoints::new();
/// let files = MockDeviceFiles::new()
///     .with_file(endpoints.display_brightness(), "1000\n")
///     .with_file(endpoints.fp_green_circle(), "0\n");
/// let mask = OpticalMask::with_parts(files, endpoints, Default::default());
///
/// mask.enable_mask();
/// assert_eq!(mask.actual_mask_brightness(), 607);
/// ```
pub struct OpticalMask<F = SysfsFiles, E = PanelEndpoints> {
    files: F,
    endpoints: E,
    config: MaskConfig,
}

impl OpticalMask {
    /// Create a controller for the panel's device files.
    pub fn new() -> Self {
        Self::with_parts(SysfsFiles::new(), PanelEndpoints::new(), MaskConfig::default())
    }
}

impl Default for OpticalMask {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: DeviceFiles, E: MaskEndpoints> OpticalMask<F, E> {
    /// Create a controller from explicit parts.
    pub fn with_parts(files: F, endpoints: E, config: MaskConfig) -> Self {
        Self {
            files,
            endpoints,
            config,
        }
    }

    /// The device file backend.
    pub fn files(&self) -> &F {
        &self.files
    }

    /// The endpoint locations.
    pub fn endpoints(&self) -> &E {
        &self.endpoints
    }

    /// The panel calibration.
    pub fn config(&self) -> &MaskConfig {
        &self.config
    }

    /// Read the display backlight brightness, or -1 if it cannot be read.
    pub fn read_display_brightness(&self) -> i32 {
        self.files.read_int(
            self.endpoints.display_brightness(),
            UNREADABLE_BRIGHTNESS,
        )
    }

    /// Send the FOD rectangle to the touch panel.
    pub fn apply_fod_rect(&self) {
        let command = self.config.fod_rect.command();
        info!("setting fod rect: {}", command);
        self.files.write_string(self.endpoints.tsp_cmd(), &command);
    }

    /// Write an integer to an endpoint role.
    ///
    /// Optional endpoints are probed first and skipped with a warning when
    /// absent; mandatory ones are written directly. Returns whether the write
    /// was attempted.
    fn write_endpoint(&self, endpoint: Endpoint, value: i32) -> bool {
        let path = self.endpoints.path(endpoint);
        if endpoint.is_optional() && !self.files.exists(path) {
            warn!(
                "{} not present at {}; skipping write of {}",
                endpoint,
                path.display(),
                value
            );
            return false;
        }
        self.files.write_int(path, value);
        true
    }

    fn write_overlay(&self, state: MaskState) -> bool {
        self.write_endpoint(Endpoint::FpGreenCircle, state.overlay_value())
    }
}

impl<F: DeviceFiles, E: MaskEndpoints> MaskController for OpticalMask<F, E> {
    fn enable_mask(&self) {
        info!("enabling mask");

        let display_brightness = self.read_display_brightness();
        if display_brightness < 0 {
            error!(
                "invalid display brightness {}; not enabling mask",
                display_brightness
            );
            return;
        }

        let Some(mask_brightness) = self.config.calculate_mask_brightness(display_brightness)
        else {
            error!(
                "no mask brightness for display brightness {}; not enabling mask",
                display_brightness
            );
            return;
        };

        self.write_endpoint(Endpoint::MaskBrightness, mask_brightness);
        self.write_endpoint(Endpoint::ActualMaskBrightness, mask_brightness);
        self.apply_fod_rect();
        let overlay = self.write_overlay(MaskState::Enabled);

        info!(
            "mask enabled: brightness={}, overlay={}",
            mask_brightness, overlay
        );
    }

    fn disable_mask(&self) {
        info!("disabling mask");
        if self.write_overlay(MaskState::Disabled) {
            info!("mask disabled");
        }
    }

    fn set_mask_brightness(&self, brightness: i32) {
        info!("setting mask brightness manually to {}", brightness);
        self.write_endpoint(Endpoint::MaskBrightness, brightness);
    }

    fn actual_mask_brightness(&self) -> i32 {
        let brightness = self
            .files
            .read_int(self.endpoints.actual_mask_brightness(), 0);
        info!("actual mask brightness: {}", brightness);
        brightness
    }
}
