//! Control endpoint locations.

use std::fmt;
use std::path::{Path, PathBuf};

const DISPLAY_BRIGHTNESS_PATH: &str = "sys/class/backlight/panel0-backlight/brightness";
const MASK_BRIGHTNESS_PATH: &str = "sys/class/lcd/panel/mask_brightness";
const ACTUAL_MASK_BRIGHTNESS_PATH: &str = "sys/class/lcd/panel/actual_mask_brightness";
const FP_GREEN_CIRCLE_PATH: &str = "sys/class/lcd/panel/fp_green_circle";
const TSP_CMD_PATH: &str = "sys/class/sec/tsp/cmd";

/// The role a control endpoint plays in the mask sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Display backlight brightness (read, mandatory).
    DisplayBrightness,
    /// Mask brightness control (write, mandatory).
    MaskBrightness,
    /// Record of the last applied mask brightness (read/write, mandatory).
    ActualMaskBrightness,
    /// Illumination overlay toggle (write, optional).
    FpGreenCircle,
    /// Touch panel command channel (write, mandatory).
    TspCmd,
}

impl Endpoint {
    /// Whether the endpoint may be missing on some device revisions.
    ///
    /// Only optional endpoints are probed for existence before a write.
    pub fn is_optional(self) -> bool {
        matches!(self, Endpoint::FpGreenCircle)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Endpoint::DisplayBrightness => "display-brightness",
            Endpoint::MaskBrightness => "mask-brightness",
            Endpoint::ActualMaskBrightness => "actual-mask-brightness",
            Endpoint::FpGreenCircle => "fp-green-circle",
            Endpoint::TspCmd => "tsp-cmd",
        };
        f.write_str(name)
    }
}

/// Trait for resolving endpoint roles to device files.
///
/// This allows tests to point the controller at a scratch tree or an
/// in-memory fake.
pub trait MaskEndpoints: Send + Sync {
    /// Display backlight brightness source.
    fn display_brightness(&self) -> &Path;

    /// Mask brightness control.
    fn mask_brightness(&self) -> &Path;

    /// Applied mask brightness record.
    fn actual_mask_brightness(&self) -> &Path;

    /// Illumination overlay toggle.
    fn fp_green_circle(&self) -> &Path;

    /// Touch panel command channel.
    fn tsp_cmd(&self) -> &Path;

    /// Resolve an endpoint role to its path.
    fn path(&self, endpoint: Endpoint) -> &Path {
        match endpoint {
            Endpoint::DisplayBrightness => self.display_brightness(),
            Endpoint::MaskBrightness => self.mask_brightness(),
            Endpoint::ActualMaskBrightness => self.actual_mask_brightness(),
            Endpoint::FpGreenCircle => self.fp_green_circle(),
            Endpoint::TspCmd => self.tsp_cmd(),
        }
    }
}

/// Endpoint paths of the panel driver, relative to a root directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelEndpoints {
    display_brightness: PathBuf,
    mask_brightness: PathBuf,
    actual_mask_brightness: PathBuf,
    fp_green_circle: PathBuf,
    tsp_cmd: PathBuf,
}

impl PanelEndpoints {
    /// Endpoints at their device locations under `/`.
    pub fn new() -> Self {
        Self::with_root_path("/")
    }

    /// Endpoints re-rooted under `root`.
    ///
    /// ```
    /// use udfps_mask::{MaskEndpoints, PanelEndpoints};
    ///
    /// let endpoints = PanelEndpoints::with_root_path("/tmp/panel");
    /// assert_eq!(
    ///     endpoints.tsp_cmd(),
    ///     std::path::Path::new("/tmp/panel/sys/class/sec/tsp/cmd")
    /// );
    /// ```
    pub fn with_root_path(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            display_brightness: root.join(DISPLAY_BRIGHTNESS_PATH),
            mask_brightness: root.join(MASK_BRIGHTNESS_PATH),
            actual_mask_brightness: root.join(ACTUAL_MASK_BRIGHTNESS_PATH),
            fp_green_circle: root.join(FP_GREEN_CIRCLE_PATH),
            tsp_cmd: root.join(TSP_CMD_PATH),
        }
    }
}

impl Default for PanelEndpoints {
    fn default() -> Self {
        Self::new()
    }
}

impl MaskEndpoints for PanelEndpoints {
    fn display_brightness(&self) -> &Path {
        &self.display_brightness
    }

    fn mask_brightness(&self) -> &Path {
        &self.mask_brightness
    }

    fn actual_mask_brightness(&self) -> &Path {
        &self.actual_mask_brightness
    }

    fn fp_green_circle(&self) -> &Path {
        &self.fp_green_circle
    }

    fn tsp_cmd(&self) -> &Path {
        &self.tsp_cmd
    }
}
