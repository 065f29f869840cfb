//! Panel calibration and mask brightness policy.

use crate::error::MaskError;

use log::{debug, warn};
use std::fmt;

/// Exact rational scale applied to display brightness.
///
/// Scaling is done in integer arithmetic and truncates toward zero, so
/// `607/1000` maps `1000` to exactly `607`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleFactor {
    numerator: i64,
    denominator: i64,
}

impl ScaleFactor {
    /// Panel calibration: mask brightness is 60.7% of display brightness.
    pub const DEFAULT: ScaleFactor = ScaleFactor {
        numerator: 607,
        denominator: 1000,
    };

    /// Create a scale factor of `numerator / denominator`.
    ///
    /// # Errors
    /// Returns an error if `denominator` is zero.
    pub fn new(numerator: i64, denominator: i64) -> Result<Self, MaskError> {
        if denominator == 0 {
            return Err(MaskError::InvalidScaleFactor {
                numerator,
                denominator,
            });
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// Scale `value`, truncating toward zero and saturating to `i32`.
    pub fn apply(&self, value: i32) -> i32 {
        let scaled =
            i128::from(value) * i128::from(self.numerator) / i128::from(self.denominator);
        scaled.clamp(i128::from(i32::MIN), i128::from(i32::MAX)) as i32
    }
}

impl Default for ScaleFactor {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// The finger-on-display detection rectangle, in panel pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FodRect {
    /// Left edge.
    pub left: i32,
    /// Top edge.
    pub top: i32,
    /// Right edge.
    pub right: i32,
    /// Bottom edge.
    pub bottom: i32,
}

impl FodRect {
    /// Sensor area of the panel this crate was calibrated on.
    pub const DEFAULT: FodRect = FodRect {
        left: 721,
        top: 2289,
        right: 880,
        bottom: 2448,
    };

    /// Create a rectangle.
    ///
    /// # Errors
    /// Returns an error if the rectangle has no area.
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Result<Self, MaskError> {
        if right <= left || bottom <= top {
            return Err(MaskError::InvalidFodRect {
                left,
                top,
                right,
                bottom,
            });
        }
        Ok(Self {
            left,
            top,
            right,
            bottom,
        })
    }

    /// The touch panel command that installs this rectangle.
    ///
    /// ```
    /// use udfps_mask::FodRect;
    ///
    /// assert_eq!(FodRect::DEFAULT.command(), "set_fod_rect,721,2289,880,2448");
    /// ```
    pub fn command(&self) -> String {
        format!("set_fod_rect,{}", self)
    }
}

impl Default for FodRect {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for FodRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.left, self.top, self.right, self.bottom)
    }
}

/// How out-of-range brightness is handled when computing the mask level.
///
/// The two policies are alternatives and are never combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FloorPolicy {
    /// Negative display brightness yields no mask level; otherwise the
    /// scaled value is used as-is, with no floor.
    #[default]
    RejectNegativeInput,
    /// A scaled value of zero or below is raised to `floor`.
    ClampOutput {
        /// Minimum mask brightness.
        floor: i32,
    },
}

impl FloorPolicy {
    /// Floor used by panels that clamp the mask output.
    pub const LEGACY_FLOOR: i32 = 319;

    /// The clamping policy with the legacy floor.
    pub fn legacy_clamp() -> Self {
        FloorPolicy::ClampOutput {
            floor: Self::LEGACY_FLOOR,
        }
    }
}

/// Calibration for one panel variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MaskConfig {
    /// Display-to-mask brightness scale.
    pub scale: ScaleFactor,
    /// Sensor detection area.
    pub fod_rect: FodRect,
    /// Handling of out-of-range brightness.
    pub floor_policy: FloorPolicy,
}

impl MaskConfig {
    /// Calibration with the default panel constants.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the scale factor.
    pub fn with_scale(mut self, scale: ScaleFactor) -> Self {
        self.scale = scale;
        self
    }

    /// Replace the FOD rectangle.
    pub fn with_fod_rect(mut self, fod_rect: FodRect) -> Self {
        self.fod_rect = fod_rect;
        self
    }

    /// Replace the floor policy.
    pub fn with_floor_policy(mut self, floor_policy: FloorPolicy) -> Self {
        self.floor_policy = floor_policy;
        self
    }

    /// Map a display brightness to a mask brightness.
    ///
    /// Returns `None` when the policy rejects the input.
    ///
    /// ```
    /// use udfps_mask::MaskConfig;
    ///
    /// let config = MaskConfig::new();
    /// assert_eq!(config.calculate_mask_brightness(1000), Some(607));
    /// assert_eq!(config.calculate_mask_brightness(-1), None);
    /// ```
    pub fn calculate_mask_brightness(&self, display_brightness: i32) -> Option<i32> {
        let mask = match self.floor_policy {
            FloorPolicy::RejectNegativeInput => {
                if display_brightness < 0 {
                    warn!("rejecting negative display brightness {}", display_brightness);
                    return None;
                }
                self.scale.apply(display_brightness)
            }
            FloorPolicy::ClampOutput { floor } => {
                let scaled = self.scale.apply(display_brightness);
                if scaled <= 0 {
                    warn!("mask brightness {} too low; using floor {}", scaled, floor);
                    floor
                } else {
                    scaled
                }
            }
        };
        debug!(
            "mask brightness {} for display brightness {}",
            mask, display_brightness
        );
        Some(mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scale() {
        let config = MaskConfig::new();
        assert_eq!(config.calculate_mask_brightness(1000), Some(607));
        assert_eq!(config.calculate_mask_brightness(0), Some(0));
        assert_eq!(config.calculate_mask_brightness(1), Some(0));
        assert_eq!(config.calculate_mask_brightness(2), Some(1));
        assert_eq!(config.calculate_mask_brightness(2047), Some(1242));
        assert_eq!(config.calculate_mask_brightness(100), Some(60));
    }

    #[test]
    fn test_scale_matches_floor_for_range() {
        let config = MaskConfig::new();
        for b in 0..=2047 {
            let expected = (b as f64 * 0.607).floor() as i32;
            assert_eq!(config.calculate_mask_brightness(b), Some(expected), "b={}", b);
        }
    }

    #[test]
    fn test_reject_negative_input() {
        let config = MaskConfig::new();
        assert_eq!(config.calculate_mask_brightness(-1), None);
        assert_eq!(config.calculate_mask_brightness(i32::MIN), None);
    }

    #[test]
    fn test_clamp_output_policy() {
        let config = MaskConfig::new().with_floor_policy(FloorPolicy::legacy_clamp());
        assert_eq!(config.calculate_mask_brightness(0), Some(319));
        assert_eq!(config.calculate_mask_brightness(1), Some(319));
        assert_eq!(config.calculate_mask_brightness(-50), Some(319));
        assert_eq!(config.calculate_mask_brightness(2), Some(1));
        assert_eq!(config.calculate_mask_brightness(1000), Some(607));
    }

    #[test]
    fn test_scale_saturates() {
        let scale = ScaleFactor::new(3, 1).unwrap();
        assert_eq!(scale.apply(i32::MAX), i32::MAX);
        assert_eq!(scale.apply(i32::MIN), i32::MIN);
    }

    #[test]
    fn test_scale_extreme_factors_saturate() {
        let huge = ScaleFactor::new(i64::MAX / 2, 1).unwrap();
        assert_eq!(huge.apply(2047), i32::MAX);
        assert_eq!(huge.apply(-2047), i32::MIN);
        assert_eq!(huge.apply(0), 0);

        let flipped = ScaleFactor::new(i64::MIN, -1).unwrap();
        assert_eq!(flipped.apply(1), i32::MAX);
        assert_eq!(flipped.apply(i32::MIN), i32::MIN);

        let config = MaskConfig::new().with_scale(huge);
        assert_eq!(config.calculate_mask_brightness(1000), Some(i32::MAX));
    }

    #[test]
    fn test_invalid_calibration() {
        assert!(matches!(
            ScaleFactor::new(1, 0),
            Err(MaskError::InvalidScaleFactor { .. })
        ));
        assert!(matches!(
            FodRect::new(10, 10, 10, 20),
            Err(MaskError::InvalidFodRect { .. })
        ));
        assert!(matches!(
            FodRect::new(10, 20, 30, 5),
            Err(MaskError::InvalidFodRect { .. })
        ));
    }

    #[test]
    fn test_custom_calibration() {
        let config = MaskConfig::new()
            .with_scale(ScaleFactor::new(1, 2).unwrap())
            .with_fod_rect(FodRect::new(1, 2, 3, 4).unwrap());
        assert_eq!(config.calculate_mask_brightness(9), Some(4));
        assert_eq!(config.fod_rect.command(), "set_fod_rect,1,2,3,4");
    }
}
