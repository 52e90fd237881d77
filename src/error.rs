use crate::axis::Axis;

/// Error type for QMC5883L bus operations
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Communication error with the sensor
    Communication(E),
}

/// Rejected calibration or smoothing configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Calibration bound outside the sensor's 16-bit output range on this axis
    OutOfRange(Axis),
    /// Calibration maximum is below the minimum on this axis
    InvertedBounds(Axis),
    /// Calibration half-range is zero on this axis, so no scale can be derived
    DegenerateBounds(Axis),
    /// Calibration requested before any sample was recorded
    NoSamples,
    /// Smoothing window of zero steps
    EmptyWindow,
    /// Advanced smoothing drops two samples per window and needs at least 3 steps
    AdvancedWindowTooSmall(u8),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::OutOfRange(axis) => {
                write!(f, "calibration bound outside 16-bit range on {axis:?} axis")
            }
            Self::InvertedBounds(axis) => write!(f, "calibration max < min on {axis:?} axis"),
            Self::DegenerateBounds(axis) => {
                write!(f, "calibration range too narrow on {axis:?} axis")
            }
            Self::NoSamples => f.write_str("no calibration samples recorded"),
            Self::EmptyWindow => f.write_str("smoothing window must hold at least one step"),
            Self::AdvancedWindowTooSmall(steps) => {
                write!(f, "advanced smoothing needs at least 3 steps, got {steps}")
            }
        }
    }
}

impl core::error::Error for ConfigError {}
