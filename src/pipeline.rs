//! Per-cycle reading pipeline shared by the blocking and async drivers.
//!
//! raw sample -> calibration (if set) -> smoothing (if set) -> axis getters

use crate::{
    axis::{Axis, Sample},
    calibration::Calibration,
    heading,
    smoothing::{Smoother, Smoothing},
};

/// Whether the exposed axis values come from the last acquisition attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Freshness {
    /// No acquisition has succeeded yet
    Empty,
    /// The last acquisition succeeded
    Fresh,
    /// The last acquisition failed; values are left over from an earlier cycle
    Stale,
}

/// Pipeline state: last raw and calibrated samples plus the enabled stages
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pipeline {
    raw: Sample,
    calibrated: Sample,
    calibration: Option<Calibration>,
    smoother: Option<Smoother>,
    freshness: Freshness,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipeline {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            raw: Sample::new(0, 0, 0),
            calibrated: Sample::new(0, 0, 0),
            calibration: None,
            smoother: None,
            freshness: Freshness::Empty,
        }
    }

    /// Enable calibration for all subsequent samples
    pub fn set_calibration(&mut self, calibration: Calibration) {
        self.calibration = Some(calibration);
    }

    #[must_use]
    pub const fn calibration(&self) -> Option<&Calibration> {
        self.calibration.as_ref()
    }

    /// Enable smoothing, starting from an empty window
    pub fn set_smoothing(&mut self, smoothing: Smoothing) {
        self.smoother = Some(Smoother::new(smoothing));
    }

    #[must_use]
    pub fn smoothing(&self) -> Option<Smoothing> {
        self.smoother.as_ref().map(Smoother::config)
    }

    /// Run a freshly acquired raw sample through every enabled stage
    pub fn process(&mut self, raw: Sample) {
        self.raw = raw;

        let corrected = match &self.calibration {
            Some(calibration) => {
                self.calibrated = calibration.apply(raw);
                self.calibrated
            }
            None => raw,
        };

        if let Some(smoother) = self.smoother.as_mut() {
            smoother.update(corrected);
        }

        self.freshness = Freshness::Fresh;
    }

    /// Record a failed acquisition; exposed values are kept as they are
    pub fn mark_stale(&mut self) {
        if self.freshness != Freshness::Empty {
            self.freshness = Freshness::Stale;
        }
    }

    #[must_use]
    pub const fn freshness(&self) -> Freshness {
        self.freshness
    }

    #[must_use]
    pub const fn raw(&self) -> Sample {
        self.raw
    }

    /// Exposed value of an axis: smoothed if smoothing is on, else calibrated
    /// if calibration is on, else raw
    #[must_use]
    pub fn axis(&self, axis: Axis) -> i32 {
        if let Some(smoother) = &self.smoother {
            return smoother.value(axis);
        }
        if self.calibration.is_some() {
            return self.calibrated.get(axis);
        }
        self.raw.get(axis)
    }

    /// Exposed values of all axes
    #[must_use]
    pub fn sample(&self) -> Sample {
        Sample::new(self.axis(Axis::X), self.axis(Axis::Y), self.axis(Axis::Z))
    }

    /// Azimuth of the exposed X/Y values in degrees
    #[must_use]
    pub fn azimuth(&self) -> u16 {
        heading::azimuth(self.axis(Axis::X), self.axis(Axis::Y))
    }
}
