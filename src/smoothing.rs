//! Rolling-window smoothing of axis readings.
//!
//! Each axis keeps the last `steps` samples in a fixed ring and a running sum
//! that is updated incrementally: the slot being overwritten is subtracted and
//! the new sample added. History starts zeroed, so the average is pulled toward
//! zero until the window has filled once.
//!
//! In advanced mode the largest and smallest sample are dropped before
//! averaging. The min/max search only covers slots `0..=steps - 2`; the last
//! slot of the window is never a candidate for rejection.

use crate::{
    axis::{Axis, Sample},
    error::ConfigError,
};

/// Largest supported window
pub const MAX_STEPS: u8 = 10;

/// Validated smoothing configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Smoothing {
    steps: u8,
    advanced: bool,
}

impl Smoothing {
    /// Window of `steps` samples, clamped to [`MAX_STEPS`]
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyWindow`] for zero steps and
    /// [`ConfigError::AdvancedWindowTooSmall`] if `advanced` is set with fewer
    /// than 3 steps
    pub fn new(steps: u8, advanced: bool) -> Result<Self, ConfigError> {
        let steps = steps.min(MAX_STEPS);
        if steps == 0 {
            return Err(ConfigError::EmptyWindow);
        }
        if advanced && steps < 3 {
            return Err(ConfigError::AdvancedWindowTooSmall(steps));
        }
        Ok(Self { steps, advanced })
    }

    /// Plain rolling average
    ///
    /// # Errors
    ///
    /// See [`Self::new`]
    pub fn basic(steps: u8) -> Result<Self, ConfigError> {
        Self::new(steps, false)
    }

    /// Rolling average with min/max rejection
    ///
    /// # Errors
    ///
    /// See [`Self::new`]
    pub fn advanced(steps: u8) -> Result<Self, ConfigError> {
        Self::new(steps, true)
    }

    #[must_use]
    pub const fn steps(&self) -> u8 {
        self.steps
    }

    #[must_use]
    pub const fn is_advanced(&self) -> bool {
        self.advanced
    }
}

/// Ring buffer state of the smoothing stage
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Smoother {
    config: Smoothing,
    history: [[i32; MAX_STEPS as usize]; 3],
    totals: [i64; 3],
    cursor: usize,
}

impl Smoother {
    #[must_use]
    pub const fn new(config: Smoothing) -> Self {
        Self {
            config,
            history: [[0; MAX_STEPS as usize]; 3],
            totals: [0; 3],
            cursor: 0,
        }
    }

    #[must_use]
    pub const fn config(&self) -> Smoothing {
        self.config
    }

    const fn steps(&self) -> usize {
        self.config.steps as usize
    }

    /// Push one sample into the window of every axis
    pub fn update(&mut self, sample: Sample) {
        let cursor = self.cursor;
        for (i, value) in sample.to_array().into_iter().enumerate() {
            let slot = &mut self.history[i][cursor];
            self.totals[i] -= i64::from(*slot);
            *slot = value;
            self.totals[i] += i64::from(value);
        }
        self.cursor = (cursor + 1) % self.steps();
    }

    /// Smoothed value of one axis
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn value(&self, axis: Axis) -> i32 {
        let i = axis.index();
        let steps = self.steps();
        let total = self.totals[i];

        if !self.config.advanced {
            return (total / steps as i64) as i32;
        }

        let window = &self.history[i][..steps];
        let mut max = 0;
        let mut min = 0;
        for j in 0..steps - 1 {
            if window[j] > window[max] {
                max = j;
            }
            if window[j] < window[min] {
                min = j;
            }
        }

        let kept = total - i64::from(window[max]) - i64::from(window[min]);
        (kept / (steps as i64 - 2)) as i32
    }

    /// Smoothed values of all axes
    #[must_use]
    pub fn sample(&self) -> Sample {
        Sample::new(self.value(Axis::X), self.value(Axis::Y), self.value(Axis::Z))
    }

    /// Drop all history
    pub fn clear(&mut self) {
        *self = Self::new(self.config);
    }
}
