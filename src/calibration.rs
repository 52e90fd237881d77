//! Hard-iron offset and per-axis soft-iron scale correction.
//!
//! Bounds are the extremes seen on each axis while the sensor is swept through
//! all orientations. The midpoint of each axis is taken as the hard-iron offset,
//! and each axis is scaled so that its half-range matches the mean half-range of
//! all three axes.

use crate::{
    axis::{Axis, Sample},
    error::ConfigError,
};

/// Observed extremes of one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisBounds {
    pub min: i32,
    pub max: i32,
}

impl AxisBounds {
    #[must_use]
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Midpoint of the range (integer division)
    #[must_use]
    pub const fn offset(&self) -> i64 {
        (self.min as i64 + self.max as i64) / 2
    }

    /// Half of the range (integer division)
    #[must_use]
    pub const fn half_range(&self) -> i64 {
        (self.max as i64 - self.min as i64) / 2
    }

    /// Both bounds lie within the sensor's 16-bit output range
    #[must_use]
    pub const fn in_sample_range(&self) -> bool {
        self.min >= i16::MIN as i32 && self.max <= i16::MAX as i32
    }
}

/// Min/max bounds of all three axes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationBounds {
    pub x: AxisBounds,
    pub y: AxisBounds,
    pub z: AxisBounds,
}

impl CalibrationBounds {
    #[must_use]
    pub const fn new(
        x_min: i32,
        x_max: i32,
        y_min: i32,
        y_max: i32,
        z_min: i32,
        z_max: i32,
    ) -> Self {
        Self {
            x: AxisBounds::new(x_min, x_max),
            y: AxisBounds::new(y_min, y_max),
            z: AxisBounds::new(z_min, z_max),
        }
    }

    #[must_use]
    pub const fn axis(&self, axis: Axis) -> AxisBounds {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }
}

/// Validated calibration with precomputed per-axis offset and scale
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Calibration {
    bounds: CalibrationBounds,
    offsets: [i32; 3],
    scales: [f32; 3],
}

impl Calibration {
    /// Validate bounds and derive offsets and scales
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::OutOfRange`] if a bound lies outside the 16-bit
    /// sample range, [`ConfigError::InvertedBounds`] if `max < min` on any axis,
    /// and [`ConfigError::DegenerateBounds`] if an axis half-range is zero
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn new(bounds: CalibrationBounds) -> Result<Self, ConfigError> {
        let mut offsets = [0; 3];
        let mut deltas = [0i64; 3];

        for axis in Axis::ALL {
            let b = bounds.axis(axis);
            if !b.in_sample_range() {
                return Err(ConfigError::OutOfRange(axis));
            }
            if b.max < b.min {
                return Err(ConfigError::InvertedBounds(axis));
            }
            let delta = b.half_range();
            if delta == 0 {
                return Err(ConfigError::DegenerateBounds(axis));
            }
            // bounds are within i16, so the midpoint is too
            offsets[axis.index()] = b.offset() as i32;
            deltas[axis.index()] = delta;
        }

        let avg_delta = (deltas[0] + deltas[1] + deltas[2]) / 3;
        let scales = deltas.map(|delta| avg_delta as f32 / delta as f32);

        #[cfg(feature = "defmt")]
        defmt::debug!("Calibration offsets: {}, scales: {}", offsets, scales);

        Ok(Self {
            bounds,
            offsets,
            scales,
        })
    }

    #[must_use]
    pub const fn bounds(&self) -> &CalibrationBounds {
        &self.bounds
    }

    /// Hard-iron offset of an axis
    #[must_use]
    pub const fn offset(&self, axis: Axis) -> i32 {
        self.offsets[axis.index()]
    }

    /// Soft-iron scale factor of an axis
    #[must_use]
    pub const fn scale(&self, axis: Axis) -> f32 {
        self.scales[axis.index()]
    }

    /// Correct a raw sample; the scaled value is truncated toward zero
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn apply(&self, raw: Sample) -> Sample {
        let raw = raw.to_array();
        // float-to-int `as` saturates at the i32 limits
        Sample::from(core::array::from_fn(|i| {
            let centered = i64::from(raw[i]) - i64::from(self.offsets[i]);
            (centered as f32 * self.scales[i]) as i32
        }))
    }
}

/// Tracks per-axis extremes during a calibration sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoundsRecorder {
    bounds: Option<CalibrationBounds>,
    samples: u32,
}

impl BoundsRecorder {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bounds: None,
            samples: 0,
        }
    }

    /// Widen the recorded bounds to include `sample`
    ///
    /// Returns `true` if any axis bound changed
    pub fn record(&mut self, sample: Sample) -> bool {
        self.samples = self.samples.saturating_add(1);

        let Some(bounds) = self.bounds.as_mut() else {
            self.bounds = Some(CalibrationBounds::new(
                sample.x, sample.x, sample.y, sample.y, sample.z, sample.z,
            ));
            return true;
        };

        let mut changed = false;
        for (b, v) in [
            (&mut bounds.x, sample.x),
            (&mut bounds.y, sample.y),
            (&mut bounds.z, sample.z),
        ] {
            if v < b.min {
                b.min = v;
                changed = true;
            }
            if v > b.max {
                b.max = v;
                changed = true;
            }
        }
        changed
    }

    /// Number of samples recorded so far
    #[must_use]
    pub const fn samples(&self) -> u32 {
        self.samples
    }

    /// Recorded bounds, `None` before the first sample
    #[must_use]
    pub const fn bounds(&self) -> Option<CalibrationBounds> {
        self.bounds
    }

    /// Build a calibration from what was recorded
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoSamples`] if nothing was recorded, or any
    /// error of [`Calibration::new`]
    pub fn calibration(&self) -> Result<Calibration, ConfigError> {
        let bounds = self.bounds.ok_or(ConfigError::NoSamples)?;
        Calibration::new(bounds)
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symmetric_bounds_are_identity() {
        let cal = Calibration::new(CalibrationBounds::new(-100, 100, -100, 100, -100, 100))
            .unwrap();

        for axis in Axis::ALL {
            assert_eq!(cal.offset(axis), 0);
            assert!((cal.scale(axis) - 1.0).abs() < f32::EPSILON);
        }

        for raw in [
            Sample::new(0, 0, 0),
            Sample::new(37, -12, 99),
            Sample::new(-100, 100, -1),
        ] {
            assert_eq!(cal.apply(raw), raw);
        }
    }

    #[test]
    fn asymmetric_bounds_shift_offset() {
        let cal = Calibration::new(CalibrationBounds::new(-90, 110, -100, 100, -100, 100))
            .unwrap();

        assert_eq!(cal.offset(Axis::X), 10);
        assert_eq!(cal.bounds().x.half_range(), 100);
        assert!((cal.scale(Axis::X) - 1.0).abs() < f32::EPSILON);

        let out = cal.apply(Sample::new(50, 50, 50));
        assert_eq!(out, Sample::new(40, 50, 50));
        let out = cal.apply(Sample::new(-90, 0, 0));
        assert_eq!(out, Sample::new(-100, 0, 0));
    }

    #[test]
    fn scales_toward_mean_half_range() {
        // half ranges 200, 100, 300 -> mean 200
        let cal = Calibration::new(CalibrationBounds::new(-200, 200, -100, 100, -300, 300))
            .unwrap();

        assert!((cal.scale(Axis::X) - 1.0).abs() < f32::EPSILON);
        assert!((cal.scale(Axis::Y) - 2.0).abs() < f32::EPSILON);
        assert!((cal.scale(Axis::Z) - 2.0 / 3.0).abs() < 1e-6);

        let out = cal.apply(Sample::new(10, 10, 10));
        assert_eq!(out, Sample::new(10, 20, 6));
        let out = cal.apply(Sample::new(-10, -10, -10));
        assert_eq!(out, Sample::new(-10, -20, -6));
    }

    #[test]
    fn rejects_degenerate_bounds() {
        let err = Calibration::new(CalibrationBounds::new(-100, 100, 5, 5, -100, 100));
        assert_eq!(err, Err(ConfigError::DegenerateBounds(Axis::Y)));

        let err = Calibration::new(CalibrationBounds::new(-100, 100, -100, 100, 7, 8));
        assert_eq!(err, Err(ConfigError::DegenerateBounds(Axis::Z)));
    }

    #[test]
    fn rejects_inverted_bounds() {
        let err = Calibration::new(CalibrationBounds::new(100, -100, -100, 100, -100, 100));
        assert_eq!(err, Err(ConfigError::InvertedBounds(Axis::X)));
    }

    #[test]
    fn recorder_tracks_extremes() {
        let mut rec = BoundsRecorder::new();
        assert_eq!(rec.bounds(), None);
        assert_eq!(rec.calibration(), Err(ConfigError::NoSamples));

        assert!(rec.record(Sample::new(0, 0, 0)));
        assert!(rec.record(Sample::new(-90, 100, -100)));
        assert!(rec.record(Sample::new(110, -100, 100)));
        assert!(!rec.record(Sample::new(5, 5, 5)));

        assert_eq!(rec.samples(), 4);
        assert_eq!(
            rec.bounds(),
            Some(CalibrationBounds::new(-90, 110, -100, 100, -100, 100))
        );
        assert_eq!(rec.calibration().unwrap().offset(Axis::X), 10);

        rec.reset();
        assert_eq!(rec.samples(), 0);
        assert_eq!(rec.bounds(), None);
    }

    #[test]
    fn rejects_bounds_outside_sample_range() {
        let err = Calibration::new(CalibrationBounds::new(
            i32::MIN,
            i32::MAX,
            -100,
            100,
            -100,
            100,
        ));
        assert_eq!(err, Err(ConfigError::OutOfRange(Axis::X)));

        let err = Calibration::new(CalibrationBounds::new(
            -100,
            100,
            i32::MIN,
            i32::MIN + 400,
            -100,
            100,
        ));
        assert_eq!(err, Err(ConfigError::OutOfRange(Axis::Y)));

        let err = Calibration::new(CalibrationBounds::new(-100, 100, -100, 100, 0, 40_000));
        assert_eq!(err, Err(ConfigError::OutOfRange(Axis::Z)));
    }

    #[test]
    fn accepts_full_sample_range() {
        let cal = Calibration::new(CalibrationBounds::new(
            i32::from(i16::MIN),
            i32::from(i16::MAX),
            i32::from(i16::MIN),
            i32::from(i16::MAX),
            i32::from(i16::MIN),
            i32::from(i16::MAX),
        ))
        .unwrap();

        assert_eq!(cal.offset(Axis::X), 0);
        assert_eq!(cal.apply(Sample::new(1000, -1000, 0)), Sample::new(1000, -1000, 0));
    }

    #[test]
    fn apply_saturates_extreme_samples() {
        // half ranges 1, 1000, 1000 -> mean 667, X scale 667
        let cal = Calibration::new(CalibrationBounds::new(0, 2, -1000, 1000, -1000, 1000))
            .unwrap();

        let out = cal.apply(Sample::new(i32::MAX, i32::MIN, 0));
        assert_eq!(out.x, i32::MAX);
        assert!(out.y < 0 && out.y > i32::MIN);
        assert_eq!(out.z, 0);

        let out = cal.apply(Sample::new(i32::MIN, 0, 0));
        assert_eq!(out.x, i32::MIN);
    }

    #[test]
    fn recorder_rejects_extreme_sweep() {
        let mut rec = BoundsRecorder::new();
        rec.record(Sample::new(i32::MAX, 0, 0));
        rec.record(Sample::new(i32::MAX - 10, 100, 100));
        rec.record(Sample::new(i32::MAX - 5, -100, -100));

        assert_eq!(rec.calibration(), Err(ConfigError::OutOfRange(Axis::X)));
    }
}
