//! Planar compass heading from the X/Y field components.
//!
//! No tilt compensation is applied; the sensor is assumed to be level.

/// Width of one of the 16 compass sectors in degrees
pub const SECTOR_DEGREES: f32 = 22.5;

/// Labels of the 16 compass points, right-aligned to three characters
pub const DIRECTIONS: [&str; 16] = [
    "  N", "NNE", " NE", "ENE", "  E", "ESE", " SE", "SSE", "  S", "SSW", " SW", "WSW", "  W",
    "WNW", " NW", "NNW",
];

/// Azimuth in whole degrees, `0..=359`
///
/// `atan2(y, x)` converted to degrees and truncated toward zero; negative
/// angles are wrapped by adding 360
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn azimuth(x: i32, y: i32) -> u16 {
    let degrees = libm::atan2(f64::from(y), f64::from(x)).to_degrees() as i32;
    if degrees < 0 {
        (degrees + 360) as u16
    } else {
        degrees as u16
    }
}

/// Compass sector index `0..=15` of an azimuth
///
/// The sector position is rounded half up; 360 wraps back to north (0)
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn bearing(azimuth: u16) -> u8 {
    let a = f32::from(azimuth) / SECTOR_DEGREES;
    let whole = libm::floorf(a);
    let sector = if a - whole >= 0.5 {
        libm::ceilf(a)
    } else {
        whole
    };
    (sector as u32 % 16) as u8
}

/// Three-character compass label of an azimuth, such as `"NNE"` or `"  N"`
#[must_use]
pub fn direction(azimuth: u16) -> &'static str {
    DIRECTIONS[usize::from(bearing(azimuth))]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn azimuth_cardinals() {
        assert_eq!(azimuth(1, 0), 0);
        assert_eq!(azimuth(0, 1), 90);
        assert_eq!(azimuth(-1, 0), 180);
        assert_eq!(azimuth(0, -1), 270);
    }

    #[test]
    fn azimuth_wraps_negative_angles() {
        assert_eq!(azimuth(1, -1), 315);
        assert_eq!(azimuth(-1, -1), 225);
        // -0.57 degrees truncates to 0, not 360
        assert_eq!(azimuth(100, -1), 0);
    }

    #[test]
    fn azimuth_stays_in_range() {
        for x in -20..=20 {
            for y in -20..=20 {
                assert!(azimuth(x, y) < 360, "x={x} y={y}");
            }
        }
    }

    #[test]
    fn bearing_rounds_half_up() {
        assert_eq!(bearing(0), 0);
        assert_eq!(bearing(11), 0);
        assert_eq!(bearing(12), 1);
        assert_eq!(bearing(33), 1);
        assert_eq!(bearing(34), 2);
        assert_eq!(bearing(180), 8);
    }

    #[test]
    fn bearing_wraps_to_north() {
        assert_eq!(bearing(348), 15);
        assert_eq!(bearing(349), 0);
        assert_eq!(bearing(359), 0);
        for az in 0..360 {
            assert!(bearing(az) <= 15);
        }
    }

    #[test]
    fn direction_labels() {
        assert_eq!(direction(0), "  N");
        assert_eq!(direction(12), "NNE");
        assert_eq!(direction(45), " NE");
        assert_eq!(direction(90), "  E");
        assert_eq!(direction(270), "  W");
        assert_eq!(direction(359), "  N");
        assert!(DIRECTIONS.iter().all(|d| d.len() == 3));
    }
}
