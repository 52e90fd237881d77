#![cfg_attr(not(test), no_std)]
#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]

mod asynch;
mod axis;
mod calibration;
mod driver;
mod error;
pub mod heading;
mod pipeline;
mod register;
mod smoothing;
mod utils;

pub use asynch::Qmc5883lAsync;
pub use axis::{Axis, Sample};
pub use calibration::{AxisBounds, BoundsRecorder, Calibration, CalibrationBounds};
pub use driver::Qmc5883l;
pub use error::{ConfigError, Error};
pub use heading::{DIRECTIONS, azimuth, bearing, direction};
pub use pipeline::{Freshness, Pipeline};
pub use register::{
    Control1Register, Control2Register, DEFAULT_ADDRESS, Mode, Oversampling, OutputDataRate,
    Range, Register, StatusRegister,
};
pub use smoothing::{MAX_STEPS, Smoother, Smoothing};
