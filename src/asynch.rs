//! Asynchronous driver for QMC5883L magnetometer

use embedded_hal_async::i2c::I2c;

use crate::{
    axis::{Axis, Sample},
    calibration::Calibration,
    error::Error,
    heading,
    pipeline::{Freshness, Pipeline},
    register::{
        Control1Register, Control2Register, DEFAULT_ADDRESS, Mode, Oversampling, OutputDataRate,
        Range, Register, SET_RESET_PERIOD, StatusRegister,
    },
    smoothing::Smoothing,
    utils,
};

/// QMC5883L driver instance (asynchronous)
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Qmc5883lAsync<I2C> {
    i2c: I2C,
    address: u8,
    pipeline: Pipeline,
}

impl<I2C, E> Qmc5883lAsync<I2C>
where
    I2C: I2c<Error = E>,
{
    /// Create a new driver instance at the default address
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DEFAULT_ADDRESS)
    }

    /// Create a new driver instance at a custom address
    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            pipeline: Pipeline::new(),
        }
    }

    /// Release the I2C bus, consuming the driver
    pub fn release(self) -> I2C {
        self.i2c
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn set_address(&mut self, address: u8) {
        self.address = address;
    }

    async fn write_register(&mut self, register: Register, value: u8) -> Result<(), Error<E>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("Writing 0x{:02X} to register {}", value, register);

        self.i2c
            .write(self.address, &[register.into(), value])
            .await
            .map_err(Error::Communication)
    }

    async fn read_register(&mut self, register: Register) -> Result<u8, Error<E>> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.address, &[register.into()], &mut buf)
            .await
            .map_err(Error::Communication)?;

        #[cfg(feature = "defmt")]
        defmt::trace!("Register {} value: 0x{:02X}", register, buf[0]);

        Ok(buf[0])
    }

    /// Initialize the chip with continuous measurement at 200 Hz, ±8 gauss,
    /// 512x oversampling
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub async fn init(&mut self) -> Result<(), Error<E>> {
        self.write_register(Register::SetResetPeriod, SET_RESET_PERIOD)
            .await?;
        self.set_mode(
            Mode::Continuous,
            OutputDataRate::Hz200,
            Range::Gauss8,
            Oversampling::Osr512,
        )
        .await
    }

    /// Write mode, data rate, range and oversampling to CONTROL1
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub async fn set_mode(
        &mut self,
        mode: Mode,
        odr: OutputDataRate,
        range: Range,
        osr: Oversampling,
    ) -> Result<(), Error<E>> {
        let control = Control1Register::from_settings(mode, odr, range, osr);
        self.write_register(Register::Control1, control.0).await
    }

    /// Soft reset: all chip registers return to their defaults
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub async fn reset(&mut self) -> Result<(), Error<E>> {
        let mut control = Control2Register(0);
        control.set_soft_rst(true);
        self.write_register(Register::Control2, control.0).await
    }

    /// Read the STATUS register
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub async fn status(&mut self) -> Result<StatusRegister, Error<E>> {
        self.read_register(Register::Status).await.map(StatusRegister)
    }

    /// Read the chip identification register
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub async fn chip_id(&mut self) -> Result<u8, Error<E>> {
        self.read_register(Register::ChipId).await
    }

    /// Enable calibration for subsequent readings
    pub fn set_calibration(&mut self, calibration: Calibration) {
        self.pipeline.set_calibration(calibration);
    }

    /// Enable smoothing for subsequent readings, discarding any window history
    pub fn set_smoothing(&mut self, smoothing: Smoothing) {
        self.pipeline.set_smoothing(smoothing);
    }

    /// Acquire X/Y/Z and run them through calibration and smoothing
    ///
    /// On success returns the exposed values after all enabled stages. On
    /// failure no stage runs, the getters keep returning the previous values
    /// and [`Self::freshness`] reports [`Freshness::Stale`]
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub async fn read(&mut self) -> Result<Sample, Error<E>> {
        let mut buf = [0u8; 6];
        if let Err(e) = self
            .i2c
            .write_read(self.address, &[Register::DataXLsb.into()], &mut buf)
            .await
        {
            #[cfg(feature = "defmt")]
            defmt::warn!("Axis read failed, keeping previous values");
            self.pipeline.mark_stale();
            return Err(Error::Communication(e));
        }

        let raw = Sample::from(utils::decode_xyz(&buf));

        #[cfg(feature = "defmt")]
        defmt::trace!("Raw sample: {}", raw);

        self.pipeline.process(raw);
        Ok(self.pipeline.sample())
    }

    /// Whether the exposed values come from the latest read
    pub fn freshness(&self) -> Freshness {
        self.pipeline.freshness()
    }

    /// Last raw sample, before calibration and smoothing
    pub fn raw(&self) -> Sample {
        self.pipeline.raw()
    }

    /// Exposed value of an axis (smoothed, calibrated or raw)
    pub fn axis(&self, axis: Axis) -> i32 {
        self.pipeline.axis(axis)
    }

    pub fn x(&self) -> i32 {
        self.axis(Axis::X)
    }

    pub fn y(&self) -> i32 {
        self.axis(Axis::Y)
    }

    pub fn z(&self) -> i32 {
        self.axis(Axis::Z)
    }

    /// Compass azimuth in degrees (0-359) from the exposed X/Y values
    pub fn azimuth(&self) -> u16 {
        self.pipeline.azimuth()
    }

    /// Compass sector (0-15) of an azimuth
    #[allow(clippy::unused_self)]
    pub fn bearing(&self, azimuth: u16) -> u8 {
        heading::bearing(azimuth)
    }

    /// Three-character compass label of an azimuth
    #[allow(clippy::unused_self)]
    pub fn direction(&self, azimuth: u16) -> &'static str {
        heading::direction(azimuth)
    }
}
