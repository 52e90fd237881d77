//! Register map and register views for the QMC5883L.

/// Default 7-bit I2C address
pub const DEFAULT_ADDRESS: u8 = 0x0D;

/// Recommended SET/RESET period value
pub const SET_RESET_PERIOD: u8 = 0x01;

/// Register addresses for QMC5883L
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
#[repr(u8)]
pub enum Register {
    /// X axis output, LSB first; X/Y/Z follow in a 6-byte burst
    DataXLsb = 0x00,
    /// X axis output MSB
    DataXMsb = 0x01,
    /// Y axis output LSB
    DataYLsb = 0x02,
    /// Y axis output MSB
    DataYMsb = 0x03,
    /// Z axis output LSB
    DataZLsb = 0x04,
    /// Z axis output MSB
    DataZMsb = 0x05,
    /// Status flags
    Status = 0x06,
    /// Temperature output LSB
    TempLsb = 0x07,
    /// Temperature output MSB
    TempMsb = 0x08,
    /// Control register 1: mode, data rate, range, oversampling
    Control1 = 0x09,
    /// Control register 2: interrupt, pointer roll-over, soft reset
    Control2 = 0x0A,
    /// SET/RESET period
    SetResetPeriod = 0x0B,
    /// Chip identification
    ChipId = 0x0D,
}

impl From<Register> for u8 {
    fn from(reg: Register) -> u8 {
        reg as u8
    }
}

/// Operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Mode {
    Standby = 0b00,
    Continuous = 0b01,
}

/// Output data rate in continuous mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum OutputDataRate {
    Hz10 = 0b00,
    Hz50 = 0b01,
    Hz100 = 0b10,
    Hz200 = 0b11,
}

/// Full scale field range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Range {
    /// ±2 gauss
    Gauss2 = 0b00,
    /// ±8 gauss
    Gauss8 = 0b01,
}

/// Over sample ratio
///
/// Larger ratios trade power for lower in-band noise
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Oversampling {
    Osr512 = 0b00,
    Osr256 = 0b01,
    Osr128 = 0b10,
    Osr64 = 0b11,
}

bitfield::bitfield! {
    /// STATUS
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct StatusRegister(u8);
    impl Debug;
    u8;
    /// Data skipped: a sample was overwritten before it was read
    /// (continuous mode only)
    pub dor, _: 2;
    /// Overflow: one of the axes exceeded the selected range
    pub ovl, _: 1;
    /// Data ready: set when all three axes hold a new sample
    pub drdy, _: 0;
}

impl StatusRegister {
    /// Check if a fresh, in-range sample is waiting
    #[must_use]
    #[inline(always)]
    pub fn is_ready(&self) -> bool {
        self.drdy() && !self.ovl()
    }
}

bitfield::bitfield! {
    /// CONTROL1
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct Control1Register(u8);
    impl Debug;
    u8;
    /// Over sample ratio
    pub osr, set_osr: 7, 6;
    /// Full scale range
    pub rng, set_rng: 5, 4;
    /// Output data rate
    pub odr, set_odr: 3, 2;
    /// Mode control
    pub mode, set_mode: 1, 0;
}

impl Control1Register {
    /// Build the CONTROL1 value from its four fields
    #[must_use]
    pub fn from_settings(
        mode: Mode,
        odr: OutputDataRate,
        range: Range,
        osr: Oversampling,
    ) -> Self {
        let mut r = Self(0);
        r.set_mode(mode as u8);
        r.set_odr(odr as u8);
        r.set_rng(range as u8);
        r.set_osr(osr as u8);
        r
    }
}

bitfield::bitfield! {
    /// CONTROL2
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct Control2Register(u8);
    impl Debug;
    u8;
    /// Soft reset: restores default value of all registers
    pub soft_rst, set_soft_rst: 7;
    /// Pointer roll-over across the data registers
    pub rol_pnt, set_rol_pnt: 6;
    /// Disable the data-ready interrupt pin
    pub int_enb, set_int_enb: 0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control1_packs_default_settings() {
        let r = Control1Register::from_settings(
            Mode::Continuous,
            OutputDataRate::Hz200,
            Range::Gauss8,
            Oversampling::Osr512,
        );
        assert_eq!(r.0, 0x01 | 0x0C | 0x10);
    }

    #[test]
    fn control1_packs_every_field() {
        let r = Control1Register::from_settings(
            Mode::Standby,
            OutputDataRate::Hz50,
            Range::Gauss2,
            Oversampling::Osr64,
        );
        assert_eq!(r.0, 0x04 | 0xC0);
        assert_eq!(r.odr(), OutputDataRate::Hz50 as u8);
        assert_eq!(r.osr(), Oversampling::Osr64 as u8);
    }

    #[test]
    fn soft_reset_bit() {
        let mut r = Control2Register(0);
        r.set_soft_rst(true);
        assert_eq!(r.0, 0x80);
    }

    #[test]
    fn status_flags() {
        let status = StatusRegister(0b001);
        assert!(status.drdy());
        assert!(status.is_ready());

        let status = StatusRegister(0b011);
        assert!(status.ovl());
        assert!(!status.is_ready());
        assert!(!status.dor());
    }
}
