//! Minimal MPU-6050 consumer of the bus controller.
//!
//! Covers connection checking, the sleep bit and the gyro self-test registers;
//! everything else about the sensor is out of scope for this crate.
#![allow(unused_parens)]

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::SevenBitAddress;
use modular_bitfield::prelude::*;

use crate::bus::BusController;
use crate::error::Result;
use crate::interface::BusPeripheral;
use crate::time::TimeSource;

/// Slave address with AD0 tied low.
pub const DEFAULT_ADDRESS: SevenBitAddress = 0x68;
/// Value reported by `WHO_AM_I`.
pub const EXPECTED_WHO_AM_I: u8 = 0x68;

/// Register address of `SELF_TEST_X`.
pub const REG_SELF_TEST_X: u8 = 0x0D;
/// Register address of `GYRO_CONFIG`.
pub const REG_GYRO_CONFIG: u8 = 0x1B;
/// Register address of `PWR_MGMT_1`.
pub const REG_PWR_MGMT_1: u8 = 0x6B;
/// Register address of `WHO_AM_I`.
pub const REG_WHO_AM_I: u8 = 0x75;

/// Gyroscope full-scale range in `GYRO_CONFIG.FS_SEL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[repr(u8)]
#[bits = 2]
pub enum GyroFullScale {
    /// ±250 °/s.
    Dps250 = 0b00,
    /// ±500 °/s.
    Dps500 = 0b01,
    /// ±1000 °/s.
    Dps1000 = 0b10,
    /// ±2000 °/s.
    Dps2000 = 0b11,
}

/// Bitfield representation of `PWR_MGMT_1` (address `0x6B`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerManagement1 {
    // Clock source selection (bits 2:0).
    pub clock_select: B3,
    // Temperature sensor disable (bit 3).
    pub temp_disable: bool,
    #[skip]
    __: B1,
    // Cycle between sleep and single samples (bit 5).
    pub cycle: bool,
    // Sleep mode (bit 6).
    pub sleep: bool,
    // Device reset (bit 7).
    pub device_reset: bool,
}

impl From<u8> for PowerManagement1 {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<PowerManagement1> for u8 {
    fn from(value: PowerManagement1) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of `GYRO_CONFIG` (address `0x1B`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GyroConfig {
    #[skip]
    __: B3,
    // Full-scale range (bits 4:3).
    pub full_scale: GyroFullScale,
    // Z-axis self-test (bit 5).
    pub z_self_test: bool,
    // Y-axis self-test (bit 6).
    pub y_self_test: bool,
    // X-axis self-test (bit 7).
    pub x_self_test: bool,
}

impl From<GyroConfig> for u8 {
    fn from(value: GyroConfig) -> Self {
        value.into_bytes()[0]
    }
}

/// MPU-6050 accessed through a [`BusController`].
pub struct Mpu6050<BUS, TIME, DELAY> {
    bus: BusController<BUS, TIME, DELAY>,
    address: SevenBitAddress,
}

impl<BUS, TIME, DELAY> Mpu6050<BUS, TIME, DELAY> {
    /// Creates a sensor handle at [`DEFAULT_ADDRESS`].
    pub fn new(bus: BusController<BUS, TIME, DELAY>) -> Self {
        Self::with_address(bus, DEFAULT_ADDRESS)
    }

    /// Creates a sensor handle at an explicit slave address.
    pub fn with_address(bus: BusController<BUS, TIME, DELAY>, address: SevenBitAddress) -> Self {
        Self { bus, address }
    }

    /// Consumes the handle and returns the controller.
    pub fn release(self) -> BusController<BUS, TIME, DELAY> {
        self.bus
    }

    /// Provides mutable access to the underlying controller.
    pub fn bus_mut(&mut self) -> &mut BusController<BUS, TIME, DELAY> {
        &mut self.bus
    }
}

impl<BUS, TIME, DELAY> Mpu6050<BUS, TIME, DELAY>
where
    BUS: BusPeripheral,
    TIME: TimeSource,
    DELAY: DelayNs,
{
    /// Reads `WHO_AM_I` and compares it against [`EXPECTED_WHO_AM_I`].
    pub fn check_identity(&mut self) -> Result<bool> {
        let id = self.bus.read_byte(self.address, REG_WHO_AM_I)?;
        Ok(id == EXPECTED_WHO_AM_I)
    }

    /// Enters or leaves sleep mode; the register is only rewritten when the
    /// bit has to change.
    pub fn set_sleep(&mut self, enabled: bool) -> Result<()> {
        let mut power = PowerManagement1::from(self.bus.read_byte(self.address, REG_PWR_MGMT_1)?);
        if power.sleep() == enabled {
            return Ok(());
        }

        power.set_sleep(enabled);
        self.bus
            .write_bytes(self.address, REG_PWR_MGMT_1, &[u8::from(power)])
    }

    /// Enables the self-test on all three gyro axes at ±250 °/s.
    pub fn start_gyro_self_test(&mut self) -> Result<()> {
        let config = GyroConfig::new()
            .with_full_scale(GyroFullScale::Dps250)
            .with_x_self_test(true)
            .with_y_self_test(true)
            .with_z_self_test(true);
        self.bus
            .write_bytes(self.address, REG_GYRO_CONFIG, &[u8::from(config)])
    }

    /// Returns the X-gyro factory trim code (low nibble of `SELF_TEST_X`).
    pub fn gyro_x_factory_trim(&mut self) -> Result<u8> {
        let raw = self.bus.read_byte(self.address, REG_SELF_TEST_X)?;
        Ok(raw & 0x0F)
    }
}
