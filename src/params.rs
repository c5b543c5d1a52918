//! Strongly typed field encodings for the USCI_B and Timer_A registers.
//!
//! These enums map directly to the family user's guide field encodings and are
//! used by the bitfield layouts in [`registers`](crate::registers).
//!
//! # Examples
//!
//! ```rust
//! use polled_i2c::params::{TimerMode, UsciClockSource, UsciMode};
//!
//! let mode = UsciMode::I2c;
//! let clock = UsciClockSource::Smclk;
//! let timer = TimerMode::Up;
//! let _ = (mode, clock, timer);
//! ```

use modular_bitfield::prelude::Specifier;

/// Synchronous mode selection in `UCBxCTL0.UCMODEx`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[repr(u8)]
#[bits = 2]
pub enum UsciMode {
    /// 3-pin SPI.
    Spi3Pin = 0b00,
    /// 4-pin SPI with STE active high.
    Spi4PinActiveHigh = 0b01,
    /// 4-pin SPI with STE active low.
    Spi4PinActiveLow = 0b10,
    /// I2C mode.
    I2c = 0b11,
}

/// USCI clock source selection in `UCBxCTL1.UCSSELx`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[repr(u8)]
#[bits = 2]
pub enum UsciClockSource {
    /// External UCLKI pin.
    Uclki = 0b00,
    /// Auxiliary clock.
    Aclk = 0b01,
    /// Sub-main clock.
    Smclk = 0b10,
    /// Sub-main clock (alternate encoding).
    SmclkAlt = 0b11,
}

/// Timer_A clock source selection in `TACTL.TASSELx`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[repr(u8)]
#[bits = 2]
pub enum TimerClockSource {
    /// External TACLK pin.
    Taclk = 0b00,
    /// Auxiliary clock.
    Aclk = 0b01,
    /// Sub-main clock.
    Smclk = 0b10,
    /// Inverted external clock.
    Inclk = 0b11,
}

/// Timer_A counting mode in `TACTL.MCx`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[repr(u8)]
#[bits = 2]
pub enum TimerMode {
    /// Timer halted.
    Stop = 0b00,
    /// Counts up to `TACCR0`.
    Up = 0b01,
    /// Counts up to `0xFFFF`.
    Continuous = 0b10,
    /// Counts up to `TACCR0` then back down.
    UpDown = 0b11,
}

/// Timer_A input clock divider in `TACTL.IDx`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[repr(u8)]
#[bits = 2]
pub enum InputDivider {
    /// Divide by 1.
    Div1 = 0b00,
    /// Divide by 2.
    Div2 = 0b01,
    /// Divide by 4.
    Div4 = 0b10,
    /// Divide by 8.
    Div8 = 0b11,
}

impl InputDivider {
    /// Returns the division factor.
    pub const fn factor(self) -> u32 {
        match self {
            Self::Div1 => 1,
            Self::Div2 => 2,
            Self::Div4 => 4,
            Self::Div8 => 8,
        }
    }
}
