//! Register map definitions for the MSP430G2553 USCI_B0 and Timer0_A3 blocks.
#![allow(unused_parens)]

use modular_bitfield::prelude::*;

use crate::params::{InputDivider, TimerClockSource, TimerMode, UsciClockSource, UsciMode};

/// Register address of `IFG2`.
pub const REG_IFG2: u16 = 0x0003;
/// Register address of `UCB0CTL0`.
pub const REG_UCB0CTL0: u16 = 0x0068;
/// Register address of `UCB0CTL1`.
pub const REG_UCB0CTL1: u16 = 0x0069;
/// Register address of `UCB0BR0`.
pub const REG_UCB0BR0: u16 = 0x006A;
/// Register address of `UCB0BR1`.
pub const REG_UCB0BR1: u16 = 0x006B;
/// Register address of `UCB0STAT`.
pub const REG_UCB0STAT: u16 = 0x006D;
/// Register address of `UCB0RXBUF`.
pub const REG_UCB0RXBUF: u16 = 0x006E;
/// Register address of `UCB0TXBUF`.
pub const REG_UCB0TXBUF: u16 = 0x006F;
/// Register address of `UCB0I2CSA`.
pub const REG_UCB0I2CSA: u16 = 0x011A;
/// Register address of `TA0CTL`.
pub const REG_TA0CTL: u16 = 0x0160;
/// Register address of `TA0CCTL0`.
pub const REG_TA0CCTL0: u16 = 0x0162;
/// Register address of `TA0CCR0`.
pub const REG_TA0CCR0: u16 = 0x0172;

/// Minimal metadata exposed by every register value type.
pub trait Register {
    /// Raw storage backing the register payload.
    type Raw: Copy;
    /// Peripheral address as documented in the device datasheet.
    const ADDRESS: u16;
    /// Power-up value listed in the family user's guide.
    const RESET_VALUE: Self::Raw;
}

/// Bitfield representation of `UCB0CTL0` in I2C mode (address `0x68`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsciControl0 {
    // Synchronous mode enable (bit 0).
    pub sync: bool,
    // USCI mode selection (bits 2:1).
    pub mode: UsciMode,
    // Master mode select (bit 3).
    pub master: bool,
    #[skip]
    __: B1,
    // Multi-master environment select (bit 5).
    pub multi_master: bool,
    // 10-bit slave addressing (bit 6).
    pub slave_10bit: bool,
    // 10-bit own addressing (bit 7).
    pub own_10bit: bool,
}

impl From<u8> for UsciControl0 {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<UsciControl0> for u8 {
    fn from(value: UsciControl0) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of `UCB0CTL1` in I2C mode (address `0x69`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsciControl1 {
    // Software reset enable (bit 0).
    pub software_reset: bool,
    // Transmit start condition (bit 1).
    pub tx_start: bool,
    // Transmit stop condition (bit 2).
    pub tx_stop: bool,
    // Transmit a NACK (bit 3).
    pub tx_nack: bool,
    // Transmitter/receiver select (bit 4).
    pub transmitter: bool,
    #[skip]
    __: B1,
    // USCI clock source select (bits 7:6).
    pub clock_source: UsciClockSource,
}

impl From<u8> for UsciControl1 {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<UsciControl1> for u8 {
    fn from(value: UsciControl1) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of `UCB0STAT` in I2C mode (address `0x6D`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsciStatus {
    // Arbitration lost interrupt flag (bit 0).
    pub arbitration_lost: bool,
    // Start condition interrupt flag (bit 1).
    pub start_received: bool,
    // Stop condition interrupt flag (bit 2).
    pub stop_received: bool,
    // Not-acknowledge interrupt flag (bit 3).
    pub nack_received: bool,
    // Bus busy (bit 4).
    pub bus_busy: bool,
    // General call address received (bit 5).
    pub general_call: bool,
    // SCL held low (bit 6).
    pub scl_low: bool,
    // Listen enable (bit 7).
    pub listen: bool,
}

impl From<u8> for UsciStatus {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<UsciStatus> for u8 {
    fn from(value: UsciStatus) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of `IFG2` (address `0x03`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterruptFlags2 {
    // USCI_A0 receive flag (bit 0).
    pub uca0_rx: bool,
    // USCI_A0 transmit flag (bit 1).
    pub uca0_tx: bool,
    // USCI_B0 receive flag (bit 2).
    pub ucb0_rx: bool,
    // USCI_B0 transmit flag (bit 3).
    pub ucb0_tx: bool,
    #[skip]
    __: B4,
}

impl From<u8> for InterruptFlags2 {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<InterruptFlags2> for u8 {
    fn from(value: InterruptFlags2) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of `TA0CTL` (address `0x160`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerControl {
    // Overflow interrupt flag (bit 0).
    pub interrupt_flag: bool,
    // Overflow interrupt enable (bit 1).
    pub interrupt_enable: bool,
    // Counter clear (bit 2).
    pub clear: bool,
    #[skip]
    __: B1,
    // Mode control (bits 5:4).
    pub mode: TimerMode,
    // Input divider (bits 7:6).
    pub divider: InputDivider,
    // Clock source select (bits 9:8).
    pub clock_source: TimerClockSource,
    #[skip]
    __: B6,
}

impl From<u16> for TimerControl {
    fn from(value: u16) -> Self {
        Self::from_bytes(value.to_le_bytes())
    }
}

impl From<TimerControl> for u16 {
    fn from(value: TimerControl) -> Self {
        u16::from_le_bytes(value.into_bytes())
    }
}

/// Bitfield representation of `TA0CCTL0` (address `0x162`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureCompareControl {
    // Capture/compare interrupt flag (bit 0).
    pub interrupt_flag: bool,
    // Capture overflow (bit 1).
    pub overflow: bool,
    // Output value (bit 2).
    pub out: bool,
    // Capture/compare input (bit 3).
    pub input: bool,
    // Capture/compare interrupt enable (bit 4).
    pub interrupt_enable: bool,
    // Output mode (bits 7:5).
    pub output_mode: B3,
    // Capture mode select (bit 8).
    pub capture: bool,
    #[skip]
    __: B1,
    // Synchronized capture input (bit 10).
    pub synced_input: bool,
    // Synchronize capture source (bit 11).
    pub synchronous: bool,
    // Capture input select (bits 13:12).
    pub input_select: B2,
    // Capture mode (bits 15:14).
    pub capture_mode: B2,
}

impl From<u16> for CaptureCompareControl {
    fn from(value: u16) -> Self {
        Self::from_bytes(value.to_le_bytes())
    }
}

impl From<CaptureCompareControl> for u16 {
    fn from(value: CaptureCompareControl) -> Self {
        u16::from_le_bytes(value.into_bytes())
    }
}

impl Register for UsciControl0 {
    type Raw = u8;
    const ADDRESS: u16 = REG_UCB0CTL0;
    const RESET_VALUE: Self::Raw = 0x01;
}

impl Register for UsciControl1 {
    type Raw = u8;
    const ADDRESS: u16 = REG_UCB0CTL1;
    const RESET_VALUE: Self::Raw = 0x01;
}

impl Register for UsciStatus {
    type Raw = u8;
    const ADDRESS: u16 = REG_UCB0STAT;
    const RESET_VALUE: Self::Raw = 0x00;
}

impl Register for InterruptFlags2 {
    type Raw = u8;
    const ADDRESS: u16 = REG_IFG2;
    const RESET_VALUE: Self::Raw = 0x0A;
}

impl Register for TimerControl {
    type Raw = u16;
    const ADDRESS: u16 = REG_TA0CTL;
    const RESET_VALUE: Self::Raw = 0x0000;
}

impl Register for CaptureCompareControl {
    type Raw = u16;
    const ADDRESS: u16 = REG_TA0CCTL0;
    const RESET_VALUE: Self::Raw = 0x0000;
}
