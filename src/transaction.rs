//! Single-shot transaction descriptor.

use embedded_hal::i2c::SevenBitAddress;

use crate::interface::Direction;

/// Data moved by a transaction after the register address phase.
#[derive(Debug, PartialEq, Eq)]
pub enum Payload<'a> {
    /// Bytes written to consecutive registers.
    Write(&'a [u8]),
    /// Buffer filled from the bus.
    Read(&'a mut [u8]),
}

/// One register access against one slave, consumed by
/// [`BusController::execute`](crate::bus::BusController::execute).
#[derive(Debug, PartialEq, Eq)]
pub struct Transaction<'a> {
    /// 7-bit slave address.
    pub address: SevenBitAddress,
    /// Register address sent right after the slave address.
    pub register: u8,
    /// Payload phase.
    pub payload: Payload<'a>,
}

impl<'a> Transaction<'a> {
    /// Describes a register write.
    pub fn write(address: SevenBitAddress, register: u8, data: &'a [u8]) -> Self {
        Self {
            address,
            register,
            payload: Payload::Write(data),
        }
    }

    /// Describes a register read into `buffer`.
    pub fn read(address: SevenBitAddress, register: u8, buffer: &'a mut [u8]) -> Self {
        Self {
            address,
            register,
            payload: Payload::Read(buffer),
        }
    }

    /// Direction of the payload phase.
    pub fn direction(&self) -> Direction {
        match self.payload {
            Payload::Write(_) => Direction::Write,
            Payload::Read(_) => Direction::Read,
        }
    }

    /// Number of payload bytes.
    pub fn len(&self) -> usize {
        match &self.payload {
            Payload::Write(data) => data.len(),
            Payload::Read(buffer) => buffer.len(),
        }
    }

    /// Returns `true` when no payload byte moves.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
