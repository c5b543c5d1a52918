//! Error handling primitives for the I2C driver.

use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};

use crate::config::ConfigError;

/// Crate-wide result type alias.
pub type Result<T> = core::result::Result<T, Error>;

/// Bus phase whose bounded wait ran out of ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeoutKind {
    /// The bus did not release before a new transaction could start.
    BusBusy,
    /// The start condition and slave address were not acknowledged.
    StartCondition,
    /// The register address byte was not acknowledged.
    AddressAck,
    /// The clock line did not settle.
    ClockStretch,
    /// A payload byte did not transmit or receive.
    Data,
}

/// Error variants produced by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A bounded wait expired during the given phase.
    Timeout(TimeoutKind),
    /// The slave address does not fit in seven bits.
    InvalidAddress(u8),
    /// The provided configuration parameters are invalid.
    InvalidConfig(ConfigError),
    /// A read of this many bytes cannot be completed in one transaction.
    UnsupportedLength(usize),
}

impl Error {
    /// Returns the timeout phase, if this error is a timeout.
    pub fn timeout_kind(&self) -> Option<TimeoutKind> {
        match self {
            Self::Timeout(kind) => Some(*kind),
            _ => None,
        }
    }
}

impl From<TimeoutKind> for Error {
    fn from(kind: TimeoutKind) -> Self {
        Self::Timeout(kind)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::InvalidConfig(err)
    }
}

impl embedded_hal::i2c::Error for Error {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Timeout(TimeoutKind::BusBusy) => ErrorKind::Bus,
            Self::Timeout(TimeoutKind::StartCondition | TimeoutKind::AddressAck) => {
                ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)
            }
            Self::Timeout(TimeoutKind::Data) => {
                ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data)
            }
            _ => ErrorKind::Other,
        }
    }
}
