//! Configuration primitives for the I2C driver.

use crate::params::InputDivider;

/// Fixed SCL frequency produced by the bus clock divisor.
pub const BUS_FREQUENCY_HZ: u32 = 400_000;

/// Prescaler between the source clock and the tick timer counter.
pub const TICK_INPUT_DIVIDER: InputDivider = InputDivider::Div1;

/// User-facing configuration for the bus controller and its time base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Frequency of the clock feeding both the USCI and the tick timer.
    pub source_clock_hz: u32,
    /// Rate of the time base interrupt; one tick is the unit of every timeout.
    pub tick_hz: u32,
    /// Pause inserted between start attempts of the single-byte read path.
    pub retry_pause_us: u32,
}

impl Config {
    /// Begins building a [`Config`] using the builder pattern.
    pub fn new() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Checks whether the derived divisor and timer period fit their registers.
    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        self.bus_clock_divisor()?;
        self.tick_period_cycles()?;
        Ok(())
    }

    /// Divisor programmed into the baud-rate registers for a 400 kHz bus.
    pub fn bus_clock_divisor(&self) -> core::result::Result<u16, ConfigError> {
        let divisor = self.source_clock_hz / BUS_FREQUENCY_HZ;
        if divisor == 0 {
            return Err(ConfigError::SourceClockTooSlow);
        }
        u16::try_from(divisor).map_err(|_| ConfigError::DivisorOverflow)
    }

    /// Timer compare value that makes the time base fire at `tick_hz`.
    pub fn tick_period_cycles(&self) -> core::result::Result<u16, ConfigError> {
        if self.tick_hz == 0 {
            return Err(ConfigError::TickRateZero);
        }

        let cycles = self.source_clock_hz / TICK_INPUT_DIVIDER.factor() / self.tick_hz;
        if cycles == 0 {
            return Err(ConfigError::TickRateTooHigh);
        }
        u16::try_from(cycles).map_err(|_| ConfigError::TickPeriodOverflow)
    }
}

/// Builder for [`Config`] allowing piecemeal construction.
#[derive(Debug, Clone, Copy)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Creates a new builder seeded with [`Config::default()`].
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Overrides the source clock frequency.
    pub fn source_clock_hz(mut self, hz: u32) -> Self {
        self.config.source_clock_hz = hz;
        self
    }

    /// Overrides the time base interrupt rate.
    pub fn tick_hz(mut self, hz: u32) -> Self {
        self.config.tick_hz = hz;
        self
    }

    /// Sets the pause between single-byte read start attempts.
    pub fn retry_pause_us(mut self, us: u32) -> Self {
        self.config.retry_pause_us = us;
        self
    }

    /// Finalizes the builder and returns the [`Config`].
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_clock_hz: 16_000_000,
            tick_hz: 1_000,
            retry_pause_us: 100,
        }
    }
}

/// Validation errors generated while verifying a [`Config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The source clock is below the bus frequency.
    SourceClockTooSlow,
    /// The bus divisor does not fit the 16-bit baud-rate registers.
    DivisorOverflow,
    /// A tick rate of zero was requested.
    TickRateZero,
    /// The tick rate exceeds the source clock.
    TickRateTooHigh,
    /// The tick period does not fit the 16-bit compare register.
    TickPeriodOverflow,
}
