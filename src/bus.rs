//! Polling I2C master built from tick-bounded wait phases.
//!
//! Every wait in a transaction is a spin on one status predicate that gives up
//! once the time base reaches the phase budget. A failed phase leaves the bus
//! where it stopped; the busy check at the head of the next transaction is the
//! only recovery.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::SevenBitAddress;

use crate::config::Config;
use crate::error::{Error, Result, TimeoutKind};
use crate::interface::{BusPeripheral, Direction, TickTimer};
use crate::log::{log_debug, log_trace, log_warn};
use crate::retry::TransactionRetry;
use crate::time::TimeSource;
use crate::transaction::{Payload, Transaction};

/// Ticks allowed for another transfer to release the bus.
pub const BUS_BUSY_TIMEOUT: u16 = 50;
/// Ticks allowed for the start condition and slave address.
pub const START_TIMEOUT: u16 = 50;
/// Ticks allowed for the register address byte.
pub const ADDRESS_TIMEOUT: u16 = 50;
/// Ticks allowed for the clock to settle before a write payload.
pub const WRITE_CLOCK_TIMEOUT: u16 = 10;
/// Ticks allowed for the clock to settle before a read.
pub const READ_CLOCK_TIMEOUT: u16 = 100;
/// Ticks allowed for each payload window.
pub const DATA_TIMEOUT: u16 = 100;

/// Highest 7-bit slave address.
const MAX_ADDRESS: SevenBitAddress = 0x7F;

/// Blocking I2C master driving a [`BusPeripheral`] against a [`TimeSource`].
///
/// The driver is not reentrant; `&mut self` on every transaction keeps a
/// single transfer in flight.
pub struct BusController<BUS, TIME, DELAY> {
    bus: BUS,
    time: TIME,
    delay: DELAY,
    config: Config,
}

impl<BUS, TIME, DELAY> BusController<BUS, TIME, DELAY> {
    // ==================================================================
    // == Driver Construction & Ownership ===============================
    // ==================================================================
    /// Creates a new controller; call [`init`](Self::init) before the first transfer.
    pub fn new(bus: BUS, time: TIME, delay: DELAY, config: Config) -> Self {
        Self {
            bus,
            time,
            delay,
            config,
        }
    }

    /// Consumes the controller and returns its parts.
    pub fn release(self) -> (BUS, TIME, DELAY) {
        (self.bus, self.time, self.delay)
    }

    /// Provides mutable access to the underlying peripheral.
    pub fn bus_mut(&mut self) -> &mut BUS {
        &mut self.bus
    }

    /// Returns a shared reference to the active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl<BUS, TIME, DELAY> BusController<BUS, TIME, DELAY>
where
    BUS: BusPeripheral,
    TIME: TimeSource,
    DELAY: DelayNs,
{
    // ==================================================================
    // == Initialization & Time Base ====================================
    // ==================================================================
    /// Programs the peripheral for a 400 kHz single-master bus and starts the
    /// tick timer.
    ///
    /// Clocks and pins must already be configured, and interrupts must be
    /// enabled by the caller for the time base to advance.
    pub fn init(&mut self, timer: &mut impl TickTimer) -> Result<()> {
        let divisor = self.config.bus_clock_divisor()?;
        let period = self.config.tick_period_cycles()?;

        self.bus.enable_master(divisor);
        timer.start(period);
        self.time.reset_elapsed();

        log_debug!("bus ready, divisor {}, tick period {} cycles", divisor, period);
        Ok(())
    }

    /// Returns the ticks counted since the last reset.
    pub fn elapsed(&self) -> u16 {
        self.time.elapsed()
    }

    /// Overwrites the tick counter.
    pub fn set_elapsed(&self, ticks: u16) {
        self.time.set_elapsed(ticks);
    }

    // ==================================================================
    // == Transactions ==================================================
    // ==================================================================
    /// Waits for a free bus, addresses `address` for writing and sends the
    /// register address.
    pub fn start_transaction(&mut self, address: SevenBitAddress, register: u8) -> Result<()> {
        check_address(address)?;
        Link::new(&mut self.bus, &self.time).start(address, register)
    }

    /// Writes `data` to consecutive registers starting at `register`.
    ///
    /// Bytes already on the wire when a later byte times out stay written, and
    /// no stop condition is sent in that case.
    pub fn write_bytes(
        &mut self,
        address: SevenBitAddress,
        register: u8,
        data: &[u8],
    ) -> Result<()> {
        check_address(address)?;
        let mut link = Link::new(&mut self.bus, &self.time);

        TransactionRetry::IMMEDIATE.run(&mut self.delay, || link.start(address, register))?;

        link.restart_window();
        link.wait_until(TimeoutKind::ClockStretch, WRITE_CLOCK_TIMEOUT, |bus| {
            bus.is_clock_settled()
        })?;

        // One window covers the whole payload.
        link.restart_window();
        for &byte in data {
            link.wait_until(TimeoutKind::Data, DATA_TIMEOUT, |bus| bus.is_tx_ready())?;
            link.bus.write_data(byte);
        }
        link.wait_until(TimeoutKind::Data, DATA_TIMEOUT, |bus| bus.is_tx_ready())?;
        link.bus.generate_stop();

        log_trace!("wrote {} bytes to {:#x} reg {:#x}", data.len(), address, register);
        Ok(())
    }

    /// Opens a read of `register` and receives one byte into `buffer[0]`.
    ///
    /// Neither NACK nor stop is issued, leaving the transfer open for callers
    /// that drive a burst one byte per call. An empty buffer is a no-op.
    pub fn read_bytes(
        &mut self,
        address: SevenBitAddress,
        register: u8,
        buffer: &mut [u8],
    ) -> Result<()> {
        check_address(address)?;
        let Some(slot) = buffer.first_mut() else {
            return Ok(());
        };
        let mut link = Link::new(&mut self.bus, &self.time);

        TransactionRetry::IMMEDIATE.run(&mut self.delay, || link.start(address, register))?;

        link.restart_window();
        link.wait_until(TimeoutKind::ClockStretch, READ_CLOCK_TIMEOUT, |bus| {
            bus.is_clock_settled()
        })?;

        link.repeated_start();
        link.wait_until(TimeoutKind::Data, DATA_TIMEOUT, |bus| bus.is_rx_ready())?;
        *slot = link.bus.read_data();

        log_trace!("burst byte {:#x} from {:#x} reg {:#x}", *slot, address, register);
        Ok(())
    }

    /// Reads a single register, terminating the transfer with NACK and stop.
    pub fn read_byte(&mut self, address: SevenBitAddress, register: u8) -> Result<u8> {
        check_address(address)?;
        let retry = TransactionRetry::paused(self.config.retry_pause_us);
        let mut link = Link::new(&mut self.bus, &self.time);

        retry.run(&mut self.delay, || link.start(address, register))?;

        link.restart_window();
        link.wait_until(TimeoutKind::ClockStretch, READ_CLOCK_TIMEOUT, |bus| {
            bus.is_clock_settled()
        })?;

        // Unlike `read_bytes`, wait for the repeated start itself to go out
        // before ending the read.
        link.repeated_start();
        link.wait_until(TimeoutKind::StartCondition, DATA_TIMEOUT, |bus| {
            !bus.is_start_pending()
        })?;

        link.bus.generate_nack_stop();
        link.wait_until(TimeoutKind::Data, DATA_TIMEOUT, |bus| bus.is_rx_ready())?;
        let byte = link.bus.read_data();

        log_trace!("read {:#x} from {:#x} reg {:#x}", byte, address, register);
        Ok(byte)
    }

    /// Runs a [`Transaction`], choosing the primitive from its payload.
    ///
    /// Reads complete with NACK and stop through [`read_byte`](Self::read_byte),
    /// so only one-byte read buffers are accepted; longer ones fail with
    /// [`Error::UnsupportedLength`] before the bus is touched. An empty read
    /// buffer is a no-op.
    pub fn execute(&mut self, transaction: Transaction<'_>) -> Result<()> {
        let Transaction {
            address,
            register,
            payload,
        } = transaction;

        match payload {
            Payload::Write(data) => self.write_bytes(address, register, data),
            Payload::Read([]) => check_address(address),
            Payload::Read([slot]) => {
                *slot = self.read_byte(address, register)?;
                Ok(())
            }
            Payload::Read(buffer) => {
                check_address(address)?;
                Err(Error::UnsupportedLength(buffer.len()))
            }
        }
    }
}

fn check_address(address: SevenBitAddress) -> Result<()> {
    if address > MAX_ADDRESS {
        return Err(Error::InvalidAddress(address));
    }
    Ok(())
}

/// Borrowed peripheral and clock for the duration of one transaction.
struct Link<'a, BUS, TIME> {
    bus: &'a mut BUS,
    time: &'a TIME,
}

impl<'a, BUS, TIME> Link<'a, BUS, TIME>
where
    BUS: BusPeripheral,
    TIME: TimeSource,
{
    fn new(bus: &'a mut BUS, time: &'a TIME) -> Self {
        Self { bus, time }
    }

    fn restart_window(&mut self) {
        self.time.reset_elapsed();
    }

    /// Spins until `ready` holds or the window reaches `budget` ticks.
    fn wait_until<F>(&mut self, kind: TimeoutKind, budget: u16, mut ready: F) -> Result<()>
    where
        F: FnMut(&mut BUS) -> bool,
    {
        loop {
            if ready(&mut *self.bus) {
                return Ok(());
            }

            let elapsed = self.time.elapsed();
            if elapsed >= budget {
                log_warn!("{} timeout after {} ticks", kind, elapsed);
                return Err(Error::Timeout(kind));
            }
        }
    }

    fn start(&mut self, address: SevenBitAddress, register: u8) -> Result<()> {
        self.restart_window();
        self.wait_until(TimeoutKind::BusBusy, BUS_BUSY_TIMEOUT, |bus| !bus.is_bus_busy())?;

        self.restart_window();
        self.bus.clear_tx_ready();
        self.bus.set_slave_address(address);
        self.bus.set_direction(Direction::Write);
        self.bus.generate_start();
        self.wait_until(TimeoutKind::StartCondition, START_TIMEOUT, |bus| bus.is_tx_ready())?;

        self.restart_window();
        self.bus.write_data(register);
        self.wait_until(TimeoutKind::AddressAck, ADDRESS_TIMEOUT, |bus| bus.is_tx_ready())
    }

    fn repeated_start(&mut self) {
        self.bus.clear_tx_ready();
        self.bus.set_direction(Direction::Read);
        self.bus.generate_start();
    }
}
