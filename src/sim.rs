//! Software bus peripheral and clock used by the unit tests.

use std::collections::VecDeque;

use embedded_hal::delay::DelayNs;

use crate::interface::{BusPeripheral, Direction};
use crate::time::{TimeBase, TimeSource};

/// Clock where every elapsed-time query costs one timer interrupt.
///
/// Models the main line spinning: each pass through a wait loop lets one tick
/// elapse before the counter is read.
pub struct SimClock<'a> {
    base: &'a TimeBase,
}

impl<'a> SimClock<'a> {
    pub fn new(base: &'a TimeBase) -> Self {
        Self { base }
    }
}

impl TimeSource for SimClock<'_> {
    fn elapsed(&self) -> u16 {
        self.base.tick();
        self.base.elapsed()
    }

    fn set_elapsed(&self, ticks: u16) {
        self.base.set_elapsed(ticks);
    }
}

/// Bus activity observed by the simulated peripheral.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    EnableMaster(u16),
    ClearTxReady,
    Address(u8),
    Direction(Direction),
    Start,
    Stop,
    NackStop,
    Write(u8),
    Read(u8),
}

/// Scripted peripheral answering status polls from a handful of knobs.
pub struct SimBus {
    pub events: Vec<Event>,
    /// Busy polls answered with "busy" before the bus frees up.
    pub busy_polls: u32,
    /// Start conditions (transmit direction) that are never acknowledged.
    pub start_failures: u32,
    /// The register address byte is never acknowledged.
    pub register_nack: bool,
    /// Payload bytes acknowledged before transmit-ready is withheld.
    pub ack_limit: Option<usize>,
    pub clock_settles: bool,
    /// A repeated start never leaves the pending state.
    pub start_stuck: bool,
    /// Receive-ready never rises.
    pub rx_withheld: bool,
    pub rx_data: VecDeque<u8>,
    direction: Direction,
    tx_ready: bool,
    rx_ready: bool,
    start_pending: bool,
    awaiting_register: bool,
    payload_written: usize,
}

impl SimBus {
    /// A peripheral that acknowledges every phase immediately.
    pub fn healthy() -> Self {
        Self {
            events: Vec::new(),
            busy_polls: 0,
            start_failures: 0,
            register_nack: false,
            ack_limit: None,
            clock_settles: true,
            start_stuck: false,
            rx_withheld: false,
            rx_data: VecDeque::new(),
            direction: Direction::Write,
            tx_ready: false,
            rx_ready: false,
            start_pending: false,
            awaiting_register: false,
            payload_written: 0,
        }
    }

    pub fn responding(mut self, bytes: &[u8]) -> Self {
        self.rx_data.extend(bytes.iter().copied());
        self
    }

    pub fn count(&self, event: Event) -> usize {
        self.events.iter().filter(|seen| **seen == event).count()
    }

    /// Start conditions issued in transmit direction.
    pub fn write_starts(&self) -> usize {
        let mut direction = Direction::Write;
        let mut starts = 0;
        for event in &self.events {
            match event {
                Event::Direction(dir) => direction = *dir,
                Event::Start if direction == Direction::Write => starts += 1,
                _ => {}
            }
        }
        starts
    }

    /// Bytes pushed onto the bus, register addresses included.
    pub fn written(&self) -> Vec<u8> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Write(byte) => Some(*byte),
                _ => None,
            })
            .collect()
    }
}

impl BusPeripheral for SimBus {
    fn enable_master(&mut self, clock_divisor: u16) {
        self.events.push(Event::EnableMaster(clock_divisor));
    }

    fn is_bus_busy(&mut self) -> bool {
        if self.busy_polls > 0 {
            self.busy_polls -= 1;
            return true;
        }
        false
    }

    fn is_tx_ready(&mut self) -> bool {
        self.tx_ready
    }

    fn is_rx_ready(&mut self) -> bool {
        self.rx_ready
    }

    fn is_clock_settled(&mut self) -> bool {
        self.clock_settles
    }

    fn is_start_pending(&mut self) -> bool {
        self.start_pending
    }

    fn clear_tx_ready(&mut self) {
        self.tx_ready = false;
        self.events.push(Event::ClearTxReady);
    }

    fn set_slave_address(&mut self, address: u8) {
        self.events.push(Event::Address(address));
    }

    fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
        self.events.push(Event::Direction(direction));
    }

    fn generate_start(&mut self) {
        self.events.push(Event::Start);
        match self.direction {
            Direction::Write => {
                self.payload_written = 0;
                if self.start_failures > 0 {
                    self.start_failures -= 1;
                    self.tx_ready = false;
                    self.awaiting_register = false;
                } else {
                    self.tx_ready = true;
                    self.awaiting_register = true;
                }
            }
            Direction::Read => {
                self.start_pending = self.start_stuck;
                self.rx_ready = !self.rx_withheld;
            }
        }
    }

    fn generate_stop(&mut self) {
        self.events.push(Event::Stop);
    }

    fn generate_nack_stop(&mut self) {
        self.events.push(Event::NackStop);
    }

    fn write_data(&mut self, byte: u8) {
        self.events.push(Event::Write(byte));
        if self.awaiting_register {
            self.awaiting_register = false;
            self.tx_ready = !self.register_nack;
            return;
        }

        self.payload_written += 1;
        self.tx_ready = match self.ack_limit {
            Some(limit) => self.payload_written < limit,
            None => true,
        };
    }

    fn read_data(&mut self) -> u8 {
        let byte = self.rx_data.pop_front().unwrap_or(0xFF);
        self.rx_ready = false;
        self.events.push(Event::Read(byte));
        byte
    }
}

/// Delay provider recording each requested pause in nanoseconds.
#[derive(Default)]
pub struct RecordingDelay {
    pub pauses: Vec<u32>,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.pauses.push(ns);
    }

    fn delay_us(&mut self, us: u32) {
        self.pauses.push(us.saturating_mul(1_000));
    }
}
