//! Hardware abstraction for the bus peripheral and the tick timer.

pub mod mmio;
pub mod usci;

/// Data direction of the bus master.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Master transmitter (address + W).
    Write,
    /// Master receiver (address + R).
    Read,
}

/// Status queries and condition control required by the bus controller.
///
/// Every method maps onto a single register access of the concrete peripheral;
/// none of them block.
pub trait BusPeripheral {
    /// Programs the peripheral as single master with the given clock divisor.
    fn enable_master(&mut self, clock_divisor: u16);

    /// Another transfer is holding the bus.
    fn is_bus_busy(&mut self) -> bool;

    /// The transmit buffer can accept the next byte.
    fn is_tx_ready(&mut self) -> bool;

    /// A received byte is waiting in the receive buffer.
    fn is_rx_ready(&mut self) -> bool;

    /// The master is stalling SCL low between bytes, ready for the next phase.
    ///
    /// Returns `true` while SCL is held low by this master (`UCSCLLOW` set on
    /// USCI_B). Callers spin until this reports `true`, so an implementation
    /// must not report "SCL released" here.
    fn is_clock_settled(&mut self) -> bool;

    /// A start or repeated start condition has not been sent yet.
    fn is_start_pending(&mut self) -> bool;

    /// Clears the transmit-ready flag.
    fn clear_tx_ready(&mut self);

    /// Sets the 7-bit slave address used by the next start condition.
    fn set_slave_address(&mut self, address: u8);

    /// Selects master transmitter or receiver mode.
    fn set_direction(&mut self, direction: Direction);

    /// Issues a start (or repeated start) condition.
    fn generate_start(&mut self);

    /// Issues a stop condition.
    fn generate_stop(&mut self);

    /// Issues NACK and stop together, ending a read after the current byte.
    fn generate_nack_stop(&mut self);

    /// Pushes a byte into the transmit buffer.
    fn write_data(&mut self, byte: u8);

    /// Pops the byte from the receive buffer.
    fn read_data(&mut self) -> u8;
}

/// Periodic timer driving the time base interrupt.
pub trait TickTimer {
    /// Starts the timer so it interrupts every `period_cycles` source clocks.
    fn start(&mut self, period_cycles: u16);

    /// Acknowledges the pending compare interrupt.
    fn clear_pending(&mut self);
}

impl<T: BusPeripheral + ?Sized> BusPeripheral for &mut T {
    fn enable_master(&mut self, clock_divisor: u16) {
        (**self).enable_master(clock_divisor)
    }

    fn is_bus_busy(&mut self) -> bool {
        (**self).is_bus_busy()
    }

    fn is_tx_ready(&mut self) -> bool {
        (**self).is_tx_ready()
    }

    fn is_rx_ready(&mut self) -> bool {
        (**self).is_rx_ready()
    }

    fn is_clock_settled(&mut self) -> bool {
        (**self).is_clock_settled()
    }

    fn is_start_pending(&mut self) -> bool {
        (**self).is_start_pending()
    }

    fn clear_tx_ready(&mut self) {
        (**self).clear_tx_ready()
    }

    fn set_slave_address(&mut self, address: u8) {
        (**self).set_slave_address(address)
    }

    fn set_direction(&mut self, direction: Direction) {
        (**self).set_direction(direction)
    }

    fn generate_start(&mut self) {
        (**self).generate_start()
    }

    fn generate_stop(&mut self) {
        (**self).generate_stop()
    }

    fn generate_nack_stop(&mut self) {
        (**self).generate_nack_stop()
    }

    fn write_data(&mut self, byte: u8) {
        (**self).write_data(byte)
    }

    fn read_data(&mut self) -> u8 {
        (**self).read_data()
    }
}
