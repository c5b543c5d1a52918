//! USCI_B0 and Timer0_A3 implementations for the MSP430G2553.
//!
//! Pin muxing (P1.6 SCL, P1.7 SDA), DCO calibration and the global interrupt
//! enable are left to the board bring-up code.

use super::mmio::RegisterIo;
use super::{BusPeripheral, Direction, TickTimer};
use crate::config::TICK_INPUT_DIVIDER;
use crate::params::{TimerClockSource, TimerMode, UsciClockSource, UsciMode};
use crate::registers::{
    CaptureCompareControl,
    InterruptFlags2,
    Register,
    TimerControl,
    UsciControl0,
    UsciControl1,
    UsciStatus,
    REG_TA0CCR0,
    REG_UCB0BR0,
    REG_UCB0BR1,
    REG_UCB0I2CSA,
    REG_UCB0RXBUF,
    REG_UCB0TXBUF,
};

/// USCI_B0 operating as a polled I2C master.
pub struct UsciB0<IO> {
    io: IO,
}

impl<IO> UsciB0<IO> {
    /// Creates a new peripheral handle over the provided register access.
    pub const fn new(io: IO) -> Self {
        Self { io }
    }

    /// Provides mutable access to the wrapped register access.
    pub fn io_mut(&mut self) -> &mut IO {
        &mut self.io
    }

    /// Consumes the handle and returns the owned register access.
    pub fn release(self) -> IO {
        self.io
    }
}

impl<IO> UsciB0<IO>
where
    IO: RegisterIo,
{
    fn read_register<R>(&mut self) -> R
    where
        R: Register<Raw = u8> + From<u8>,
    {
        R::from(self.io.read_u8(R::ADDRESS))
    }

    fn update_register<R, F>(&mut self, mutate: F)
    where
        R: Register<Raw = u8> + From<u8> + Into<u8>,
        F: FnOnce(&mut R),
    {
        let mut value = self.read_register::<R>();
        mutate(&mut value);
        self.io.write_u8(R::ADDRESS, value.into());
    }

    fn update_control1<F>(&mut self, mutate: F)
    where
        F: FnOnce(&mut UsciControl1),
    {
        self.update_register::<UsciControl1, _>(mutate)
    }
}

impl<IO> BusPeripheral for UsciB0<IO>
where
    IO: RegisterIo,
{
    fn enable_master(&mut self, clock_divisor: u16) {
        self.update_control1(|ctl| ctl.set_software_reset(true));
        self.update_register::<UsciControl0, _>(|ctl| {
            ctl.set_master(true);
            ctl.set_mode(UsciMode::I2c);
            ctl.set_sync(true);
        });
        self.update_control1(|ctl| {
            ctl.set_clock_source(UsciClockSource::Smclk);
            ctl.set_tx_nack(false);
        });

        let [low, high] = clock_divisor.to_le_bytes();
        self.io.write_u8(REG_UCB0BR0, low);
        self.io.write_u8(REG_UCB0BR1, high);

        self.update_control1(|ctl| ctl.set_software_reset(false));
    }

    fn is_bus_busy(&mut self) -> bool {
        self.read_register::<UsciStatus>().bus_busy()
    }

    fn is_tx_ready(&mut self) -> bool {
        self.read_register::<InterruptFlags2>().ucb0_tx()
    }

    fn is_rx_ready(&mut self) -> bool {
        self.read_register::<InterruptFlags2>().ucb0_rx()
    }

    // The module holds SCL low once it has finished the previous byte and is
    // waiting on the next buffer access.
    fn is_clock_settled(&mut self) -> bool {
        self.read_register::<UsciStatus>().scl_low()
    }

    fn is_start_pending(&mut self) -> bool {
        self.read_register::<UsciControl1>().tx_start()
    }

    fn clear_tx_ready(&mut self) {
        self.update_register::<InterruptFlags2, _>(|flags| flags.set_ucb0_tx(false));
    }

    fn set_slave_address(&mut self, address: u8) {
        self.io.write_u16(REG_UCB0I2CSA, u16::from(address & 0x7F));
    }

    fn set_direction(&mut self, direction: Direction) {
        self.update_control1(|ctl| ctl.set_transmitter(direction == Direction::Write));
    }

    fn generate_start(&mut self) {
        self.update_control1(|ctl| ctl.set_tx_start(true));
    }

    fn generate_stop(&mut self) {
        self.update_control1(|ctl| ctl.set_tx_stop(true));
    }

    fn generate_nack_stop(&mut self) {
        self.update_control1(|ctl| {
            ctl.set_tx_nack(true);
            ctl.set_tx_stop(true);
        });
    }

    fn write_data(&mut self, byte: u8) {
        self.io.write_u8(REG_UCB0TXBUF, byte);
    }

    fn read_data(&mut self) -> u8 {
        self.io.read_u8(REG_UCB0RXBUF)
    }
}

/// Timer0_A3 capture/compare 0 used as the time base interrupt source.
pub struct TimerA0<IO> {
    io: IO,
}

impl<IO> TimerA0<IO> {
    /// Creates a new timer handle over the provided register access.
    pub const fn new(io: IO) -> Self {
        Self { io }
    }

    /// Consumes the handle and returns the owned register access.
    pub fn release(self) -> IO {
        self.io
    }
}

impl<IO> TimerA0<IO>
where
    IO: RegisterIo,
{
    fn update_word<R, F>(&mut self, mutate: F)
    where
        R: Register<Raw = u16> + From<u16> + Into<u16>,
        F: FnOnce(&mut R),
    {
        let mut value = R::from(self.io.read_u16(R::ADDRESS));
        mutate(&mut value);
        self.io.write_u16(R::ADDRESS, value.into());
    }
}

impl<IO> TickTimer for TimerA0<IO>
where
    IO: RegisterIo,
{
    fn start(&mut self, period_cycles: u16) {
        let cleared = TimerControl::new().with_clear(true);
        self.io.write_u16(TimerControl::ADDRESS, cleared.into());
        self.update_word::<TimerControl, _>(|ctl| {
            ctl.set_clock_source(TimerClockSource::Smclk);
            ctl.set_divider(TICK_INPUT_DIVIDER);
            ctl.set_mode(TimerMode::Up);
        });
        self.io.write_u16(REG_TA0CCR0, period_cycles);
        self.update_word::<CaptureCompareControl, _>(|cctl| {
            cctl.set_interrupt_flag(false);
            cctl.set_interrupt_enable(true);
        });
    }

    fn clear_pending(&mut self) {
        self.update_word::<CaptureCompareControl, _>(|cctl| cctl.set_interrupt_flag(false));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registers::{REG_IFG2, REG_TA0CCTL0, REG_TA0CTL, REG_UCB0CTL0, REG_UCB0CTL1, REG_UCB0STAT};

    /// Flat byte-addressed register file recording every write.
    struct FakeRegisters {
        memory: [u8; 0x200],
        writes: Vec<(u16, u16)>,
    }

    impl FakeRegisters {
        fn new() -> Self {
            Self {
                memory: [0; 0x200],
                writes: Vec::new(),
            }
        }

        /// Register file as left by a power-on reset.
        fn power_on() -> Self {
            Self::new()
                .with(UsciControl0::ADDRESS, UsciControl0::RESET_VALUE)
                .with(UsciControl1::ADDRESS, UsciControl1::RESET_VALUE)
                .with(UsciStatus::ADDRESS, UsciStatus::RESET_VALUE)
                .with(InterruptFlags2::ADDRESS, InterruptFlags2::RESET_VALUE)
                .with_word(TimerControl::ADDRESS, TimerControl::RESET_VALUE)
                .with_word(CaptureCompareControl::ADDRESS, CaptureCompareControl::RESET_VALUE)
        }

        fn with_word(mut self, address: u16, value: u16) -> Self {
            let at = address as usize;
            self.memory[at..at + 2].copy_from_slice(&value.to_le_bytes());
            self
        }

        fn with(mut self, address: u16, value: u8) -> Self {
            self.memory[address as usize] = value;
            self
        }

        fn byte(&self, address: u16) -> u8 {
            self.memory[address as usize]
        }

        fn word(&self, address: u16) -> u16 {
            let at = address as usize;
            u16::from_le_bytes([self.memory[at], self.memory[at + 1]])
        }
    }

    impl RegisterIo for FakeRegisters {
        fn read_u8(&mut self, address: u16) -> u8 {
            self.byte(address)
        }

        fn write_u8(&mut self, address: u16, value: u8) {
            self.memory[address as usize] = value;
            self.writes.push((address, u16::from(value)));
        }

        fn read_u16(&mut self, address: u16) -> u16 {
            self.word(address)
        }

        fn write_u16(&mut self, address: u16, value: u16) {
            let at = address as usize;
            self.memory[at..at + 2].copy_from_slice(&value.to_le_bytes());
            self.writes.push((address, value));
        }
    }

    #[test]
    fn enable_master_programs_400khz_single_master() {
        let mut usci = UsciB0::new(FakeRegisters::power_on());

        usci.enable_master(40);
        let regs = usci.release();

        assert_eq!(regs.byte(REG_UCB0CTL0), 0x0F);
        assert_eq!(regs.byte(REG_UCB0CTL1), 0x80);
        assert_eq!(regs.byte(REG_UCB0BR0), 40);
        assert_eq!(regs.byte(REG_UCB0BR1), 0);
        // Reset is asserted first and released last.
        assert_eq!(regs.writes.first(), Some(&(REG_UCB0CTL1, 0x01)));
        assert_eq!(regs.writes.last(), Some(&(REG_UCB0CTL1, 0x80)));
    }

    #[test]
    fn status_queries_map_to_flag_bits() {
        let regs = FakeRegisters::new()
            .with(REG_UCB0STAT, 0x50)
            .with(REG_IFG2, 0x08)
            .with(REG_UCB0CTL1, 0x02);
        let mut usci = UsciB0::new(regs);

        assert!(usci.is_bus_busy());
        assert!(usci.is_clock_settled());
        assert!(usci.is_tx_ready());
        assert!(!usci.is_rx_ready());
        assert!(usci.is_start_pending());
    }

    #[test]
    fn clear_tx_ready_leaves_other_flags() {
        let regs = FakeRegisters::new().with(REG_IFG2, 0x0F);
        let mut usci = UsciB0::new(regs);

        usci.clear_tx_ready();
        assert_eq!(usci.release().byte(REG_IFG2), 0x07);
    }

    #[test]
    fn start_sequence_sets_address_direction_and_start() {
        let regs = FakeRegisters::new().with(REG_UCB0CTL1, 0x80);
        let mut usci = UsciB0::new(regs);

        usci.set_slave_address(0x68);
        usci.set_direction(Direction::Write);
        usci.generate_start();
        let regs = usci.release();

        assert_eq!(regs.word(REG_UCB0I2CSA), 0x0068);
        assert_eq!(regs.byte(REG_UCB0CTL1), 0x80 | 0x10 | 0x02);
    }

    #[test]
    fn receive_switch_clears_transmitter_bit() {
        let regs = FakeRegisters::new().with(REG_UCB0CTL1, 0x90);
        let mut usci = UsciB0::new(regs);

        usci.set_direction(Direction::Read);
        assert_eq!(usci.release().byte(REG_UCB0CTL1), 0x80);
    }

    #[test]
    fn nack_and_stop_are_issued_in_one_write() {
        let regs = FakeRegisters::new().with(REG_UCB0CTL1, 0x80);
        let mut usci = UsciB0::new(regs);

        usci.generate_nack_stop();
        let regs = usci.release();

        assert_eq!(regs.writes, vec![(REG_UCB0CTL1, 0x8C)]);
    }

    #[test]
    fn data_registers_pass_bytes_through() {
        let regs = FakeRegisters::new().with(REG_UCB0RXBUF, 0x68);
        let mut usci = UsciB0::new(regs);

        usci.write_data(0xA5);
        assert_eq!(usci.read_data(), 0x68);
        assert_eq!(usci.release().byte(REG_UCB0TXBUF), 0xA5);
    }

    #[test]
    fn timer_start_programs_1ms_compare_interrupt() {
        let regs = FakeRegisters::new().with(REG_TA0CCTL0, 0x01);
        let mut timer = TimerA0::new(regs);

        timer.start(16_000);
        let regs = timer.release();

        assert_eq!(regs.writes.first(), Some(&(REG_TA0CTL, 0x0004)));
        assert_eq!(regs.word(REG_TA0CTL), 0x0214);
        assert_eq!(regs.word(REG_TA0CCR0), 16_000);
        assert_eq!(regs.word(REG_TA0CCTL0), 0x0010);
    }

    #[test]
    fn power_on_bus_is_idle_with_tx_ready_raised() {
        let mut usci = UsciB0::new(FakeRegisters::power_on());

        assert!(!usci.is_bus_busy());
        assert!(!usci.is_start_pending());
        assert!(usci.is_tx_ready());
        // SCL released is not settled; only a held-low clock is.
        assert!(!usci.is_clock_settled());
    }

    #[test]
    fn timer_start_from_power_on_runs_undivided() {
        let mut timer = TimerA0::new(FakeRegisters::power_on());

        timer.start(16_000);
        let regs = timer.release();

        let ctl = TimerControl::from(regs.word(REG_TA0CTL));
        assert_eq!(ctl.divider(), TICK_INPUT_DIVIDER);
        assert_eq!(TICK_INPUT_DIVIDER.factor(), 1);
        assert_eq!(regs.word(REG_TA0CTL), 0x0214);
    }

    #[test]
    fn clear_pending_drops_only_ccifg() {
        let regs = FakeRegisters::new().with(REG_TA0CCTL0, 0x11);
        let mut timer = TimerA0::new(regs);

        timer.clear_pending();
        assert_eq!(timer.release().word(REG_TA0CCTL0), 0x0010);
    }
}
