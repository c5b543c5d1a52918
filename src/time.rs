//! Millisecond time base backing every bus timeout.
//!
//! The counter is shared between the timer interrupt, which advances it, and
//! the main line, which resets and polls it while spin-waiting. It is a 16-bit
//! atomic so both sides touch it with single loads and stores; the increment
//! is a load followed by a store, which cannot be torn because the main line
//! never preempts the interrupt handler.

use core::sync::atomic::{AtomicU16, Ordering};

use crate::interface::TickTimer;

/// Elapsed-tick source consulted by the bus controller.
pub trait TimeSource {
    /// Returns the ticks counted since the last reset.
    fn elapsed(&self) -> u16;

    /// Overwrites the tick counter.
    fn set_elapsed(&self, ticks: u16);

    /// Restarts the measurement window.
    fn reset_elapsed(&self) {
        self.set_elapsed(0);
    }
}

/// Free-running tick counter advanced by the timer interrupt.
#[derive(Debug, Default)]
pub struct TimeBase {
    ticks: AtomicU16,
}

impl TimeBase {
    /// Creates a counter starting at zero, suitable for a `static`.
    pub const fn new() -> Self {
        Self {
            ticks: AtomicU16::new(0),
        }
    }

    /// Advances the counter by one tick, wrapping at `u16::MAX`.
    pub(crate) fn tick(&self) {
        let next = self.ticks.load(Ordering::Relaxed).wrapping_add(1);
        self.ticks.store(next, Ordering::Relaxed);
    }
}

impl TimeSource for TimeBase {
    fn elapsed(&self) -> u16 {
        self.ticks.load(Ordering::Relaxed)
    }

    fn set_elapsed(&self, ticks: u16) {
        self.ticks.store(ticks, Ordering::Relaxed);
    }
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn elapsed(&self) -> u16 {
        (**self).elapsed()
    }

    fn set_elapsed(&self, ticks: u16) {
        (**self).set_elapsed(ticks)
    }

    fn reset_elapsed(&self) {
        (**self).reset_elapsed()
    }
}

/// Interrupt-side handle: the only path that advances a [`TimeBase`].
///
/// Owns the tick timer so the counter update and the interrupt acknowledge
/// happen together.
pub struct Ticker<'a, TIM> {
    time: &'a TimeBase,
    timer: TIM,
}

impl<'a, TIM> Ticker<'a, TIM>
where
    TIM: TickTimer,
{
    /// Binds the time base to the timer whose interrupt advances it.
    pub fn new(time: &'a TimeBase, timer: TIM) -> Self {
        Self { time, timer }
    }

    /// Body of the timer interrupt handler.
    #[inline]
    pub fn on_interrupt(&mut self) {
        self.time.tick();
        self.timer.clear_pending();
    }

    /// Provides mutable access to the wrapped timer.
    pub fn timer_mut(&mut self) -> &mut TIM {
        &mut self.timer
    }

    /// Consumes the handle and returns the owned timer.
    pub fn release(self) -> TIM {
        self.timer
    }
}
