//! Bounded retry around the start of a transaction.

use embedded_hal::delay::DelayNs;

use crate::error::Result;
use crate::log::log_debug;

/// Start sequences attempted before a transaction is abandoned.
pub const START_ATTEMPTS: u8 = 5;

/// Retry policy applied to `start_transaction`.
///
/// Attempts are repeated back to back, or separated by a constant pause; the
/// pause never grows between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TransactionRetry {
    pause_us: Option<u32>,
}

impl TransactionRetry {
    /// Retries without waiting between attempts.
    pub const IMMEDIATE: Self = Self { pause_us: None };

    /// Retries with a fixed busy-wait between attempts.
    pub const fn paused(pause_us: u32) -> Self {
        Self {
            pause_us: Some(pause_us),
        }
    }

    /// Pause inserted between attempts, if any.
    pub const fn pause_us(&self) -> Option<u32> {
        self.pause_us
    }

    /// Runs `attempt` until it succeeds or [`START_ATTEMPTS`] attempts failed.
    ///
    /// Returns the error of the last attempt on exhaustion.
    pub fn run<D, F>(&self, delay: &mut D, mut attempt: F) -> Result<()>
    where
        D: DelayNs,
        F: FnMut() -> Result<()>,
    {
        let mut outcome = attempt();
        for _ in 1..START_ATTEMPTS {
            if outcome.is_ok() {
                return outcome;
            }
            log_debug!("start attempt failed, retrying");

            if let Some(us) = self.pause_us {
                delay.delay_us(us);
            }
            outcome = attempt();
        }

        if outcome.is_err() {
            log_debug!("giving up after {} start attempts", START_ATTEMPTS);
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, TimeoutKind};
    use crate::sim::RecordingDelay;
    use embedded_hal_mock::eh1::delay::NoopDelay;

    #[test]
    fn persistent_failure_makes_exactly_five_attempts() {
        let mut calls = 0;
        let outcome = TransactionRetry::IMMEDIATE.run(&mut NoopDelay::new(), || {
            calls += 1;
            Err(Error::Timeout(TimeoutKind::StartCondition))
        });

        assert_eq!(calls, 5);
        assert_eq!(outcome, Err(Error::Timeout(TimeoutKind::StartCondition)));
    }

    #[test]
    fn first_success_stops_retrying() {
        let mut calls = 0;
        let outcome = TransactionRetry::IMMEDIATE.run(&mut NoopDelay::new(), || {
            calls += 1;
            Ok(())
        });

        assert_eq!(calls, 1);
        assert_eq!(outcome, Ok(()));
    }

    #[test]
    fn success_on_third_attempt() {
        let mut calls = 0;
        let outcome = TransactionRetry::IMMEDIATE.run(&mut NoopDelay::new(), || {
            calls += 1;
            if calls < 3 {
                Err(Error::Timeout(TimeoutKind::BusBusy))
            } else {
                Ok(())
            }
        });

        assert_eq!(calls, 3);
        assert!(outcome.is_ok());
    }

    #[test]
    fn reports_error_of_last_attempt() {
        let mut calls = 0;
        let outcome = TransactionRetry::IMMEDIATE.run(&mut NoopDelay::new(), || {
            calls += 1;
            if calls < 5 {
                Err(Error::Timeout(TimeoutKind::BusBusy))
            } else {
                Err(Error::Timeout(TimeoutKind::AddressAck))
            }
        });

        assert_eq!(outcome, Err(Error::Timeout(TimeoutKind::AddressAck)));
    }

    #[test]
    fn paused_variant_waits_between_attempts_only() {
        let mut delay = RecordingDelay::default();
        let _ = TransactionRetry::paused(100).run(&mut delay, || {
            Err(Error::Timeout(TimeoutKind::StartCondition))
        });

        assert_eq!(delay.pauses, vec![100_000; 4]);
    }

    #[test]
    fn paused_variant_skips_pause_on_immediate_success() {
        let mut delay = RecordingDelay::default();
        TransactionRetry::paused(100).run(&mut delay, || Ok(())).unwrap();
        assert!(delay.pauses.is_empty());
    }

    #[test]
    fn immediate_variant_never_pauses() {
        let mut delay = RecordingDelay::default();
        let _ = TransactionRetry::IMMEDIATE
            .run(&mut delay, || Err(Error::Timeout(TimeoutKind::BusBusy)));

        assert!(delay.pauses.is_empty());
        assert_eq!(TransactionRetry::IMMEDIATE.pause_us(), None);
    }
}
