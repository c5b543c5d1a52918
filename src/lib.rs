#![cfg_attr(not(test), no_std)]

mod error;

pub mod bus;
pub mod config;
pub mod interface;
mod log;
pub mod mpu6050;
pub mod params;
pub mod registers;
pub mod retry;
pub mod time;
pub mod transaction;

#[cfg(test)]
mod sim;

pub use crate::bus::BusController;
pub use crate::error::{Error, Result, TimeoutKind};
pub use crate::time::TimeBase;
pub use crate::transaction::Transaction;
