//! SHT1x Sensor Driver for Embedded Rust
//!
//! This crate provides a platform-agnostic driver for the Sensirion SHT1x
//! (SHT10, SHT11, SHT15) temperature and humidity sensors, built on top of the
//! [`embedded-hal`] traits. The sensor's two-wire protocol is bit-banged over
//! a clock pin and an open-drain data pin.
//!
//! # Features
//! - Blocking synchronous API using `embedded-hal` traits
//! - CRC-8 validation of every measurement
//! - Temperature compensated humidity and dewpoint calculation
//! - Designed for `no_std` environments
//! - Optional logging support via `defmt`
//!
//! # Dependencies
//! This driver depends on the following `embedded-hal` traits:
//! - [`OutputPin`] for the clock line
//! - [`InputPin`] and [`OutputPin`] for the data line
//! - [`DelayNs`] for accurate timing
//!
//! # Optional Features
//! - `defmt`: Implements `defmt::Format` and logs failed transactions
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal
//! [`InputPin`]: embedded_hal::digital::InputPin
//! [`OutputPin`]: embedded_hal::digital::OutputPin
//! [`DelayNs`]: embedded_hal::delay::DelayNs

#![cfg_attr(not(test), no_std)]

pub mod conversion;
pub mod crc;
pub mod error;
pub mod sht1x;

pub use conversion::Reading;
pub use error::Sht1xError;
pub use sht1x::{MeasurementKind, RawReading, Sht1x};
