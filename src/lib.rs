//! Platform agnostic `no_std` driver for the MPM10 particulate matter sensor, built on the
//! [`embedded-hal`](https://crates.io/crates/embedded-hal) traits.
//!
//! The sensor is read either over a UART, where it streams 32 byte frames, or over I2C,
//! where every value sits in its own 16-bit register.
//!
//! ## Features
//! * PM1.0, PM2.5 and PM10 mass concentrations in the standard or atmospheric context
//! * Particle counts for six air volumes (300 mL to 10 L)
//! * Frame header and checksum validation with a capture idle timeout
//! * Tagged errors from [`UartReader`] and [`I2cReader`], flattened to the zero-valued
//!   [`Reading`] by [`Mpm10`]
//!
//! Optional cargo features:
//! * `defmt`: derive `defmt::Format` and log through `defmt`
//! * `thiserror`: implement `core::error::Error` for [`Error`] and [`FrameError`]
//!
//! ## Usage
//!
//! ```ignore
//! let mut sensor = Mpm10::new_i2c(i2c);
//! sensor.set_measurement_context(MeasurementContext::Atmospheric);
//! let reading = sensor.read_data();
//! if reading.valid {
//!     // use reading.pm2_5
//! }
//! let small_particles = sensor.pm_in_300ml();
//! ```
//!
//! Over UART, wrap an `embedded-io` serial port in [`IoSerial`] or implement
//! [`SerialTransport`] for a port that has to be opened and closed around every capture:
//!
//! ```ignore
//! let mut sensor = Mpm10::new_uart(IoSerial::new(uart), delay);
//! let measurement = sensor.read_measurement()?;
//! ```

#![deny(unsafe_code)]
#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

mod config;
mod error;
pub mod frame;
mod i2c;
mod mpm10;
pub mod registers;
mod sensor;
pub mod transport;
pub mod types;
mod uart;

pub use crate::config::UartConfig;
pub use crate::error::Error;
pub use crate::frame::{Frame, FrameError};
pub use crate::i2c::I2cReader;
pub use crate::mpm10::Mpm10;
pub use crate::sensor::ParticulateSensor;
pub use crate::transport::{IoSerial, SerialTransport};
pub use crate::types::{
    Concentrations, InvalidContext, Measurement, MeasurementContext, Mode, ParticleChannel,
    ParticleCounts, Reading,
};
pub use crate::uart::UartReader;
