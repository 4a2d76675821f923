//! Direction and speed control for a pair of H-bridge driven DC motors.
//!
//! Each motor is a [`MotorChannel`]: a forward-enable line, a reverse-enable
//! line and one PWM compare channel. A signed speed picks the direction line
//! from its sign and writes the magnitude, clamped to the configured maximum
//! duty, as the compare value. [`MotorDriver`] pairs a left and a right
//! channel and adds the coast-everything stop.
//!
//! Pins and PWM channels are taken through the `embedded-hal` 0.2 traits, so
//! the platform layer hands in whatever its HAL produced and tests hand in
//! recording doubles.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

mod config;
mod driver;
mod motor;

pub use config::{ConfigError, DriverConfig, DEFAULT_MAX_DUTY};
pub use driver::{MotorDriver, Side};
pub use motor::{duty_for, Direction, Motor, MotorChannel, MotorState};
