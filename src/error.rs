//! # E220 Error Handling
//!
//! This module defines the E220Error enum, which represents the different error
//! types that can occur in the e220-rs crate.

use thiserror::Error;

/// Represents the different error types that can occur in the E220 driver.
#[derive(Debug, Error)]
pub enum E220Error {
    /// Indicates an error related to the serial port communication.
    #[error("Serial port error: {0}")]
    SerialPortError(String),

    /// Indicates a GPIO pin operation failed.
    #[error("GPIO error: {0}")]
    Gpio(String),

    /// Indicates a wire code that is not a member of its choice table.
    #[error("Unknown {table} code: 0x{code:02X}")]
    UnknownCode { table: &'static str, code: u8 },

    /// Indicates a register field failed a range or membership check.
    #[error("Invalid {field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: String,
    },

    /// Indicates too few bytes were available to decode a register.
    #[error("Malformed register: expected {expected} bytes, got {actual}")]
    MalformedRegister { expected: usize, actual: usize },

    /// Indicates a read request larger than the configured sub-packet length.
    #[error("Read length {requested} exceeds sub-packet length {max}")]
    LengthExceeded { requested: usize, max: usize },
}
