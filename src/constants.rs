//! E220 Protocol Constants
//!
//! This module defines constants used in the E220-900T22S wire protocol,
//! based on the EBYTE E220 series user manual.

use std::time::Duration;

/// Length of the configuration register in bytes
pub const REGISTER_LEN: usize = 8;

/// Length of the extended (RSSI) register in bytes
pub const EXTENDED_REGISTER_LEN: usize = 2;

/// Command header for writing the configuration register (SET_REGISTER)
pub const CMD_WRITE_REGISTER: [u8; 3] = [0xC0, 0x00, 0x08];

/// Lead byte of the module's response to a register write
pub const RSP_WRITE_REGISTER: u8 = 0xC1;

/// Query command for the extended (RSSI) register, with start/length suffix
pub const CMD_READ_EXTENDED: [u8; 6] = [0xC0, 0xC1, 0xC2, 0xC3, 0x00, 0x02];

/// Echo prefix preceding the 2-byte extended register response
pub const RSP_READ_EXTENDED: [u8; 3] = [0xC1, 0x00, 0x02];

/// Length of the destination header prepended in fixed transmission mode
pub const FIXED_HEADER_LEN: usize = 3;

/// The module ignores the serial link for a short window after a
/// mode-pin change; commands sent earlier are lost.
pub const MODE_SETTLE: Duration = Duration::from_millis(200);

/// Per-read serial timeout; bounded reads return short on expiry
pub const SERIAL_TIMEOUT: Duration = Duration::from_millis(200);

/// Pause between single-byte reads on the streaming receive path
pub const STREAM_READ_PAUSE: Duration = Duration::from_millis(2);

/// Default UART baud rate of a factory-configured module
pub const DEFAULT_BAUD_RATE: u32 = 9600;
