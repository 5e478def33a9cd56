//! # e220-rs - A Rust Crate for the EBYTE E220-900T22S LoRa Module
//!
//! The e220-rs crate drives the EBYTE E220-900T22S half-duplex UART LoRa
//! transceiver from a host computer. The module is controlled through an
//! 8-byte configuration register written over the same serial link used for
//! application data, two mode-select output pins (M0/M1), and an AUX input
//! pin that signals when the module is busy.
//!
//! ## Features
//!
//! - Bit-exact encode/decode of the configuration register and the extended
//!   (RSSI) register, with field-dependent validation
//! - The four-state operating-mode machine as a bijection with the M0/M1
//!   pin levels
//! - A mutex-guarded command/data protocol: mode changes, configuration
//!   exchanges, transmits, and bounded reads never interleave on the wire
//! - Transparent and fixed (addressed) transmission framing
//! - Serial and GPIO collaborators behind traits, with mock implementations
//!   for hardware-free testing and rppal implementations behind the
//!   `raspberry-pi` feature
//!
//! ## Usage
//!
//! To use the e220-rs crate in your Rust project, add the following to your
//! Cargo.toml file:
//!
//! ```toml
//! [dependencies]
//! e220-rs = { version = "0.1", features = ["raspberry-pi"] }
//! ```
//!
//! A typical session configures once, then sends and polls for received
//! data from separate tasks sharing the device:
//!
//! ```rust,no_run
//! use e220_rs::{open, E220Device, Mode, Register};
//!
//! # async fn run() -> Result<(), e220_rs::E220Error> {
//! # let (m0, m1, aux) = {
//! #     let p = e220_rs::MockPin::new(true);
//! #     (Box::new(p.clone()) as Box<dyn e220_rs::OutputPin>,
//! #      Box::new(p.clone()) as Box<dyn e220_rs::OutputPin>,
//! #      Box::new(p) as Box<dyn e220_rs::InputPin>)
//! # };
//! let register = Register::default();
//! let port = open("/dev/ttyS0").await?;
//! // m0, m1, aux: the claimed M0/M1/AUX pins
//! let device = E220Device::new(register, port, m0, m1, aux).await?;
//!
//! if !device.configure().await? {
//!     // module rejected the register; re-issue when ready
//! }
//! device.change_mode(Mode::Normal).await?;
//!
//! device.send(0x0001, 0, b"hello").await?;
//! let data = device.read(None).await?;
//! if let Some(rssi) = device.get_rssi(&data) {
//!     println!("received {} bytes at {} dBm", data.len() - 1, rssi);
//! }
//! # Ok(())
//! # }
//! ```

pub mod constants;
pub mod e220;
pub mod error;
pub mod logging;

pub use crate::error::E220Error;
pub use crate::logging::{init_logger, log_debug, log_error, log_info, log_warn};

// Core E220 types
pub use e220::choices::{
    label_num, label_nums, AirDataRate, SerialPortRate, SubPacketLength, TxMethod, TxPower,
    WorCycle,
};
pub use e220::device::E220Device;
pub use e220::gpio::{InputPin, MockPin, OutputPin};
pub use e220::mode::Mode;
pub use e220::register::{calc_rssi, ExtendRegister, Register};
pub use e220::serial::{open, open_with_config, SerialConfig, SerialPort};
pub use e220::serial_mock::MockSerialPort;
