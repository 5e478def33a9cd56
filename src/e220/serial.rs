//! # Serial Transport
//!
//! The serial link to the module, behind the [`SerialPort`] trait so the
//! driver can work with either a real `tokio_serial` port or the mock
//! implementation used in tests.
//!
//! The E220 uses 8 data bits, no parity, 1 stop bit at the rate selected by
//! the register's `serial_port_rate` field (9600 on a factory module).

use crate::constants::{DEFAULT_BAUD_RATE, SERIAL_TIMEOUT};
use crate::error::E220Error;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio_serial::SerialPortBuilderExt;

/// Trait for serial port operations.
#[async_trait::async_trait]
pub trait SerialPort: AsyncReadExt + AsyncWriteExt + Unpin + Send {
    async fn flush(&mut self) -> Result<(), std::io::Error>;
}

#[async_trait::async_trait]
impl SerialPort for tokio_serial::SerialStream {
    async fn flush(&mut self) -> Result<(), std::io::Error> {
        AsyncWriteExt::flush(self).await
    }
}

#[async_trait::async_trait]
impl SerialPort for crate::e220::serial_mock::MockSerialPort {
    async fn flush(&mut self) -> Result<(), std::io::Error> {
        Ok(())
    }
}

/// Configuration for the serial connection.
#[derive(Debug, Clone)]
pub struct SerialConfig {
    pub baudrate: u32,
    pub timeout: Duration,
}

impl Default for SerialConfig {
    fn default() -> Self {
        SerialConfig {
            baudrate: DEFAULT_BAUD_RATE,
            timeout: SERIAL_TIMEOUT,
        }
    }
}

/// Opens the serial port with default settings (9600 8N1).
pub async fn open(port_name: &str) -> Result<tokio_serial::SerialStream, E220Error> {
    open_with_config(port_name, SerialConfig::default()).await
}

/// Opens the serial port with custom config.
pub async fn open_with_config(
    port_name: &str,
    config: SerialConfig,
) -> Result<tokio_serial::SerialStream, E220Error> {
    let port = tokio_serial::new(port_name, config.baudrate)
        .data_bits(tokio_serial::DataBits::Eight)
        .stop_bits(tokio_serial::StopBits::One)
        .parity(tokio_serial::Parity::None)
        .timeout(config.timeout)
        .open_native_async()
        .map_err(|e| E220Error::SerialPortError(e.to_string()))?;

    log::info!("opened {port_name} at {} baud", config.baudrate);
    Ok(port)
}
