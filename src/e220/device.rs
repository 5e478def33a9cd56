//! # E220 Device Driver
//!
//! Owns the serial link, the two mode-select output pins, and the AUX busy
//! input pin, and sequences every pin change and serial byte for one logical
//! operation under a single session lock.
//!
//! Rust has no re-entrant mutex, so compound operations such as
//! [`E220Device::configure`] take the lock once and run private `*_locked`
//! helpers on the held guard. `send` goes through the same lock as every
//! other transport operation, so a transmit can never interleave at the byte
//! level with a configuration exchange or a bounded read.
//!
//! Two receive policies exist on purpose:
//!
//! - the bounded read (`read` with a length) propagates transport failures
//!   and is the only path command echoes are read through;
//! - the streaming read (`read` without a length) is best-effort: it polls
//!   one byte per lock cycle and converts any failure into a short or empty
//!   buffer, which a polling receive loop treats as "no data yet".

use crate::constants::{
    CMD_READ_EXTENDED, CMD_WRITE_REGISTER, EXTENDED_REGISTER_LEN, FIXED_HEADER_LEN, MODE_SETTLE,
    REGISTER_LEN, RSP_READ_EXTENDED, RSP_WRITE_REGISTER, SERIAL_TIMEOUT, STREAM_READ_PAUSE,
};
use crate::e220::choices::TxMethod;
use crate::e220::gpio::{InputPin, OutputPin};
use crate::e220::mode::Mode;
use crate::e220::register::{calc_rssi, ExtendRegister, Register};
use crate::e220::serial::SerialPort;
use crate::error::E220Error;
use tokio::sync::Mutex;
use tokio::time::{sleep, timeout};

/// Session state shared by at most one sender and one receiver thread.
struct Inner<P: SerialPort> {
    port: P,
    m0: Box<dyn OutputPin>,
    m1: Box<dyn OutputPin>,
    aux: Box<dyn InputPin>,
    mode: Mode,
}

/// Driver for one E220-900T22S module.
pub struct E220Device<P: SerialPort> {
    register: Register,
    inner: Mutex<Inner<P>>,
}

impl<P: SerialPort> E220Device<P> {
    /// Creates a driver over an open serial port and claimed pins.
    ///
    /// Validates the register, drives the mode pins to `Sleep`, and waits
    /// out the settling delay so the first command is not lost.
    pub async fn new(
        register: Register,
        port: P,
        m0: Box<dyn OutputPin>,
        m1: Box<dyn OutputPin>,
        aux: Box<dyn InputPin>,
    ) -> Result<Self, E220Error> {
        register.validate()?;

        let mut inner = Inner {
            port,
            m0,
            m1,
            aux,
            mode: Mode::Sleep,
        };
        Self::change_mode_locked(&mut inner, Mode::Sleep).await?;

        Ok(E220Device {
            register,
            inner: Mutex::new(inner),
        })
    }

    /// The register this driver was constructed with.
    pub fn register(&self) -> &Register {
        &self.register
    }

    /// The driver's cached operating mode, as set by the last
    /// [`E220Device::change_mode`].
    pub async fn mode(&self) -> Mode {
        self.inner.lock().await.mode
    }

    /// Switches the module's operating mode and waits out the settling
    /// delay before releasing the session lock.
    pub async fn change_mode(&self, mode: Mode) -> Result<(), E220Error> {
        let mut inner = self.inner.lock().await;
        Self::change_mode_locked(&mut inner, mode).await
    }

    /// Reads the AUX pin. The module drives AUX low while it is processing,
    /// so `true` means it is not ready for further commands or data.
    pub async fn get_busy(&self) -> Result<bool, E220Error> {
        let mut inner = self.inner.lock().await;
        Ok(!inner.aux.get()?)
    }

    /// Writes raw bytes to the module, returning the count written.
    pub async fn write(&self, data: &[u8]) -> Result<usize, E220Error> {
        let mut inner = self.inner.lock().await;
        Self::write_locked(&mut inner, data).await
    }

    /// Receives application data.
    ///
    /// With `Some(len)`: fails with [`E220Error::LengthExceeded`] before any
    /// I/O if `len` exceeds the configured sub-packet length, then performs
    /// one bounded read under the lock. Transport failures propagate; a
    /// timeout yields a short result.
    ///
    /// With `None`: streams one byte per lock cycle until a full sub-packet
    /// has accumulated. Failures and timeouts are converted into a short or
    /// empty buffer; callers must treat those as "no data yet".
    pub async fn read(&self, len: Option<usize>) -> Result<Vec<u8>, E220Error> {
        let max = self.register.sub_packet_length.bytes();
        match len {
            Some(requested) => {
                if requested > max {
                    return Err(E220Error::LengthExceeded { requested, max });
                }
                let mut inner = self.inner.lock().await;
                Self::read_bounded_locked(&mut inner, requested).await
            }
            None => Ok(self.read_streaming(max).await),
        }
    }

    /// Transmits a payload.
    ///
    /// In fixed transmission mode the destination address and channel are
    /// prepended as a 3-byte header; in transparent mode the payload goes
    /// out unprefixed and addressing is the receiving side's concern.
    pub async fn send(
        &self,
        address: u16,
        channel: u8,
        payload: &[u8],
    ) -> Result<usize, E220Error> {
        let mut wdata = Vec::with_capacity(FIXED_HEADER_LEN + payload.len());
        if self.register.tx_method == TxMethod::Fixed {
            wdata.push(((address & 0xFF00) >> 8) as u8);
            wdata.push((address & 0x00FF) as u8);
            wdata.push(channel);
        }
        wdata.extend_from_slice(payload);

        let mut inner = self.inner.lock().await;
        Self::write_locked(&mut inner, &wdata).await
    }

    /// Pushes the register into the module.
    ///
    /// Forces `Sleep` (the only mode that accepts configuration), writes the
    /// `C0 00 08` command plus the 8 register bytes, and bounded-reads the
    /// echo under one lock hold. Returns `Ok(false)` on a truncated or
    /// altered echo so callers can retry without error handling overhead.
    pub async fn configure(&self) -> Result<bool, E220Error> {
        let mut wdata = Vec::with_capacity(CMD_WRITE_REGISTER.len() + REGISTER_LEN);
        wdata.extend_from_slice(&CMD_WRITE_REGISTER);
        wdata.extend_from_slice(&self.register.to_bytes());

        let mut inner = self.inner.lock().await;
        Self::change_mode_locked(&mut inner, Mode::Sleep).await?;
        Self::write_locked(&mut inner, &wdata).await?;
        let echo = Self::read_bounded_locked(&mut inner, wdata.len()).await?;

        // The module answers C1 00 08 + params; a loopback transport echoes
        // the C0 command verbatim. Both count as accepted.
        let ok = echo.len() == wdata.len()
            && (echo[0] == RSP_WRITE_REGISTER || echo[0] == CMD_WRITE_REGISTER[0])
            && echo[1..] == wdata[1..];
        if ok {
            log::info!("module configured: {}", hex::encode(&wdata[3..]));
        } else {
            log::warn!(
                "configure echo mismatch: wrote {}, got {}",
                hex::encode(&wdata),
                hex::encode(&echo)
            );
        }

        Ok(ok)
    }

    /// Reads the extended (RSSI) register.
    ///
    /// The module only reports extended data when ambient-noise RSSI is
    /// enabled or it is in `Normal`/`WorSend`; otherwise this short-circuits
    /// to a zero-valued result without touching the link. A malformed reply
    /// also degrades to the zero-valued result.
    pub async fn read_extended_register(&self) -> Result<ExtendRegister, E220Error> {
        let mut inner = self.inner.lock().await;
        if !(self.register.rssi_noise_enable
            || matches!(inner.mode, Mode::Normal | Mode::WorSend))
        {
            return Ok(ExtendRegister::default());
        }

        Self::write_locked(&mut inner, &CMD_READ_EXTENDED).await?;
        let rdata = Self::read_bounded_locked(&mut inner, CMD_READ_EXTENDED.len()).await?;

        let expected = RSP_READ_EXTENDED.len() + EXTENDED_REGISTER_LEN;
        if rdata.len() >= expected && rdata[..RSP_READ_EXTENDED.len()] == RSP_READ_EXTENDED {
            ExtendRegister::parse(&rdata[RSP_READ_EXTENDED.len()..expected])
        } else {
            log::warn!("extended register reply malformed: {}", hex::encode(&rdata));
            Ok(ExtendRegister::default())
        }
    }

    /// Extracts the signal strength of a received payload from its trailing
    /// RSSI byte, when the register enables that byte.
    pub fn get_rssi(&self, data: &[u8]) -> Option<i16> {
        if !self.register.rssi_byte_enable {
            return None;
        }
        data.last().map(|&raw| calc_rssi(raw))
    }

    /// Releases the pins and drops the serial port.
    pub async fn close(self) {
        let mut inner = self.inner.into_inner();
        inner.m0.release();
        inner.m1.release();
        inner.aux.release();
        log::info!("device closed");
    }

    async fn change_mode_locked(inner: &mut Inner<P>, mode: Mode) -> Result<(), E220Error> {
        let (m0, m1) = mode.pins();
        inner.m0.set(m0)?;
        inner.m1.set(m1)?;
        inner.mode = mode;
        log::info!("mode -> {mode:?}");
        // The module ignores the link until the mode pins settle.
        sleep(MODE_SETTLE).await;
        Ok(())
    }

    async fn write_locked(inner: &mut Inner<P>, data: &[u8]) -> Result<usize, E220Error> {
        inner
            .port
            .write_all(data)
            .await
            .map_err(|e| E220Error::SerialPortError(e.to_string()))?;
        SerialPort::flush(&mut inner.port)
            .await
            .map_err(|e| E220Error::SerialPortError(e.to_string()))?;
        log::debug!("wrote {}", hex::encode(data));
        Ok(data.len())
    }

    /// Strict bounded read: accumulates until `len` bytes or the serial
    /// timeout, propagating I/O errors. Short on timeout is not an error.
    async fn read_bounded_locked(inner: &mut Inner<P>, len: usize) -> Result<Vec<u8>, E220Error> {
        let mut buf = vec![0u8; len];
        let mut filled = 0;
        let deadline = tokio::time::Instant::now() + SERIAL_TIMEOUT;

        while filled < len {
            match tokio::time::timeout_at(deadline, inner.port.read(&mut buf[filled..])).await {
                Err(_) => break,
                Ok(Ok(0)) => break,
                Ok(Ok(n)) => filled += n,
                Ok(Err(e)) => return Err(E220Error::SerialPortError(e.to_string())),
            }
        }

        buf.truncate(filled);
        log::debug!("read {}", hex::encode(&buf));
        Ok(buf)
    }

    /// Best-effort streaming read: one byte per lock cycle with a brief
    /// pause between bytes, so a concurrent `send` or `change_mode` can
    /// interleave between received bytes.
    async fn read_streaming(&self, target: usize) -> Vec<u8> {
        let mut buf = Vec::with_capacity(target);

        while buf.len() < target {
            let mut byte = [0u8; 1];
            let n = {
                let mut inner = self.inner.lock().await;
                match timeout(SERIAL_TIMEOUT, inner.port.read(&mut byte)).await {
                    Err(_) => break,
                    Ok(Ok(n)) => n,
                    Ok(Err(e)) => {
                        log::debug!("receive poll failed, returning partial buffer: {e}");
                        break;
                    }
                }
            };
            if n == 0 {
                break;
            }
            buf.push(byte[0]);
            sleep(STREAM_READ_PAUSE).await;
        }

        buf
    }
}

#[cfg(feature = "raspberry-pi")]
impl E220Device<tokio_serial::SerialStream> {
    /// Creates a driver from raw device and BCM pin identifiers on a
    /// Raspberry Pi.
    ///
    /// Opens the serial port at the register's configured UART rate and
    /// claims the GPIO pins, with the mode pins starting high (`Sleep`).
    pub async fn create(
        register: Register,
        port_name: &str,
        m0_pin: u8,
        m1_pin: u8,
        aux_pin: u8,
    ) -> Result<Self, E220Error> {
        use crate::e220::serial::{open_with_config, SerialConfig};

        let port = open_with_config(
            port_name,
            SerialConfig {
                baudrate: register.serial_port_rate.bps(),
                timeout: SERIAL_TIMEOUT,
            },
        )
        .await?;

        let gpio = rppal::gpio::Gpio::new().map_err(|e| E220Error::Gpio(e.to_string()))?;
        let m0 = gpio
            .get(m0_pin)
            .map_err(|e| E220Error::Gpio(e.to_string()))?
            .into_output_high();
        let m1 = gpio
            .get(m1_pin)
            .map_err(|e| E220Error::Gpio(e.to_string()))?
            .into_output_high();
        let aux = gpio
            .get(aux_pin)
            .map_err(|e| E220Error::Gpio(e.to_string()))?
            .into_input();

        log::info!("E220 on {port_name}, M0=GPIO{m0_pin} M1=GPIO{m1_pin} AUX=GPIO{aux_pin}");
        Self::new(register, port, Box::new(m0), Box::new(m1), Box::new(aux)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::e220::gpio::MockPin;
    use crate::e220::serial_mock::MockSerialPort;

    fn mock_device(register: Register) -> (E220Device<MockSerialPort>, MockSerialPort, MockPin) {
        let port = MockSerialPort::new();
        let m0 = MockPin::new(false);
        let m1 = MockPin::new(false);
        let aux = MockPin::new(true);
        let device = tokio_test::block_on(E220Device::new(
            register,
            port.clone(),
            Box::new(m0),
            Box::new(m1),
            Box::new(aux.clone()),
        ))
        .unwrap();
        (device, port, aux)
    }

    #[test]
    fn test_new_starts_in_sleep() {
        let (device, _, _) = mock_device(Register::default());
        assert_eq!(tokio_test::block_on(device.mode()), Mode::Sleep);
    }

    #[test]
    fn test_new_rejects_invalid_register() {
        let register = Register {
            channel: 38,
            ..Register::default()
        };
        let result = tokio_test::block_on(E220Device::new(
            register,
            MockSerialPort::new(),
            Box::new(MockPin::new(false)),
            Box::new(MockPin::new(false)),
            Box::new(MockPin::new(true)),
        ));
        assert!(matches!(result, Err(E220Error::InvalidField { .. })));
    }

    #[test]
    fn test_get_busy_inverts_aux() {
        let (device, _, aux) = mock_device(Register::default());
        aux.set_level(true);
        assert!(!tokio_test::block_on(device.get_busy()).unwrap());
        aux.set_level(false);
        assert!(tokio_test::block_on(device.get_busy()).unwrap());
    }
}
