//! Mock serial port implementation for testing
//!
//! This module provides a mock serial port that can be used to test the
//! E220 command and data protocol without requiring actual hardware.

use std::collections::VecDeque;
use std::io;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};

use crate::constants::{CMD_WRITE_REGISTER, RSP_READ_EXTENDED, RSP_WRITE_REGISTER};
use crate::e220::register::Register;

/// Mock serial port that simulates bidirectional communication.
#[derive(Clone)]
pub struct MockSerialPort {
    /// Data written to the port (outgoing)
    pub tx_buffer: Arc<Mutex<Vec<u8>>>,
    /// Data to be read from the port (incoming)
    pub rx_buffer: Arc<Mutex<VecDeque<u8>>>,
    /// Simulated errors
    pub next_error: Arc<Mutex<Option<io::Error>>>,
}

impl Default for MockSerialPort {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSerialPort {
    pub fn new() -> Self {
        MockSerialPort {
            tx_buffer: Arc::new(Mutex::new(Vec::new())),
            rx_buffer: Arc::new(Mutex::new(VecDeque::new())),
            next_error: Arc::new(Mutex::new(None)),
        }
    }

    /// Queue data to be read from the port.
    pub fn queue_rx_data(&self, data: &[u8]) {
        let mut rx = self.rx_buffer.lock().unwrap();
        rx.extend(data);
    }

    /// Get data that was written to the port.
    pub fn get_tx_data(&self) -> Vec<u8> {
        self.tx_buffer.lock().unwrap().clone()
    }

    /// Clear all buffers.
    pub fn clear(&self) {
        self.tx_buffer.lock().unwrap().clear();
        self.rx_buffer.lock().unwrap().clear();
    }

    /// Set an error to be returned on the next operation.
    pub fn set_next_error(&self, error: io::Error) {
        *self.next_error.lock().unwrap() = Some(error);
    }

    /// Queue the module's response to a register write: the `C1 00 08`
    /// echo followed by the accepted parameter bytes.
    pub fn queue_configure_response(&self, register: &Register) {
        let mut response = vec![
            RSP_WRITE_REGISTER,
            CMD_WRITE_REGISTER[1],
            CMD_WRITE_REGISTER[2],
        ];
        response.extend_from_slice(&register.to_bytes());
        self.queue_rx_data(&response);
    }

    /// Queue the module's response to an extended-register query: the
    /// `C1 00 02` echo followed by the two raw RSSI bytes.
    pub fn queue_extended_response(&self, now_raw: u8, before_raw: u8) {
        let mut response = RSP_READ_EXTENDED.to_vec();
        response.push(now_raw);
        response.push(before_raw);
        self.queue_rx_data(&response);
    }
}

impl AsyncRead for MockSerialPort {
    fn poll_read(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        if let Some(error) = self.next_error.lock().unwrap().take() {
            return Poll::Ready(Err(error));
        }

        let mut rx = self.rx_buffer.lock().unwrap();
        let available = rx.len().min(buf.remaining());

        if available > 0 {
            let data: Vec<u8> = rx.drain(..available).collect();
            buf.put_slice(&data);
        }

        Poll::Ready(Ok(()))
    }
}

impl AsyncWrite for MockSerialPort {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        if let Some(error) = self.next_error.lock().unwrap().take() {
            return Poll::Ready(Err(error));
        }

        let mut tx = self.tx_buffer.lock().unwrap();
        tx.extend_from_slice(buf);
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}
