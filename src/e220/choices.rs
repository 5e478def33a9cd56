//! # Configuration Choice Tables
//!
//! Closed enumerations for every multi-choice field of the E220 configuration
//! register. Each table maps a wire-level code (the discriminant, 1-5 bits
//! depending on the field) to a documented physical quantity. The physical
//! value is carried in the label text and extracted with [`label_num`] /
//! [`label_nums`], so the tables stay a single source of truth.

use crate::error::E220Error;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Extracts the embedded digits of a label fragment as one number,
/// ignoring thousands separators and units ("15,625 bps" -> 15625).
pub fn label_num(fragment: &str) -> u32 {
    fragment
        .chars()
        .filter_map(|c| c.to_digit(10))
        .fold(0, |acc, d| acc * 10 + d)
}

/// Extracts one number per `/`-separated group of a compound label
/// ("15,625 bps / SF 5 / BW 125 kHz" -> [15625, 5, 125]).
pub fn label_nums(label: &str) -> Vec<u32> {
    label.split('/').map(label_num).collect()
}

/// UART rate of the serial link between host and module (REG0 bits 7-5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SerialPortRate {
    Bps1200 = 0,
    Bps2400 = 1,
    Bps4800 = 2,
    Bps9600 = 3,
    Bps19200 = 4,
    Bps38400 = 5,
    Bps57600 = 6,
    Bps115200 = 7,
}

impl SerialPortRate {
    pub const ALL: [Self; 8] = [
        Self::Bps1200,
        Self::Bps2400,
        Self::Bps4800,
        Self::Bps9600,
        Self::Bps19200,
        Self::Bps38400,
        Self::Bps57600,
        Self::Bps115200,
    ];

    /// Wire-level code (3 bits).
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Result<Self, E220Error> {
        Self::ALL
            .into_iter()
            .find(|c| c.code() == code)
            .ok_or(E220Error::UnknownCode {
                table: "serial_port_rate",
                code,
            })
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Bps1200 => "1,200 bps",
            Self::Bps2400 => "2,400 bps",
            Self::Bps4800 => "4,800 bps",
            Self::Bps9600 => "9,600 bps",
            Self::Bps19200 => "19,200 bps",
            Self::Bps38400 => "38,400 bps",
            Self::Bps57600 => "57,600 bps",
            Self::Bps115200 => "115,200 bps",
        }
    }

    /// UART rate in bits per second.
    pub fn bps(self) -> u32 {
        label_num(self.label())
    }
}

/// Air data rate (REG0 bits 4-0). Each code pairs an over-the-air bitrate
/// with the LoRa spreading factor and bandwidth that produce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum AirDataRate {
    Bps15625Sf5Bw125 = 0,
    Bps9375Sf6Bw125 = 4,
    Bps5469Sf7Bw125 = 8,
    Bps3125Sf8Bw125 = 12,
    Bps1758Sf9Bw125 = 16,
    Bps31250Sf5Bw250 = 1,
    Bps18750Sf6Bw250 = 5,
    Bps10938Sf7Bw250 = 9,
    Bps6250Sf8Bw250 = 13,
    Bps3516Sf9Bw250 = 17,
    Bps1953Sf10Bw250 = 21,
    Bps62500Sf5Bw500 = 2,
    Bps37500Sf6Bw500 = 6,
    Bps21875Sf7Bw500 = 10,
    Bps12500Sf8Bw500 = 14,
    Bps7031Sf9Bw500 = 18,
    Bps3906Sf10Bw500 = 22,
    Bps2148Sf11Bw500 = 26,
}

impl AirDataRate {
    pub const ALL: [Self; 18] = [
        Self::Bps15625Sf5Bw125,
        Self::Bps9375Sf6Bw125,
        Self::Bps5469Sf7Bw125,
        Self::Bps3125Sf8Bw125,
        Self::Bps1758Sf9Bw125,
        Self::Bps31250Sf5Bw250,
        Self::Bps18750Sf6Bw250,
        Self::Bps10938Sf7Bw250,
        Self::Bps6250Sf8Bw250,
        Self::Bps3516Sf9Bw250,
        Self::Bps1953Sf10Bw250,
        Self::Bps62500Sf5Bw500,
        Self::Bps37500Sf6Bw500,
        Self::Bps21875Sf7Bw500,
        Self::Bps12500Sf8Bw500,
        Self::Bps7031Sf9Bw500,
        Self::Bps3906Sf10Bw500,
        Self::Bps2148Sf11Bw500,
    ];

    /// Wire-level code (5 bits).
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Result<Self, E220Error> {
        Self::ALL
            .into_iter()
            .find(|c| c.code() == code)
            .ok_or(E220Error::UnknownCode {
                table: "air_data_rate",
                code,
            })
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Bps15625Sf5Bw125 => "15,625 bps / SF 5 / BW 125 kHz",
            Self::Bps9375Sf6Bw125 => "9,375 bps / SF 6 / BW 125 kHz",
            Self::Bps5469Sf7Bw125 => "5,469 bps / SF 7 / BW 125 kHz",
            Self::Bps3125Sf8Bw125 => "3,125 bps / SF 8 / BW 125 kHz",
            Self::Bps1758Sf9Bw125 => "1,758 bps / SF 9 / BW 125 kHz",
            Self::Bps31250Sf5Bw250 => "31,250 bps / SF 5 / BW 250 kHz",
            Self::Bps18750Sf6Bw250 => "18,750 bps / SF 6 / BW 250 kHz",
            Self::Bps10938Sf7Bw250 => "10,938 bps / SF 7 / BW 250 kHz",
            Self::Bps6250Sf8Bw250 => "6,250 bps / SF 8 / BW 250 kHz",
            Self::Bps3516Sf9Bw250 => "3,516 bps / SF 9 / BW 250 kHz",
            Self::Bps1953Sf10Bw250 => "1,953 bps / SF 10 / BW 250 kHz",
            Self::Bps62500Sf5Bw500 => "62,500 bps / SF 5 / BW 500 kHz",
            Self::Bps37500Sf6Bw500 => "37,500 bps / SF 6 / BW 500 kHz",
            Self::Bps21875Sf7Bw500 => "21,875 bps / SF 7 / BW 500 kHz",
            Self::Bps12500Sf8Bw500 => "12,500 bps / SF 8 / BW 500 kHz",
            Self::Bps7031Sf9Bw500 => "7,031 bps / SF 9 / BW 500 kHz",
            Self::Bps3906Sf10Bw500 => "3,906 bps / SF 10 / BW 500 kHz",
            Self::Bps2148Sf11Bw500 => "2,148 bps / SF 11 / BW 500 kHz",
        }
    }

    /// Over-the-air bitrate in bits per second.
    pub fn bps(self) -> u32 {
        label_nums(self.label())[0]
    }

    /// LoRa spreading factor.
    pub fn spreading_factor(self) -> u32 {
        label_nums(self.label())[1]
    }

    /// LoRa bandwidth in kHz.
    pub fn bandwidth_khz(self) -> u32 {
        label_nums(self.label())[2]
    }

    /// Highest legal frequency channel for this rate's bandwidth.
    pub fn max_channel(self) -> u8 {
        MAX_CHANNEL_BY_BANDWIDTH
            .get(&self.bandwidth_khz())
            .copied()
            // 30 is the tightest bound the module documents
            .unwrap_or(30)
    }
}

/// Channel upper bound per LoRa bandwidth; wider bandwidths leave fewer
/// channels inside the 900 MHz allocation.
static MAX_CHANNEL_BY_BANDWIDTH: Lazy<HashMap<u32, u8>> =
    Lazy::new(|| HashMap::from([(125, 37), (250, 36), (500, 30)]));

/// Maximum payload bytes the module accepts per transmission (REG1 bits 7-6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SubPacketLength {
    Byte200 = 0,
    Byte128 = 1,
    Byte64 = 2,
    Byte32 = 3,
}

impl SubPacketLength {
    pub const ALL: [Self; 4] = [Self::Byte200, Self::Byte128, Self::Byte64, Self::Byte32];

    /// Wire-level code (2 bits).
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Result<Self, E220Error> {
        Self::ALL
            .into_iter()
            .find(|c| c.code() == code)
            .ok_or(E220Error::UnknownCode {
                table: "sub_packet_length",
                code,
            })
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Byte200 => "200 byte",
            Self::Byte128 => "128 byte",
            Self::Byte64 => "64 byte",
            Self::Byte32 => "32 byte",
        }
    }

    /// Sub-packet length in bytes.
    pub fn bytes(self) -> usize {
        label_num(self.label()) as usize
    }
}

/// Transmit output power (REG1 bits 1-0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TxPower {
    Dbm13 = 0,
    Dbm12 = 1,
    Dbm7 = 2,
    Dbm0 = 3,
}

impl TxPower {
    pub const ALL: [Self; 4] = [Self::Dbm13, Self::Dbm12, Self::Dbm7, Self::Dbm0];

    /// Wire-level code (2 bits).
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Result<Self, E220Error> {
        Self::ALL
            .into_iter()
            .find(|c| c.code() == code)
            .ok_or(E220Error::UnknownCode {
                table: "tx_power",
                code,
            })
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Dbm13 => "13 dBm",
            Self::Dbm12 => "12 dBm",
            Self::Dbm7 => "7 dBm",
            Self::Dbm0 => "0 dBm",
        }
    }

    /// Transmit power in dBm.
    pub fn dbm(self) -> u32 {
        label_num(self.label())
    }
}

/// Transmission method (REG3 bit 6).
///
/// Fixed transmission prefixes every frame with a destination address and
/// channel; transparent transmission sends the payload as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TxMethod {
    Transparent = 0,
    Fixed = 1,
}

impl TxMethod {
    pub const ALL: [Self; 2] = [Self::Transparent, Self::Fixed];

    /// Wire-level code (1 bit).
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Result<Self, E220Error> {
        Self::ALL
            .into_iter()
            .find(|c| c.code() == code)
            .ok_or(E220Error::UnknownCode {
                table: "tx_method",
                code,
            })
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Transparent => "transparent transmission",
            Self::Fixed => "fixed transmission",
        }
    }
}

/// Wake-on-radio cycle period (REG3 bits 2-0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum WorCycle {
    Ms500 = 0,
    Ms1000 = 1,
    Ms1500 = 2,
    Ms2000 = 3,
    Ms2500 = 4,
    Ms3000 = 5,
}

impl WorCycle {
    pub const ALL: [Self; 6] = [
        Self::Ms500,
        Self::Ms1000,
        Self::Ms1500,
        Self::Ms2000,
        Self::Ms2500,
        Self::Ms3000,
    ];

    /// Wire-level code (3 bits).
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Result<Self, E220Error> {
        Self::ALL
            .into_iter()
            .find(|c| c.code() == code)
            .ok_or(E220Error::UnknownCode {
                table: "wor_cycle",
                code,
            })
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Ms500 => "500 ms",
            Self::Ms1000 => "1000 ms",
            Self::Ms1500 => "1500 ms",
            Self::Ms2000 => "2000 ms",
            Self::Ms2500 => "2500 ms",
            Self::Ms3000 => "3000 ms",
        }
    }

    /// Wake cycle period in milliseconds.
    pub fn millis(self) -> u64 {
        u64::from(label_num(self.label()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_num_strips_separators() {
        assert_eq!(label_num("115,200 bps"), 115_200);
        assert_eq!(label_num("0 dBm"), 0);
    }

    #[test]
    fn test_label_nums_compound() {
        assert_eq!(
            label_nums("15,625 bps / SF 5 / BW 125 kHz"),
            vec![15_625, 5, 125]
        );
    }

    #[test]
    fn test_codes_fit_field_width() {
        for c in SerialPortRate::ALL {
            assert!(c.code() < 8);
        }
        for c in AirDataRate::ALL {
            assert!(c.code() < 32);
        }
        for c in SubPacketLength::ALL {
            assert!(c.code() < 4);
        }
        for c in TxPower::ALL {
            assert!(c.code() < 4);
        }
        for c in WorCycle::ALL {
            assert!(c.code() < 8);
        }
    }

    #[test]
    fn test_codes_unique_within_table() {
        let mut codes: Vec<u8> = AirDataRate::ALL.iter().map(|c| c.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), AirDataRate::ALL.len());
    }
}
