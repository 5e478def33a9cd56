//! # Configuration Register Model
//!
//! Immutable value types for the module's 8-byte configuration register and
//! the 2-byte extended (RSSI) register, with a bidirectional byte codec and
//! field validation.
//!
//! Register layout (EBYTE E220 series manual):
//!
//! ```text
//! byte 0  ADDH     address high byte
//! byte 1  ADDL     address low byte
//! byte 2  REG0     serial_port_rate << 5 | air_data_rate
//! byte 3  REG1     sub_packet_length << 6 | rssi_noise_enable << 5 | tx_power
//! byte 4  REG2     channel
//! byte 5  REG3     rssi_byte_enable << 7 | tx_method << 6 | wor_cycle
//! byte 6  CRYPT_H  crypt_key high byte
//! byte 7  CRYPT_L  crypt_key low byte
//! ```

use crate::constants::{EXTENDED_REGISTER_LEN, REGISTER_LEN};
use crate::e220::choices::{
    AirDataRate, SerialPortRate, SubPacketLength, TxMethod, TxPower, WorCycle,
};
use crate::error::E220Error;
use serde::{Deserialize, Serialize};

/// Converts a raw RSSI byte into a signed strength in dBm.
///
/// The module reports signal strength as an offset below a 0 dBm reference,
/// halved: `-(255 - raw) / 2`. Used for both extended-register values and the
/// trailing RSSI byte appended to received payloads.
pub fn calc_rssi(raw: u8) -> i16 {
    -((255 - i16::from(raw)) / 2)
}

/// The 8-byte configuration register.
///
/// Plain value type; intermediate states may violate the channel bound until
/// [`Register::validate`] is called. [`Register::parse`] validates before
/// returning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Register {
    /// Module address (ADDH/ADDL)
    pub address: u16,
    /// UART rate of the serial link
    pub serial_port_rate: SerialPortRate,
    /// Over-the-air rate (bitrate / spreading factor / bandwidth)
    pub air_data_rate: AirDataRate,
    /// Maximum payload per transmission
    pub sub_packet_length: SubPacketLength,
    /// Enable ambient-noise RSSI reporting via the extended register
    pub rssi_noise_enable: bool,
    /// Transmit output power
    pub tx_power: TxPower,
    /// Frequency channel; the legal maximum depends on the air data
    /// rate's bandwidth
    pub channel: u8,
    /// Append an RSSI byte to every received payload
    pub rssi_byte_enable: bool,
    /// Transparent or fixed (addressed) transmission
    pub tx_method: TxMethod,
    /// Wake-on-radio cycle period
    pub wor_cycle: WorCycle,
    /// Encryption key (CRYPT_H/CRYPT_L); write-only on the module side
    pub crypt_key: u16,
}

impl Default for Register {
    /// Factory configuration of a stock E220-900T22S.
    fn default() -> Self {
        Register {
            address: 0x0000,
            serial_port_rate: SerialPortRate::Bps9600,
            air_data_rate: AirDataRate::Bps1758Sf9Bw125,
            sub_packet_length: SubPacketLength::Byte200,
            rssi_noise_enable: true,
            tx_power: TxPower::Dbm13,
            channel: 0,
            rssi_byte_enable: true,
            tx_method: TxMethod::Fixed,
            wor_cycle: WorCycle::Ms2000,
            crypt_key: 0x0000,
        }
    }
}

impl Register {
    /// Packs the register into its 8-byte wire layout.
    pub fn to_bytes(&self) -> [u8; REGISTER_LEN] {
        [
            ((self.address & 0xFF00) >> 8) as u8,
            (self.address & 0x00FF) as u8,
            self.serial_port_rate.code() << 5 | self.air_data_rate.code(),
            self.sub_packet_length.code() << 6
                | u8::from(self.rssi_noise_enable) << 5
                | self.tx_power.code(),
            self.channel,
            u8::from(self.rssi_byte_enable) << 7
                | self.tx_method.code() << 6
                | self.wor_cycle.code(),
            ((self.crypt_key & 0xFF00) >> 8) as u8,
            (self.crypt_key & 0x00FF) as u8,
        ]
    }

    /// Decodes 8 raw bytes read back from the module, then validates.
    pub fn parse(data: &[u8]) -> Result<Register, E220Error> {
        if data.len() < REGISTER_LEN {
            return Err(E220Error::MalformedRegister {
                expected: REGISTER_LEN,
                actual: data.len(),
            });
        }

        let reg = Register {
            address: u16::from(data[0]) << 8 | u16::from(data[1]),
            serial_port_rate: SerialPortRate::from_code(data[2] >> 5)?,
            air_data_rate: AirDataRate::from_code(data[2] & 0x1F)?,
            sub_packet_length: SubPacketLength::from_code(data[3] >> 6)?,
            rssi_noise_enable: (data[3] >> 5) & 0x01 == 1,
            tx_power: TxPower::from_code(data[3] & 0x03)?,
            channel: data[4],
            rssi_byte_enable: data[5] >> 7 == 1,
            tx_method: TxMethod::from_code((data[5] >> 6) & 0x01)?,
            wor_cycle: WorCycle::from_code(data[5] & 0x07)?,
            crypt_key: u16::from(data[6]) << 8 | u16::from(data[7]),
        };
        reg.validate()?;

        Ok(reg)
    }

    /// Checks field invariants.
    ///
    /// `address` and `crypt_key` hold their 0-65535 range by construction;
    /// what remains is the channel bound, which depends on the bandwidth
    /// implied by the air data rate.
    pub fn validate(&self) -> Result<(), E220Error> {
        let max = self.air_data_rate.max_channel();
        if self.channel > max {
            return Err(E220Error::InvalidField {
                field: "channel",
                reason: format!(
                    "{} exceeds maximum {} for BW {} kHz",
                    self.channel,
                    max,
                    self.air_data_rate.bandwidth_khz()
                ),
            });
        }
        Ok(())
    }
}

/// The 2-byte extended register: current ambient-noise RSSI and the RSSI
/// of the last reception, both already converted to dBm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtendRegister {
    pub now_rssi: i16,
    pub before_rssi: i16,
}

impl ExtendRegister {
    /// Decodes the 2 raw RSSI bytes of an extended-register response.
    pub fn parse(data: &[u8]) -> Result<ExtendRegister, E220Error> {
        if data.len() < EXTENDED_REGISTER_LEN {
            return Err(E220Error::MalformedRegister {
                expected: EXTENDED_REGISTER_LEN,
                actual: data.len(),
            });
        }

        Ok(ExtendRegister {
            now_rssi: calc_rssi(data[0]),
            before_rssi: calc_rssi(data[1]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_register_is_valid() {
        assert!(Register::default().validate().is_ok());
    }

    #[test]
    fn test_calc_rssi() {
        assert_eq!(calc_rssi(0xFF), 0);
        assert_eq!(calc_rssi(0x00), -127);
        assert_eq!(calc_rssi(0x9B), -50);
    }

    #[test]
    fn test_extend_register_too_short() {
        assert!(matches!(
            ExtendRegister::parse(&[0xFF]),
            Err(E220Error::MalformedRegister {
                expected: 2,
                actual: 1
            })
        ));
    }
}
