//! E220-900T22S protocol implementation: configuration choice tables, the
//! register codec, the operating-mode state machine, and the device driver
//! with its serial and GPIO collaborator seams.

pub mod choices;
pub mod device;
pub mod gpio;
pub mod mode;
pub mod register;
pub mod serial;
pub mod serial_mock;

pub use choices::{
    AirDataRate, SerialPortRate, SubPacketLength, TxMethod, TxPower, WorCycle,
};
pub use device::E220Device;
pub use mode::Mode;
pub use register::{calc_rssi, ExtendRegister, Register};
