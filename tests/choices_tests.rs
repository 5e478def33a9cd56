//! Unit tests for the configuration choice tables: wire codes, labels, and
//! the derived physical quantities.

use e220_rs::{
    label_num, label_nums, AirDataRate, E220Error, SerialPortRate, SubPacketLength, TxMethod,
    TxPower, WorCycle,
};

#[test]
fn test_label_num_extraction() {
    assert_eq!(label_num("9,600 bps"), 9600);
    assert_eq!(label_num("200 byte"), 200);
    assert_eq!(label_num("no digits"), 0);
}

#[test]
fn test_label_nums_compound_extraction() {
    assert_eq!(
        label_nums("1,758 bps / SF 9 / BW 125 kHz"),
        vec![1758, 9, 125]
    );
}

#[test]
fn test_serial_port_rate_codes_and_bps() {
    assert_eq!(SerialPortRate::Bps1200.code(), 0);
    assert_eq!(SerialPortRate::Bps115200.code(), 7);
    assert_eq!(SerialPortRate::Bps9600.bps(), 9600);
    assert_eq!(SerialPortRate::Bps115200.bps(), 115_200);
    assert_eq!(
        SerialPortRate::from_code(3).unwrap(),
        SerialPortRate::Bps9600
    );
}

#[test]
fn test_air_data_rate_derived_values() {
    let rate = AirDataRate::Bps1758Sf9Bw125;
    assert_eq!(rate.code(), 16);
    assert_eq!(rate.bps(), 1758);
    assert_eq!(rate.spreading_factor(), 9);
    assert_eq!(rate.bandwidth_khz(), 125);

    let rate = AirDataRate::Bps2148Sf11Bw500;
    assert_eq!(rate.code(), 26);
    assert_eq!(rate.bps(), 2148);
    assert_eq!(rate.spreading_factor(), 11);
    assert_eq!(rate.bandwidth_khz(), 500);
}

#[test]
fn test_air_data_rate_max_channel_per_bandwidth() {
    assert_eq!(AirDataRate::Bps15625Sf5Bw125.max_channel(), 37);
    assert_eq!(AirDataRate::Bps1953Sf10Bw250.max_channel(), 36);
    assert_eq!(AirDataRate::Bps3906Sf10Bw500.max_channel(), 30);
}

#[test]
fn test_sub_packet_length_bytes() {
    assert_eq!(SubPacketLength::Byte200.bytes(), 200);
    assert_eq!(SubPacketLength::Byte32.bytes(), 32);
    assert_eq!(
        SubPacketLength::from_code(2).unwrap(),
        SubPacketLength::Byte64
    );
}

#[test]
fn test_tx_power_dbm() {
    assert_eq!(TxPower::Dbm13.dbm(), 13);
    assert_eq!(TxPower::Dbm0.dbm(), 0);
    assert_eq!(TxPower::Dbm0.code(), 3);
}

#[test]
fn test_tx_method_codes() {
    assert_eq!(TxMethod::Transparent.code(), 0);
    assert_eq!(TxMethod::Fixed.code(), 1);
    assert_eq!(TxMethod::from_code(1).unwrap(), TxMethod::Fixed);
}

#[test]
fn test_wor_cycle_millis() {
    assert_eq!(WorCycle::Ms500.millis(), 500);
    assert_eq!(WorCycle::Ms3000.millis(), 3000);
    assert_eq!(WorCycle::from_code(3).unwrap(), WorCycle::Ms2000);
}

/// Codes outside a table fail with UnknownCode naming the table.
#[test]
fn test_unknown_codes_rejected() {
    assert!(matches!(
        SerialPortRate::from_code(8),
        Err(E220Error::UnknownCode {
            table: "serial_port_rate",
            code: 8
        })
    ));
    // 3 sits between the 250 kHz and 500 kHz groups and is unassigned
    assert!(matches!(
        AirDataRate::from_code(3),
        Err(E220Error::UnknownCode {
            table: "air_data_rate",
            code: 3
        })
    ));
    assert!(TxMethod::from_code(2).is_err());
    assert!(WorCycle::from_code(6).is_err());
}

/// Every code round-trips through its table.
#[test]
fn test_from_code_round_trip() {
    for c in AirDataRate::ALL {
        assert_eq!(AirDataRate::from_code(c.code()).unwrap(), c);
    }
    for c in SerialPortRate::ALL {
        assert_eq!(SerialPortRate::from_code(c.code()).unwrap(), c);
    }
}
