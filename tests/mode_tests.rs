//! Unit tests for the operating-mode state machine.

use e220_rs::Mode;

const ALL_MODES: [Mode; 4] = [Mode::Normal, Mode::WorSend, Mode::WorRecv, Mode::Sleep];

/// The documented (M0, M1) mapping table.
#[test]
fn test_pin_table() {
    assert_eq!(Mode::Normal.pins(), (false, false));
    assert_eq!(Mode::WorSend.pins(), (false, true));
    assert_eq!(Mode::WorRecv.pins(), (true, false));
    assert_eq!(Mode::Sleep.pins(), (true, true));
}

/// parse(pins(m)) == m for all four modes.
#[test]
fn test_parse_is_left_inverse_of_pins() {
    for mode in ALL_MODES {
        let (m0, m1) = mode.pins();
        assert_eq!(Mode::parse(m0, m1), mode);
    }
}

/// pins(parse(p)) == p for all four pin pairs.
#[test]
fn test_pins_is_left_inverse_of_parse() {
    for m0 in [false, true] {
        for m1 in [false, true] {
            assert_eq!(Mode::parse(m0, m1).pins(), (m0, m1));
        }
    }
}

/// The mapping is total: every pin pair selects a distinct mode.
#[test]
fn test_mapping_is_bijective() {
    let mut seen: Vec<Mode> = Vec::new();
    for m0 in [false, true] {
        for m1 in [false, true] {
            let mode = Mode::parse(m0, m1);
            assert!(!seen.contains(&mode));
            seen.push(mode);
        }
    }
    assert_eq!(seen.len(), 4);
}
