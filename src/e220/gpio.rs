//! # GPIO Collaborator Traits
//!
//! The driver controls the module's M0/M1 mode-select lines through
//! [`OutputPin`] and reads the AUX busy line through [`InputPin`]. Keeping
//! the pins behind traits lets tests inject [`MockPin`] and keeps platform
//! support behind the `raspberry-pi` feature.

use crate::error::E220Error;
use std::sync::{Arc, Mutex};

/// A digital output pin (M0 or M1 mode-select line).
pub trait OutputPin: Send {
    /// Drives the pin high (`true`) or low (`false`).
    fn set(&mut self, level: bool) -> Result<(), E220Error>;

    /// Returns the pin to its unclaimed state. Default is a no-op for
    /// platforms that release on drop.
    fn release(&mut self) {}
}

/// A digital input pin (AUX busy line).
pub trait InputPin: Send {
    /// Reads the pin level; `true` is high.
    fn get(&mut self) -> Result<bool, E220Error>;

    /// Returns the pin to its unclaimed state. Default is a no-op for
    /// platforms that release on drop.
    fn release(&mut self) {}
}

#[cfg(feature = "raspberry-pi")]
impl OutputPin for rppal::gpio::OutputPin {
    fn set(&mut self, level: bool) -> Result<(), E220Error> {
        if level {
            self.set_high();
        } else {
            self.set_low();
        }
        Ok(())
    }
}

#[cfg(feature = "raspberry-pi")]
impl InputPin for rppal::gpio::InputPin {
    fn get(&mut self) -> Result<bool, E220Error> {
        Ok(self.read() == rppal::gpio::Level::High)
    }
}

/// Mock pin with shared level state for driving both sides of a test.
///
/// Cloning shares the underlying level, so a test can hold one clone while
/// the driver owns the other.
#[derive(Clone, Default)]
pub struct MockPin {
    level: Arc<Mutex<bool>>,
    released: Arc<Mutex<bool>>,
    fail: Arc<Mutex<bool>>,
}

impl MockPin {
    pub fn new(level: bool) -> Self {
        MockPin {
            level: Arc::new(Mutex::new(level)),
            released: Arc::new(Mutex::new(false)),
            fail: Arc::new(Mutex::new(false)),
        }
    }

    /// Current pin level as seen/left by the driver.
    pub fn level(&self) -> bool {
        *self.level.lock().unwrap()
    }

    /// Sets the level from the test side (simulates the module driving AUX).
    pub fn set_level(&self, level: bool) {
        *self.level.lock().unwrap() = level;
    }

    pub fn is_released(&self) -> bool {
        *self.released.lock().unwrap()
    }

    /// Makes every subsequent pin operation fail.
    pub fn set_failing(&self) {
        *self.fail.lock().unwrap() = true;
    }

    fn check_fail(&self) -> Result<(), E220Error> {
        if *self.fail.lock().unwrap() {
            return Err(E220Error::Gpio("mock pin failure".into()));
        }
        Ok(())
    }
}

impl OutputPin for MockPin {
    fn set(&mut self, level: bool) -> Result<(), E220Error> {
        self.check_fail()?;
        *self.level.lock().unwrap() = level;
        Ok(())
    }

    fn release(&mut self) {
        *self.released.lock().unwrap() = true;
    }
}

impl InputPin for MockPin {
    fn get(&mut self) -> Result<bool, E220Error> {
        self.check_fail()?;
        Ok(*self.level.lock().unwrap())
    }

    fn release(&mut self) {
        *self.released.lock().unwrap() = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_pin_shares_level() {
        let pin = MockPin::new(false);
        let mut driver_side: Box<dyn OutputPin> = Box::new(pin.clone());
        driver_side.set(true).unwrap();
        assert!(pin.level());
    }

    #[test]
    fn test_mock_pin_failure() {
        let pin = MockPin::new(false);
        pin.set_failing();
        let mut input: Box<dyn InputPin> = Box::new(pin);
        assert!(matches!(input.get(), Err(E220Error::Gpio(_))));
    }
}
