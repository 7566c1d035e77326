//! Fatal error tier.
//!
//! Protocol-level misses (no acknowledgement, unexpected status byte) are not
//! errors; the command methods report them as `Ok(false)`. Everything in
//! [`Error`] leaves the module in an unknown state.

use core::fmt;

/// Which unbounded-by-default wait ran into its configured deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Stage {
    /// The module kept advertising zero free transmit space.
    TxFreeSpace,
    /// The module never reported its transmit buffer empty.
    TxDrain,
    /// The module stayed busy after initialization.
    InitIdle,
}

/// Driver error, generic over the I2C bus error `E`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The I2C transaction failed (typically a NACK).
    Bus(E),
    /// A transfer was requested with nothing to send.
    EmptyPayload,
    /// The text does not fit the 16-bit frame length field.
    PayloadTooLong(usize),
    /// The module did not acknowledge the initialization frame.
    InitFailed,
    /// A wait exceeded its configured deadline.
    Timeout(Stage),
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus(e) => write!(f, "i2c bus error: {e:?}"),
            Self::EmptyPayload => f.write_str("empty payload"),
            Self::PayloadTooLong(n) => write!(f, "payload of {n} bytes exceeds frame limit"),
            Self::InitFailed => f.write_str("module did not acknowledge initialization"),
            Self::Timeout(stage) => write!(f, "timed out waiting in {stage:?}"),
        }
    }
}

impl<E: fmt::Debug> core::error::Error for Error<E> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_failure() {
        let e: Error<u8> = Error::Bus(3);
        assert_eq!(e.to_string(), "i2c bus error: 3");
        let e: Error<u8> = Error::Timeout(Stage::TxDrain);
        assert_eq!(e.to_string(), "timed out waiting in TxDrain");
        let e: Error<u8> = Error::PayloadTooLong(70000);
        assert_eq!(e.to_string(), "payload of 70000 bytes exceeds frame limit");
    }
}
