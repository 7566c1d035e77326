//! Driver configuration.
//!
//! All protocol timeouts and the size of the local bus transaction buffer
//! live here. The defaults reproduce the module vendor's reference timing:
//!
//! | Setting | Default |
//! |---------|---------|
//! | `wire_capacity` | 32 bytes |
//! | `response_timeout_ms` | 1000 ms |
//! | `busy_window_ms` | 5000 ms |
//! | `busy_read_timeout_ms` | 500 ms |
//! | `tx_stall_timeout_ms` | unbounded |
//! | `tx_drain_timeout_ms` | unbounded |
//! | `init_idle_timeout_ms` | unbounded |

use core::fmt;

use crate::constants::{
    BUSY_READ_TIMEOUT_MS, BUSY_WINDOW_MS, RESPONSE_TIMEOUT_MS, WIRE_BUFFER_CAPACITY,
    WIRE_BUFFER_CAPACITY_LARGE,
};

/// Timing and buffer-size settings for [`Tts20`](crate::Tts20).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Size of the controller's I2C transaction buffer in bytes.
    ///
    /// One byte of every transmit burst is taken by the register address, so
    /// at most `wire_capacity - 1` payload bytes go out per transaction.
    pub wire_capacity: u8,
    /// Time allowed for the acknowledgement of a command.
    pub response_timeout_ms: u32,
    /// How long [`is_busy`](crate::Tts20::is_busy) keeps asking before it
    /// gives up and reports busy.
    pub busy_window_ms: u32,
    /// Read timeout of each individual status query inside the busy window.
    pub busy_read_timeout_ms: u32,
    /// Limit on how long the module may advertise zero free transmit space
    /// before any progress is made. `None` waits forever.
    pub tx_stall_timeout_ms: Option<u32>,
    /// Limit on how long the module may take to drain its transmit buffer
    /// after the last chunk. `None` waits forever.
    pub tx_drain_timeout_ms: Option<u32>,
    /// Limit on the idle wait at the end of [`init`](crate::Tts20::init).
    /// `None` waits forever.
    pub init_idle_timeout_ms: Option<u32>,
}

impl Config {
    /// Reference timing for controllers with a 32-byte I2C buffer.
    pub const WIRE_32: Self = Self {
        wire_capacity: WIRE_BUFFER_CAPACITY,
        response_timeout_ms: RESPONSE_TIMEOUT_MS,
        busy_window_ms: BUSY_WINDOW_MS,
        busy_read_timeout_ms: BUSY_READ_TIMEOUT_MS,
        tx_stall_timeout_ms: None,
        tx_drain_timeout_ms: None,
        init_idle_timeout_ms: None,
    };

    /// Reference timing for controllers with a 128-byte I2C buffer.
    pub const WIRE_128: Self = Self {
        wire_capacity: WIRE_BUFFER_CAPACITY_LARGE,
        ..Self::WIRE_32
    };

    /// Set the controller's I2C transaction buffer size.
    pub const fn with_wire_capacity(mut self, bytes: u8) -> Self {
        self.wire_capacity = bytes;
        self
    }

    /// Set the command acknowledgement timeout.
    pub const fn with_response_timeout_ms(mut self, ms: u32) -> Self {
        self.response_timeout_ms = ms;
        self
    }

    /// Set both busy-poll durations: the outer window and the per-query read.
    pub const fn with_busy_poll_ms(mut self, window: u32, read: u32) -> Self {
        self.busy_window_ms = window;
        self.busy_read_timeout_ms = read;
        self
    }

    /// Bound the wait for free transmit space.
    pub const fn with_tx_stall_timeout_ms(mut self, ms: Option<u32>) -> Self {
        self.tx_stall_timeout_ms = ms;
        self
    }

    /// Bound the wait for the transmit buffer to drain.
    pub const fn with_tx_drain_timeout_ms(mut self, ms: Option<u32>) -> Self {
        self.tx_drain_timeout_ms = ms;
        self
    }

    /// Bound the idle wait at the end of initialization.
    pub const fn with_init_idle_timeout_ms(mut self, ms: Option<u32>) -> Self {
        self.init_idle_timeout_ms = ms;
        self
    }

    /// Check the settings the protocol cannot work without.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // At least one payload byte must fit next to the register address.
        if self.wire_capacity < 2 {
            return Err(ConfigError::WireCapacityTooSmall(self.wire_capacity));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::WIRE_32
    }
}

/// Rejected [`Config`] value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// `wire_capacity` leaves no room for payload bytes.
    WireCapacityTooSmall(u8),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WireCapacityTooSmall(n) => {
                write!(f, "wire capacity of {n} bytes leaves no room for payload")
            }
        }
    }
}

impl core::error::Error for ConfigError {}
