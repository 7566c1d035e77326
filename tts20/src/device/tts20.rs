//! TTS20 text-to-speech module driver.
//!
//! The driver is generic over any [`embedded_hal::i2c::I2c`] bus and a
//! millisecond [`Clock`]. It owns both for its lifetime; use
//! [`release`](Tts20::release) to get them back.
//!
//! # Example
//!
//! ```ignore
//! let mut tts = Tts20::new(i2c, clock);
//! tts.init()?;                     // reads the ring size, configures the voice
//! tts.play("Hello")?;              // Ok(false) if the module did not acknowledge
//! while tts.is_busy()? {}
//! ```

use core::fmt;

use embedded_hal::i2c::I2c;

use super::registers as reg;
use crate::clock::{Clock, Deadline};
use crate::config::{Config, ConfigError};
use crate::constants::{DEFAULT_I2C_ADDRESS, MAX_TEXT_LEN, NAME_LEN};
use crate::control::SpeechControl;
use crate::error::{Error, Stage};

mod receive;
mod transmit;

pub use transmit::segment_len;

// ── Public types ───────────────────────────────────────────────────────────

/// One-byte status code read from the receive ring buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Response {
    /// Command accepted (`0x41`).
    Success,
    /// Synthesizing or playing (`0x4E`).
    Busy,
    /// Idle (`0x4F`).
    Idle,
    /// Any other byte.
    Other(u8),
}

impl From<u8> for Response {
    fn from(byte: u8) -> Self {
        match byte {
            reg::RESPONSE_SUCCESS => Self::Success,
            reg::RESPONSE_BUSY => Self::Busy,
            reg::RESPONSE_IDLE => Self::Idle,
            other => Self::Other(other),
        }
    }
}

impl From<Response> for u8 {
    fn from(response: Response) -> Self {
        match response {
            Response::Success => reg::RESPONSE_SUCCESS,
            Response::Busy => reg::RESPONSE_BUSY,
            Response::Idle => reg::RESPONSE_IDLE,
            Response::Other(byte) => byte,
        }
    }
}

/// Firmware version reported by the module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FirmwareVersion {
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
}

impl fmt::Display for FirmwareVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Fixed-size device name as stored in the module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceName([u8; NAME_LEN]);

impl DeviceName {
    /// Raw register contents, including padding.
    pub fn as_bytes(&self) -> &[u8; NAME_LEN] {
        &self.0
    }

    /// Name with trailing NUL and space padding removed, or `None` if the
    /// bytes are not UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        let end = self
            .0
            .iter()
            .rposition(|&b| b != 0 && b != b' ')
            .map_or(0, |i| i + 1);
        core::str::from_utf8(&self.0[..end]).ok()
    }
}

// ── Driver struct ──────────────────────────────────────────────────────────

/// TTS20 text-to-speech module driver.
///
/// Generic over I2C bus and clock. The clock bounds every wait that has a
/// deadline; the driver never sleeps.
pub struct Tts20<I2C, C> {
    i2c: I2C,
    clock: C,
    address: u8,
    config: Config,
    /// Receive ring buffer size, read once by [`init`](Self::init).
    rx_capacity: u8,
}

impl<I2C, C> Tts20<I2C, C>
where
    I2C: I2c,
    C: Clock,
{
    /// Default I2C address (0x40).
    pub const DEFAULT_ADDRESS: u8 = DEFAULT_I2C_ADDRESS;

    /// Create a new driver with the default address and configuration.
    pub fn new(i2c: I2C, clock: C) -> Self {
        Self::new_with_address(i2c, clock, Self::DEFAULT_ADDRESS)
    }

    /// Create a new driver with a specific I2C address.
    pub fn new_with_address(i2c: I2C, clock: C, address: u8) -> Self {
        Self {
            i2c,
            clock,
            address,
            config: Config::default(),
            rx_capacity: 0,
        }
    }

    /// Create a new driver with a specific address and configuration.
    pub fn with_config(
        i2c: I2C,
        clock: C,
        address: u8,
        config: Config,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            i2c,
            clock,
            address,
            config,
            rx_capacity: 0,
        })
    }

    /// I2C address this driver talks to.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Receive ring buffer size reported by the module; zero before
    /// [`init`](Self::init).
    pub fn capacity(&self) -> u8 {
        self.rx_capacity
    }

    // ── Low-level register helpers ─────────────────────────────────────

    /// Write one byte to a register.
    pub fn write_register(&mut self, register: u8, value: u8) -> Result<(), Error<I2C::Error>> {
        self.i2c
            .write(self.address, &[register, value])
            .map_err(Error::Bus)
    }

    /// Read `buf.len()` consecutive bytes starting at `register`.
    pub fn read_registers(
        &mut self,
        register: u8,
        buf: &mut [u8],
    ) -> Result<(), Error<I2C::Error>> {
        self.i2c
            .write_read(self.address, &[register], buf)
            .map_err(Error::Bus)
    }

    fn read_register(&mut self, register: u8) -> Result<u8, Error<I2C::Error>> {
        let mut value = [0u8; 1];
        self.read_registers(register, &mut value)?;
        Ok(value[0])
    }

    // ── Initialization ─────────────────────────────────────────────────

    /// Bring the module into a known state.
    ///
    /// Reads the receive ring buffer size, sends the voice setup frame and
    /// waits for its acknowledgement, then waits until the module is idle.
    /// A missing acknowledgement is fatal ([`Error::InitFailed`]).
    pub fn init(&mut self) -> Result<(), Error<I2C::Error>> {
        self.rx_capacity = self.read_register(reg::RX_BUFFER_CAPACITY)?;
        debug!("tts20: rx ring capacity {=u8}", self.rx_capacity);
        if self.rx_capacity == 0 {
            warn!("tts20: module reports a zero-sized rx ring");
        }

        self.write_segmented(&reg::INIT_FRAME)?;
        if !self.read_until(Response::Success, self.config.response_timeout_ms)? {
            return Err(Error::InitFailed);
        }

        let deadline = Deadline::optional(&mut self.clock, self.config.init_idle_timeout_ms);
        while self.is_busy()? {
            if deadline.is_some_and(|d| d.expired(&mut self.clock)) {
                return Err(Error::Timeout(Stage::InitIdle));
            }
        }
        Ok(())
    }

    // ── Accessors ──────────────────────────────────────────────────────

    /// Firmware version, `major.minor.patch`.
    pub fn firmware_version(&mut self) -> Result<FirmwareVersion, Error<I2C::Error>> {
        let mut v = [0u8; 3];
        self.read_registers(reg::FIRMWARE_VERSION, &mut v)?;
        Ok(FirmwareVersion {
            major: v[0],
            minor: v[1],
            patch: v[2],
        })
    }

    /// Device id.
    pub fn device_id(&mut self) -> Result<u8, Error<I2C::Error>> {
        self.read_register(reg::DEVICE_ID)
    }

    /// Device name.
    pub fn name(&mut self) -> Result<DeviceName, Error<I2C::Error>> {
        let mut name = [0u8; NAME_LEN];
        self.read_registers(reg::NAME, &mut name)?;
        Ok(DeviceName(name))
    }

    // ── Commands ───────────────────────────────────────────────────────

    /// Synthesize `text` and start playing it.
    ///
    /// The module accepts at most 4 KiB of text per frame and rejects longer
    /// input by not acknowledging it. Returns `Ok(true)` once acknowledged.
    pub fn play(&mut self, text: &str) -> Result<bool, Error<I2C::Error>> {
        self.play_bytes(text.as_bytes())
    }

    /// [`play`](Self::play) for text that is already encoded.
    ///
    /// Empty or unframeable input is rejected before any bus traffic.
    pub fn play_bytes(&mut self, text: &[u8]) -> Result<bool, Error<I2C::Error>> {
        if text.is_empty() {
            return Err(Error::EmptyPayload);
        }
        if text.len() > MAX_TEXT_LEN {
            return Err(Error::PayloadTooLong(text.len()));
        }

        self.clear_rx_buffer()?;
        self.write_segmented(&reg::synthesize_header(text.len()))?;
        self.write_segmented(text)?;
        self.read_until(Response::Success, self.config.response_timeout_ms)
    }

    /// Stop playback.
    pub fn stop(&mut self) -> Result<bool, Error<I2C::Error>> {
        self.command(&reg::STOP_FRAME)
    }

    /// Pause playback.
    pub fn pause(&mut self) -> Result<bool, Error<I2C::Error>> {
        self.command(&reg::PAUSE_FRAME)
    }

    /// Resume paused playback.
    pub fn resume(&mut self) -> Result<bool, Error<I2C::Error>> {
        self.command(&reg::RESUME_FRAME)
    }

    /// Whether the module is synthesizing or playing.
    ///
    /// Queries the status repeatedly for up to `busy_window_ms`, each query
    /// waiting `busy_read_timeout_ms` for an answer. The first Busy or Idle
    /// answer is returned. If none arrives within the window the module is
    /// reported busy, so callers spinning on `!is_busy()` never run ahead of
    /// an unknown state.
    pub fn is_busy(&mut self) -> Result<bool, Error<I2C::Error>> {
        let window = Deadline::start(&mut self.clock, self.config.busy_window_ms);
        while !window.expired(&mut self.clock) {
            self.clear_rx_buffer()?;
            self.write_segmented(&reg::QUERY_STATUS_FRAME)?;
            match self.read_response(self.config.busy_read_timeout_ms)? {
                Some(Response::Busy) => return Ok(true),
                Some(Response::Idle) => return Ok(false),
                Some(other) => debug!("tts20: unexpected status {=u8}", u8::from(other)),
                None => trace!("tts20: status query timed out"),
            }
        }
        warn!("tts20: status unknown, assuming busy");
        Ok(true)
    }

    /// Discard everything pending in the module's receive ring buffer.
    pub fn clear_rx_buffer(&mut self) -> Result<(), Error<I2C::Error>> {
        self.write_register(reg::COMMAND, reg::COMMAND_CLEAR_RX_BUFFER)
    }

    // ── Release ────────────────────────────────────────────────────────

    /// Consume the driver and return the I2C bus and clock.
    pub fn release(self) -> (I2C, C) {
        (self.i2c, self.clock)
    }

    // ── Private helpers ────────────────────────────────────────────────

    /// Clear, send a fixed frame, expect a Success acknowledgement.
    fn command(&mut self, frame: &[u8]) -> Result<bool, Error<I2C::Error>> {
        self.clear_rx_buffer()?;
        self.write_segmented(frame)?;
        self.read_until(Response::Success, self.config.response_timeout_ms)
    }

    /// Read one status byte within `timeout_ms`.
    fn read_response(&mut self, timeout_ms: u32) -> Result<Option<Response>, Error<I2C::Error>> {
        let mut byte = [0u8; 1];
        let n = self.read_ring(&mut byte, timeout_ms)?;
        Ok((n == 1).then(|| Response::from(byte[0])))
    }

    /// Whether the next status byte arrives within `timeout_ms` and equals
    /// `expected`.
    fn read_until(&mut self, expected: Response, timeout_ms: u32) -> Result<bool, Error<I2C::Error>> {
        Ok(self.read_response(timeout_ms)? == Some(expected))
    }
}

// ── SpeechControl trait implementation ─────────────────────────────────────

impl<I2C, C> SpeechControl for Tts20<I2C, C>
where
    I2C: I2c,
    C: Clock,
{
    type Error = Error<I2C::Error>;

    fn speak(&mut self, text: &str) -> Result<bool, Self::Error> {
        Tts20::play(self, text)
    }

    fn stop(&mut self) -> Result<bool, Self::Error> {
        Tts20::stop(self)
    }

    fn pause(&mut self) -> Result<bool, Self::Error> {
        Tts20::pause(self)
    }

    fn resume(&mut self) -> Result<bool, Self::Error> {
        Tts20::resume(self)
    }

    fn is_busy(&mut self) -> Result<bool, Self::Error> {
        Tts20::is_busy(self)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────
