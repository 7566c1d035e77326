/// Default 7-bit I2C address of the TTS20 module.
pub const DEFAULT_I2C_ADDRESS: u8 = 0x40;

/// Transaction buffer size of a typical two-wire controller (AVR-class).
pub const WIRE_BUFFER_CAPACITY: u8 = 32;

/// Transaction buffer size of larger controllers (ESP32-class).
pub const WIRE_BUFFER_CAPACITY_LARGE: u8 = 128;

/// Time allowed for a command acknowledgement, in milliseconds.
pub const RESPONSE_TIMEOUT_MS: u32 = 1000;

/// Outer window of the busy poll, in milliseconds.
pub const BUSY_WINDOW_MS: u32 = 5000;

/// Per-query read timeout inside the busy poll, in milliseconds.
pub const BUSY_READ_TIMEOUT_MS: u32 = 500;

/// Length of the fixed-size device name register block.
pub const NAME_LEN: usize = 8;

/// Longest text a play frame can carry (the 16-bit length field also counts
/// the two command bytes).
pub const MAX_TEXT_LEN: usize = u16::MAX as usize - 2;
