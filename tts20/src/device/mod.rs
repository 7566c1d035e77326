//! TTS20 text-to-speech module driver.
//!
//! The driver is split the way the module's register map is:
//!
//! - **Segmented transmit**: command frames are pushed into the module's
//!   transmit buffer in chunks sized by the free space it advertises, then the
//!   driver waits for the buffer to drain.
//! - **Ring receive**: status bytes are pulled from the module's receive ring
//!   buffer by reading its read/write pointers, reading the contiguous run and
//!   writing the advanced read pointer back.
//! - **Commands**: init, play, stop, pause, resume and the busy poll, each
//!   framed as clear-receive, send, read one status byte.

pub mod registers;
mod tts20;

pub use self::tts20::{segment_len, DeviceName, FirmwareVersion, Response, Tts20};

#[cfg(test)]
pub(crate) mod sim;
