//! # tts20
//!
//! A `no_std`, allocation-free driver for the TTS20 text-to-speech module,
//! talking to the module over I²C through any [`embedded_hal::i2c::I2c`]
//! implementation.
//!
//! The module exposes two byte queues behind its register map: a transmit
//! buffer that accepts command frames (text to synthesize, playback control)
//! and a receive ring buffer that carries one-byte status responses. The
//! driver layers a flow-controlled transfer protocol over plain register
//! reads and writes so that arbitrarily long text can be pushed through a
//! small bus transaction buffer.
//!
//! ## Architecture
//!
//! | Layer | Module | Purpose |
//! |-------|--------|---------|
//! | Time | [`clock`] | Injected millisecond [`Clock`] for deadlines |
//! | Config | [`config`] | Timeouts and bus buffer size ([`Config`]) |
//! | Arithmetic | [`ring`] | Receive ring-buffer cursor math |
//! | Device | [`device`] | Register map, segmented transmit, ring receive, commands |
//! | Trait | [`control`] | [`SpeechControl`] playback surface |
//! | Errors | [`error`] | Fatal error tier ([`Error`]) |
//!
//! ## Quick start
//!
//! ```ignore
//! use tts20::Tts20;
//!
//! let mut tts = Tts20::new(i2c, || millis());
//! tts.init()?;
//!
//! if tts.play("Hello world")? {
//!     while tts.is_busy()? {}
//! }
//! ```
//!
//! ## Failure tiers
//!
//! - A bus error, a missing init acknowledgement or a violated precondition is
//!   returned as `Err(`[`Error`]`)`. The module state is unknown afterwards.
//! - A missing or unexpected response byte is reported as `Ok(false)`; the
//!   caller decides whether to retry.
//!
//! ## Features
//!
//! | Feature | Default | Enables |
//! |---------|---------|---------|
//! | `defmt` | no | Protocol tracing and `defmt::Format` derives |

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod clock;
pub mod config;
pub mod constants;
pub mod control;
pub mod device;
pub mod error;
pub mod ring;

pub use clock::Clock;
pub use config::{Config, ConfigError};
pub use control::SpeechControl;
pub use device::{segment_len, DeviceName, FirmwareVersion, Response, Tts20};
pub use error::{Error, Stage};

/// Version of this driver crate, `major.minor.patch`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
