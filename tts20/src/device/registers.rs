//! TTS20 register addresses, status codes and command frames.
//!
//! Register addresses are 8-bit; every register holds one byte and
//! multi-byte reads auto-increment. Command frames are written into the
//! transmit buffer and all share the layout
//! `0xFD, len_hi, len_lo, command...` where the big-endian length counts the
//! bytes after it.

// ── Identification ─────────────────────────────────────────────────────────

/// Device id (read-only).
pub const DEVICE_ID: u8 = 0x00;

/// Firmware version, three consecutive bytes: major, minor, patch.
pub const FIRMWARE_VERSION: u8 = 0x01;

/// Device name, eight consecutive ASCII bytes.
pub const NAME: u8 = 0x04;

// ── Control ────────────────────────────────────────────────────────────────

/// Command register (write-only).
/// - Bit 0: CLEAR_RX_BUFFER (move the read pointer onto the write pointer)
pub const COMMAND: u8 = 0x10;

/// COMMAND bit: discard everything pending in the receive ring buffer.
pub const COMMAND_CLEAR_RX_BUFFER: u8 = 1 << 0;

// ── Transmit buffer ────────────────────────────────────────────────────────

/// Free space in the transmit buffer, in bytes (read-only).
pub const TX_BUFFER_FREE_SPACE: u8 = 0x11;

/// Non-zero once the module has consumed everything in its transmit buffer.
pub const TX_BUFFER_IS_EMPTY: u8 = 0x12;

/// Transmit buffer data port (burst write).
pub const TX_BUFFER: u8 = 0x13;

// ── Receive ring buffer ────────────────────────────────────────────────────

/// Receive ring buffer size in bytes (read-only).
pub const RX_BUFFER_CAPACITY: u8 = 0x53;

/// Receive read pointer (read/write). The write pointer follows at
/// [`RX_BUFFER_WRITE_PTR`], so a 2-byte read returns both.
pub const RX_BUFFER_READ_PTR: u8 = 0x54;

/// Receive write pointer (read-only, owned by the module).
pub const RX_BUFFER_WRITE_PTR: u8 = 0x55;

/// First byte of the receive data region, addressed as `RX_BUFFER_DATA + index`.
pub const RX_BUFFER_DATA: u8 = 0x56;

// ── Status codes ───────────────────────────────────────────────────────────

/// Command accepted.
pub const RESPONSE_SUCCESS: u8 = 0x41;

/// Module is synthesizing or playing.
pub const RESPONSE_BUSY: u8 = 0x4E;

/// Module is idle.
pub const RESPONSE_IDLE: u8 = 0x4F;

// ── Command frames ─────────────────────────────────────────────────────────

/// Frame start marker.
pub const FRAME_HEADER: u8 = 0xFD;

/// Synthesize-text command followed by the text encoding byte.
pub const CMD_SYNTHESIZE: [u8; 2] = [0x01, 0x04];

/// Initialization: synthesize `[v5][s5][t5][m0]`, which sets volume, speed
/// and tone to mid-scale and selects the default voice.
pub const INIT_FRAME: [u8; 21] = [
    0xFD, 0x00, 0x12, 0x01, 0x04, 0x5B, 0x76, 0x35, 0x5D, 0x5B, 0x73, 0x35, 0x5D, 0x5B, 0x74,
    0x35, 0x5D, 0x5B, 0x6D, 0x30, 0x5D,
];

/// Status query, answered with [`RESPONSE_BUSY`] or [`RESPONSE_IDLE`].
pub const QUERY_STATUS_FRAME: [u8; 4] = [0xFD, 0x00, 0x01, 0x21];

/// Stop playback.
pub const STOP_FRAME: [u8; 4] = [0xFD, 0x00, 0x01, 0x02];

/// Pause playback.
pub const PAUSE_FRAME: [u8; 4] = [0xFD, 0x00, 0x01, 0x03];

/// Resume playback.
pub const RESUME_FRAME: [u8; 4] = [0xFD, 0x00, 0x01, 0x04];

/// Header of a synthesize frame carrying `text_len` bytes of text.
///
/// The caller guarantees `text_len <= MAX_TEXT_LEN`.
pub const fn synthesize_header(text_len: usize) -> [u8; 5] {
    let len = (text_len + CMD_SYNTHESIZE.len()) as u16;
    [
        FRAME_HEADER,
        (len >> 8) as u8,
        len as u8,
        CMD_SYNTHESIZE[0],
        CMD_SYNTHESIZE[1],
    ]
}
