//! Register-level simulation of a TTS20 module, for tests.
//!
//! Grown from a plain register-file mock: the transmit side accepts bursts
//! against a scripted free-space sequence and splits the byte stream into
//! frames, the receive side is a real ring buffer whose pointers the driver
//! must negotiate. Every bus access is recorded as an [`Event`].

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::i2c::{self, ErrorType, I2c, NoAcknowledgeSource, Operation};

use super::registers as reg;
use crate::clock::Clock;
use crate::constants::DEFAULT_I2C_ADDRESS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SimError;

impl i2c::Error for SimError {
    fn kind(&self) -> i2c::ErrorKind {
        i2c::ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data)
    }
}

/// One observable bus access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Event {
    ClearRx,
    FreeSpaceQuery(u8),
    TxBurst(Vec<u8>),
    DrainQuery(u8),
    CapacityRead,
    CursorRead { read: u8, write: u8 },
    DataRead { index: u8, len: usize },
    ReadPtrWrite(u8),
    InfoRead { register: u8, len: usize },
}

pub(crate) struct SimTts20 {
    pub address: u8,
    pub device_id: u8,
    pub version: [u8; 3],
    pub name: [u8; 8],
    pub capacity: u8,
    pub ring: [u8; 256],
    pub read_ptr: u8,
    pub write_ptr: u8,
    /// Scripted free-space readings; `default_free_space` once exhausted.
    pub free_space: VecDeque<u8>,
    pub default_free_space: u8,
    /// Scripted drain-flag readings; empty (1) once exhausted.
    pub drain: VecDeque<u8>,
    /// Reply pushed into the ring for each complete frame, in order;
    /// `default_reply` once exhausted. `None` means stay silent.
    pub replies: VecDeque<Option<u8>>,
    pub default_reply: Option<u8>,
    /// Any access to this register is NACKed.
    pub nack_register: Option<u8>,
    pub frames: Vec<Vec<u8>>,
    pub events: Vec<Event>,
    pending: Vec<u8>,
    last_free_space: u8,
}

impl SimTts20 {
    pub fn new() -> Self {
        Self {
            address: DEFAULT_I2C_ADDRESS,
            device_id: 0x20,
            version: [1, 2, 3],
            name: *b"TTS20\0\0\0",
            capacity: 64,
            ring: [0; 256],
            read_ptr: 0,
            write_ptr: 0,
            free_space: VecDeque::new(),
            default_free_space: 255,
            drain: VecDeque::new(),
            replies: VecDeque::new(),
            default_reply: None,
            nack_register: None,
            frames: Vec::new(),
            events: Vec::new(),
            pending: Vec::new(),
            last_free_space: 0,
        }
    }

    /// Replies for each frame, in order.
    pub fn with_replies(mut self, replies: &[Option<u8>]) -> Self {
        self.replies.extend(replies.iter().copied());
        self
    }

    /// Place `bytes` in the ring starting at `read_ptr`, wrapping as needed.
    pub fn preload_ring(&mut self, read_ptr: u8, bytes: &[u8]) {
        self.read_ptr = read_ptr;
        self.write_ptr = read_ptr;
        for &b in bytes {
            self.push_rx(b);
        }
    }

    pub fn push_rx(&mut self, byte: u8) {
        if self.capacity == 0 {
            return;
        }
        self.ring[self.write_ptr as usize] = byte;
        self.write_ptr = ((self.write_ptr as usize + 1) % self.capacity as usize) as u8;
    }

    pub fn bursts(&self) -> Vec<usize> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::TxBurst(bytes) => Some(bytes.len()),
                _ => None,
            })
            .collect()
    }

    /// All bytes that reached the transmit buffer, in order.
    pub fn transmitted(&self) -> Vec<u8> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::TxBurst(bytes) => Some(bytes.clone()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&Event) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    fn check_nack(&self, register: u8) -> Result<(), SimError> {
        if self.nack_register == Some(register) {
            Err(SimError)
        } else {
            Ok(())
        }
    }

    fn info_bytes(&self) -> [u8; 12] {
        let mut info = [0u8; 12];
        info[0] = self.device_id;
        info[1..4].copy_from_slice(&self.version);
        info[4..].copy_from_slice(&self.name);
        info
    }

    fn read_from(&mut self, register: u8, buf: &mut [u8]) {
        match register {
            reg::TX_BUFFER_FREE_SPACE => {
                let v = self.free_space.pop_front().unwrap_or(self.default_free_space);
                self.last_free_space = v;
                buf[0] = v;
                self.events.push(Event::FreeSpaceQuery(v));
            }
            reg::TX_BUFFER_IS_EMPTY => {
                let v = self.drain.pop_front().unwrap_or(1);
                buf[0] = v;
                self.events.push(Event::DrainQuery(v));
            }
            reg::RX_BUFFER_CAPACITY => {
                buf[0] = self.capacity;
                self.events.push(Event::CapacityRead);
            }
            reg::RX_BUFFER_READ_PTR => {
                buf[0] = self.read_ptr;
                if buf.len() > 1 {
                    buf[1] = self.write_ptr;
                }
                self.events.push(Event::CursorRead {
                    read: self.read_ptr,
                    write: self.write_ptr,
                });
            }
            r if r >= reg::RX_BUFFER_DATA => {
                let index = r - reg::RX_BUFFER_DATA;
                let start = index as usize;
                assert!(
                    start + buf.len() <= self.capacity as usize,
                    "burst read of {} bytes at {} crosses end of ring",
                    buf.len(),
                    index
                );
                buf.copy_from_slice(&self.ring[start..start + buf.len()]);
                self.events.push(Event::DataRead {
                    index,
                    len: buf.len(),
                });
            }
            r => {
                let info = self.info_bytes();
                for (i, b) in buf.iter_mut().enumerate() {
                    *b = info.get(r as usize + i).copied().unwrap_or(0);
                }
                self.events.push(Event::InfoRead {
                    register: r,
                    len: buf.len(),
                });
            }
        }
    }

    fn write_to(&mut self, register: u8, data: &[u8]) {
        match register {
            reg::COMMAND => {
                if data[0] & reg::COMMAND_CLEAR_RX_BUFFER != 0 {
                    self.read_ptr = self.write_ptr;
                    self.events.push(Event::ClearRx);
                }
            }
            reg::TX_BUFFER => {
                assert!(
                    data.len() <= self.last_free_space as usize,
                    "burst of {} bytes exceeds advertised free space {}",
                    data.len(),
                    self.last_free_space
                );
                self.last_free_space -= data.len() as u8;
                self.events.push(Event::TxBurst(data.to_vec()));
                self.pending.extend_from_slice(data);
                self.split_frames();
            }
            reg::RX_BUFFER_READ_PTR => {
                self.read_ptr = data[0];
                self.events.push(Event::ReadPtrWrite(data[0]));
            }
            _ => {}
        }
    }

    fn split_frames(&mut self) {
        while self.pending.len() >= 3 {
            let len = 3 + u16::from_be_bytes([self.pending[1], self.pending[2]]) as usize;
            if self.pending.len() < len {
                break;
            }
            let frame: Vec<u8> = self.pending.drain(..len).collect();
            self.frames.push(frame);
            if let Some(byte) = self.replies.pop_front().unwrap_or(self.default_reply) {
                self.push_rx(byte);
            }
        }
    }
}

impl ErrorType for SimTts20 {
    type Error = SimError;
}

impl I2c for SimTts20 {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if address != self.address {
            return Err(SimError);
        }
        let mut register = None;
        let mut written = Vec::new();
        for op in operations.iter_mut() {
            match op {
                Operation::Write(bytes) => {
                    for &b in bytes.iter() {
                        if register.is_none() {
                            register = Some(b);
                        } else {
                            written.push(b);
                        }
                    }
                }
                Operation::Read(buf) => {
                    let r = register.ok_or(SimError)?;
                    self.check_nack(r)?;
                    self.read_from(r, buf);
                }
            }
        }
        if let Some(r) = register {
            self.check_nack(r)?;
            if !written.is_empty() {
                self.write_to(r, &written);
            }
        }
        Ok(())
    }
}

/// Shared simulated millisecond counter; every reading advances it by `step`.
#[derive(Clone)]
pub(crate) struct SimClock {
    now: Rc<Cell<u32>>,
    step: u32,
}

impl SimClock {
    pub fn new(step: u32) -> Self {
        Self {
            now: Rc::new(Cell::new(0)),
            step,
        }
    }

    pub fn now(&self) -> u32 {
        self.now.get()
    }
}

impl Clock for SimClock {
    fn now_ms(&mut self) -> u32 {
        let t = self.now.get();
        self.now.set(t.wrapping_add(self.step));
        t
    }
}
