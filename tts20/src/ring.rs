//! Receive ring-buffer cursor arithmetic.
//!
//! The module owns a circular receive buffer of `capacity` bytes and exposes
//! a read pointer and a write pointer, both in `[0, capacity)`. The driver
//! only ever writes the read pointer. Equal pointers mean empty, so at most
//! `capacity - 1` bytes are ever pending.
//!
//! The data region is addressed linearly (`base + read_ptr`), so a single
//! burst read must stop at the physical end of the buffer even when more
//! bytes are waiting after the wrap.
//!
//! Pointers outside `[0, capacity)` and a zero capacity are treated as an
//! empty buffer.

/// Whether both pointers are valid indices for `capacity`.
#[inline]
fn in_range(read_ptr: u8, write_ptr: u8, capacity: u8) -> bool {
    read_ptr < capacity && write_ptr < capacity
}

/// Number of bytes waiting: `(write_ptr - read_ptr + capacity) mod capacity`.
pub fn available(read_ptr: u8, write_ptr: u8, capacity: u8) -> u8 {
    if !in_range(read_ptr, write_ptr, capacity) {
        return 0;
    }
    let cap = capacity as u16;
    ((write_ptr as u16 + cap - read_ptr as u16) % cap) as u8
}

/// Length of the next burst read starting at `read_ptr`.
///
/// The smallest of what the caller still `wants`, what is [`available`], and
/// what is left before the end of the buffer.
pub fn contiguous_run(read_ptr: u8, write_ptr: u8, capacity: u8, wanted: usize) -> usize {
    let pending = available(read_ptr, write_ptr, capacity) as usize;
    if pending == 0 {
        return 0;
    }
    let to_end = (capacity - read_ptr) as usize;
    wanted.min(pending).min(to_end)
}

/// Read pointer after consuming `run` bytes from `read_ptr`.
pub fn advance(read_ptr: u8, run: usize, capacity: u8) -> u8 {
    if capacity == 0 {
        return read_ptr;
    }
    ((read_ptr as usize + run) % capacity as usize) as u8
}
