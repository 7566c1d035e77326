//! Receive ring-buffer reads.
//!
//! Each pass reads the read/write pointer pair, pulls the contiguous run that
//! starts at the read pointer and hands the consumed space back to the module
//! by writing the advanced read pointer.

use embedded_hal::i2c::I2c;

use super::Tts20;
use crate::clock::{Clock, Deadline};
use crate::device::registers as reg;
use crate::error::Error;
use crate::ring;

impl<I2C, C> Tts20<I2C, C>
where
    I2C: I2c,
    C: Clock,
{
    /// Fill `buf` from the module's receive ring buffer within `timeout_ms`.
    ///
    /// Returns the number of bytes obtained. A short count means the deadline
    /// passed first. With an unknown (zero) ring capacity nothing is read.
    pub(crate) fn read_ring(
        &mut self,
        buf: &mut [u8],
        timeout_ms: u32,
    ) -> Result<usize, Error<I2C::Error>> {
        let capacity = self.rx_capacity;
        if capacity == 0 || buf.is_empty() {
            return Ok(0);
        }

        let mut filled = 0;
        let deadline = Deadline::start(&mut self.clock, timeout_ms);
        while filled < buf.len() && !deadline.expired(&mut self.clock) {
            let mut cursors = [0u8; 2];
            self.read_registers(reg::RX_BUFFER_READ_PTR, &mut cursors)?;
            let [read_ptr, write_ptr] = cursors;

            let run = ring::contiguous_run(read_ptr, write_ptr, capacity, buf.len() - filled);
            if run == 0 {
                continue;
            }

            let data_register = reg::RX_BUFFER_DATA.wrapping_add(read_ptr);
            self.read_registers(data_register, &mut buf[filled..filled + run])?;
            filled += run;

            let next = ring::advance(read_ptr, run, capacity);
            self.write_register(reg::RX_BUFFER_READ_PTR, next)?;
            trace!("tts20: rx {=usize} bytes, read ptr {=u8}", run, next);
        }
        Ok(filled)
    }
}
