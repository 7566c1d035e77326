//! Segmented, flow-controlled transmit.
//!
//! The module's transmit buffer is usually smaller than a play frame and the
//! controller's I2C buffer smaller still, so a frame goes out as a series of
//! bursts. Before each burst the driver asks how much space is free; a zero
//! reading is ordinary backpressure and is simply polled again.

use embedded_hal::i2c::{I2c, Operation};

use super::Tts20;
use crate::clock::{Clock, Deadline};
use crate::device::registers as reg;
use crate::error::{Error, Stage};

/// Payload bytes to put in the next burst.
///
/// `min(free_space, wire_capacity - 1, remaining)`: the register address
/// takes one byte of the controller's transaction buffer.
pub fn segment_len(free_space: u8, wire_capacity: u8, remaining: usize) -> usize {
    let per_transaction = wire_capacity.saturating_sub(1);
    (free_space.min(per_transaction) as usize).min(remaining)
}

impl<I2C, C> Tts20<I2C, C>
where
    I2C: I2c,
    C: Clock,
{
    /// Push `data` into the module's transmit buffer and wait until the module
    /// has consumed all of it.
    pub(crate) fn write_segmented(&mut self, data: &[u8]) -> Result<(), Error<I2C::Error>> {
        if data.is_empty() {
            return Err(Error::EmptyPayload);
        }

        let mut offset = 0;
        let mut stall = Deadline::optional(&mut self.clock, self.config.tx_stall_timeout_ms);
        while offset < data.len() {
            let free = self.read_register(reg::TX_BUFFER_FREE_SPACE)?;
            let len = segment_len(free, self.config.wire_capacity, data.len() - offset);
            if len == 0 {
                if stall.is_some_and(|d| d.expired(&mut self.clock)) {
                    return Err(Error::Timeout(Stage::TxFreeSpace));
                }
                continue;
            }

            let chunk = &data[offset..offset + len];
            self.i2c
                .transaction(
                    self.address,
                    &mut [Operation::Write(&[reg::TX_BUFFER]), Operation::Write(chunk)],
                )
                .map_err(Error::Bus)?;
            offset += len;
            trace!("tts20: sent {=usize}/{=usize} bytes", offset, data.len());

            stall = Deadline::optional(&mut self.clock, self.config.tx_stall_timeout_ms);
        }

        self.wait_tx_drained()
    }

    /// Poll the transmit-empty flag until it reads non-zero.
    fn wait_tx_drained(&mut self) -> Result<(), Error<I2C::Error>> {
        let deadline = Deadline::optional(&mut self.clock, self.config.tx_drain_timeout_ms);
        while self.read_register(reg::TX_BUFFER_IS_EMPTY)? == 0 {
            if deadline.is_some_and(|d| d.expired(&mut self.clock)) {
                return Err(Error::Timeout(Stage::TxDrain));
            }
        }
        Ok(())
    }
}
