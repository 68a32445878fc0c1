use std::collections::VecDeque;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{self, ErrorType, I2c, NoAcknowledgeSource, Operation};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum FakeError {
    NoAcknowledge,
    /// Read with nothing left in the queue.
    Exhausted,
    Injected,
}

impl i2c::Error for FakeError {
    fn kind(&self) -> i2c::ErrorKind {
        match self {
            FakeError::NoAcknowledge => {
                i2c::ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)
            }
            FakeError::Exhausted | FakeError::Injected => i2c::ErrorKind::Other,
        }
    }
}

/// Scripted I2C bus: records what gets written and replays queued bytes on reads.
#[derive(Debug)]
pub(crate) struct FakeI2c {
    present: bool,
    reads: VecDeque<u8>,
    /// Non-empty writes in order.
    pub writes: Vec<Vec<u8>>,
    /// Zero-length writes, i.e. presence probes.
    pub probes: usize,
    /// Target address of every transaction.
    pub addresses: Vec<u8>,
    pub fail_writes: bool,
}

impl FakeI2c {
    pub fn new() -> Self {
        FakeI2c {
            present: true,
            reads: VecDeque::new(),
            writes: Vec::new(),
            probes: 0,
            addresses: Vec::new(),
            fail_writes: false,
        }
    }

    /// Nothing acknowledges.
    pub fn absent() -> Self {
        FakeI2c {
            present: false,
            ..FakeI2c::new()
        }
    }

    pub fn queue_reads(&mut self, bytes: &[u8]) {
        self.reads.extend(bytes);
    }

    pub fn pending_reads(&self) -> usize {
        self.reads.len()
    }
}

impl ErrorType for FakeI2c {
    type Error = FakeError;
}

impl I2c for FakeI2c {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.addresses.push(address);
        if !self.present {
            return Err(FakeError::NoAcknowledge);
        }
        for operation in operations.iter_mut() {
            match operation {
                Operation::Write(bytes) if bytes.is_empty() => self.probes += 1,
                Operation::Write(bytes) => {
                    if self.fail_writes {
                        return Err(FakeError::Injected);
                    }
                    self.writes.push(bytes.to_vec());
                }
                Operation::Read(buffer) => {
                    for byte in buffer.iter_mut() {
                        *byte = self.reads.pop_front().ok_or(FakeError::Exhausted)?;
                    }
                }
            }
        }
        Ok(())
    }
}

/// Adds up requested delays instead of sleeping.
#[derive(Debug, Default)]
pub(crate) struct FakeDelay {
    pub total_ns: u64,
}

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}
