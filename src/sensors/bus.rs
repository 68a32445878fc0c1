use core::fmt::Debug;

use embedded_hal::i2c::I2c;

/// Byte-level transport the driver needs from the outside world.
///
/// Any [`I2c`] implementation is a `Bus`, so users normally never implement
/// this by hand.
pub trait Bus {
    type Error: Debug;

    /// Presence probe: true if a device acknowledges on `address`.
    fn is_ready(&mut self, address: u8) -> bool;

    fn send(&mut self, bytes: &[u8], address: u8) -> Result<(), Self::Error>;

    /// Fills all of `buffer` with bytes read from `address`.
    fn recv(&mut self, buffer: &mut [u8], address: u8) -> Result<(), Self::Error>;
}

impl<I: I2c> Bus for I {
    type Error = I::Error;

    fn is_ready(&mut self, address: u8) -> bool {
        // A zero-length write only puts the address on the wire.
        self.write(address, &[]).is_ok()
    }

    fn send(&mut self, bytes: &[u8], address: u8) -> Result<(), Self::Error> {
        self.write(address, bytes)
    }

    fn recv(&mut self, buffer: &mut [u8], address: u8) -> Result<(), Self::Error> {
        self.read(address, buffer)
    }
}
