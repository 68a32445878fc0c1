//! Blocking driver for the TAOS (now ams) TSL2561 luminosity sensor.
//!
//! The driver talks to the sensor through anything implementing [`Bus`], which
//! every [`embedded_hal::i2c::I2c`] implementation does. It does not own the
//! physical bus: pass a `&mut` reference or a shared-bus device from
//! `embedded-hal-bus` when other devices live on the same wires.
//!
//! ```ignore
//! let mut sensor = Tsl2561::new_default(&mut i2c)?;
//! sensor.set_power_up(true)?;
//! sensor.set_timing_gain(TimingMode::Medium, true, false)?;
//! // wait at least one integration period
//! let lux = sensor.get_luminosity()?;
//! ```
//!
//! Not supported: interrupts and thresholds.

pub mod sensors;

pub use sensors::{
    calculate_lux, encode_timing_gain, Bus, ChannelPair, Config, DeviceId, Error, ErrorKind,
    InvalidArgument, Measurement, Sensor, TimingMode, Tsl2561, DEFAULT_ADDRESS,
};
