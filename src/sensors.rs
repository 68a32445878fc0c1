mod bus;
mod error;
mod lux;
mod trait_def;
mod tsl2561;

#[cfg(test)]
mod testing;

pub use bus::Bus;
pub use error::{Error, ErrorKind, InvalidArgument};
pub use lux::{calculate_lux, encode_timing_gain, ChannelPair, DeviceId, TimingMode};
pub use trait_def::{Measurement, Sensor};
pub use tsl2561::{Config, Tsl2561, DEFAULT_ADDRESS};
