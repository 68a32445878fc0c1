use std::time::Duration;

use super::error::InvalidArgument;

/// Integration timing of the ADCs, bits 1-0 of the timing register.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TimingMode {
    /// 13.7 ms
    Fast,
    /// 101 ms
    Medium,
    /// 402 ms, the power-on default.
    #[default]
    Slow,
    /// Integration runs while the manual start bit is set.
    Manual,
}

impl TimingMode {
    pub const fn code(self) -> u8 {
        match self {
            TimingMode::Fast => 0b00,
            TimingMode::Medium => 0b01,
            TimingMode::Slow => 0b10,
            TimingMode::Manual => 0b11,
        }
    }

    /// Nominal integration period. `None` for manual timing, where the host
    /// decides how long to integrate.
    pub fn integration_time(self) -> Option<Duration> {
        match self {
            TimingMode::Fast => Some(Duration::from_micros(13_700)),
            TimingMode::Medium => Some(Duration::from_millis(101)),
            TimingMode::Slow => Some(Duration::from_millis(402)),
            TimingMode::Manual => None,
        }
    }
}

impl TryFrom<u8> for TimingMode {
    type Error = InvalidArgument;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0b00 => Ok(TimingMode::Fast),
            0b01 => Ok(TimingMode::Medium),
            0b10 => Ok(TimingMode::Slow),
            0b11 => Ok(TimingMode::Manual),
            _ => Err(InvalidArgument("timing code must be in 0..=3")),
        }
    }
}

/// Data byte for the timing register.
pub fn encode_timing_gain(timing: TimingMode, gain: bool, manual_start: bool) -> u8 {
    (u8::from(gain) << 4) | (u8::from(manual_start) << 3) | timing.code()
}

/// Part and revision number from the ID register.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DeviceId {
    pub part_number: u8,
    pub revision_number: u8,
}

impl DeviceId {
    pub fn from_register(value: u8) -> Self {
        DeviceId {
            part_number: value >> 4,
            revision_number: value & 0x0F,
        }
    }
}

/// ADC counts of the broadband (channel 0) and infrared (channel 1) photodiodes.
///
/// Counts are 16 bit on the wire but widened here since readings taken
/// without gain get scaled up by 16.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ChannelPair {
    pub channel0: u32,
    pub channel1: u32,
}

impl ChannelPair {
    pub fn from_registers(low0: u8, high0: u8, low1: u8, high1: u8) -> Self {
        ChannelPair {
            channel0: u32::from(high0) * 256 + u32::from(low0),
            channel1: u32::from(high1) * 256 + u32::from(low1),
        }
    }

    /// Brings a reading taken at 1x gain onto the 16x scale.
    pub(crate) fn without_gain(self) -> Self {
        ChannelPair {
            channel0: self.channel0 << 4,
            channel1: self.channel1 << 4,
        }
    }
}

/// Approximates illuminance in lux from a pair of channel counts using the
/// piecewise curve from the TSL2561 datasheet.
///
/// Returns 0 for no light (channel 0 is zero) and when the infrared share is
/// above the range the curve covers. The result is not clamped.
pub fn calculate_lux(channels: ChannelPair) -> f64 {
    if channels.channel0 == 0 {
        return 0.0;
    }
    let ch0 = f64::from(channels.channel0);
    let ch1 = f64::from(channels.channel1);
    let ratio = ch1 / ch0;

    if ratio <= 0.0 {
        0.0
    } else if ratio <= 0.5 {
        0.0304 * ch0 - 0.062 * ch0 * ratio.powf(1.4)
    } else if ratio <= 0.61 {
        0.0224 * ch0 - 0.031 * ch1
    } else if ratio <= 0.8 {
        0.0128 * ch0 - 0.0153 * ch1
    } else if ratio <= 1.3 {
        0.00146 * ch0 - 0.00112 * ch1
    } else {
        0.0
    }
}
