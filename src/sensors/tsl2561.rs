use anyhow::anyhow;
use embedded_hal::delay::DelayNs;
use log::{debug, error, info, trace, warn};

use super::bus::Bus;
use super::error::Error;
use super::lux::{calculate_lux, encode_timing_gain, ChannelPair, DeviceId, TimingMode};
use super::trait_def::{Measurement, Sensor};

/// Address with the ADDR SEL pin floating.
pub const DEFAULT_ADDRESS: u8 = 0x39;

// Command bytes: CMD bit (0x80) plus register address.
const CONTROL: u8 = 0x80;
const TIMING: u8 = 0x81;
const ID: u8 = 0x8A;
const DATA0_LOW: u8 = 0x8C;
const DATA0_HIGH: u8 = 0x8D;
const DATA1_LOW: u8 = 0x8E;
const DATA1_HIGH: u8 = 0x8F;

const POWER_ON: u8 = 0x03;
const POWER_OFF: u8 = 0x00;

/// Start-up settings for [`Tsl2561::with_config`].
///
/// The default matches the sensor's own power-on state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub address: u8,
    pub timing: TimingMode,
    pub gain: bool,
    pub manual_start: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            address: DEFAULT_ADDRESS,
            timing: TimingMode::Slow,
            gain: false,
            manual_start: true,
        }
    }
}

impl Config {
    pub fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    pub fn with_timing(mut self, timing: TimingMode) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_gain(mut self, gain: bool) -> Self {
        self.gain = gain;
        self
    }

    pub fn with_manual_start(mut self, manual_start: bool) -> Self {
        self.manual_start = manual_start;
        self
    }
}

/// TSL2561 on a bus handle `B`.
///
/// Gain and timing are cached because raw counts have to be scaled according
/// to the gain they were taken with. Callers sharing one instance across
/// threads must serialize access themselves; the four-register channel read
/// is not atomic.
pub struct Tsl2561<B> {
    bus: B,
    address: u8,
    gain_enabled: bool,
    timing_mode: TimingMode,
}

impl<B: Bus> Tsl2561<B> {
    /// Probes `address`, then powers the sensor up and back down to check
    /// that it answers. The sensor is left powered down.
    pub fn new(bus: B, address: u8) -> Result<Self, Error<B::Error>> {
        let mut sensor = Tsl2561 {
            bus,
            address,
            gain_enabled: false,
            timing_mode: TimingMode::Slow,
        };
        if !sensor.bus.is_ready(address) {
            return Err(Error::DeviceNotFound { address });
        }
        sensor.set_power_up(true)?;
        sensor.set_power_up(false)?;
        info!("TSL2561: found sensor on address {:#04x}", address);
        Ok(sensor)
    }

    pub fn new_default(bus: B) -> Result<Self, Error<B::Error>> {
        Self::new(bus, DEFAULT_ADDRESS)
    }

    /// Like [`Tsl2561::new`], then writes the timing and gain from `config`.
    pub fn with_config(bus: B, config: Config) -> Result<Self, Error<B::Error>> {
        let mut sensor = Self::new(bus, config.address)?;
        sensor.set_timing_gain(config.timing, config.gain, config.manual_start)?;
        Ok(sensor)
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn gain_enabled(&self) -> bool {
        self.gain_enabled
    }

    pub fn timing_mode(&self) -> TimingMode {
        self.timing_mode
    }

    /// Gives the bus handle back.
    pub fn release(self) -> B {
        self.bus
    }

    /// Switches the sensor on or off. Powering up is acknowledged by the
    /// sensor echoing the power bits, which doubles as a communication check.
    pub fn set_power_up(&mut self, enable: bool) -> Result<(), Error<B::Error>> {
        let value = if enable { POWER_ON } else { POWER_OFF };
        debug!("TSL2561: power {}", if enable { "up" } else { "down" });
        self.send(&[CONTROL, value])?;
        if enable {
            let readback = self.recv_byte()?;
            if readback != POWER_ON {
                return Err(Error::StartupFailed { readback });
            }
        }
        Ok(())
    }

    /// Sets integration timing and the 16x gain.
    ///
    /// `manual_start` starts (true) or stops (false) integration and only has
    /// an effect in [`TimingMode::Manual`]; it is written in every mode.
    pub fn set_timing_gain(
        &mut self,
        timing: TimingMode,
        gain: bool,
        manual_start: bool,
    ) -> Result<(), Error<B::Error>> {
        let value = encode_timing_gain(timing, gain, manual_start);
        debug!(
            "TSL2561: timing {:?}, gain {}, manual start {} ({:#04x})",
            timing, gain, manual_start, value
        );
        self.send(&[TIMING, value])?;
        self.gain_enabled = gain;
        self.timing_mode = timing;
        Ok(())
    }

    pub fn get_id(&mut self) -> Result<DeviceId, Error<B::Error>> {
        let value = self.read_register(ID)?;
        Ok(DeviceId::from_register(value))
    }

    /// Current illuminance in lux. See [`calculate_lux`] for the zero cases.
    pub fn get_luminosity(&mut self) -> Result<f64, Error<B::Error>> {
        let channels = self.read_raw_luminosity()?;
        let lux = calculate_lux(channels);
        debug!(
            "TSL2561: ch0 {}, ch1 {}, {} lx",
            channels.channel0, channels.channel1, lux
        );
        Ok(lux)
    }

    /// Both channels on the 16x gain scale.
    pub(crate) fn read_raw_luminosity(&mut self) -> Result<ChannelPair, Error<B::Error>> {
        let low0 = self.read_register(DATA0_LOW)?;
        let high0 = self.read_register(DATA0_HIGH)?;
        let low1 = self.read_register(DATA1_LOW)?;
        let high1 = self.read_register(DATA1_HIGH)?;

        let channels = ChannelPair::from_registers(low0, high0, low1, high1);
        if self.gain_enabled {
            Ok(channels)
        } else {
            Ok(channels.without_gain())
        }
    }

    fn read_register(&mut self, command: u8) -> Result<u8, Error<B::Error>> {
        self.send(&[command])?;
        let value = self.recv_byte()?;
        trace!("TSL2561: register {:#04x} = {:#04x}", command, value);
        Ok(value)
    }

    fn send(&mut self, bytes: &[u8]) -> Result<(), Error<B::Error>> {
        self.bus.send(bytes, self.address).map_err(Error::Bus)
    }

    fn recv_byte(&mut self) -> Result<u8, Error<B::Error>> {
        let mut buffer = [0u8; 1];
        self.bus
            .recv(&mut buffer, self.address)
            .map_err(Error::Bus)?;
        Ok(buffer[0])
    }
}

// Extra wait after the nominal integration period before reading the ADCs.
const SETTLE_MARGIN_US: u32 = 2_000;

impl<B: Bus> Sensor<B> for Tsl2561<B> {
    fn measure<D: DelayNs>(&mut self, delay: &mut D) -> Vec<Measurement> {
        let Some(integration) = self.timing_mode.integration_time() else {
            warn!("TSL2561: manual timing has no fixed integration period, not measuring");
            return vec![];
        };

        if let Err(e) = self.set_power_up(true) {
            error!("TSL2561: Failed to power up sensor: {:?}", e);
            return vec![];
        }
        delay.delay_us(integration.as_micros() as u32 + SETTLE_MARGIN_US);

        let lux = self.get_luminosity();

        if let Err(e) = self.set_power_up(false) {
            warn!("TSL2561: Failed to power down sensor: {:?}", e);
        }

        match lux {
            Ok(lux) => {
                info!("Lux: {} lx", lux);
                vec![Measurement {
                    name: "lux".to_string(),
                    value: lux as f32,
                }]
            }
            Err(e) => {
                error!("TSL2561: Failed to read luminosity: {:?}", e);
                vec![]
            }
        }
    }

    fn get_sensor(bus: B) -> anyhow::Result<Self> {
        info!("Initializing TSL2561 light sensor");
        let mut sensor = Tsl2561::new_default(bus)
            .map_err(|e| anyhow!("Failed to create TSL2561 sensor - check I2C connection: {e}"))?;
        let id = sensor
            .get_id()
            .map_err(|e| anyhow!("Failed to read TSL2561 id: {e}"))?;
        info!(
            "TSL2561 part {:#x}, revision {}",
            id.part_number, id.revision_number
        );
        Ok(sensor)
    }
}
