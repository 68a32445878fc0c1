use embedded_hal::delay::DelayNs;

#[derive(Debug)]
pub struct Measurement {
    pub name: String,
    pub value: f32,
}

/// One complete measurement cycle on a sensor living on bus handle `B`.
pub trait Sensor<B> {
    /// Wakes the sensor, waits for a result, reads it and puts the sensor
    /// back to sleep. Failures are logged and yield no measurements.
    fn measure<D: DelayNs>(&mut self, delay: &mut D) -> Vec<Measurement>;

    fn get_sensor(bus: B) -> anyhow::Result<Self>
    where
        Self: Sized;
}
