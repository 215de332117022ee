//! Sensor acquisition with fault degradation
//!
//! Reads the sensor, validates the values against the DHT22's physical
//! range and keeps a count of consecutive failures. A failure never escapes
//! as an error: it degrades to [`SensorReading::invalid`] so that a flaky
//! sensor cannot stall the uplink cadence.

use crate::config::sensor::{
    HUMIDITY_MAX_PCT, HUMIDITY_MIN_PCT, REINIT_THRESHOLD, TEMPERATURE_MAX_C, TEMPERATURE_MIN_C,
};
use crate::payload::SensorReading;
use crate::sensor::traits::HumiditySensor;

/// Why a sample was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorFault {
    /// The driver returned NaN (bus or checksum failure)
    NoResponse,
    /// The values lie outside the sensor's physical range
    OutOfRange,
}

/// Wraps a sensor driver and tracks consecutive failures
pub struct SensorAcquisition<S> {
    sensor: S,
    consecutive_errors: u32,
}

impl<S: HumiditySensor> SensorAcquisition<S> {
    pub fn new(sensor: S) -> Self {
        Self {
            sensor,
            consecutive_errors: 0,
        }
    }

    /// Acquire one reading.
    ///
    /// Valid samples reset the failure count. Each rejected sample increments
    /// it, and once it exceeds [`REINIT_THRESHOLD`] the driver is
    /// re-initialised and the count starts over, whatever the cause.
    pub async fn acquire(&mut self) -> SensorReading {
        let temperature = self.sensor.read_temperature_c().await;
        let humidity = self.sensor.read_humidity_pct().await;

        match Self::validate(temperature, humidity) {
            Ok(reading) => {
                self.consecutive_errors = 0;
                log::info!(
                    "DHT22: {:.1} C, {:.1} % RH",
                    reading.temperature_c,
                    reading.humidity_pct
                );
                reading
            }
            Err(fault) => {
                self.consecutive_errors += 1;
                match fault {
                    SensorFault::NoResponse => log::warn!(
                        "DHT22: read failed ({} consecutive)",
                        self.consecutive_errors
                    ),
                    SensorFault::OutOfRange => log::warn!(
                        "DHT22: out of range (T: {:.1} C, H: {:.1} %, {} consecutive)",
                        temperature,
                        humidity,
                        self.consecutive_errors
                    ),
                }

                if self.consecutive_errors > REINIT_THRESHOLD {
                    log::warn!("DHT22: re-initialising driver");
                    self.sensor.reinitialise().await;
                    self.consecutive_errors = 0;
                }

                SensorReading::invalid()
            }
        }
    }

    /// Probe the sensor once without affecting the failure count.
    ///
    /// Returns true if the sensor answered with a plausible sample.
    pub async fn self_test(&mut self) -> bool {
        let temperature = self.sensor.read_temperature_c().await;
        let humidity = self.sensor.read_humidity_pct().await;

        match Self::validate(temperature, humidity) {
            Ok(reading) => {
                log::info!(
                    "DHT22: responding ({:.1} C, {:.1} % RH)",
                    reading.temperature_c,
                    reading.humidity_pct
                );
                true
            }
            Err(_) => {
                log::warn!("DHT22: no valid response to initial read");
                false
            }
        }
    }

    /// Current run of consecutive failures
    pub fn consecutive_errors(&self) -> u32 {
        self.consecutive_errors
    }

    /// Access the underlying driver
    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    fn validate(temperature: f32, humidity: f32) -> Result<SensorReading, SensorFault> {
        if temperature.is_nan() || humidity.is_nan() {
            return Err(SensorFault::NoResponse);
        }

        let temperature_ok = (TEMPERATURE_MIN_C..=TEMPERATURE_MAX_C).contains(&temperature);
        let humidity_ok = (HUMIDITY_MIN_PCT..=HUMIDITY_MAX_PCT).contains(&humidity);
        if !temperature_ok || !humidity_ok {
            return Err(SensorFault::OutOfRange);
        }

        Ok(SensorReading::new(temperature, humidity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::traits::mock::MockSensor;

    #[test]
    fn test_valid_reading() {
        let mut acquisition = SensorAcquisition::new(MockSensor::new(21.5, 48.0));

        let reading = futures::executor::block_on(acquisition.acquire());

        assert!(reading.valid);
        assert_eq!(reading.temperature_c, 21.5);
        assert_eq!(reading.humidity_pct, 48.0);
        assert_eq!(acquisition.consecutive_errors(), 0);
    }

    #[test]
    fn test_nan_degrades_to_invalid() {
        let mut acquisition = SensorAcquisition::new(MockSensor::failing());

        let reading = futures::executor::block_on(acquisition.acquire());

        assert_eq!(reading, SensorReading::invalid());
        assert_eq!(acquisition.consecutive_errors(), 1);
    }

    #[test]
    fn test_out_of_range_degrades_to_invalid() {
        let sensor = MockSensor::new(22.0, 40.0);
        sensor.queue_sample(85.0, 40.0);
        sensor.queue_sample(22.0, 101.0);
        let mut acquisition = SensorAcquisition::new(sensor);

        futures::executor::block_on(async {
            assert!(!acquisition.acquire().await.valid);
            assert!(!acquisition.acquire().await.valid);
        });

        assert_eq!(acquisition.consecutive_errors(), 2);
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let sensor = MockSensor::new(80.0, 100.0);
        sensor.queue_sample(-40.0, 0.0);
        let mut acquisition = SensorAcquisition::new(sensor);

        futures::executor::block_on(async {
            assert!(acquisition.acquire().await.valid);
            assert!(acquisition.acquire().await.valid);
        });
    }

    #[test]
    fn test_valid_reading_resets_counter() {
        let sensor = MockSensor::new(20.0, 50.0);
        sensor.queue_sample(f32::NAN, f32::NAN);
        sensor.queue_sample(f32::NAN, f32::NAN);
        sensor.queue_sample(f32::NAN, f32::NAN);
        let mut acquisition = SensorAcquisition::new(sensor);

        futures::executor::block_on(async {
            for _ in 0..3 {
                acquisition.acquire().await;
            }
            assert_eq!(acquisition.consecutive_errors(), 3);

            assert!(acquisition.acquire().await.valid);
        });

        assert_eq!(acquisition.consecutive_errors(), 0);
    }

    #[test]
    fn test_reinit_after_sixth_failure() {
        let mut acquisition = SensorAcquisition::new(MockSensor::failing());

        futures::executor::block_on(async {
            for expected in 1..=5 {
                acquisition.acquire().await;
                assert_eq!(acquisition.consecutive_errors(), expected);
                assert_eq!(acquisition.sensor().reinit_count(), 0);
            }

            // Sixth consecutive failure crosses the threshold
            acquisition.acquire().await;
        });

        assert_eq!(acquisition.sensor().reinit_count(), 1);
        assert_eq!(acquisition.consecutive_errors(), 0);
    }

    #[test]
    fn test_reinit_applies_to_out_of_range_failures() {
        let mut acquisition = SensorAcquisition::new(MockSensor::new(-55.0, 30.0));

        futures::executor::block_on(async {
            for _ in 0..6 {
                acquisition.acquire().await;
            }
        });

        assert_eq!(acquisition.sensor().reinit_count(), 1);
        assert_eq!(acquisition.consecutive_errors(), 0);
    }

    #[test]
    fn test_self_test_leaves_counter_alone() {
        let mut acquisition = SensorAcquisition::new(MockSensor::failing());

        let responding = futures::executor::block_on(acquisition.self_test());

        assert!(!responding);
        assert_eq!(acquisition.consecutive_errors(), 0);
    }
}
