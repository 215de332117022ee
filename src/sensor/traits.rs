//! Humidity sensor trait for abstraction and testability
//!
//! This trait defines the interface to the temperature/humidity driver,
//! allowing the DHT22 driver to be swapped with a mock for testing.

use core::future::Future;

/// Abstract temperature/humidity sensor
///
/// Reads never return an error: a failed bus transaction yields `f32::NAN`,
/// matching the behaviour of common DHT drivers.
pub trait HumiditySensor {
    /// Read the temperature in °C, or NaN on failure
    fn read_temperature_c(&mut self) -> impl Future<Output = f32>;

    /// Read the relative humidity in %, or NaN on failure
    fn read_humidity_pct(&mut self) -> impl Future<Output = f32>;

    /// Re-run the driver's initialisation sequence
    fn reinitialise(&mut self) -> impl Future<Output = ()>;
}
