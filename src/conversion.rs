//! Conversion of raw SHT1x register values into physical units.
//!
//! Coefficients are the datasheet values for 14-bit temperature and 12-bit
//! humidity readings with a 5 V supply.

use libm::logf;

const D1: f32 = -39.66;
const D2: f32 = 0.01;

const C1: f32 = -2.0468;
const C2: f32 = 0.0367;
const C3: f32 = -0.000_001_595_5;

const T1: f32 = 0.01;
const T2: f32 = 0.000_08;

/// Bounds for the reported relative humidity.
const HUMIDITY_MIN: f32 = 0.1;
const HUMIDITY_MAX: f32 = 100.0;

/// Magnus coefficients `(Tn, m)` above and below freezing.
const MAGNUS_WATER: (f32, f32) = (243.12, 17.62);
const MAGNUS_ICE: (f32, f32) = (272.62, 22.46);

/// Reading returned by the SHT1x sensor.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reading {
    /// Temperature in degrees Celsius.
    pub temperature: f32,
    /// Relative humidity in percent, within `[0.1, 100.0]`.
    pub relative_humidity: f32,
    /// Dewpoint in degrees Celsius.
    pub dewpoint: f32,
}

impl Reading {
    /// Derives all three values from the raw temperature and humidity registers.
    pub fn from_raw(raw_temperature: u16, raw_humidity: u16) -> Self {
        let temperature = temperature(raw_temperature);
        let relative_humidity = humidity(raw_humidity, temperature);

        Reading {
            temperature,
            relative_humidity,
            dewpoint: dewpoint(temperature, relative_humidity),
        }
    }
}

/// Converts a raw temperature value to degrees Celsius.
pub fn temperature(raw: u16) -> f32 {
    D1 + D2 * raw as f32
}

/// Converts a raw humidity value to temperature compensated relative humidity.
///
/// The result is clamped to `[0.1, 100.0]` percent.
pub fn humidity(raw: u16, temperature: f32) -> f32 {
    let raw = raw as f32;
    let linear = C1 + C2 * raw + C3 * raw * raw;
    let compensated = (temperature - 25.0) * (T1 + T2 * raw) + linear;
    compensated.clamp(HUMIDITY_MIN, HUMIDITY_MAX)
}

/// Estimates the dewpoint from temperature (°C) and relative humidity (%).
pub fn dewpoint(temperature: f32, humidity: f32) -> f32 {
    let (tn, m) = if temperature < 0.0 {
        MAGNUS_ICE
    } else {
        MAGNUS_WATER
    };

    let ln_rh = logf(humidity / 100.0);
    let x = m * temperature / (tn + temperature);
    tn * (ln_rh + x) / (m - ln_rh - x)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f32, expected: f32, tolerance: f32) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_temperature() {
        assert_close(temperature(0x0434), -39.66 + 0.01 * 1076.0, 1e-4);
        assert_close(temperature(0x0434), -28.9, 1e-3);
        assert_close(temperature(0x190C), 24.46, 1e-3);
        assert_close(temperature(0), -39.66, 1e-6);
    }

    #[test]
    fn test_humidity_compensated() {
        assert_close(humidity(0x0931, 24.46), 75.3676, 0.01);
    }

    #[test]
    fn test_humidity_clamped() {
        for t in [-40.0, 25.0, 100.0] {
            assert_eq!(humidity(0, t), 0.1);
            assert_eq!(humidity(0xFFFF, t), 0.1);
        }
        assert_eq!(humidity(3500, 25.0), 100.0);
    }

    #[test]
    fn test_dewpoint_above_freezing() {
        assert_close(dewpoint(20.0, 50.0), 9.2552, 0.01);
    }

    #[test]
    fn test_dewpoint_below_freezing() {
        // Ice coefficients, not 243.12/17.62 (which would give -13.83)
        assert_close(dewpoint(-5.0, 50.0), -12.8693, 0.01);
    }

    #[test]
    fn test_dewpoint_switch_at_zero() {
        // 0 °C still uses the water coefficients
        assert_close(dewpoint(0.0, 50.0), -9.2020, 0.01);
        assert_close(dewpoint(-0.001, 50.0), -8.1625, 0.01);
    }

    #[test]
    fn test_reading_from_raw() {
        let reading = Reading::from_raw(0x190C, 0x0931);

        assert_close(reading.temperature, 24.46, 1e-3);
        assert_close(reading.relative_humidity, 75.3676, 0.01);
        assert_close(reading.dewpoint, 19.8154, 0.02);
    }
}
