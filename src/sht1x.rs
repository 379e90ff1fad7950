use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
};

use crate::{conversion::Reading, crc::Crc8, error::Sht1xError};

/// Command that soft-resets the sensor's interface and status register.
const CMD_SOFT_RESET: u8 = 0x1E;

/// Clock pulses used to flush any transaction the sensor is stuck in.
const RESET_CLOCK_PULSES: u8 = 9;

/// Delay (in microseconds) after every clock or data transition.
const BIT_DELAY_US: u32 = 2;

/// Time (in milliseconds) for the bus to settle after power-up.
const STARTUP_DELAY_MS: u32 = 20;

/// Interval (in milliseconds) between two samples of DATA while measuring.
const POLL_INTERVAL_MS: u32 = 5;

/// Number of DATA samples before a measurement is considered timed out.
///
/// 62 * 5 ms = 310 ms, comfortably above the 210 ms worst-case
/// conversion time of a 14-bit measurement.
const POLL_ATTEMPTS: u8 = 62;

/// Quantity to measure, with its command byte as discriminant.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum MeasurementKind {
    /// Temperature measurement (command `0x03`).
    Temperature = 0x03,
    /// Relative humidity measurement (command `0x05`).
    Humidity = 0x05,
}

impl MeasurementKind {
    /// Command byte that triggers this measurement.
    pub const fn command(self) -> u8 {
        self as u8
    }
}

/// Unconverted register values of both channels.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawReading {
    /// Raw 14-bit temperature register value.
    pub temperature: u16,
    /// Raw 12-bit relative humidity register value.
    pub humidity: u16,
}

impl From<RawReading> for Reading {
    fn from(raw: RawReading) -> Self {
        Reading::from_raw(raw.temperature, raw.humidity)
    }
}

/// Driver for the SHT1x temperature and humidity sensor.
///
/// The driver owns both bus lines and the running checksum, so a
/// transaction can never be interleaved with another one.
pub struct Sht1x<SCK, DATA, D> {
    sck: SCK,
    data: DATA,
    delay: D,
    crc: Crc8,
}

impl<SCK, DATA, DELAY, E> Sht1x<SCK, DATA, DELAY>
where
    SCK: OutputPin<Error = E>,
    DATA: InputPin<Error = E> + OutputPin<Error = E>,
    DELAY: DelayNs,
{
    /// Creates a new instance of the SHT1x driver.
    ///
    /// No pin is touched until [`Sht1x::init`] is called.
    ///
    /// # Arguments
    ///
    /// * `sck` - The GPIO pin connected to the sensor's clock line.
    /// * `data` - The GPIO pin connected to the DATA line. Must support both input and output,
    ///   with a high output releasing the line (open drain).
    /// * `delay` - A delay provider implementing the `DelayNs` trait.
    pub fn new(sck: SCK, data: DATA, delay: DELAY) -> Self {
        Sht1x {
            sck,
            data,
            delay,
            crc: Crc8::new(),
        }
    }

    /// Current value of the running checksum.
    pub fn crc(&self) -> u8 {
        self.crc.value()
    }

    /// Brings the bus into its idle state after power-up.
    pub fn init(&mut self) -> Result<(), Sht1xError<E>> {
        self.delay.delay_ms(STARTUP_DELAY_MS);
        self.sck.set_low()?;
        self.data.set_low()?;
        Ok(())
    }

    /// Resets the serial interface and sends the soft reset command.
    ///
    /// Call this after any failed operation before talking to the sensor again.
    pub fn reset(&mut self) -> Result<(), Sht1xError<E>> {
        self.data_high()?;
        for _ in 0..RESET_CLOCK_PULSES {
            self.sck_high()?;
            self.sck_low()?;
        }
        self.transmission_start()?;
        self.send_byte(CMD_SOFT_RESET)
    }

    /// Measures temperature then humidity and converts them.
    ///
    /// # Returns
    ///
    /// * `Ok(Reading)` if both measurements succeed with valid checksums.
    /// * `Err(Sht1xError)` on the first failure; no partial reading is returned.
    pub fn read(&mut self) -> Result<Reading, Sht1xError<E>> {
        let raw = self.read_raw()?;
        let reading = Reading::from(raw);

        #[cfg(feature = "defmt")]
        defmt::trace!("sht1x: {} -> {}", raw, reading);

        Ok(reading)
    }

    /// Measures temperature then humidity without converting them.
    pub fn read_raw(&mut self) -> Result<RawReading, Sht1xError<E>> {
        let temperature = self.measure(MeasurementKind::Temperature)?;
        let humidity = self.measure(MeasurementKind::Humidity)?;
        Ok(RawReading {
            temperature,
            humidity,
        })
    }

    /// Performs a single measurement and returns the raw register value.
    pub fn measure(&mut self, kind: MeasurementKind) -> Result<u16, Sht1xError<E>> {
        self.start_measurement(kind)?;
        let value = self.read_measurement_value()?;

        #[cfg(feature = "defmt")]
        defmt::trace!("sht1x: {} raw value {=u16:#x}", kind, value);

        Ok(value)
    }

    fn start_measurement(&mut self, kind: MeasurementKind) -> Result<(), Sht1xError<E>> {
        self.transmission_start()?;
        self.send_byte(kind.command())
    }

    /// Waits for the result, then reads the two value bytes and the checksum.
    fn read_measurement_value(&mut self) -> Result<u16, Sht1xError<E>> {
        self.poll_for_completion()?;

        let high = self.read_byte(true)?;
        self.crc.update(high);
        let low = self.read_byte(true)?;
        self.crc.update(low);

        let checksum = self.read_byte(false)?;
        if !self.crc.matches(checksum) {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "sht1x: checksum mismatch (ours: {=u8:#x}, sensor's: {=u8:#x})",
                self.crc.value(),
                crate::crc::mirror(checksum)
            );
            return Err(Sht1xError::ChecksumMismatch);
        }

        Ok(u16::from_be_bytes([high, low]))
    }

    /// Samples DATA until the sensor pulls it low to signal a finished measurement.
    ///
    /// # Errors
    ///
    /// Returns `Sht1xError::Timeout` if DATA is still high after `POLL_ATTEMPTS` samples.
    fn poll_for_completion(&mut self) -> Result<(), Sht1xError<E>> {
        for _ in 0..POLL_ATTEMPTS {
            if self.data.is_low()? {
                return Ok(());
            }
            self.delay.delay_ms(POLL_INTERVAL_MS);
        }

        #[cfg(feature = "defmt")]
        defmt::warn!("sht1x: timed out waiting for measurement");

        Err(Sht1xError::Timeout)
    }

    /// Sends the transmission start sequence and clears the checksum.
    ///
    /// The sensor restarts its own checksum here, so ours is cleared even
    /// when a pin operation fails part way through.
    fn transmission_start(&mut self) -> Result<(), Sht1xError<E>> {
        let result = self.transmission_start_sequence();
        self.crc.reset();
        result
    }

    fn transmission_start_sequence(&mut self) -> Result<(), Sht1xError<E>> {
        //       _____         ________
        // DATA:      |_______|
        //           ___     ___
        // SCK : ___|   |___|   |______
        self.sck_high()?;
        self.data_low()?;
        self.sck_low()?;
        self.sck_high()?;
        self.data_high()?;
        self.sck_low()
    }

    /// Sends one byte (MSB first) and checks the sensor's acknowledge.
    ///
    /// The checksum only includes the byte once it was acknowledged.
    fn send_byte(&mut self, value: u8) -> Result<(), Sht1xError<E>> {
        for i in 0..8 {
            let bit_mask = 1 << (7 - i);
            self.sck_low()?;
            if value & bit_mask != 0 {
                self.data_high()?;
            } else {
                self.data_low()?;
            }
            self.sck_high()?;
        }

        self.sck_low()?;
        self.data_high()?; // release DATA for the ack
        self.sck_high()?;

        if self.data.is_high()? {
            #[cfg(feature = "defmt")]
            defmt::warn!("sht1x: byte {=u8:#x} not acked", value);
            return Err(Sht1xError::NotAcknowledged);
        }
        self.crc.update(value);

        self.sck_low()
    }

    /// Reads one byte (MSB first), optionally acknowledging it.
    ///
    /// The checksum is left untouched; the caller decides which bytes it covers.
    fn read_byte(&mut self, send_ack: bool) -> Result<u8, Sht1xError<E>> {
        let mut byte: u8 = 0;

        for i in 0..8 {
            let bit_mask = 1 << (7 - i);
            self.sck_high()?;
            if self.data.is_high()? {
                byte |= bit_mask;
            }
            self.sck_low()?;
        }

        if send_ack {
            self.data_low()?;
        }
        self.sck_high()?;
        self.sck_low()?;
        if send_ack {
            self.data_high()?;
        }

        Ok(byte)
    }

    fn sck_high(&mut self) -> Result<(), Sht1xError<E>> {
        self.sck.set_high()?;
        self.delay.delay_us(BIT_DELAY_US);
        Ok(())
    }

    fn sck_low(&mut self) -> Result<(), Sht1xError<E>> {
        self.sck.set_low()?;
        self.delay.delay_us(BIT_DELAY_US);
        Ok(())
    }

    fn data_high(&mut self) -> Result<(), Sht1xError<E>> {
        self.data.set_high()?;
        self.delay.delay_us(BIT_DELAY_US);
        Ok(())
    }

    fn data_low(&mut self) -> Result<(), Sht1xError<E>> {
        self.data.set_low()?;
        self.delay.delay_us(BIT_DELAY_US);
        Ok(())
    }
}
