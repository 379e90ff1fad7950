use core::fmt;

/// Possible errors from the SHT1x driver.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, PartialEq, Eq)]
pub enum Sht1xError<E> {
    /// The sensor did not pull DATA low after a byte was sent.
    NotAcknowledged,
    /// Timed out waiting for the sensor to finish a measurement.
    Timeout,
    /// Checksum did not match the received data.
    ChecksumMismatch,
    /// Error from the GPIO pin (input/output).
    PinError(E),
}

impl<E> From<E> for Sht1xError<E> {
    fn from(value: E) -> Self {
        Self::PinError(value)
    }
}

impl<E: fmt::Debug> fmt::Display for Sht1xError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAcknowledged => f.write_str("send byte not acked"),
            Self::Timeout => f.write_str("timed out waiting for data"),
            Self::ChecksumMismatch => f.write_str("checksum does not match"),
            Self::PinError(e) => write!(f, "pin error: {e:?}"),
        }
    }
}

impl<E: fmt::Debug> core::error::Error for Sht1xError<E> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_error_from() {
        let err: Sht1xError<u8> = 7.into();
        assert_eq!(err, Sht1xError::PinError(7));
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            Sht1xError::<()>::NotAcknowledged.to_string(),
            "send byte not acked"
        );
        assert_eq!(
            Sht1xError::<()>::Timeout.to_string(),
            "timed out waiting for data"
        );
        assert_eq!(
            Sht1xError::<()>::ChecksumMismatch.to_string(),
            "checksum does not match"
        );
        assert_eq!(Sht1xError::PinError(3u8).to_string(), "pin error: 3");
    }
}
