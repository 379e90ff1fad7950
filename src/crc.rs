//! CRC-8 used by the SHT1x to protect measurement results.
//!
//! The sensor computes the checksum over every byte of a transaction: the
//! command it received plus the data bytes it sends back. Its polynomial is
//! `x^8 + x^5 + x^4 + 1` (`0x31`), processed MSB first, but the checksum
//! byte goes out on the wire with its bit order reversed.

/// Generator polynomial, without the implicit `x^8` term.
const POLYNOMIAL: u8 = 0x31;

/// Feeds one byte into the accumulator, returning the new value.
pub fn mutate(mut crc: u8, mut byte: u8) -> u8 {
    for _ in 0..8 {
        if (crc ^ byte) & 0x80 != 0 {
            crc = (crc << 1) ^ POLYNOMIAL;
        } else {
            crc <<= 1;
        }
        byte <<= 1;
    }
    crc
}

/// Reverses the bit order of a byte (bit 7 becomes bit 0 and so on).
pub fn mirror(byte: u8) -> u8 {
    byte.reverse_bits()
}

/// Running checksum for one sensor transaction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Crc8(u8);

impl Crc8 {
    /// Creates a cleared accumulator.
    pub const fn new() -> Self {
        Crc8(0)
    }

    /// Clears the accumulator, as the sensor does on transmission start.
    pub fn reset(&mut self) {
        self.0 = 0;
    }

    /// Feeds one transmitted or received byte into the checksum.
    pub fn update(&mut self, byte: u8) {
        self.0 = mutate(self.0, byte);
    }

    /// Current checksum value, in the bit order the sensor computes it.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Checks a checksum byte as received from the sensor.
    pub fn matches(&self, received: u8) -> bool {
        self.0 == mirror(received)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutate_single_bytes() {
        assert_eq!(mutate(0, 0x00), 0x00);
        assert_eq!(mutate(0, 0x01), 0x31);
        assert_eq!(mutate(0, 0x03), 0x53);
        assert_eq!(mutate(0, 0x05), 0xF5);
        assert_eq!(mutate(0, 0x1E), 0x5C);
        assert_eq!(mutate(0, 0x80), 0x7A);
        assert_eq!(mutate(0, 0xFF), 0xAC);
    }

    #[test]
    fn test_mutate_is_deterministic() {
        for b in 0..=u8::MAX {
            assert_eq!(mutate(0, b), mutate(0, b));
        }
    }

    #[test]
    fn test_mirror_boundaries() {
        assert_eq!(mirror(0x00), 0x00);
        assert_eq!(mirror(0xFF), 0xFF);
        assert_eq!(mirror(0x01), 0x80);
        assert_eq!(mirror(0b1100_1010), 0b0101_0011);
    }

    #[test]
    fn test_mirror_is_self_inverse() {
        for b in 0..=u8::MAX {
            assert_eq!(mirror(mirror(b)), b);
        }
    }

    #[test]
    fn test_transaction_checksum() {
        // Humidity command followed by raw value 0x0931
        let mut crc = Crc8::new();
        for b in [0x05, 0x09, 0x31] {
            crc.update(b);
        }
        assert_eq!(crc.value(), 0x58);
        assert!(crc.matches(0x1A));
        assert!(!crc.matches(0x58));

        crc.reset();
        assert_eq!(crc, Crc8::default());
    }
}
