//! Single-bit even parity.
//!
//! The encoder appends one check bit so the codeword always holds an even
//! number of `1`s. Verification recounts the `1`s.
//!
//! # Limitation
//! Any odd number of flipped bits is detected. Any even number of flips
//! (including two) leaves the count even and passes verification.

use crate::bitstring::BitString;

/// Append an even-parity bit to `data`.
///
/// Accepts any length, including empty (which encodes to `"0"`).
pub fn encode(data: &BitString) -> BitString {
    let parity_bit = data.count_ones() % 2 == 1;
    data.concat(&BitString::new(vec![parity_bit]))
}

/// True iff `data` contains an even number of `1`s.
pub fn verify(data: &BitString) -> bool {
    data.count_ones() % 2 == 0
}

/// Index of the parity bit in a codeword of `encoded_len` bits.
pub fn check_position(encoded_len: usize) -> Option<usize> {
    encoded_len.checked_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(s: &str) -> BitString {
        s.parse().unwrap()
    }

    #[test]
    fn test_encode_even_input() {
        assert_eq!(encode(&bits("1010")).to_string(), "10100");
    }

    #[test]
    fn test_encode_odd_input() {
        assert_eq!(encode(&bits("1011")).to_string(), "10111");
    }

    #[test]
    fn test_encode_empty() {
        let encoded = encode(&bits(""));
        assert_eq!(encoded.to_string(), "0");
        assert!(verify(&encoded));
    }

    #[test]
    fn test_single_flip_detected() {
        let encoded = encode(&bits("11010010"));
        for i in 0..encoded.len() {
            let corrupted = encoded.with_flipped(&[i]).unwrap();
            assert!(!verify(&corrupted), "flip at {} went unnoticed", i);
        }
    }

    #[test]
    fn test_two_flips_go_undetected() {
        let encoded = encode(&bits("1010"));
        assert_eq!(encoded.to_string(), "10100");

        let corrupted = encoded.with_flipped(&[0, 1]).unwrap();
        assert_eq!(corrupted.to_string(), "01100");
        assert_ne!(corrupted, encoded);
        assert!(verify(&corrupted));
    }

    #[test]
    fn test_three_flips_detected() {
        let encoded = encode(&bits("0000"));
        let corrupted = encoded.with_flipped(&[0, 2, 4]).unwrap();
        assert!(!verify(&corrupted));
    }

    #[test]
    fn test_check_position() {
        assert_eq!(check_position(5), Some(4));
        assert_eq!(check_position(0), None);
    }
}
