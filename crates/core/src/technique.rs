//! The three error-control techniques behind one dispatch point.
//!
//! Each technique knows how to encode a payload, which codeword positions
//! hold check bits, and how to judge a received codeword against the
//! payload that was actually sent.

use crate::bitstring::BitString;
use crate::error::{Error, Result};
use crate::{crc, hamming, parity};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// An error detection or correction technique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Technique {
    Parity,
    Hamming,
    Crc,
}

/// How one trial ended for one technique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrialOutcome {
    /// Payload arrived intact and nothing was flagged or repaired
    Clean,

    /// Corruption was flagged, or a correction produced wrong data
    Detected,

    /// A correction restored the original payload
    Corrected,

    /// Payload changed and the technique did not notice
    Undetected,
}

impl Technique {
    /// All techniques, in report order.
    pub const ALL: [Technique; 3] = [Technique::Parity, Technique::Hamming, Technique::Crc];

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Technique::Parity => "Parity",
            Technique::Hamming => "Hamming",
            Technique::Crc => "CRC",
        }
    }

    /// Encode `data`. `polynomial` is only consulted for CRC.
    ///
    /// # Errors
    /// - `Error::InvalidLength` for Hamming unless `data` has 4 bits
    /// - `Error::InvalidPolynomial` for CRC with a malformed generator
    pub fn encode(self, data: &BitString, polynomial: &BitString) -> Result<BitString> {
        match self {
            Technique::Parity => Ok(parity::encode(data)),
            Technique::Hamming => hamming::encode(data),
            Technique::Crc => crc::encode(data, polynomial),
        }
    }

    /// Check-bit indices of a codeword of `encoded_len` bits.
    ///
    /// Derived from the technique and length alone; suitable as the
    /// protected set when studying payload-only corruption.
    ///
    /// # Errors
    /// Returns `Error::InvalidPolynomial` for CRC with a malformed generator.
    pub fn check_positions(self, encoded_len: usize, polynomial: &BitString) -> Result<BTreeSet<usize>> {
        let positions = match self {
            Technique::Parity => parity::check_position(encoded_len).into_iter().collect(),
            Technique::Hamming => hamming::PARITY_POSITIONS
                .iter()
                .copied()
                .filter(|&pos| pos < encoded_len)
                .collect(),
            Technique::Crc => crc::check_positions(encoded_len, polynomial)?.into_iter().collect(),
        };
        Ok(positions)
    }

    /// Judge a received codeword against the payload that was sent.
    ///
    /// For Hamming, `sent` is the 4-bit data word; for parity and CRC it is
    /// the payload that prefixes the codeword.
    ///
    /// # Errors
    /// Propagates codec errors (wrong Hamming length, bad polynomial).
    pub fn classify(self, sent: &BitString, received: &BitString, polynomial: &BitString) -> Result<TrialOutcome> {
        let outcome = match self {
            Technique::Parity => {
                let changed = received.prefix(sent.len()) != *sent;
                detection_outcome(parity::verify(received), changed)
            }
            Technique::Crc => {
                let changed = received.prefix(sent.len()) != *sent;
                detection_outcome(crc::verify(received, polynomial)?, changed)
            }
            Technique::Hamming => {
                let decoded = hamming::decode(received)?;
                let changed = hamming::extract_data(received)? != *sent;
                if decoded.corrected && decoded.data == *sent {
                    TrialOutcome::Corrected
                } else if decoded.corrected {
                    TrialOutcome::Detected
                } else if changed {
                    TrialOutcome::Undetected
                } else {
                    TrialOutcome::Clean
                }
            }
        };
        Ok(outcome)
    }
}

fn detection_outcome(passed: bool, payload_changed: bool) -> TrialOutcome {
    match (passed, payload_changed) {
        (false, true) => TrialOutcome::Detected,
        (true, true) => TrialOutcome::Undetected,
        // A flipped check bit alone is not counted
        _ => TrialOutcome::Clean,
    }
}

impl fmt::Display for Technique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Technique {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "parity" => Ok(Technique::Parity),
            "hamming" => Ok(Technique::Hamming),
            "crc" => Ok(Technique::Crc),
            other => Err(Error::InvalidParameter(format!("unknown technique: {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(s: &str) -> BitString {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("parity".parse::<Technique>().unwrap(), Technique::Parity);
        assert_eq!("Hamming".parse::<Technique>().unwrap(), Technique::Hamming);
        assert_eq!("CRC".parse::<Technique>().unwrap(), Technique::Crc);
        assert!("golay".parse::<Technique>().is_err());
    }

    #[test]
    fn test_check_positions() {
        let poly = crc::default_polynomial();
        let parity: Vec<_> = Technique::Parity.check_positions(9, &poly).unwrap().into_iter().collect();
        let hamming: Vec<_> = Technique::Hamming.check_positions(7, &poly).unwrap().into_iter().collect();
        let crc: Vec<_> = Technique::Crc.check_positions(11, &poly).unwrap().into_iter().collect();

        assert_eq!(parity, vec![8]);
        assert_eq!(hamming, vec![0, 1, 3]);
        assert_eq!(crc, vec![8, 9, 10]);
    }

    #[test]
    fn test_parity_classification() {
        let poly = crc::default_polynomial();
        let sent = bits("1010");
        let encoded = Technique::Parity.encode(&sent, &poly).unwrap();

        let classify = |flips: &[usize]| {
            let received = encoded.with_flipped(flips).unwrap();
            Technique::Parity.classify(&sent, &received, &poly).unwrap()
        };

        assert_eq!(classify(&[]), TrialOutcome::Clean);
        assert_eq!(classify(&[1]), TrialOutcome::Detected);
        assert_eq!(classify(&[0, 1]), TrialOutcome::Undetected);
        // Only the parity bit flipped: payload intact, not counted
        assert_eq!(classify(&[4]), TrialOutcome::Clean);
    }

    #[test]
    fn test_hamming_classification() {
        let poly = crc::default_polynomial();
        let sent = bits("1011");
        let encoded = Technique::Hamming.encode(&sent, &poly).unwrap();

        let classify = |flips: &[usize]| {
            let received = encoded.with_flipped(flips).unwrap();
            Technique::Hamming.classify(&sent, &received, &poly).unwrap()
        };

        assert_eq!(classify(&[]), TrialOutcome::Clean);
        assert_eq!(classify(&[2]), TrialOutcome::Corrected);
        // A repaired check bit still counts as a correction
        assert_eq!(classify(&[0]), TrialOutcome::Corrected);
        // p1 + p2 blame d1, producing wrong data
        assert_eq!(classify(&[0, 1]), TrialOutcome::Detected);
    }

    #[test]
    fn test_hamming_undetected_triple_flip() {
        let poly = crc::default_polynomial();
        let sent = bits("0000");
        let encoded = Technique::Hamming.encode(&sent, &poly).unwrap();
        // 1110000 is itself a codeword (data 1000), so the syndrome is zero
        let received = encoded.with_flipped(&[0, 1, 2]).unwrap();
        assert_eq!(
            Technique::Hamming.classify(&sent, &received, &poly).unwrap(),
            TrialOutcome::Undetected
        );
    }

    #[test]
    fn test_crc_classification() {
        let poly = crc::default_polynomial();
        let sent = bits("01101001");
        let encoded = Technique::Crc.encode(&sent, &poly).unwrap();

        let classify = |flips: &[usize]| {
            let received = encoded.with_flipped(flips).unwrap();
            Technique::Crc.classify(&sent, &received, &poly).unwrap()
        };

        assert_eq!(classify(&[]), TrialOutcome::Clean);
        assert_eq!(classify(&[3]), TrialOutcome::Detected);
        assert_eq!(classify(&[2, 4, 5]), TrialOutcome::Undetected);
        assert_eq!(classify(&[9]), TrialOutcome::Clean);
    }

    #[test]
    fn test_hamming_encode_requires_four_bits() {
        let poly = crc::default_polynomial();
        assert!(Technique::Hamming.encode(&bits("10110"), &poly).is_err());
    }
}
