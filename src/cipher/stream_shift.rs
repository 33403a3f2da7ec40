use crate::cipher::CipherPrimitive;
use crate::error::{FpeError, Result};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Fewest rounds the construction will run with
pub const MIN_ROUNDS: u32 = 4;

/// Round count used by the field layer when the caller does not choose one
pub const DEFAULT_ROUNDS: u32 = 8;

/// Demonstration primitive: a per-round, per-position pseudorandom shift.
///
/// Each position's shift is derived from HMAC-SHA256 over a domain-separated
/// context of (tweak, position, round, sequence length) and never from other
/// positions' values, so rounds re-randomize each position's cumulative
/// shift without adding cross-position diffusion. Security rests entirely on
/// the PRF and key secrecy; a production deployment substitutes a
/// standards-based permutation behind the same trait.
pub struct StreamShift {
    rounds: u32,
}

impl StreamShift {
    /// Round counts below `MIN_ROUNDS` are raised to it
    pub fn new(rounds: u32) -> Self {
        Self {
            rounds: rounds.max(MIN_ROUNDS),
        }
    }

    /// Round count without the minimum floor, for reproducing historical
    /// low-round transcripts (the key-recovery demo runs 2 rounds)
    pub fn with_exact_rounds(rounds: u32) -> Self {
        Self { rounds }
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Domain-separated context message fed to the PRF. The mode label is
    /// fixed to "enc" in both directions so decryption derives the same
    /// shifts it must cancel.
    fn context(tweak: &str, pos: u32, round: u32, len: u32) -> Vec<u8> {
        let mut msg = Vec::with_capacity(64 + tweak.len());
        msg.extend_from_slice(b"FPE:STREAMSHIFT");
        msg.extend_from_slice(b"|tweak=");
        msg.extend_from_slice(tweak.as_bytes());
        msg.extend_from_slice(b"|mode=");
        msg.extend_from_slice(b"enc");
        msg.extend_from_slice(b"|pos=");
        msg.extend_from_slice(&pos.to_be_bytes());
        msg.extend_from_slice(b"|round=");
        msg.extend_from_slice(&round.to_be_bytes());
        msg.extend_from_slice(b"|len=");
        msg.extend_from_slice(&len.to_be_bytes());
        msg
    }

    /// Shift for one (tweak, position, round, length) cell: first 4 MAC
    /// bytes as a big-endian integer, sign bit masked off, reduced mod radix
    fn shift(key: &[u8], tweak: &str, pos: u32, round: u32, len: u32, radix: u32) -> u32 {
        let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can take key of any size");
        mac.update(&Self::context(tweak, pos, round, len));
        let digest = mac.finalize().into_bytes();

        let word = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]);
        (word & 0x7fff_ffff) % radix
    }
}

impl CipherPrimitive for StreamShift {
    fn permute(
        &self,
        values: &[u32],
        key: &[u8],
        tweak: &str,
        radix: u32,
        forward: bool,
    ) -> Result<Vec<u32>> {
        if key.is_empty() {
            return Err(FpeError::InvalidKey("empty key".into()));
        }
        if radix < 2 {
            return Err(FpeError::InvalidAlphabet(format!("radix {} < 2", radix)));
        }
        for &v in values {
            if v >= radix {
                return Err(FpeError::ValueOutOfRange { value: v, radix });
            }
        }

        let len = values.len() as u32;
        let mut out = values.to_vec();

        // Rounds run ascending to encrypt and descending to decrypt; within
        // a round each position is independent.
        let rounds: Vec<u32> = if forward {
            (0..self.rounds).collect()
        } else {
            (0..self.rounds).rev().collect()
        };

        for round in rounds {
            for (i, v) in out.iter_mut().enumerate() {
                let shift = Self::shift(key, tweak, i as u32, round, len, radix);
                let signed = if forward {
                    *v as i64 + shift as i64
                } else {
                    *v as i64 - shift as i64
                };
                *v = signed.rem_euclid(radix as i64) as u32;
            }
        }

        Ok(out)
    }
}
