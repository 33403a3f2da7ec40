pub mod stream_shift;

pub use stream_shift::StreamShift;

use crate::alphabet::Alphabet;
use crate::error::{FpeError, Result};
use crate::mask;
use std::sync::Arc;

/// A keyed, length-preserving permutation over a fixed-radix value sequence.
///
/// The formatting layers depend only on this interface, so the
/// demonstration `StreamShift` construction can be swapped for a
/// standards-based permutation (e.g. FF1) without touching them.
pub trait CipherPrimitive: Send + Sync {
    /// Transform `values` (each in `[0, radix)`) under `key` and `tweak`.
    /// `forward == true` encrypts, `false` decrypts; the two directions are
    /// exact inverses and the output length equals the input length.
    fn permute(
        &self,
        values: &[u32],
        key: &[u8],
        tweak: &str,
        radix: u32,
        forward: bool,
    ) -> Result<Vec<u32>>;
}

/// Immutable pairing of a secret key with a cipher primitive.
///
/// Constructed once per configuration and shared across any number of
/// concurrent encrypt/decrypt calls; the key is cloned at construction and
/// never mutated or logged.
pub struct CipherContext {
    key: Vec<u8>,
    primitive: Arc<dyn CipherPrimitive>,
}

impl CipherContext {
    pub fn new(key: &[u8], primitive: Arc<dyn CipherPrimitive>) -> Result<Self> {
        if key.is_empty() {
            return Err(FpeError::InvalidKey("empty key".into()));
        }
        Ok(Self {
            key: key.to_vec(),
            primitive,
        })
    }

    /// Context using the demonstration stream-shift primitive
    pub fn stream_shift(key: &[u8], rounds: u32) -> Result<Self> {
        Self::new(key, Arc::new(StreamShift::new(rounds)))
    }

    /// Encrypt a sequence of alphabet indices
    pub fn encrypt_values(&self, values: &[u32], tweak: &str, radix: u32) -> Result<Vec<u32>> {
        self.permute_checked(values, tweak, radix, true)
    }

    /// Decrypt a sequence of alphabet indices
    pub fn decrypt_values(&self, values: &[u32], tweak: &str, radix: u32) -> Result<Vec<u32>> {
        self.permute_checked(values, tweak, radix, false)
    }

    /// Encrypt a string: alphabet members are substituted in place, any
    /// other character passes through at its original position.
    pub fn encrypt_str(&self, text: &str, alphabet: &Alphabet, tweak: &str) -> Result<String> {
        self.transform_str(text, alphabet, tweak, true)
    }

    /// Decrypt a string produced by `encrypt_str`
    pub fn decrypt_str(&self, text: &str, alphabet: &Alphabet, tweak: &str) -> Result<String> {
        self.transform_str(text, alphabet, tweak, false)
    }

    fn transform_str(
        &self,
        text: &str,
        alphabet: &Alphabet,
        tweak: &str,
        forward: bool,
    ) -> Result<String> {
        let slots = mask::strip(text, alphabet);
        let core = mask::core(&slots);
        let transformed = self.permute_checked(&core, tweak, alphabet.size(), forward)?;
        mask::reinsert(&slots, &transformed, alphabet)
    }

    fn permute_checked(
        &self,
        values: &[u32],
        tweak: &str,
        radix: u32,
        forward: bool,
    ) -> Result<Vec<u32>> {
        let out = self
            .primitive
            .permute(values, &self.key, tweak, radix, forward)?;
        // A primitive that changes sequence length is a programming defect,
        // not a bad input. Surface it, never swallow it.
        if out.len() != values.len() {
            return Err(FpeError::LengthInvariant {
                expected: values.len(),
                actual: out.len(),
            });
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::Kind;

    struct Truncating;

    impl CipherPrimitive for Truncating {
        fn permute(
            &self,
            values: &[u32],
            _key: &[u8],
            _tweak: &str,
            _radix: u32,
            _forward: bool,
        ) -> Result<Vec<u32>> {
            Ok(values[..values.len() / 2].to_vec())
        }
    }

    #[test]
    fn test_empty_key_rejected() {
        assert!(matches!(
            CipherContext::stream_shift(b"", 8),
            Err(FpeError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_length_violation_is_fatal() {
        let ctx = CipherContext::new(b"key", Arc::new(Truncating)).unwrap();
        let err = ctx.encrypt_values(&[1, 2, 3, 4], "t", 10).unwrap_err();
        assert!(matches!(err, FpeError::LengthInvariant { expected: 4, actual: 2 }));
    }

    #[test]
    fn test_str_roundtrip_with_literals() {
        let ctx = CipherContext::stream_shift(b"secret key", 8).unwrap();
        let alphabet = Alphabet::of(Kind::Digits);

        let plain = "+1-202-555-0173";
        let cipher = ctx.encrypt_str(plain, &alphabet, "phone:test").unwrap();

        assert_eq!(cipher.len(), plain.len());
        // Non-digits keep their positions
        for (p, c) in plain.chars().zip(cipher.chars()) {
            if !alphabet.contains(p) {
                assert_eq!(p, c);
            }
        }

        let back = ctx.decrypt_str(&cipher, &alphabet, "phone:test").unwrap();
        assert_eq!(back, plain);
    }

    #[test]
    fn test_context_is_shareable() {
        use std::thread;

        let ctx = Arc::new(CipherContext::stream_shift(b"shared key", 8).unwrap());
        let alphabet = Arc::new(Alphabet::of(Kind::Base62));

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let ctx = Arc::clone(&ctx);
                let alphabet = Arc::clone(&alphabet);
                thread::spawn(move || {
                    let plain = format!("Thread{}Payload", i);
                    let cipher = ctx.encrypt_str(&plain, &alphabet, "t").unwrap();
                    let back = ctx.decrypt_str(&cipher, &alphabet, "t").unwrap();
                    assert_eq!(back, plain);
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }
    }
}
