//! Opaque codec: carries arbitrary Unicode content through the
//! alphabet-restricted permutation.
//!
//! Text is encoded as UTF-8 bytes, then base64url without padding, so the
//! intermediate uses only letters, digits, `-` and `_`. That intermediate
//! goes through the full-alphabet permutation. Output grows relative to the
//! input; that inflation buys universal applicability and is expected.

use crate::alphabet::Alphabet;
use crate::cipher::CipherContext;
use crate::error::{FpeError, Result};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use std::sync::Arc;

const BASE64URL_SYMBOLS: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

pub struct OpaqueCodec {
    context: Arc<CipherContext>,
    alphabet: Alphabet,
}

impl OpaqueCodec {
    /// The alphabet must cover every base64url symbol, `-` and `_`
    /// included; anything less is a configuration error.
    pub fn new(context: Arc<CipherContext>, alphabet: Alphabet) -> Result<Self> {
        for c in BASE64URL_SYMBOLS.chars() {
            if !alphabet.contains(c) {
                return Err(FpeError::OpaqueAlphabet(format!(
                    "alphabet does not cover base64url symbol {:?}",
                    c
                )));
            }
        }
        Ok(Self { context, alphabet })
    }

    /// Encrypt any text, non-ASCII included
    pub fn encrypt(&self, text: &str, tweak: &str) -> Result<String> {
        let encoded = URL_SAFE_NO_PAD.encode(text.as_bytes());
        self.context.encrypt_str(&encoded, &self.alphabet, tweak)
    }

    /// Reverse the permutation, then decode back to the original text
    pub fn decrypt(&self, cipher: &str, tweak: &str) -> Result<String> {
        let encoded = self.context.decrypt_str(cipher, &self.alphabet, tweak)?;
        let bytes = URL_SAFE_NO_PAD
            .decode(encoded.as_bytes())
            .map_err(|e| FpeError::OpaqueDecode(format!("base64: {}", e)))?;
        String::from_utf8(bytes).map_err(|e| FpeError::OpaqueDecode(format!("utf-8: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::Kind;
    use crate::cipher::stream_shift::DEFAULT_ROUNDS;

    fn codec() -> OpaqueCodec {
        let ctx = Arc::new(CipherContext::stream_shift(b"opaque key", DEFAULT_ROUNDS).unwrap());
        OpaqueCodec::new(ctx, Alphabet::of(Kind::Base64Url)).unwrap()
    }

    #[test]
    fn test_ascii_roundtrip() {
        let c = codec();
        let plain = "abc-123_DEF@domain.com";
        let enc = c.encrypt(plain, "opaque:v1").unwrap();
        assert_eq!(c.decrypt(&enc, "opaque:v1").unwrap(), plain);
    }

    #[test]
    fn test_unicode_roundtrip() {
        let c = codec();
        for plain in ["张三-上海No.88，A座-9F", "héllo wörld", "🔒🔑"] {
            let enc = c.encrypt(plain, "opaque:v1").unwrap();
            assert_eq!(c.decrypt(&enc, "opaque:v1").unwrap(), plain, "{:?}", plain);
        }
    }

    #[test]
    fn test_output_confined_to_alphabet() {
        let c = codec();
        let alphabet = Alphabet::of(Kind::Base64Url);
        let enc = c.encrypt("任意内容 with spaces", "opaque:v1").unwrap();
        assert!(enc.chars().all(|ch| alphabet.contains(ch)));
    }

    #[test]
    fn test_output_longer_than_input() {
        let c = codec();
        let plain = "short";
        let enc = c.encrypt(plain, "opaque:v1").unwrap();
        assert!(enc.len() > plain.len());
    }

    #[test]
    fn test_insufficient_alphabet_rejected() {
        let ctx = Arc::new(CipherContext::stream_shift(b"opaque key", DEFAULT_ROUNDS).unwrap());
        assert!(matches!(
            OpaqueCodec::new(ctx, Alphabet::of(Kind::Base62)),
            Err(FpeError::OpaqueAlphabet(_))
        ));
    }

    #[test]
    fn test_garbage_cipher_fails_decode() {
        let c = codec();
        // A single symbol can never be a whole base64 quantum
        assert!(matches!(
            c.decrypt("A", "opaque:v1"),
            Err(FpeError::OpaqueDecode(_))
        ));
    }

    #[test]
    fn test_empty_text() {
        let c = codec();
        let enc = c.encrypt("", "opaque:v1").unwrap();
        assert_eq!(enc, "");
        assert_eq!(c.decrypt(&enc, "opaque:v1").unwrap(), "");
    }
}
