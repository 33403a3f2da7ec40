//! fpemask - Format-Preserving Encryption for Structured Identifiers
//!
//! Transforms phone numbers, emails, national IDs, payment cards, passports
//! and generic text under a secret key so that ciphertext keeps the exact
//! length, punctuation and fixed check characters of the plaintext, while
//! the sensitive characters are substituted within their own symbol set.
//! Only the key holder can reverse the substitution.
//!
//! ## Layer Stack
//!
//! ```text
//! FieldProcessor → FormatMask → CipherPrimitive → Alphabet
//! ```
//!
//! - **FieldProcessor**: matches a structural pattern (email, phone, ...)
//!   and routes each capture group to its own (alphabet, tweak) assignment;
//!   non-matching input passes through unchanged
//! - **FormatMask**: splits out punctuation/structure as pinned literals
//!   and hands the in-alphabet core to the cipher
//! - **CipherPrimitive**: a swappable keyed, length-preserving permutation;
//!   the bundled `StreamShift` derives per-position shifts from
//!   HMAC-SHA256, a production deployment plugs in a standards-based
//!   permutation (FF1) behind the same trait
//! - **Alphabet**: ordered, duplicate-free symbol set with bidirectional
//!   symbol/index lookup
//!
//! The `OpaqueCodec` sits in front of the mask for content outside any
//! alphabet: it base64url-encodes arbitrary Unicode first, trading length
//! inflation for universal applicability.
//!
//! ## Example
//!
//! ```
//! use fpemask::cipher::CipherContext;
//! use fpemask::field::{FieldKind, FieldOptions, FieldProcessor};
//! use std::sync::Arc;
//!
//! let ctx = Arc::new(CipherContext::stream_shift(b"demo key", 8).unwrap());
//! let fp = FieldProcessor::new(ctx, FieldKind::PaymentCard, FieldOptions::default());
//!
//! let cipher = fp.encrypt("4111111111111111").unwrap();
//! assert_eq!(&cipher[..6], "411111");          // BIN preserved
//! assert_eq!(&cipher[15..], "1");              // check digit preserved
//! assert_eq!(fp.decrypt(&cipher).unwrap(), "4111111111111111");
//! ```

pub mod alphabet;
pub mod cipher;
pub mod error;
pub mod field;
pub mod key;
pub mod mask;
pub mod opaque;

pub use alphabet::{Alphabet, Kind};
pub use cipher::{CipherContext, CipherPrimitive, StreamShift};
pub use error::{FpeError, Result};
pub use field::{FieldKind, FieldOptions, FieldProcessor};
pub use key::decode_key_hex;
pub use opaque::OpaqueCodec;
