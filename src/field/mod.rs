//! Field-rule engine: binds structural identifier patterns to per-group
//! alphabet and tweak assignments.
//!
//! Matching is lenient by contract: input that does not fit a field's
//! structure is returned unchanged, never rejected. Callers rely on this to
//! probe several field types against the same value.

pub mod parse;

pub use parse::{parse, ParsedField, Segment};

use crate::alphabet::{Alphabet, Kind};
use crate::cipher::CipherContext;
use crate::error::{FpeError, Result};
use std::sync::Arc;

/// Built-in identifier types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldKind {
    Email,
    Phone,
    NationalId,
    PaymentCard,
    Passport,
    #[default]
    Generic,
}

impl std::str::FromStr for FieldKind {
    type Err = FpeError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "email" => Ok(Self::Email),
            "phone" => Ok(Self::Phone),
            "cnid" | "chinaid18" | "national-id" => Ok(Self::NationalId),
            "cc" | "card16" | "card" => Ok(Self::PaymentCard),
            "passport" => Ok(Self::Passport),
            "generic" => Ok(Self::Generic),
            _ => Err(FpeError::UnsupportedField(s.to_string())),
        }
    }
}

/// Alphabet and tweak bound to one capture group
#[derive(Debug)]
pub struct SegmentRule {
    pub alphabet: Alphabet,
    pub tweak: String,
}

/// Per-field knobs; defaults reproduce the built-in rule sets
#[derive(Debug, Clone)]
pub struct FieldOptions {
    /// Tweak override. Fields with sub-group tweaks (national ID, card,
    /// passport) use it as the base prefix
    pub tweak: Option<String>,
    /// Marker appended to email ciphertext
    pub marker: char,
    /// Alphabet for the phone middle group
    pub phone_alphabet: Kind,
    /// Leading digits of a phone kept in the clear
    pub keep_prefix: usize,
    /// Trailing digits of a phone kept in the clear
    pub keep_suffix: usize,
}

impl Default for FieldOptions {
    fn default() -> Self {
        Self {
            tweak: None,
            marker: '#',
            phone_alphabet: Kind::Digits,
            keep_prefix: 3,
            keep_suffix: 4,
        }
    }
}

impl FieldOptions {
    pub(crate) fn tweak_or(&self, default: &str) -> String {
        self.tweak.clone().unwrap_or_else(|| default.to_string())
    }
}

/// Binds a cipher context to one field type
pub struct FieldProcessor {
    context: Arc<CipherContext>,
    kind: FieldKind,
    options: FieldOptions,
}

impl FieldProcessor {
    pub fn new(context: Arc<CipherContext>, kind: FieldKind, options: FieldOptions) -> Self {
        Self {
            context,
            kind,
            options,
        }
    }

    /// Encrypt one identifier. Input that does not match the field's
    /// structure comes back unchanged.
    pub fn encrypt(&self, text: &str) -> Result<String> {
        let out = match parse(self.kind, text, &self.options) {
            ParsedField::NoMatch => return Ok(text.to_string()),
            ParsedField::Matched(segments) => self.transform(&segments, true)?,
        };

        if self.kind == FieldKind::Email {
            let mut marked = out;
            marked.push(self.options.marker);
            return Ok(marked);
        }
        Ok(out)
    }

    /// Decrypt one identifier. For email, a missing marker means the value
    /// was never encrypted and it comes back unchanged.
    pub fn decrypt(&self, text: &str) -> Result<String> {
        let stripped = if self.kind == FieldKind::Email {
            match text.strip_suffix(self.options.marker) {
                Some(base) => base,
                None => return Ok(text.to_string()),
            }
        } else {
            text
        };

        match parse(self.kind, stripped, &self.options) {
            ParsedField::NoMatch => Ok(text.to_string()),
            ParsedField::Matched(segments) => self.transform(&segments, false),
        }
    }

    /// Concatenate per-group results in group order
    fn transform(&self, segments: &[Segment], forward: bool) -> Result<String> {
        let mut out = String::new();
        for segment in segments {
            match &segment.rule {
                Some(rule) => {
                    let piece = if forward {
                        self.context
                            .encrypt_str(&segment.text, &rule.alphabet, &rule.tweak)?
                    } else {
                        self.context
                            .decrypt_str(&segment.text, &rule.alphabet, &rule.tweak)?
                    };
                    out.push_str(&piece);
                }
                None => out.push_str(&segment.text),
            }
        }
        Ok(out)
    }
}
