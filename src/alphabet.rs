use crate::error::{FpeError, Result};
use std::collections::HashMap;

const DIGITS: &str = "0123456789";
const UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWER: &str = "abcdefghijklmnopqrstuvwxyz";

/// Built-in alphabet options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Kind {
    #[default]
    Digits,
    Base62,
    EmailLocal,
    Base64Url,
}

impl std::str::FromStr for Kind {
    type Err = FpeError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "digits" => Ok(Self::Digits),
            "base62" => Ok(Self::Base62),
            "email-local" | "emaillocal" => Ok(Self::EmailLocal),
            "base64url" => Ok(Self::Base64Url),
            _ => Err(FpeError::UnsupportedAlphabetKind(s.to_string())),
        }
    }
}

/// An ordered, duplicate-free symbol set with bidirectional symbol/index
/// lookup. Immutable once built; a single instance can serve any number of
/// concurrent transforms.
#[derive(Debug, Clone)]
pub struct Alphabet {
    symbols: Vec<char>,
    index: HashMap<char, u32>,
}

impl Alphabet {
    /// Build one of the built-in alphabets
    pub fn of(kind: Kind) -> Self {
        let charset = match kind {
            Kind::Digits => DIGITS.to_string(),
            Kind::Base62 => format!("{}{}{}", DIGITS, UPPER, LOWER),
            Kind::EmailLocal => format!("{}{}{}._%+-", DIGITS, UPPER, LOWER),
            Kind::Base64Url => format!("{}{}{}-_", UPPER, LOWER, DIGITS),
        };
        // Built-in charsets are statically known to be valid
        Self::from_symbols(&charset).expect("built-in alphabet must be valid")
    }

    /// Build an alphabet from an explicit charset
    pub fn from_symbols(charset: &str) -> Result<Self> {
        let symbols: Vec<char> = charset.chars().collect();
        if symbols.len() < 2 {
            return Err(FpeError::InvalidAlphabet(format!(
                "need at least 2 symbols, got {}",
                symbols.len()
            )));
        }

        let mut index = HashMap::with_capacity(symbols.len());
        for (i, &c) in symbols.iter().enumerate() {
            if index.insert(c, i as u32).is_some() {
                return Err(FpeError::InvalidAlphabet(format!(
                    "duplicate symbol {:?}",
                    c
                )));
            }
        }

        Ok(Self { symbols, index })
    }

    /// Radix: number of symbols
    pub fn size(&self) -> u32 {
        self.symbols.len() as u32
    }

    /// Membership test
    pub fn contains(&self, c: char) -> bool {
        self.index.contains_key(&c)
    }

    /// Index of a symbol, or `CharacterNotInAlphabet` if absent
    pub fn index_of(&self, c: char) -> Result<u32> {
        self.index
            .get(&c)
            .copied()
            .ok_or(FpeError::CharacterNotInAlphabet(c))
    }

    /// Symbol at an index, wrapping via floored modulo. Negative or
    /// overflowing indices are normalized into `[0, radix)` first; shift
    /// arithmetic in the cipher layer produces such intermediates.
    pub fn symbol_at(&self, i: i64) -> char {
        let radix = self.symbols.len() as i64;
        let wrapped = i.rem_euclid(radix);
        self.symbols[wrapped as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_alphabet() {
        let a = Alphabet::of(Kind::Digits);
        assert_eq!(a.size(), 10);
        assert!(a.contains('0'));
        assert!(a.contains('9'));
        assert!(!a.contains('a'));
        assert_eq!(a.index_of('3').unwrap(), 3);
    }

    #[test]
    fn test_base62_alphabet() {
        let a = Alphabet::of(Kind::Base62);
        assert_eq!(a.size(), 62);
        assert_eq!(a.index_of('0').unwrap(), 0);
        assert_eq!(a.index_of('A').unwrap(), 10);
        assert_eq!(a.index_of('a').unwrap(), 36);
    }

    #[test]
    fn test_email_local_alphabet() {
        let a = Alphabet::of(Kind::EmailLocal);
        assert_eq!(a.size(), 67);
        for c in ['.', '_', '%', '+', '-'] {
            assert!(a.contains(c), "email-local must contain {:?}", c);
        }
        assert!(!a.contains('@'));
    }

    #[test]
    fn test_base64url_alphabet() {
        let a = Alphabet::of(Kind::Base64Url);
        assert_eq!(a.size(), 64);
        assert!(a.contains('-'));
        assert!(a.contains('_'));
        assert!(!a.contains('='));
    }

    #[test]
    fn test_duplicate_symbol_rejected() {
        assert!(matches!(
            Alphabet::from_symbols("abca"),
            Err(FpeError::InvalidAlphabet(_))
        ));
    }

    #[test]
    fn test_too_small_rejected() {
        assert!(Alphabet::from_symbols("").is_err());
        assert!(Alphabet::from_symbols("x").is_err());
    }

    #[test]
    fn test_index_of_missing_char() {
        let a = Alphabet::of(Kind::Digits);
        assert!(matches!(
            a.index_of('x'),
            Err(FpeError::CharacterNotInAlphabet('x'))
        ));
    }

    #[test]
    fn test_symbol_at_wraps_negative() {
        let a = Alphabet::of(Kind::Digits);
        assert_eq!(a.symbol_at(0), '0');
        assert_eq!(a.symbol_at(9), '9');
        assert_eq!(a.symbol_at(10), '0');
        assert_eq!(a.symbol_at(-1), '9');
        assert_eq!(a.symbol_at(-10), '0');
        assert_eq!(a.symbol_at(-11), '9');
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("digits".parse::<Kind>().unwrap(), Kind::Digits);
        assert_eq!("BASE62".parse::<Kind>().unwrap(), Kind::Base62);
        assert_eq!("email-local".parse::<Kind>().unwrap(), Kind::EmailLocal);
        assert!("rot13".parse::<Kind>().is_err());
    }
}
