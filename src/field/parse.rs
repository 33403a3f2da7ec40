//! Structural parsers for the built-in field types.
//!
//! Each parser reproduces the split boundaries of a fixed capture-group
//! pattern: the input either matches as a whole and comes back as an
//! ordered segment list, or it does not and the caller passes it through
//! untouched. Partial matches never occur.

use crate::alphabet::{Alphabet, Kind};
use crate::field::{FieldKind, FieldOptions, SegmentRule};

/// One capture group: its text plus the transform bound to it, if any
#[derive(Debug)]
pub struct Segment {
    pub text: String,
    pub rule: Option<SegmentRule>,
}

impl Segment {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            rule: None,
        }
    }

    fn ruled(text: &str, kind: Kind, tweak: String) -> Self {
        Self {
            text: text.to_string(),
            rule: Some(SegmentRule {
                alphabet: Alphabet::of(kind),
                tweak,
            }),
        }
    }
}

#[derive(Debug)]
pub enum ParsedField {
    Matched(Vec<Segment>),
    NoMatch,
}

/// Match `text` against the structural pattern for `kind`
pub fn parse(kind: FieldKind, text: &str, options: &FieldOptions) -> ParsedField {
    match kind {
        FieldKind::Email => parse_email(text, options),
        FieldKind::Phone => parse_phone(text, options),
        FieldKind::NationalId => parse_national_id(text, options),
        FieldKind::PaymentCard => parse_payment_card(text, options),
        FieldKind::Passport => parse_passport(text, options),
        FieldKind::Generic => parse_generic(text, options),
    }
}

fn is_email_local_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '%' | '+' | '-')
}

fn is_domain_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '.' || c == '-'
}

/// `local @ domain` where local is `[A-Za-z0-9._%+-]+` and domain is
/// `[A-Za-z0-9.-]+` ending in a dot plus at least two letters
fn parse_email(text: &str, options: &FieldOptions) -> ParsedField {
    let Some((local, domain)) = text.split_once('@') else {
        return ParsedField::NoMatch;
    };
    if local.is_empty() || !local.chars().all(is_email_local_char) {
        return ParsedField::NoMatch;
    }
    if !domain.chars().all(is_domain_char) {
        return ParsedField::NoMatch;
    }
    let Some((head, top)) = domain.rsplit_once('.') else {
        return ParsedField::NoMatch;
    };
    if head.is_empty() || top.len() < 2 || !top.chars().all(|c| c.is_ascii_alphabetic()) {
        return ParsedField::NoMatch;
    }

    let tweak = options.tweak_or("email:v1");
    ParsedField::Matched(vec![
        Segment::ruled(local, Kind::EmailLocal, tweak),
        Segment::plain(&format!("@{}", domain)),
    ])
}

/// An 11-character number: `keep_prefix` digits, an alphanumeric middle,
/// `keep_suffix` digits
fn parse_phone(text: &str, options: &FieldOptions) -> ParsedField {
    const PHONE_LEN: usize = 11;

    let chars: Vec<char> = text.chars().collect();
    let prefix = options.keep_prefix;
    let suffix = options.keep_suffix;
    if chars.len() != PHONE_LEN || prefix + suffix > PHONE_LEN {
        return ParsedField::NoMatch;
    }

    let mid_end = PHONE_LEN - suffix;
    if !chars[..prefix].iter().all(|c| c.is_ascii_digit())
        || !chars[prefix..mid_end].iter().all(|c| c.is_ascii_alphanumeric())
        || !chars[mid_end..].iter().all(|c| c.is_ascii_digit())
    {
        return ParsedField::NoMatch;
    }

    let text: String = chars.iter().collect();
    let tweak = options.tweak_or("phone:v1");
    ParsedField::Matched(vec![
        Segment::plain(&text[..prefix]),
        Segment::ruled(&text[prefix..mid_end], options.phone_alphabet, tweak),
        Segment::plain(&text[mid_end..]),
    ])
}

/// 18-character national ID: 6-digit region, 8-digit birth date, 3-digit
/// sequence, check symbol `[0-9Xx]`. A leading zero is accepted even though
/// issued IDs never carry one: the encrypted region code may start with 0
/// and still has to parse for decryption.
fn parse_national_id(text: &str, options: &FieldOptions) -> ParsedField {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() != 18 {
        return ParsedField::NoMatch;
    }
    if !chars[..17].iter().all(|c| c.is_ascii_digit()) {
        return ParsedField::NoMatch;
    }
    let check = chars[17];
    if !check.is_ascii_digit() && check != 'X' && check != 'x' {
        return ParsedField::NoMatch;
    }

    let base = options.tweak_or("cnid");
    ParsedField::Matched(vec![
        Segment::ruled(&text[..6], Kind::Digits, format!("{}:addr", base)),
        Segment::ruled(&text[6..14], Kind::Digits, format!("{}:birth", base)),
        Segment::ruled(&text[14..17], Kind::Digits, format!("{}:seq", base)),
        // check symbol is never touched
        Segment::plain(&text[17..]),
    ])
}

/// 16-digit payment card: 6-digit BIN, 9-digit middle, 1-digit check
fn parse_payment_card(text: &str, options: &FieldOptions) -> ParsedField {
    if text.len() != 16 || !text.chars().all(|c| c.is_ascii_digit()) {
        return ParsedField::NoMatch;
    }

    let base = options.tweak_or("cc");
    ParsedField::Matched(vec![
        Segment::plain(&text[..6]),
        Segment::ruled(&text[6..15], Kind::Digits, format!("{}:mid", base)),
        Segment::plain(&text[15..]),
    ])
}

/// 1-2 leading letters kept, trailing 7-8 digits encrypted
fn parse_passport(text: &str, options: &FieldOptions) -> ParsedField {
    let letters = text.chars().take_while(|c| c.is_ascii_alphabetic()).count();
    if !(1..=2).contains(&letters) {
        return ParsedField::NoMatch;
    }
    let digits = &text[letters..];
    if !(7..=8).contains(&digits.len()) || !digits.chars().all(|c| c.is_ascii_digit()) {
        return ParsedField::NoMatch;
    }

    let base = options.tweak_or("passport");
    ParsedField::Matched(vec![
        Segment::plain(&text[..letters]),
        Segment::ruled(digits, Kind::Digits, format!("{}:num", base)),
    ])
}

/// The whole input as one base62 group; always matches
fn parse_generic(text: &str, options: &FieldOptions) -> ParsedField {
    let tweak = options.tweak_or("generic:v1");
    ParsedField::Matched(vec![Segment::ruled(text, Kind::Base62, tweak)])
}
