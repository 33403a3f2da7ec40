//! Splits a string into literal structure and an encodable core.
//!
//! `strip` walks the input once: characters outside the active alphabet
//! become `Literal` slots pinned to their original index, alphabet members
//! become `Encodable` slots carrying their alphabet index. The ordered
//! `Encodable` sub-sequence is the core handed to the cipher; `reinsert`
//! rebuilds a string of exactly the original length afterwards.

use crate::alphabet::Alphabet;
use crate::error::{FpeError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    /// A character outside the alphabet, kept verbatim at its position
    Literal { ch: char, index: usize },
    /// An alphabet member, carried as its alphabet index
    Encodable { value: u32, index: usize },
}

/// Split `text` into slots. Never fails: every character lands in exactly
/// one slot, so the slot count equals the character count.
pub fn strip(text: &str, alphabet: &Alphabet) -> Vec<Slot> {
    text.chars()
        .enumerate()
        .map(|(index, ch)| match alphabet.index_of(ch) {
            Ok(value) => Slot::Encodable { value, index },
            Err(_) => Slot::Literal { ch, index },
        })
        .collect()
}

/// The encodable sub-sequence, in order
pub fn core(slots: &[Slot]) -> Vec<u32> {
    slots
        .iter()
        .filter_map(|slot| match slot {
            Slot::Encodable { value, .. } => Some(*value),
            Slot::Literal { .. } => None,
        })
        .collect()
}

/// Reassemble a string from slots, drawing encodable positions from
/// `transformed` in order. A core length that disagrees with the slot list
/// is a fatal internal inconsistency, not a recoverable input error.
pub fn reinsert(slots: &[Slot], transformed: &[u32], alphabet: &Alphabet) -> Result<String> {
    let expected = slots
        .iter()
        .filter(|s| matches!(s, Slot::Encodable { .. }))
        .count();
    if transformed.len() != expected {
        return Err(FpeError::LengthInvariant {
            expected,
            actual: transformed.len(),
        });
    }

    let mut next = transformed.iter();
    let mut out = String::with_capacity(slots.len());
    for slot in slots {
        match slot {
            Slot::Literal { ch, .. } => out.push(*ch),
            Slot::Encodable { .. } => {
                // Guarded by the count check above
                let &value = next.next().expect("core exhausted");
                out.push(alphabet.symbol_at(value as i64));
            }
        }
    }
    Ok(out)
}
