use thiserror::Error;

#[derive(Error, Debug)]
pub enum FpeError {
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Invalid alphabet: {0}")]
    InvalidAlphabet(String),

    #[error("Character not in alphabet: {0:?}")]
    CharacterNotInAlphabet(char),

    #[error("Length invariant violated: expected {expected} values, got {actual}")]
    LengthInvariant { expected: usize, actual: usize },

    #[error("Value {value} out of range for radix {radix}")]
    ValueOutOfRange { value: u32, radix: u32 },

    #[error("Unsupported field type: {0}")]
    UnsupportedField(String),

    #[error("Unsupported alphabet kind: {0}")]
    UnsupportedAlphabetKind(String),

    #[error("Opaque codec misconfigured: {0}")]
    OpaqueAlphabet(String),

    #[error("Opaque decode failed: {0}")]
    OpaqueDecode(String),
}

pub type Result<T> = std::result::Result<T, FpeError>;
