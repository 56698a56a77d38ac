use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BitError {
    #[error("truncated input: need {requested} bits, {remaining} remaining")]
    Truncated { requested: usize, remaining: usize },
    #[error("invalid bit count: {count} (expected 1..=64)")]
    InvalidCount { count: usize },
    #[error("value {value:#x} does not fit in {width} bits")]
    ValueTooWide { value: u64, width: usize },
    #[error("field carries {significant} significant bits, only {width} available")]
    FieldTooWide { significant: usize, width: usize },
    #[error("invalid hex input: {0}")]
    InvalidHex(String),
}
