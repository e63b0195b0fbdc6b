use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("bitting has {got} cuts, expected {expected}")]
    LengthMismatch { expected: usize, got: usize },

    #[error("cut depth {depth} at pin {pin} is outside 0..{cut_count}")]
    DepthOutOfRange {
        pin: usize,
        depth: u8,
        cut_count: u8,
    },

    #[error("cut count must be at least 2, got {got}")]
    CutCountTooSmall { got: u8 },

    #[error("a lock needs at least one pin")]
    NoPins,

    #[error("keyspace {cut_count}^{num_pins} does not fit in 128 bits")]
    KeyspaceOverflow { num_pins: usize, cut_count: u8 },

    #[error(
        "keyspace of {combinations} bittings exceeds the exhaustive scan limit \
         of {limit}; pass ScanOptions::ignore_limit to scan anyway"
    )]
    KeyspaceTooLarge { combinations: u128, limit: u128 },

    #[error("scan cancelled")]
    Cancelled,

    #[error("invalid bitting: {0}")]
    InvalidBitting(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AuditError>;
