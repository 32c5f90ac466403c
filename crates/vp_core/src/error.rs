use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("insufficient players: need at least 2, found {found}")]
    InsufficientPlayers { found: usize },

    #[error("invalid seed {seed}: seeds congruent to 0 mod 2^31-1 degenerate the generator")]
    InvalidSeed { seed: u64 },

    #[error("schema version mismatch: found {found}, expected {expected}")]
    SchemaVersion { found: u8, expected: u8 },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
