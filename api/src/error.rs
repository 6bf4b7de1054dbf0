use num_enum::{IntoPrimitive, TryFromPrimitive};
use solana_program::pubkey::Pubkey;
use thiserror::Error;

/// Custom error codes returned by the on-ledger programs the migration talks to.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u32)]
pub enum RemoteError {
    #[error("a mut constraint was violated")]
    ConstraintMut = 2000,
    #[error("a raw constraint was violated")]
    ConstraintRaw = 2003,
    #[error("an owner constraint was violated")]
    ConstraintOwner = 2004,
    #[error("a seeds constraint was violated")]
    ConstraintSeeds = 2006,
    #[error("failed to deserialize the account")]
    AccountDidNotDeserialize = 3003,
    #[error("the program expected this account to be already initialized")]
    AccountNotInitialized = 3012,
}

impl RemoteError {
    /// Seeds violations mean a client-side derivation disagrees with the program.
    pub fn is_derivation_mismatch(&self) -> bool {
        matches!(self, RemoteError::ConstraintSeeds)
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("account data too small: expected {expected} bytes, found {found}")]
    AccountDataTooSmall { expected: usize, found: usize },
    #[error("account discriminator mismatch")]
    InvalidDiscriminator,
    #[error("{name} must be within [0, 100], found {value}")]
    FeeRateOutOfBounds { name: &'static str, value: f64 },
    #[error("{name} range is inverted: min {min} > max {max}")]
    InvalidRange {
        name: &'static str,
        min: u64,
        max: u64,
    },
    #[error("config amount limits are malformed")]
    MalformedConfig,
    #[error("vault {vault} holds mint {found}, expected {expected}")]
    VaultMintMismatch {
        vault: Pubkey,
        expected: Pubkey,
        found: Pubkey,
    },
    #[error("bonding curve holds mint {found}, expected {expected}")]
    BondingCurveMintMismatch { expected: Pubkey, found: Pubkey },
}
