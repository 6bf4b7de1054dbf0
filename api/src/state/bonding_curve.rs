use bytemuck::{Pod, Zeroable};
use solana_program::pubkey::Pubkey;
use static_assertions::const_assert_eq;

use crate::{error::ApiError, utils::AnchorAccount};

/// BondingCurve is the pre-migration market of a single mint.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct BondingCurve {
    pub token_mint: Pubkey,
    pub creator: Pubkey,

    pub init_lamport: [u8; 8],

    pub reserve_lamport: [u8; 8],
    pub reserve_token: [u8; 8],

    /// Set once the curve hit its limit; only completed curves may migrate.
    pub is_completed: u8,
}

const_assert_eq!(std::mem::size_of::<BondingCurve>(), 89);

impl AnchorAccount for BondingCurve {
    const NAME: &'static str = "BondingCurve";
}

impl BondingCurve {
    pub fn try_from_bytes_for(data: &[u8], mint: Pubkey) -> Result<&Self, ApiError> {
        let curve = BondingCurve::try_from_bytes(data)?;
        if curve.token_mint.ne(&mint) {
            return Err(ApiError::BondingCurveMintMismatch {
                expected: mint,
                found: curve.token_mint,
            });
        }
        Ok(curve)
    }

    pub fn is_completed(&self) -> bool {
        self.is_completed != 0
    }

    pub fn reserve_lamport(&self) -> u64 {
        u64::from_le_bytes(self.reserve_lamport)
    }

    pub fn reserve_token(&self) -> u64 {
        u64::from_le_bytes(self.reserve_token)
    }
}
