use bytemuck::{Pod, Zeroable};
use solana_program::pubkey::Pubkey;
use static_assertions::const_assert_eq;

use crate::{error::ApiError, utils::AnchorAccount};

/// Leading fields of a Meteora vault record. The strategy list that follows is
/// not needed by the migration.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vault {
    pub enabled: u8,
    pub vault_bump: u8,
    pub token_vault_bump: u8,
    pub total_amount: [u8; 8],

    /// Token account holding the vault's liquidity.
    pub token_vault: Pubkey,

    pub fee_vault: Pubkey,

    pub token_mint: Pubkey,

    /// LP mint of this vault. Older vaults were created with an LP mint that is
    /// not the `lp_mint` PDA, so this field is authoritative.
    pub lp_mint: Pubkey,
}

const_assert_eq!(std::mem::size_of::<Vault>(), 139);

impl AnchorAccount for Vault {
    const NAME: &'static str = "Vault";
}

impl Vault {
    /// Decodes the record and checks it belongs to `token_mint`.
    pub fn try_from_bytes_for(
        data: &[u8],
        vault: Pubkey,
        token_mint: Pubkey,
    ) -> Result<&Self, ApiError> {
        let record = Vault::try_from_bytes(data)?;
        if record.token_mint.ne(&token_mint) {
            return Err(ApiError::VaultMintMismatch {
                vault,
                expected: token_mint,
                found: record.token_mint,
            });
        }
        Ok(record)
    }
}
