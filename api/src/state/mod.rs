mod accounts;
mod bonding_curve;
mod config;
mod vault;

pub use accounts::*;
pub use bonding_curve::*;
pub use config::*;
pub use vault::*;

use solana_program::pubkey::Pubkey;

use crate::consts::*;

pub fn config_pda() -> (Pubkey, u8) {
    Pubkey::find_program_address(&[CONFIG], &crate::ID)
}

pub fn bonding_curve_pda(mint: Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[BONDING_CURVE, mint.as_ref()], &crate::ID)
}

pub fn global_vault_pda() -> (Pubkey, u8) {
    Pubkey::find_program_address(&[GLOBAL], &crate::ID)
}

/// The global vault's token account for the curve mint.
pub fn global_token_account(mint: Pubkey) -> Pubkey {
    spl_associated_token_account::get_associated_token_address(&GLOBAL_VAULT_ADDRESS, &mint)
}

pub fn vault_pda(token_mint: Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[
            VAULT_PREFIX,
            token_mint.as_ref(),
            VAULT_BASE_ADDRESS.as_ref(),
        ],
        &crate::vault::ID,
    )
}

pub fn token_vault_pda(vault: Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[TOKEN_VAULT_PREFIX, vault.as_ref()], &crate::vault::ID)
}

/// LP mint of a vault created today. Vaults that already exist record their own
/// LP mint, which must be preferred over this derivation.
pub fn vault_lp_mint_pda(vault: Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[LP_MINT_PREFIX, vault.as_ref()], &crate::vault::ID)
}

/// Permissionless pool under `config`. Mints are ordered largest first, so the
/// address does not depend on which side is passed as token A.
pub fn pool_pda(token_a: Pubkey, token_b: Pubkey, config: Pubkey) -> (Pubkey, u8) {
    let (first, second) = if token_a > token_b {
        (token_a, token_b)
    } else {
        (token_b, token_a)
    };
    Pubkey::find_program_address(
        &[first.as_ref(), second.as_ref(), config.as_ref()],
        &crate::amm::ID,
    )
}

pub fn pool_lp_mint_pda(pool: Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[LP_MINT_PREFIX, pool.as_ref()], &crate::amm::ID)
}

/// The pool's holding of a vault's LP token.
pub fn pool_vault_lp_pda(vault: Pubkey, pool: Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[vault.as_ref(), pool.as_ref()], &crate::amm::ID)
}

pub fn protocol_fee_pda(mint: Pubkey, pool: Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[FEE_PREFIX, mint.as_ref(), pool.as_ref()], &crate::amm::ID)
}

pub fn lock_escrow_pda(pool: Pubkey, owner: Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[LOCK_ESCROW, pool.as_ref(), owner.as_ref()], &crate::amm::ID)
}

pub fn event_authority_pda() -> (Pubkey, u8) {
    Pubkey::find_program_address(&[EVENT_AUTHORITY], &crate::amm::ID)
}

pub fn lp_mint_metadata_pda(lp_mint: Pubkey) -> (Pubkey, u8) {
    mpl_token_metadata::accounts::Metadata::find_pda(&lp_mint)
}
