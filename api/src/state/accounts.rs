use solana_program::pubkey::Pubkey;
use spl_associated_token_account::get_associated_token_address;

use super::*;
use crate::consts::*;

/// Every address touched by the pool creation and pool lock instructions of a
/// single mint's migration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MigrationAccounts {
    pub payer: Pubkey,
    pub mint: Pubkey,
    pub quote_mint: Pubkey,
    pub team_wallet: Pubkey,
    pub fee_receiver: Pubkey,
    pub amm_config: Pubkey,

    // bonding curve program
    pub config: Pubkey,
    pub bonding_curve: Pubkey,
    pub global_vault: Pubkey,
    pub global_token_account: Pubkey,

    // vault program
    pub a_vault: Pubkey,
    pub b_vault: Pubkey,
    pub a_token_vault: Pubkey,
    pub b_token_vault: Pubkey,
    pub a_vault_lp_mint: Pubkey,
    pub b_vault_lp_mint: Pubkey,

    // amm program
    pub pool: Pubkey,
    pub lp_mint: Pubkey,
    pub a_vault_lp: Pubkey,
    pub b_vault_lp: Pubkey,
    pub protocol_token_a_fee: Pubkey,
    pub protocol_token_b_fee: Pubkey,
    pub lp_mint_metadata: Pubkey,
    pub event_authority: Pubkey,
    pub lock_escrow: Pubkey,
    pub fee_receiver_lock_escrow: Pubkey,

    // token accounts
    pub payer_token_a: Pubkey,
    pub payer_token_b: Pubkey,
    pub payer_pool_lp: Pubkey,
    pub fee_receiver_token_b: Pubkey,
    pub escrow_vault: Pubkey,
    pub fee_receiver_escrow_vault: Pubkey,
}

/// The two vault LP mints, as recorded on-ledger or freshly derived.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VaultLpMints {
    pub a: Pubkey,
    pub b: Pubkey,
}

impl MigrationAccounts {
    pub fn resolve(
        payer: Pubkey,
        mint: Pubkey,
        team_wallet: Pubkey,
        fee_receiver: Pubkey,
        amm_config: Pubkey,
        vault_lp_mints: VaultLpMints,
    ) -> Self {
        let quote_mint = QUOTE_MINT;
        let (a_vault, _) = vault_pda(quote_mint);
        let (b_vault, _) = vault_pda(mint);
        let (pool, _) = pool_pda(quote_mint, mint, amm_config);
        let (lp_mint, _) = pool_lp_mint_pda(pool);
        let (lock_escrow, _) = lock_escrow_pda(pool, payer);
        let (fee_receiver_lock_escrow, _) = lock_escrow_pda(pool, fee_receiver);
        Self {
            payer,
            mint,
            quote_mint,
            team_wallet,
            fee_receiver,
            amm_config,
            config: CONFIG_ADDRESS,
            bonding_curve: bonding_curve_pda(mint).0,
            global_vault: GLOBAL_VAULT_ADDRESS,
            global_token_account: global_token_account(mint),
            a_vault,
            b_vault,
            a_token_vault: token_vault_pda(a_vault).0,
            b_token_vault: token_vault_pda(b_vault).0,
            a_vault_lp_mint: vault_lp_mints.a,
            b_vault_lp_mint: vault_lp_mints.b,
            pool,
            lp_mint,
            a_vault_lp: pool_vault_lp_pda(a_vault, pool).0,
            b_vault_lp: pool_vault_lp_pda(b_vault, pool).0,
            protocol_token_a_fee: protocol_fee_pda(quote_mint, pool).0,
            protocol_token_b_fee: protocol_fee_pda(mint, pool).0,
            lp_mint_metadata: lp_mint_metadata_pda(lp_mint).0,
            event_authority: EVENT_AUTHORITY_ADDRESS,
            lock_escrow,
            fee_receiver_lock_escrow,
            payer_token_a: get_associated_token_address(&payer, &quote_mint),
            payer_token_b: get_associated_token_address(&payer, &mint),
            payer_pool_lp: get_associated_token_address(&payer, &lp_mint),
            fee_receiver_token_b: get_associated_token_address(&fee_receiver, &mint),
            escrow_vault: get_associated_token_address(&lock_escrow, &lp_mint),
            fee_receiver_escrow_vault: get_associated_token_address(
                &fee_receiver_lock_escrow,
                &lp_mint,
            ),
        }
    }

    /// Contents of the migration's address lookup table: every state account
    /// of both instructions. Programs, sysvars and the signer stay static keys.
    pub fn lookup_table_addresses(&self) -> Vec<Pubkey> {
        let candidates = [
            self.config,
            self.team_wallet,
            self.mint,
            self.bonding_curve,
            self.pool,
            self.amm_config,
            self.lp_mint,
            self.a_vault_lp,
            self.b_vault_lp,
            self.quote_mint,
            self.a_vault,
            self.b_vault,
            self.a_token_vault,
            self.b_token_vault,
            self.a_vault_lp_mint,
            self.b_vault_lp_mint,
            self.global_vault,
            self.global_token_account,
            self.payer_token_a,
            self.payer_token_b,
            self.payer_pool_lp,
            self.protocol_token_a_fee,
            self.protocol_token_b_fee,
            self.lp_mint_metadata,
            self.event_authority,
            self.fee_receiver,
            self.lock_escrow,
            self.fee_receiver_lock_escrow,
            self.escrow_vault,
            self.fee_receiver_escrow_vault,
        ];
        let mut addresses = Vec::with_capacity(candidates.len());
        for address in candidates {
            if address.ne(&self.payer) && !addresses.contains(&address) {
                addresses.push(address);
            }
        }
        addresses
    }
}
