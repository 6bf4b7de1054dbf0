use solana_program::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_program, sysvar,
};
use spl_associated_token_account::instruction::create_associated_token_account_idempotent;

use crate::{
    state::{token_vault_pda, vault_lp_mint_pda, vault_pda, MigrationAccounts},
    utils::instruction_discriminator,
};

/// Builds a vault initialize instruction for `token_mint`.
pub fn initialize_vault(payer: Pubkey, token_mint: Pubkey) -> Instruction {
    let (vault, _) = vault_pda(token_mint);
    let (token_vault, _) = token_vault_pda(vault);
    let (lp_mint, _) = vault_lp_mint_pda(vault);
    Instruction {
        program_id: crate::vault::ID,
        accounts: vec![
            AccountMeta::new(vault, false),
            AccountMeta::new(payer, true),
            AccountMeta::new(token_vault, false),
            AccountMeta::new_readonly(token_mint, false),
            AccountMeta::new(lp_mint, false),
            AccountMeta::new_readonly(sysvar::rent::ID, false),
            AccountMeta::new_readonly(spl_token::ID, false),
            AccountMeta::new_readonly(system_program::ID, false),
        ],
        data: instruction_discriminator("initialize").to_vec(),
    }
}

/// Builds an idempotent associated token account creation.
pub fn create_token_account(payer: Pubkey, owner: Pubkey, mint: Pubkey) -> Instruction {
    create_associated_token_account_idempotent(&payer, &owner, &mint, &spl_token::ID)
}

/// Builds an initialize pool with config instruction.
pub fn initialize_pool_with_config(accounts: &MigrationAccounts) -> Instruction {
    let a = accounts;
    Instruction {
        program_id: crate::ID,
        accounts: vec![
            AccountMeta::new_readonly(a.config, false),
            AccountMeta::new(a.team_wallet, false),
            AccountMeta::new_readonly(a.mint, false),
            AccountMeta::new(a.bonding_curve, false),
            AccountMeta::new(a.pool, false),
            AccountMeta::new_readonly(a.amm_config, false),
            AccountMeta::new(a.lp_mint, false),
            AccountMeta::new(a.a_vault_lp, false),
            AccountMeta::new(a.b_vault_lp, false),
            AccountMeta::new_readonly(a.quote_mint, false),
            AccountMeta::new(a.mint, false),
            AccountMeta::new(a.a_vault, false),
            AccountMeta::new(a.b_vault, false),
            AccountMeta::new(a.a_token_vault, false),
            AccountMeta::new(a.b_token_vault, false),
            AccountMeta::new(a.a_vault_lp_mint, false),
            AccountMeta::new(a.b_vault_lp_mint, false),
            AccountMeta::new(a.global_vault, false),
            AccountMeta::new(a.global_token_account, false),
            AccountMeta::new(a.payer_token_a, false),
            AccountMeta::new(a.payer_token_b, false),
            AccountMeta::new(a.payer_pool_lp, false),
            AccountMeta::new(a.protocol_token_a_fee, false),
            AccountMeta::new(a.protocol_token_b_fee, false),
            AccountMeta::new(a.payer, true),
            AccountMeta::new(a.lp_mint_metadata, false),
            AccountMeta::new_readonly(sysvar::rent::ID, false),
            AccountMeta::new_readonly(mpl_token_metadata::ID, false),
            AccountMeta::new_readonly(crate::vault::ID, false),
            AccountMeta::new_readonly(spl_token::ID, false),
            AccountMeta::new_readonly(spl_associated_token_account::ID, false),
            AccountMeta::new_readonly(system_program::ID, false),
            AccountMeta::new_readonly(a.event_authority, false),
            AccountMeta::new(crate::amm::ID, false),
        ],
        data: instruction_discriminator("initialize_pool_with_config").to_vec(),
    }
}

/// Builds a lock pool instruction, splitting the payer's pool LP between the
/// deployer and fee receiver escrows.
pub fn lock_pool(accounts: &MigrationAccounts) -> Instruction {
    let a = accounts;
    Instruction {
        program_id: crate::ID,
        accounts: vec![
            AccountMeta::new(a.bonding_curve, false),
            AccountMeta::new_readonly(a.mint, false),
            AccountMeta::new(a.global_vault, false),
            AccountMeta::new(a.pool, false),
            AccountMeta::new(a.lp_mint, false),
            AccountMeta::new(a.a_vault_lp, false),
            AccountMeta::new(a.b_vault_lp, false),
            AccountMeta::new_readonly(a.mint, false),
            AccountMeta::new(a.a_vault, false),
            AccountMeta::new(a.b_vault, false),
            AccountMeta::new(a.a_vault_lp_mint, false),
            AccountMeta::new(a.b_vault_lp_mint, false),
            AccountMeta::new(a.payer_pool_lp, false),
            AccountMeta::new(a.payer, true),
            AccountMeta::new(a.fee_receiver, false),
            AccountMeta::new_readonly(spl_token::ID, false),
            AccountMeta::new_readonly(spl_associated_token_account::ID, false),
            AccountMeta::new_readonly(system_program::ID, false),
            AccountMeta::new(a.lock_escrow, false),
            AccountMeta::new(a.fee_receiver_lock_escrow, false),
            AccountMeta::new(a.escrow_vault, false),
            AccountMeta::new(a.fee_receiver_escrow_vault, false),
            AccountMeta::new(crate::amm::ID, false),
            AccountMeta::new_readonly(a.event_authority, false),
        ],
        data: instruction_discriminator("lock_pool").to_vec(),
    }
}
