use pump_meteora_api::{
    consts::QUOTE_MINT,
    sdk::{create_token_account, initialize_vault},
    state::{vault_lp_mint_pda, vault_pda, Vault, VaultLpMints},
};
use solana_sdk::{instruction::Instruction, pubkey::Pubkey};
use spl_associated_token_account::get_associated_token_address;

use crate::{
    client::{AsyncClient, Client},
    error::Error,
};

/// A vault and the LP mint the AMM must be pointed at.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedVault {
    pub vault: Pubkey,
    pub lp_mint: Pubkey,
    /// Set when the vault does not exist yet.
    pub create: Option<Instruction>,
}

/// Looks up the vault of `token_mint`, emitting an initialize instruction when absent.
///
/// An existing vault's recorded LP mint wins over the derived one, since older
/// vaults were not created with the PDA.
pub async fn get_or_create_vault<R: AsyncClient>(
    client: &Client<R>,
    token_mint: Pubkey,
) -> Result<ResolvedVault, Error> {
    let (vault, _) = vault_pda(token_mint);
    match client.rpc.account_data(&vault).await? {
        Some(data) => {
            let record = Vault::try_from_bytes_for(&data, vault, token_mint)?;
            log::info!("vault {} for {} already exists", vault, token_mint);
            Ok(ResolvedVault {
                vault,
                lp_mint: record.lp_mint,
                create: None,
            })
        }
        None => {
            log::info!("creating vault {} for {}", vault, token_mint);
            Ok(ResolvedVault {
                vault,
                lp_mint: vault_lp_mint_pda(vault).0,
                create: Some(initialize_vault(client.payer(), token_mint)),
            })
        }
    }
}

/// Looks up the associated token account of `owner` for `mint`.
pub async fn get_or_create_ata<R: AsyncClient>(
    client: &Client<R>,
    owner: Pubkey,
    mint: Pubkey,
) -> Result<(Pubkey, Option<Instruction>), Error> {
    let ata = get_associated_token_address(&owner, &mint);
    if client.exists(&ata).await? {
        log::info!("token account {} already exists", ata);
        return Ok((ata, None));
    }
    log::info!("creating token account {} ({} / {})", ata, owner, mint);
    Ok((ata, Some(create_token_account(client.payer(), owner, mint))))
}

#[derive(Clone, Debug, PartialEq)]
pub struct Provisioned {
    pub a_vault: ResolvedVault,
    pub b_vault: ResolvedVault,
    pub payer_token_a: Pubkey,
    pub payer_token_b: Pubkey,
    pub fee_receiver_token_b: Pubkey,
    /// Creations still missing, in submission order.
    pub instructions: Vec<Instruction>,
}

impl Provisioned {
    pub fn vault_lp_mints(&self) -> VaultLpMints {
        VaultLpMints {
            a: self.a_vault.lp_mint,
            b: self.b_vault.lp_mint,
        }
    }
}

/// Resolves both vaults and the three token accounts the pool creation reads.
pub async fn provision<R: AsyncClient>(
    client: &Client<R>,
    mint: Pubkey,
    fee_receiver: Pubkey,
) -> Result<Provisioned, Error> {
    let payer = client.payer();
    let (a_vault, b_vault) = futures::try_join!(
        get_or_create_vault(client, QUOTE_MINT),
        get_or_create_vault(client, mint),
    )?;
    let (token_a, token_b, fee_token_b) = futures::try_join!(
        get_or_create_ata(client, payer, QUOTE_MINT),
        get_or_create_ata(client, payer, mint),
        get_or_create_ata(client, fee_receiver, mint),
    )?;
    let (payer_token_a, create_a) = token_a;
    let (payer_token_b, create_b) = token_b;
    let (fee_receiver_token_b, create_fee) = fee_token_b;
    // same account when the payer receives the fees
    let create_fee = create_fee.filter(|_| fee_receiver_token_b.ne(&payer_token_b));
    let instructions = [
        a_vault.create.clone(),
        b_vault.create.clone(),
        create_a,
        create_b,
        create_fee,
    ]
    .into_iter()
    .flatten()
    .collect();
    Ok(Provisioned {
        a_vault,
        b_vault,
        payer_token_a,
        payer_token_b,
        fee_receiver_token_b,
        instructions,
    })
}
