use solana_sdk::{
    address_lookup_table::{
        instruction::{create_lookup_table, extend_lookup_table},
        state::LookupTableMeta,
        AddressLookupTableAccount,
    },
    clock::Slot,
    instruction::Instruction,
    pubkey::Pubkey,
};

use crate::{
    client::{AsyncClient, Client, Confirmation},
    error::Error,
    poll,
    tx::submit_and_confirm,
};

/// Addresses appended by a single extend instruction.
pub const MAX_ADDRESSES_PER_EXTEND: usize = 30;

/// Tables are keyed by a slot slightly in the past, which the lookup table
/// program finds in the slot hashes sysvar.
pub const RECENT_SLOT_OFFSET: u64 = 1;

/// Extend instructions appending `addresses`, in order.
pub fn extend_instructions(
    table: Pubkey,
    authority: Pubkey,
    addresses: &[Pubkey],
) -> Vec<Instruction> {
    addresses
        .chunks(MAX_ADDRESSES_PER_EXTEND)
        .map(|chunk| extend_lookup_table(table, authority, Some(authority), chunk.to_vec()))
        .collect()
}

fn holds_all(table: &AddressLookupTableAccount, addresses: &[Pubkey]) -> bool {
    addresses
        .iter()
        .all(|address| table.addresses.contains(address))
}

/// Creates a table owned by the payer, fills it and waits until it can be
/// used for compilation.
pub async fn build<R: AsyncClient>(
    client: &Client<R>,
    addresses: &[Pubkey],
) -> Result<AddressLookupTableAccount, Error> {
    let payer = client.payer();
    let slot = client.rpc.slot().await?.saturating_sub(RECENT_SLOT_OFFSET);
    let (create_ix, table) = create_lookup_table(payer, payer, slot);
    log::info!("creating lookup table {} at slot {}", table, slot);
    submit_and_confirm(
        client,
        &[create_ix],
        &[],
        Confirmation::Finalized,
        "lookup table create",
    )
    .await?;
    for (i, ix) in extend_instructions(table, payer, addresses)
        .into_iter()
        .enumerate()
    {
        let label = format!("lookup table extend {}", i);
        submit_and_confirm(client, &[ix], &[], Confirmation::Finalized, &label).await?;
    }
    wait_until_ready(client, table, addresses).await
}

/// Polls until the table is visible and holds every address.
pub async fn wait_until_ready<R: AsyncClient>(
    client: &Client<R>,
    table: Pubkey,
    addresses: &[Pubkey],
) -> Result<AddressLookupTableAccount, Error> {
    let condition = format!("lookup table {} ready", table);
    let policy = &client.settings.lookup_table_policy;
    poll::until(policy, &condition, || async move {
        let account = client.get_lookup_table(&table).await?;
        Ok(account.filter(|account| holds_all(account, addresses)))
    })
    .await?
    .ok_or(Error::LookupTableNotReady(table))
}

/// Returns a table from an earlier run when it already holds every address
/// and has not been deactivated.
pub async fn reuse<R: AsyncClient>(
    client: &Client<R>,
    table: Pubkey,
    addresses: &[Pubkey],
) -> Result<Option<AddressLookupTableAccount>, Error> {
    match client.get_lookup_table_with_meta(&table).await? {
        Some((_, meta)) if !is_active(&meta) => {
            log::warn!(
                "lookup table {} deactivated at slot {}, building a new one",
                table,
                meta.deactivation_slot
            );
            Ok(None)
        }
        Some((account, _)) if holds_all(&account, addresses) => {
            log::info!("reusing lookup table {}", table);
            Ok(Some(account))
        }
        Some(_) => {
            log::warn!("lookup table {} is missing addresses, building a new one", table);
            Ok(None)
        }
        None => {
            log::warn!("lookup table {} not found, building a new one", table);
            Ok(None)
        }
    }
}

/// Deactivation is final; a deactivating table cannot be relied on.
fn is_active(meta: &LookupTableMeta) -> bool {
    meta.deactivation_slot == Slot::MAX
}
