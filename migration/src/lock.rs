use pump_meteora_api::{sdk::lock_pool as lock_pool_ix, state::MigrationAccounts};
use solana_sdk::{address_lookup_table::AddressLookupTableAccount, signature::Signature};

use crate::{
    client::{AsyncClient, Client, Confirmation},
    error::Error,
    tx::{compute_budget_ixs, submit_and_confirm},
};

/// Locks the payer's pool LP into the deployer and fee receiver escrows.
///
/// Must only run once the pool creation is confirmed.
pub async fn lock_pool<R: AsyncClient>(
    client: &Client<R>,
    accounts: &MigrationAccounts,
    table: &AddressLookupTableAccount,
) -> Result<Signature, Error> {
    log::info!(
        "locking pool {} into escrows {} and {}",
        accounts.pool,
        accounts.lock_escrow,
        accounts.fee_receiver_lock_escrow
    );
    let settings = &client.settings;
    let [cu_limit_ix, cu_price_ix] = compute_budget_ixs(settings.cu_limit, settings.cu_price);
    let ix = lock_pool_ix(accounts);
    let final_ixs = [cu_limit_ix, cu_price_ix, ix];
    submit_and_confirm(
        client,
        &final_ixs,
        std::slice::from_ref(table),
        Confirmation::Confirmed,
        "lock pool",
    )
    .await
}
