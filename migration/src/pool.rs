use pump_meteora_api::{sdk::initialize_pool_with_config, state::MigrationAccounts};
use solana_sdk::{address_lookup_table::AddressLookupTableAccount, signature::Signature};

use crate::{
    client::{AsyncClient, Client, Confirmation},
    error::Error,
    tx::{compute_budget_ixs, submit_and_confirm},
};

/// Creates the AMM pool from the curve's reserves and waits for confirmation.
pub async fn create_pool<R: AsyncClient>(
    client: &Client<R>,
    accounts: &MigrationAccounts,
    table: &AddressLookupTableAccount,
) -> Result<Signature, Error> {
    log::info!("creating pool {} for {}", accounts.pool, accounts.mint);
    let settings = &client.settings;
    let [cu_limit_ix, cu_price_ix] = compute_budget_ixs(settings.cu_limit, settings.cu_price);
    let ix = initialize_pool_with_config(accounts);
    let final_ixs = [cu_limit_ix, cu_price_ix, ix];
    submit_and_confirm(
        client,
        &final_ixs,
        std::slice::from_ref(table),
        Confirmation::Confirmed,
        "create pool",
    )
    .await
}
