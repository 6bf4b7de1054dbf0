use solana_sdk::{instruction::Instruction, signature::Signature};

use crate::{
    client::{AsyncClient, Client, Confirmation},
    error::Error,
    tx::submit_and_confirm,
};

/// Lands the provisioning instructions in one transaction and waits for
/// finalization, so later steps read the created accounts.
pub async fn execute<R: AsyncClient>(
    client: &Client<R>,
    ixs: &[Instruction],
) -> Result<Option<Signature>, Error> {
    if ixs.is_empty() {
        log::info!("nothing to provision");
        return Ok(None);
    }
    log::info!("provisioning {} accounts", ixs.len());
    let sig = submit_and_confirm(client, ixs, &[], Confirmation::Finalized, "provision").await?;
    Ok(Some(sig))
}
