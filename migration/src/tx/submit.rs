use solana_sdk::{
    address_lookup_table::AddressLookupTableAccount, instruction::Instruction,
    signature::Signature, transaction::VersionedTransaction,
};

use crate::{
    client::{AsyncClient, Client, Confirmation},
    error::Error,
    poll,
};

use super::compile;

/// Compiles, simulates, sends and waits until `commitment` is reached.
///
/// Nothing is sent when the simulation fails. Send failures retry the same
/// signed transaction; a confirmation timeout never triggers a resend.
pub async fn submit_and_confirm<R: AsyncClient>(
    client: &Client<R>,
    ixs: &[Instruction],
    luts: &[AddressLookupTableAccount],
    commitment: Confirmation,
    label: &str,
) -> Result<Signature, Error> {
    let hash = client.rpc.latest_blockhash().await?;
    let tx = compile(&client.keypair, ixs, luts, hash)?;
    simulate(client, &tx, label).await?;
    let sig = send(client, &tx, label).await?;
    log::info!("{}: sent {}", label, sig);
    confirm_transaction(client, &sig, commitment, label).await?;
    log::info!("{}: {} reached {:?}", label, sig, commitment);
    Ok(sig)
}

pub async fn simulate<R: AsyncClient>(
    client: &Client<R>,
    tx: &VersionedTransaction,
    label: &str,
) -> Result<(), Error> {
    let sim = client.rpc.simulate(tx).await?;
    match sim.err {
        None => {
            log::debug!("{}: simulation used {:?} units", label, sim.units_consumed);
            Ok(())
        }
        Some(err) => {
            log::error!("{}: simulation failed: {}", label, err);
            for line in sim.logs.iter() {
                log::error!("{}: {}", label, line);
            }
            Err(Error::from_simulation(err, sim.logs))
        }
    }
}

async fn send<R: AsyncClient>(
    client: &Client<R>,
    tx: &VersionedTransaction,
    label: &str,
) -> Result<Signature, Error> {
    let policy = &client.settings.send_policy;
    let mut attempt = 0;
    loop {
        match client.rpc.send(tx).await {
            Ok(sig) => return Ok(sig),
            Err(err) => {
                attempt += 1;
                if attempt >= policy.attempts {
                    log::error!("{}: giving up after {} sends: {:?}", label, attempt, err);
                    return Err(Error::SubmissionError(err));
                }
                log::warn!("{}: failed to submit transaction: {:?}", label, err);
                tokio::time::sleep(policy.delay(attempt - 1)).await;
            }
        }
    }
}

async fn confirm_transaction<R: AsyncClient>(
    client: &Client<R>,
    sig: &Signature,
    commitment: Confirmation,
    label: &str,
) -> Result<(), Error> {
    let condition = format!("{}: waiting for {:?}", label, commitment);
    let policy = &client.settings.confirm_policy;
    if poll::until(policy, &condition, || status(client, sig, commitment))
        .await?
        .is_some()
    {
        return Ok(());
    }
    // one last look before reporting a timeout
    match status(client, sig, commitment).await? {
        Some(()) => Ok(()),
        None => Err(Error::ConfirmationTimeout(*sig)),
    }
}

async fn status<R: AsyncClient>(
    client: &Client<R>,
    sig: &Signature,
    commitment: Confirmation,
) -> Result<Option<()>, Error> {
    let Some(status) = client.rpc.signature_status(sig).await? else {
        return Ok(None);
    };
    if let Some(err) = status.err {
        return Err(Error::ProgramRejection {
            signature: *sig,
            err,
        });
    }
    Ok((status.confirmation >= commitment).then_some(()))
}
