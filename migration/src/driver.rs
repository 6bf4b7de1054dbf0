use pump_meteora_api::state::{bonding_curve_pda, MigrationAccounts};
use solana_sdk::{
    address_lookup_table::AddressLookupTableAccount, pubkey::Pubkey, signature::Signature,
};
use types::{LockEscrow, MigrationReport};

use crate::{
    client::{AsyncClient, Client},
    error::Error,
    lock::lock_pool,
    lookup_table,
    mint_lock::MintLocks,
    pool::create_pool,
    pretx,
    provision::{provision, Provisioned},
};

/// Progress of a migration. Transitions only move forward.
#[derive(Clone, Debug, PartialEq)]
pub enum Stage {
    /// Vaults or token accounts are missing.
    Init,
    VaultsAndAtasProvisioned,
    LookupTableReady(AddressLookupTableAccount),
    PoolCreated(AddressLookupTableAccount),
    PoolLocked(Signature),
    Done(Signature),
}

/// A single mint's migration, resumable from whatever the ledger already holds.
pub struct Migration {
    pub stage: Stage,
    pub accounts: MigrationAccounts,
    provisioned: Provisioned,
    pool_exists: bool,
    pre_transaction: Option<Signature>,
    lookup_table: Option<Pubkey>,
    create_pool: Option<Signature>,
}

impl Migration {
    /// Reads the ledger, resolves every address and picks the starting stage.
    pub async fn prepare<R: AsyncClient>(client: &Client<R>, mint: Pubkey) -> Result<Self, Error> {
        let (bonding_curve, _) = bonding_curve_pda(mint);
        let (config, curve) = futures::try_join!(
            client.get_config(),
            client.get_bonding_curve(&bonding_curve, &mint),
        )?;
        if !curve.is_completed() {
            return Err(Error::CurveNotCompleted(mint));
        }
        log::info!(
            "curve {} completed with {} lamports / {} tokens in reserve",
            bonding_curve,
            curve.reserve_lamport(),
            curve.reserve_token()
        );

        let fee_receiver = client.settings.fee_receiver.unwrap_or(config.team_wallet);
        if fee_receiver == client.payer() {
            return Err(Error::FeeReceiverIsPayer(fee_receiver));
        }
        let provisioned = provision(client, mint, fee_receiver).await?;
        let accounts = MigrationAccounts::resolve(
            client.payer(),
            mint,
            config.team_wallet,
            fee_receiver,
            client.settings.amm_config,
            provisioned.vault_lp_mints(),
        );

        let mut migration = Migration {
            stage: Stage::Init,
            accounts,
            provisioned,
            pool_exists: false,
            pre_transaction: None,
            lookup_table: None,
            create_pool: None,
        };
        migration.observe(client).await?;
        Ok(migration)
    }

    /// Moves the stage past every step the ledger shows as done.
    async fn observe<R: AsyncClient>(&mut self, client: &Client<R>) -> Result<(), Error> {
        // a pool can exist while token accounts are still missing, e.g. for a
        // new fee receiver
        let provisioning = !self.provisioned.instructions.is_empty();
        let addresses = self.accounts.lookup_table_addresses();
        let reuse_table = async {
            match client.settings.lookup_table {
                Some(table) if !provisioning => {
                    lookup_table::reuse(client, table, &addresses).await
                }
                _ => Ok(None),
            }
        };
        let (table, pool_exists) =
            futures::try_join!(reuse_table, client.exists(&self.accounts.pool))?;
        self.pool_exists = pool_exists;
        if pool_exists {
            log::info!("pool {} already exists", self.accounts.pool);
        }
        self.stage = match table {
            _ if provisioning => Stage::Init,
            Some(table) if pool_exists => Stage::PoolCreated(table),
            Some(table) => Stage::LookupTableReady(table),
            None => Stage::VaultsAndAtasProvisioned,
        };
        if let Stage::LookupTableReady(table) | Stage::PoolCreated(table) = &self.stage {
            self.lookup_table = Some(table.key);
        }
        Ok(())
    }

    /// Executes the current stage's step and moves to the next stage.
    pub async fn advance<R: AsyncClient>(&mut self, client: &Client<R>) -> Result<(), Error> {
        let next = match &self.stage {
            Stage::Init => {
                self.pre_transaction =
                    pretx::execute(client, &self.provisioned.instructions).await?;
                Stage::VaultsAndAtasProvisioned
            }
            Stage::VaultsAndAtasProvisioned => {
                let addresses = self.accounts.lookup_table_addresses();
                let reused = match client.settings.lookup_table {
                    Some(table) => lookup_table::reuse(client, table, &addresses).await?,
                    None => None,
                };
                let table = match reused {
                    Some(table) => table,
                    None => lookup_table::build(client, &addresses).await?,
                };
                self.lookup_table = Some(table.key);
                if self.pool_exists {
                    Stage::PoolCreated(table)
                } else {
                    Stage::LookupTableReady(table)
                }
            }
            Stage::LookupTableReady(table) => {
                let sig = create_pool(client, &self.accounts, table).await?;
                self.create_pool = Some(sig);
                Stage::PoolCreated(table.clone())
            }
            Stage::PoolCreated(table) => {
                let sig = lock_pool(client, &self.accounts, table).await?;
                Stage::PoolLocked(sig)
            }
            Stage::PoolLocked(sig) => {
                log::info!("migration of {} locked in {}", self.accounts.mint, sig);
                Stage::Done(*sig)
            }
            Stage::Done(_) => return Ok(()),
        };
        log::debug!("{}: {:?} -> {:?}", self.accounts.mint, self.stage, next);
        self.stage = next;
        Ok(())
    }

    /// Runs every remaining step.
    pub async fn run<R: AsyncClient>(mut self, client: &Client<R>) -> Result<MigrationReport, Error> {
        loop {
            if let Stage::Done(sig) = self.stage {
                return Ok(self.report(sig));
            }
            self.advance(client).await?;
        }
    }

    fn report(&self, lock_pool: Signature) -> MigrationReport {
        let a = &self.accounts;
        MigrationReport {
            mint: a.mint,
            pool: a.pool,
            lp_mint: a.lp_mint,
            lookup_table: self.lookup_table.unwrap_or_default(),
            pre_transaction: self.pre_transaction,
            create_pool: self.create_pool,
            lock_pool,
            lock_escrows: [
                LockEscrow {
                    owner: a.payer,
                    escrow: a.lock_escrow,
                    vault: a.escrow_vault,
                },
                LockEscrow {
                    owner: a.fee_receiver,
                    escrow: a.fee_receiver_lock_escrow,
                    vault: a.fee_receiver_escrow_vault,
                },
            ],
        }
    }
}

/// Migrates `mint` and returns the lock transaction signature.
pub async fn migrate<R: AsyncClient>(client: &Client<R>, mint: Pubkey) -> Result<Signature, Error> {
    let report = migrate_with_report(client, mint).await?;
    Ok(report.lock_pool)
}

pub async fn migrate_with_report<R: AsyncClient>(
    client: &Client<R>,
    mint: Pubkey,
) -> Result<MigrationReport, Error> {
    log::info!("migrating {}", mint);
    let migration = Migration::prepare(client, mint).await?;
    log::info!("starting at {:?}", migration.stage);
    migration.run(client).await
}

/// Like [`migrate_with_report`], holding the mint's lock for the whole run.
pub async fn migrate_exclusive<R: AsyncClient>(
    client: &Client<R>,
    locks: &MintLocks,
    mint: Pubkey,
) -> Result<MigrationReport, Error> {
    let _guard = locks.acquire(mint).await;
    migrate_with_report(client, mint).await
}
