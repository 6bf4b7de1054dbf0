use std::sync::Arc;

use async_trait::async_trait;
use pump_meteora_api::state::{config_pda, BondingCurve, Config};
use solana_client::{
    client_error::Result as ClientResult,
    nonblocking::rpc_client::RpcClient,
    rpc_config::{RpcSendTransactionConfig, RpcSimulateTransactionConfig},
};
use solana_sdk::{
    address_lookup_table::{
        state::{AddressLookupTable, LookupTableMeta},
        AddressLookupTableAccount,
    },
    clock::Slot,
    commitment_config::CommitmentConfig,
    hash::Hash,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::{EncodableKey, Signer},
    transaction::{TransactionError, VersionedTransaction},
};
use solana_transaction_status::TransactionConfirmationStatus;

use crate::{error::Error, settings::Settings};

/// Commitment reached by a landed transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Confirmation {
    Processed,
    Confirmed,
    Finalized,
}

impl From<TransactionConfirmationStatus> for Confirmation {
    fn from(status: TransactionConfirmationStatus) -> Self {
        match status {
            TransactionConfirmationStatus::Processed => Confirmation::Processed,
            TransactionConfirmationStatus::Confirmed => Confirmation::Confirmed,
            TransactionConfirmationStatus::Finalized => Confirmation::Finalized,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignatureStatus {
    pub confirmation: Confirmation,
    /// Set when the transaction landed but its instructions failed.
    pub err: Option<TransactionError>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Simulation {
    pub err: Option<TransactionError>,
    pub logs: Vec<String>,
    pub units_consumed: Option<u64>,
}

/// The ledger reads and writes a migration needs.
#[async_trait]
pub trait AsyncClient: Send + Sync {
    /// Account data, `None` when the account does not exist.
    async fn account_data(&self, address: &Pubkey) -> ClientResult<Option<Vec<u8>>>;
    async fn latest_blockhash(&self) -> ClientResult<Hash>;
    async fn slot(&self) -> ClientResult<Slot>;
    async fn simulate(&self, tx: &VersionedTransaction) -> ClientResult<Simulation>;
    async fn send(&self, tx: &VersionedTransaction) -> ClientResult<Signature>;
    async fn signature_status(&self, signature: &Signature)
        -> ClientResult<Option<SignatureStatus>>;
}

#[async_trait]
impl AsyncClient for RpcClient {
    async fn account_data(&self, address: &Pubkey) -> ClientResult<Option<Vec<u8>>> {
        let account = self
            .get_account_with_commitment(address, self.commitment())
            .await?
            .value;
        Ok(account.map(|account| account.data))
    }
    async fn latest_blockhash(&self) -> ClientResult<Hash> {
        self.get_latest_blockhash().await
    }
    async fn slot(&self) -> ClientResult<Slot> {
        self.get_slot().await
    }
    async fn simulate(&self, tx: &VersionedTransaction) -> ClientResult<Simulation> {
        let config = RpcSimulateTransactionConfig {
            sig_verify: true,
            commitment: Some(self.commitment()),
            ..Default::default()
        };
        let result = self.simulate_transaction_with_config(tx, config).await?.value;
        Ok(Simulation {
            err: result.err,
            logs: result.logs.unwrap_or_default(),
            units_consumed: result.units_consumed,
        })
    }
    async fn send(&self, tx: &VersionedTransaction) -> ClientResult<Signature> {
        // already simulated
        let config = RpcSendTransactionConfig {
            skip_preflight: true,
            ..Default::default()
        };
        self.send_transaction_with_config(tx, config).await
    }
    async fn signature_status(
        &self,
        signature: &Signature,
    ) -> ClientResult<Option<SignatureStatus>> {
        let statuses = self.get_signature_statuses(&[*signature]).await?.value;
        let status = statuses.into_iter().next().flatten();
        Ok(status.map(|status| SignatureStatus {
            confirmation: status.confirmation_status().into(),
            err: status.err,
        }))
    }
}

/// Ledger client, payer and settings of a migration run.
pub struct Client<R = RpcClient> {
    pub rpc: R,
    pub keypair: Arc<Keypair>,
    pub settings: Settings,
}

impl Client<RpcClient> {
    pub fn from_settings(settings: Settings) -> Result<Self, Error> {
        let keypair = Keypair::read_from_file(&settings.keypair_path)
            .map_err(|_| Error::KeypairRead(settings.keypair_path.clone()))?;
        let rpc =
            RpcClient::new_with_commitment(settings.rpc_url.clone(), CommitmentConfig::confirmed());
        Ok(Client::new(rpc, Arc::new(keypair), settings))
    }
}

impl<R: AsyncClient> Client<R> {
    pub fn new(rpc: R, keypair: Arc<Keypair>, settings: Settings) -> Self {
        Self {
            rpc,
            keypair,
            settings,
        }
    }

    pub fn payer(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    pub async fn exists(&self, address: &Pubkey) -> Result<bool, Error> {
        Ok(self.rpc.account_data(address).await?.is_some())
    }

    pub async fn get_config(&self) -> Result<Config, Error> {
        let (address, _) = config_pda();
        let data = self
            .rpc
            .account_data(&address)
            .await?
            .ok_or(Error::MissingConfig(address))?;
        Ok(Config::try_from_bytes(&data)?)
    }

    pub async fn get_bonding_curve(
        &self,
        address: &Pubkey,
        mint: &Pubkey,
    ) -> Result<BondingCurve, Error> {
        let data = self
            .rpc
            .account_data(address)
            .await?
            .ok_or(Error::MissingBondingCurve(*address))?;
        let curve = BondingCurve::try_from_bytes_for(&data, *mint)?;
        Ok(*curve)
    }

    pub async fn get_lookup_table(
        &self,
        address: &Pubkey,
    ) -> Result<Option<AddressLookupTableAccount>, Error> {
        let table = self.get_lookup_table_with_meta(address).await?;
        Ok(table.map(|(account, _)| account))
    }

    /// The table with its meta, which carries the deactivation slot.
    pub async fn get_lookup_table_with_meta(
        &self,
        address: &Pubkey,
    ) -> Result<Option<(AddressLookupTableAccount, LookupTableMeta)>, Error> {
        let Some(data) = self.rpc.account_data(address).await? else {
            return Ok(None);
        };
        let table = AddressLookupTable::deserialize(data.as_slice())?;
        let account = AddressLookupTableAccount {
            key: *address,
            addresses: table.addresses.to_vec(),
        };
        Ok(Some((account, table.meta)))
    }
}
