use std::{env::VarError, str::FromStr, time::Duration};

use pump_meteora_api::consts::DEFAULT_AMM_CONFIG;
use solana_sdk::pubkey::Pubkey;

use crate::{error::Error, poll::PollPolicy};

/// Default compute unit limit of the pool creation and lock transactions.
pub const DEFAULT_CU_LIMIT: u32 = 1_000_000;

/// Default priority fee in micro lamports per compute unit.
pub const DEFAULT_CU_PRICE: u64 = 50_000;

/// Runtime settings of a migration, read from the environment.
#[derive(Clone, Debug)]
pub struct Settings {
    pub rpc_url: String,
    pub keypair_path: String,

    /// Beneficiary of the second lock escrow. Falls back to the config's team wallet.
    pub fee_receiver: Option<Pubkey>,

    /// AMM config the pool is created under.
    pub amm_config: Pubkey,

    /// Lookup table left behind by an earlier run, reused when complete.
    pub lookup_table: Option<Pubkey>,

    pub cu_limit: u32,
    pub cu_price: u64,

    /// Retries of a send that failed in transport.
    pub send_policy: PollPolicy,

    /// Signature status checks before a confirmation wait times out.
    pub confirm_policy: PollPolicy,

    /// Checks until a freshly extended lookup table is visible to the node.
    pub lookup_table_policy: PollPolicy,
}

impl Settings {
    pub fn new(rpc_url: String, keypair_path: String) -> Self {
        Self {
            rpc_url,
            keypair_path,
            fee_receiver: None,
            amm_config: DEFAULT_AMM_CONFIG,
            lookup_table: None,
            cu_limit: DEFAULT_CU_LIMIT,
            cu_price: DEFAULT_CU_PRICE,
            send_policy: PollPolicy::new(5, Duration::from_millis(500), Duration::from_secs(4)),
            confirm_policy: PollPolicy::new(30, Duration::from_secs(1), Duration::from_secs(2)),
            lookup_table_policy: PollPolicy::new(
                20,
                Duration::from_secs(1),
                Duration::from_secs(4),
            ),
        }
    }

    pub fn from_env() -> Result<Self, Error> {
        let mut settings = Settings::new(rpc_url()?, keypair_path()?);
        settings.fee_receiver = optional_pubkey("FEE_RECEIVER")?;
        settings.lookup_table = optional_pubkey("LOOKUP_TABLE")?;
        if let Some(amm_config) = optional_pubkey("AMM_CONFIG")? {
            settings.amm_config = amm_config;
        }
        if let Some(cu_limit) = optional_var("CU_LIMIT")? {
            settings.cu_limit = cu_limit.parse()?;
        }
        if let Some(cu_price) = optional_var("CU_PRICE")? {
            settings.cu_price = cu_price.parse()?;
        }
        Ok(settings)
    }
}

fn rpc_url() -> Result<String, Error> {
    std::env::var("RPC_URL").map_err(From::from)
}

fn keypair_path() -> Result<String, Error> {
    std::env::var("KEYPAIR_PATH").map_err(From::from)
}

fn optional_var(key: &str) -> Result<Option<String>, Error> {
    match std::env::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

fn optional_pubkey(key: &str) -> Result<Option<Pubkey>, Error> {
    optional_var(key)?
        .map(|value| Pubkey::from_str(value.trim()))
        .transpose()
        .map_err(From::from)
}

/// Parses a mint given as base58 text or as a JSON byte array.
pub fn parse_mint(input: &str) -> Result<Pubkey, Error> {
    let input = input.trim();
    if input.starts_with('[') {
        let bytes: Vec<u8> = serde_json::from_str(input)?;
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|_| Error::InvalidMint(input.to_string()))?;
        return Ok(Pubkey::new_from_array(bytes));
    }
    Pubkey::from_str(input).map_err(|_| Error::InvalidMint(input.to_string()))
}

/// The mint to migrate: first CLI argument, else `MINT`.
pub fn mint_arg() -> Result<Pubkey, Error> {
    match std::env::args().nth(1) {
        Some(arg) => parse_mint(&arg),
        None => optional_var("MINT")?
            .ok_or(Error::MissingMint)
            .and_then(|mint| parse_mint(&mint)),
    }
}
