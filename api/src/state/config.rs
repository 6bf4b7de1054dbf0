use borsh::{BorshDeserialize, BorshSerialize};
use bytemuck::{Pod, Zeroable};
use solana_program::pubkey::Pubkey;
use static_assertions::const_assert_eq;

use crate::{error::ApiError, utils::AnchorAccount};

/// Fixed-size head of the platform config record.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ConfigHeader {
    pub authority: Pubkey,
    pub pending_authority: Pubkey,

    /// Receives the platform's cut when a curve migrates.
    pub team_wallet: Pubkey,

    pub init_bonding_curve: [u8; 8],
    pub platform_buy_fee: [u8; 8],
    pub platform_sell_fee: [u8; 8],
    pub platform_migration_fee: [u8; 8],

    pub curve_limit: [u8; 8],
}

const_assert_eq!(std::mem::size_of::<ConfigHeader>(), 136);

impl AnchorAccount for ConfigHeader {
    const NAME: &'static str = "Config";
}

/// Bounds on an amount: an optional range, or an explicit list of values.
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub enum AmountConfig<T> {
    Range { min: Option<T>, max: Option<T> },
    Enum(Vec<T>),
}

impl<T: Copy + PartialOrd + Into<u64>> AmountConfig<T> {
    fn checked(self, name: &'static str) -> Result<Self, ApiError> {
        if let AmountConfig::Range {
            min: Some(min),
            max: Some(max),
        } = &self
        {
            if min > max {
                return Err(ApiError::InvalidRange {
                    name,
                    min: (*min).into(),
                    max: (*max).into(),
                });
            }
        }
        Ok(self)
    }

    pub fn contains(&self, value: T) -> bool {
        match self {
            AmountConfig::Range { min, max } => {
                min.map_or(true, |min| min <= value) && max.map_or(true, |max| value <= max)
            }
            AmountConfig::Enum(values) => values.contains(&value),
        }
    }
}

/// Borsh-encoded remainder of the config record. Its size depends on the
/// amount config variants.
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct ConfigLimits {
    pub lamport_amount_config: AmountConfig<u64>,
    pub token_supply_config: AmountConfig<u64>,
    pub token_decimals_config: AmountConfig<u8>,

    pub initial_virtual_token_reserves_config: u64,
    pub initial_virtual_sol_reserves_config: u64,
    pub initial_real_token_reserves_config: u64,
}

/// On-ledger platform config record.
#[derive(Clone, Debug, PartialEq)]
pub struct ConfigAccount {
    pub header: ConfigHeader,
    pub limits: ConfigLimits,
}

impl ConfigAccount {
    pub fn try_from_bytes(data: &[u8]) -> Result<Self, ApiError> {
        let header = *ConfigHeader::try_from_bytes(data)?;
        // anchor pads the account, so only a prefix is read
        let mut tail = &data[8 + std::mem::size_of::<ConfigHeader>()..];
        let limits = ConfigLimits::deserialize(&mut tail).map_err(|_| ApiError::MalformedConfig)?;
        Ok(Self { header, limits })
    }

    pub fn to_bytes(&self) -> std::io::Result<Vec<u8>> {
        let mut data = self.header.to_bytes();
        self.limits.serialize(&mut data)?;
        Ok(data)
    }
}

/// Platform config, only obtainable through validation of the raw record.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub authority: Pubkey,
    pub team_wallet: Pubkey,
    pub init_bonding_curve: f64,
    pub platform_buy_fee: f64,
    pub platform_sell_fee: f64,
    pub platform_migration_fee: f64,
    pub curve_limit: u64,
    pub lamport_amount: AmountConfig<u64>,
    pub token_supply: AmountConfig<u64>,
    pub token_decimals: AmountConfig<u8>,
    pub initial_virtual_token_reserves: u64,
    pub initial_virtual_sol_reserves: u64,
    pub initial_real_token_reserves: u64,
}

impl Config {
    pub fn try_from_bytes(data: &[u8]) -> Result<Self, ApiError> {
        Self::try_from(ConfigAccount::try_from_bytes(data)?)
    }
}

impl TryFrom<ConfigAccount> for Config {
    type Error = ApiError;

    fn try_from(raw: ConfigAccount) -> Result<Self, Self::Error> {
        let ConfigAccount { header, limits } = raw;
        Ok(Config {
            authority: header.authority,
            team_wallet: header.team_wallet,
            init_bonding_curve: f64::from_le_bytes(header.init_bonding_curve),
            platform_buy_fee: fee_rate("platform_buy_fee", header.platform_buy_fee)?,
            platform_sell_fee: fee_rate("platform_sell_fee", header.platform_sell_fee)?,
            platform_migration_fee: fee_rate(
                "platform_migration_fee",
                header.platform_migration_fee,
            )?,
            curve_limit: u64::from_le_bytes(header.curve_limit),
            lamport_amount: limits.lamport_amount_config.checked("lamport_amount")?,
            token_supply: limits.token_supply_config.checked("token_supply")?,
            token_decimals: limits.token_decimals_config.checked("token_decimals")?,
            initial_virtual_token_reserves: limits.initial_virtual_token_reserves_config,
            initial_virtual_sol_reserves: limits.initial_virtual_sol_reserves_config,
            initial_real_token_reserves: limits.initial_real_token_reserves_config,
        })
    }
}

fn fee_rate(name: &'static str, bytes: [u8; 8]) -> Result<f64, ApiError> {
    let value = f64::from_le_bytes(bytes);
    // NaN fails both comparisons
    if (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(ApiError::FeeRateOutOfBounds { name, value })
    }
}
