use serde::{Deserialize, Serialize};
use solana_sdk::{pubkey::Pubkey, signature::Signature};

/// The outcome of a completed migration.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct MigrationReport {
    /// The migrated token.
    #[serde(with = "base58")]
    pub mint: Pubkey,

    /// The AMM pool now holding the curve's liquidity.
    #[serde(with = "base58")]
    pub pool: Pubkey,

    #[serde(with = "base58")]
    pub lp_mint: Pubkey,

    /// The lookup table the pool transactions were compiled against.
    #[serde(with = "base58")]
    pub lookup_table: Pubkey,

    /// The provisioning transaction, if any account was missing.
    #[serde(with = "base58::option")]
    pub pre_transaction: Option<Signature>,

    /// Absent when the pool existed before this run.
    #[serde(with = "base58::option")]
    pub create_pool: Option<Signature>,

    #[serde(with = "base58")]
    pub lock_pool: Signature,

    /// Escrows holding the locked LP, deployer first.
    pub lock_escrows: [LockEscrow; 2],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct LockEscrow {
    #[serde(with = "base58")]
    pub owner: Pubkey,

    #[serde(with = "base58")]
    pub escrow: Pubkey,

    /// LP token account of the escrow.
    #[serde(with = "base58")]
    pub vault: Pubkey,
}

/// Keys and signatures as base58 strings.
mod base58 {
    use std::{fmt::Display, str::FromStr};

    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<T: Display, S: Serializer>(
        value: &T,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: FromStr,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        T::from_str(&s).map_err(D::Error::custom)
    }

    pub mod option {
        use super::*;

        pub fn serialize<T: Display, S: Serializer>(
            value: &Option<T>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(value) => serializer.collect_str(value),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
        where
            T: FromStr,
            T::Err: Display,
            D: Deserializer<'de>,
        {
            Option::<String>::deserialize(deserializer)?
                .map(|s| T::from_str(&s).map_err(D::Error::custom))
                .transpose()
        }
    }
}
