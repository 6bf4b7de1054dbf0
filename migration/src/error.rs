use std::env::VarError;

use pump_meteora_api::error::{ApiError, RemoteError};
use solana_client::client_error::ClientError;
use solana_sdk::{
    instruction::InstructionError, message::CompileError, pubkey::Pubkey,
    signature::Signature, signer::SignerError, transaction::TransactionError,
};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("std env")]
    StdEnv(#[from] VarError),
    #[error("std parse int")]
    StdParseInt(#[from] std::num::ParseIntError),
    #[error("could not read keypair from provided path: {0}")]
    KeypairRead(String),
    #[error("serde json")]
    SerdeJson(#[from] serde_json::Error),
    #[error("api: {0}")]
    Api(#[from] ApiError),
    #[error("solana client: {0}")]
    SolanaClient(#[from] ClientError),
    #[error("solana parse pubkey")]
    SolanaParsePubkey(#[from] solana_sdk::pubkey::ParsePubkeyError),
    #[error("message compile: {0}")]
    Compile(#[from] CompileError),
    #[error("transaction signing: {0}")]
    Signer(#[from] SignerError),
    #[error("lookup table decode: {0}")]
    LookupTableDecode(#[from] InstructionError),
    #[error("invalid mint: {0}")]
    InvalidMint(String),
    #[error("missing mint argument")]
    MissingMint,
    #[error("config account {0} not found")]
    MissingConfig(Pubkey),
    #[error("bonding curve {0} not found")]
    MissingBondingCurve(Pubkey),
    #[error("bonding curve for {0} has not completed")]
    CurveNotCompleted(Pubkey),
    #[error("fee receiver {0} is the payer, its lock escrow would collide with the payer's")]
    FeeReceiverIsPayer(Pubkey),
    #[error("derived address rejected by program:\n{}", .logs.join("\n"))]
    DerivationMismatch { logs: Vec<String> },
    #[error("simulation failed: {err}\n{}", .logs.join("\n"))]
    SimulationFailure {
        err: TransactionError,
        logs: Vec<String>,
    },
    #[error("failed to submit transaction: {0}")]
    SubmissionError(ClientError),
    #[error("transaction {0} not confirmed in time")]
    ConfirmationTimeout(Signature),
    #[error("transaction {signature} rejected: {err}")]
    ProgramRejection {
        signature: Signature,
        err: TransactionError,
    },
    #[error("lookup table {0} not ready")]
    LookupTableNotReady(Pubkey),
}

impl Error {
    /// Classifies a failed simulation. Seeds violations point at a derivation
    /// bug rather than ledger state.
    pub fn from_simulation(err: TransactionError, logs: Vec<String>) -> Self {
        if let TransactionError::InstructionError(_, InstructionError::Custom(code)) = &err {
            if let Ok(remote) = RemoteError::try_from(*code) {
                if remote.is_derivation_mismatch() {
                    return Error::DerivationMismatch { logs };
                }
            }
        }
        Error::SimulationFailure { err, logs }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_violation_is_derivation_mismatch() {
        let err = TransactionError::InstructionError(0, InstructionError::Custom(2006));
        let logs = vec!["Program log: AnchorError caused by account: pool".to_string()];
        match Error::from_simulation(err, logs.clone()) {
            Error::DerivationMismatch { logs: found } => assert_eq!(found, logs),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn other_failures_keep_program_log() {
        let err = TransactionError::InstructionError(2, InstructionError::Custom(6003));
        let logs = vec![
            "Program log: Instruction: InitializePoolWithConfig".to_string(),
            "Program log: Error: NotCompleted".to_string(),
        ];
        let err = Error::from_simulation(err, logs);
        assert!(matches!(err, Error::SimulationFailure { .. }));
        assert!(err.to_string().contains("Error: NotCompleted"));
    }
}
