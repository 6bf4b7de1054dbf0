mod submit;

pub use submit::*;

use solana_sdk::{
    address_lookup_table::AddressLookupTableAccount,
    compute_budget::ComputeBudgetInstruction,
    hash::Hash,
    instruction::Instruction,
    message::{v0, VersionedMessage},
    signature::Keypair,
    signer::Signer,
    transaction::VersionedTransaction,
};

use crate::error::Error;

pub fn compute_budget_ixs(cu_limit: u32, cu_price: u64) -> [Instruction; 2] {
    [
        ComputeBudgetInstruction::set_compute_unit_limit(cu_limit),
        ComputeBudgetInstruction::set_compute_unit_price(cu_price),
    ]
}

/// Compiles and signs a v0 transaction paid by `signer`.
pub fn compile(
    signer: &Keypair,
    ixs: &[Instruction],
    luts: &[AddressLookupTableAccount],
    hash: Hash,
) -> Result<VersionedTransaction, Error> {
    let message = v0::Message::try_compile(&signer.pubkey(), ixs, luts, hash)?;
    let tx = VersionedTransaction::try_new(VersionedMessage::V0(message), &[signer])?;
    Ok(tx)
}

#[cfg(test)]
mod tests {
    use solana_sdk::{pubkey::Pubkey, system_instruction};

    use super::*;

    #[test]
    fn resolves_accounts_through_lookup_table() {
        let signer = Keypair::new();
        let recipients: Vec<Pubkey> = (0..20).map(|_| Pubkey::new_unique()).collect();
        let ixs: Vec<Instruction> = recipients
            .iter()
            .map(|to| system_instruction::transfer(&signer.pubkey(), to, 1))
            .collect();
        let lut = AddressLookupTableAccount {
            key: Pubkey::new_unique(),
            addresses: recipients.clone(),
        };
        let tx = compile(&signer, &ixs, &[lut], Hash::new_unique()).unwrap();
        let VersionedMessage::V0(message) = &tx.message else {
            panic!("expected v0 message");
        };
        assert_eq!(message.address_table_lookups.len(), 1);
        assert_eq!(message.address_table_lookups[0].writable_indexes.len(), 20);
        // payer and system program stay static
        assert_eq!(message.account_keys.len(), 2);
        assert!(tx.verify_with_results().iter().all(|ok| *ok));
    }

    #[test]
    fn budget_comes_first() {
        let [limit, price] = compute_budget_ixs(1_000_000, 50_000);
        assert_eq!(limit.program_id, solana_sdk::compute_budget::ID);
        assert_eq!(price.program_id, solana_sdk::compute_budget::ID);
        assert_ne!(limit.data, price.data);
    }
}
