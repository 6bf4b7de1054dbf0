#![allow(dead_code)]

use std::{
    borrow::Cow,
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use async_trait::async_trait;
use bytemuck::Zeroable;
use migration::{
    client::{AsyncClient, Client, Confirmation, SignatureStatus, Simulation},
    poll::PollPolicy,
    Settings,
};
use pump_meteora_api::{
    consts::CONFIG_ADDRESS,
    state::{
        bonding_curve_pda, vault_pda, AmountConfig, BondingCurve, ConfigAccount, ConfigHeader,
        ConfigLimits, Vault,
    },
    utils::{instruction_discriminator, AnchorAccount},
};
use solana_client::client_error::{ClientErrorKind, Result as ClientResult};
use solana_sdk::{
    address_lookup_table::{
        self,
        instruction::ProgramInstruction,
        state::{AddressLookupTable, LookupTableMeta},
    },
    clock::Slot,
    hash::Hash,
    instruction::InstructionError,
    message::VersionedMessage,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    transaction::{TransactionError, VersionedTransaction},
};

/// What the migration asked of the ledger, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Simulate(Signature),
    Send(Signature),
    Status(Signature, Option<Confirmation>),
}

/// An instruction with its accounts resolved through any lookup tables.
#[derive(Clone, Debug)]
pub struct Invocation {
    pub program_id: Pubkey,
    pub accounts: Vec<Pubkey>,
    pub data: Vec<u8>,
}

impl Invocation {
    pub fn is(&self, program_id: Pubkey, name: &str) -> bool {
        self.program_id.eq(&program_id) && self.data.starts_with(&instruction_discriminator(name))
    }
}

#[derive(Default)]
struct State {
    accounts: HashMap<Pubkey, Vec<u8>>,
    tables: HashMap<Pubkey, Vec<Pubkey>>,
    deactivated: HashMap<Pubkey, Slot>,
    slot: Slot,
    events: Vec<Event>,
    sent: Vec<VersionedTransaction>,
    polls: HashMap<Signature, u32>,
    simulation_failures: HashMap<Pubkey, u32>,
    pending_polls: u32,
    never_land: bool,
    send_failures: u32,
}

/// In-memory ledger applying the effects of the instructions a migration sends.
#[derive(Clone, Default)]
pub struct MockLedger {
    state: Arc<Mutex<State>>,
}

impl MockLedger {
    pub fn new() -> Self {
        let ledger = Self::default();
        ledger.state().slot = 1_000;
        ledger
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub fn set_account(&self, address: Pubkey, data: Vec<u8>) {
        self.state().accounts.insert(address, data);
    }

    pub fn exists(&self, address: &Pubkey) -> bool {
        let state = self.state();
        state.accounts.contains_key(address) || state.tables.contains_key(address)
    }

    pub fn table(&self, address: &Pubkey) -> Option<Vec<Pubkey>> {
        self.state().tables.get(address).cloned()
    }

    /// Marks a table as deactivated at the current slot.
    pub fn deactivate_table(&self, address: Pubkey) {
        let mut state = self.state();
        let slot = state.slot;
        state.deactivated.insert(address, slot);
    }

    /// Writes a valid platform config paying `team_wallet`.
    pub fn seed_config(&self, team_wallet: Pubkey) {
        let range = |min, max| AmountConfig::Range {
            min: Some(min),
            max: Some(max),
        };
        let config = ConfigAccount {
            header: ConfigHeader {
                authority: Pubkey::new_unique(),
                pending_authority: Pubkey::default(),
                team_wallet,
                init_bonding_curve: 80f64.to_le_bytes(),
                platform_buy_fee: 1f64.to_le_bytes(),
                platform_sell_fee: 1f64.to_le_bytes(),
                platform_migration_fee: 2f64.to_le_bytes(),
                curve_limit: 85_000_000_000u64.to_le_bytes(),
            },
            limits: ConfigLimits {
                lamport_amount_config: range(1_000_000, 100_000_000_000),
                token_supply_config: range(1_000_000_000, 1_000_000_000_000_000),
                token_decimals_config: AmountConfig::Enum(vec![6, 9]),
                initial_virtual_token_reserves_config: 1_073_000_000_000_000,
                initial_virtual_sol_reserves_config: 30_000_000_000,
                initial_real_token_reserves_config: 793_100_000_000_000,
            },
        };
        let data = config.to_bytes().unwrap();
        self.set_account(CONFIG_ADDRESS, data);
    }

    pub fn seed_curve(&self, mint: Pubkey, completed: bool) {
        let curve = BondingCurve {
            token_mint: mint,
            creator: Pubkey::new_unique(),
            init_lamport: 30_000_000_000u64.to_le_bytes(),
            reserve_lamport: 85_000_000_000u64.to_le_bytes(),
            reserve_token: 206_900_000_000_000u64.to_le_bytes(),
            is_completed: completed as u8,
        };
        self.set_account(bonding_curve_pda(mint).0, curve.to_bytes());
    }

    /// Writes a vault record for `token_mint` recording `lp_mint`.
    pub fn seed_vault(&self, token_mint: Pubkey, lp_mint: Pubkey) {
        let vault = Vault {
            enabled: 1,
            token_mint,
            lp_mint,
            ..Vault::zeroed()
        };
        self.set_account(vault_pda(token_mint).0, vault.to_bytes());
    }

    /// Fails every simulation invoking `program_id` with a custom error.
    pub fn fail_simulation(&self, program_id: Pubkey, code: u32) {
        self.state().simulation_failures.insert(program_id, code);
    }

    /// Number of status checks a transaction stays at processed.
    pub fn set_pending_polls(&self, polls: u32) {
        self.state().pending_polls = polls;
    }

    /// Sent transactions are accepted but never observed.
    pub fn never_land(&self) {
        self.state().never_land = true;
    }

    /// The next `count` sends fail in transport.
    pub fn fail_sends(&self, count: u32) {
        self.state().send_failures = count;
    }

    pub fn events(&self) -> Vec<Event> {
        self.state().events.clone()
    }

    pub fn sent(&self) -> Vec<VersionedTransaction> {
        self.state().sent.clone()
    }

    /// Instructions of a sent transaction, compute budget requests excluded.
    pub fn invocations(&self, tx: &VersionedTransaction) -> Vec<Invocation> {
        let state = self.state();
        resolve(&state, &tx.message)
            .into_iter()
            .filter(|ix| ix.program_id.ne(&solana_sdk::compute_budget::ID))
            .collect()
    }
}

fn resolve(state: &State, message: &VersionedMessage) -> Vec<Invocation> {
    let mut keys = message.static_account_keys().to_vec();
    let mut readonly = vec![];
    for lookup in message.address_table_lookups().unwrap_or_default() {
        let table = &state.tables[&lookup.account_key];
        keys.extend(lookup.writable_indexes.iter().map(|i| table[*i as usize]));
        readonly.extend(lookup.readonly_indexes.iter().map(|i| table[*i as usize]));
    }
    keys.extend(readonly);
    message
        .instructions()
        .iter()
        .map(|ix| Invocation {
            program_id: keys[ix.program_id_index as usize],
            accounts: ix.accounts.iter().map(|i| keys[*i as usize]).collect(),
            data: ix.data.clone(),
        })
        .collect()
}

fn apply(state: &mut State, ix: &Invocation) {
    let accounts = &ix.accounts;
    if ix.is(pump_meteora_api::vault::ID, "initialize") {
        let vault = Vault {
            enabled: 1,
            token_vault: accounts[2],
            token_mint: accounts[3],
            lp_mint: accounts[4],
            ..Vault::zeroed()
        };
        state.accounts.insert(accounts[0], vault.to_bytes());
    } else if ix.program_id.eq(&spl_associated_token_account::ID) {
        state.accounts.entry(accounts[1]).or_insert_with(|| vec![0; 165]);
    } else if ix.program_id.eq(&address_lookup_table::program::ID) {
        match bincode::deserialize(&ix.data).unwrap() {
            ProgramInstruction::CreateLookupTable { .. } => {
                state.tables.insert(accounts[0], vec![]);
            }
            ProgramInstruction::ExtendLookupTable { new_addresses } => {
                state
                    .tables
                    .get_mut(&accounts[0])
                    .unwrap()
                    .extend(new_addresses);
            }
            other => panic!("unexpected lookup table instruction {:?}", other),
        }
    } else if ix.is(pump_meteora_api::ID, "initialize_pool_with_config") {
        state.accounts.insert(accounts[4], vec![1; 8]);
        state.accounts.insert(accounts[21], vec![0; 165]);
    } else if ix.is(pump_meteora_api::ID, "lock_pool") {
        state.accounts.insert(accounts[18], vec![1; 8]);
        state.accounts.insert(accounts[19], vec![1; 8]);
    }
}

fn table_data(addresses: &[Pubkey], deactivation_slot: Option<Slot>) -> Vec<u8> {
    let mut meta = LookupTableMeta::default();
    if let Some(slot) = deactivation_slot {
        meta.deactivation_slot = slot;
    }
    AddressLookupTable {
        meta,
        addresses: Cow::Borrowed(addresses),
    }
    .serialize_for_tests()
    .unwrap()
}

#[async_trait]
impl AsyncClient for MockLedger {
    async fn account_data(&self, address: &Pubkey) -> ClientResult<Option<Vec<u8>>> {
        let state = self.state();
        if let Some(addresses) = state.tables.get(address) {
            let deactivated = state.deactivated.get(address).copied();
            return Ok(Some(table_data(addresses, deactivated)));
        }
        Ok(state.accounts.get(address).cloned())
    }

    async fn latest_blockhash(&self) -> ClientResult<Hash> {
        Ok(Hash::new_unique())
    }

    async fn slot(&self) -> ClientResult<Slot> {
        Ok(self.state().slot)
    }

    async fn simulate(&self, tx: &VersionedTransaction) -> ClientResult<Simulation> {
        let mut state = self.state();
        state.events.push(Event::Simulate(tx.signatures[0]));
        let invocations = resolve(&state, &tx.message);
        for (index, ix) in invocations.iter().enumerate() {
            if let Some(code) = state.simulation_failures.get(&ix.program_id) {
                return Ok(Simulation {
                    err: Some(TransactionError::InstructionError(
                        index as u8,
                        InstructionError::Custom(*code),
                    )),
                    logs: vec![
                        format!("Program {} invoke [1]", ix.program_id),
                        format!(
                            "Program {} failed: custom program error: {:#x}",
                            ix.program_id, code
                        ),
                    ],
                    units_consumed: Some(20_000),
                });
            }
        }
        Ok(Simulation {
            err: None,
            logs: vec![],
            units_consumed: Some(150_000),
        })
    }

    async fn send(&self, tx: &VersionedTransaction) -> ClientResult<Signature> {
        let mut state = self.state();
        let sig = tx.signatures[0];
        state.events.push(Event::Send(sig));
        if state.send_failures > 0 {
            state.send_failures -= 1;
            return Err(ClientErrorKind::Custom("connection reset".to_string()).into());
        }
        let invocations = resolve(&state, &tx.message);
        for ix in invocations.iter() {
            apply(&mut state, ix);
        }
        state.sent.push(tx.clone());
        state.slot += 1;
        Ok(sig)
    }

    async fn signature_status(
        &self,
        signature: &Signature,
    ) -> ClientResult<Option<SignatureStatus>> {
        let mut state = self.state();
        let landed = !state.never_land && state.sent.iter().any(|tx| tx.signatures[0].eq(signature));
        let confirmation = if landed {
            let pending = state.pending_polls;
            let polls = state.polls.entry(*signature).or_default();
            *polls += 1;
            Some(if *polls <= pending {
                Confirmation::Processed
            } else {
                Confirmation::Finalized
            })
        } else {
            None
        };
        state.events.push(Event::Status(*signature, confirmation));
        Ok(confirmation.map(|confirmation| SignatureStatus {
            confirmation,
            err: None,
        }))
    }
}

pub fn fast_policy(attempts: u32) -> PollPolicy {
    PollPolicy::new(attempts, Duration::from_millis(1), Duration::from_millis(2))
        .with_jitter(Duration::ZERO)
}

pub fn settings() -> Settings {
    let mut settings = Settings::new("mock".to_string(), "unused".to_string());
    settings.send_policy = fast_policy(3);
    settings.confirm_policy = fast_policy(5);
    settings.lookup_table_policy = fast_policy(5);
    settings
}

pub fn client(ledger: &MockLedger, settings: Settings) -> Client<MockLedger> {
    Client::new(ledger.clone(), Arc::new(Keypair::new()), settings)
}

/// A ledger holding the platform config and a completed curve for a new mint.
pub fn completed_curve() -> (MockLedger, Pubkey, Pubkey) {
    let ledger = MockLedger::new();
    let team_wallet = Pubkey::new_unique();
    let mint = Pubkey::new_unique();
    ledger.seed_config(team_wallet);
    ledger.seed_curve(mint, true);
    (ledger, mint, team_wallet)
}
