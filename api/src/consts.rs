use const_crypto::ed25519;
use solana_program::{pubkey, pubkey::Pubkey};

/// The seed of the config account PDA.
pub const CONFIG: &[u8] = b"config";

/// The seed of the bonding curve account PDA.
pub const BONDING_CURVE: &[u8] = b"bonding_curve";

/// The seed of the global vault PDA which escrows the curve's SOL and tokens.
pub const GLOBAL: &[u8] = b"global";

/// The seed of a Meteora vault PDA.
pub const VAULT_PREFIX: &[u8] = b"vault";

/// The seed of a Meteora vault token account PDA.
pub const TOKEN_VAULT_PREFIX: &[u8] = b"token_vault";

/// The seed of a Meteora LP mint PDA (vault and pool).
pub const LP_MINT_PREFIX: &[u8] = b"lp_mint";

/// The seed of an AMM protocol fee token account PDA.
pub const FEE_PREFIX: &[u8] = b"fee";

/// The seed of an AMM lock escrow PDA.
pub const LOCK_ESCROW: &[u8] = b"lock_escrow";

/// The seed of the AMM's anchor event authority.
pub const EVENT_AUTHORITY: &[u8] = b"__event_authority";

/// Base key mixed into every Meteora vault address.
pub const VAULT_BASE_ADDRESS: Pubkey = pubkey!("HWzXGcGHy4tcpYfaRDCyLNzXqBTv3E6BttpCH2vuxArv");

/// Token A of every migrated pool.
pub const QUOTE_MINT: Pubkey = spl_token::native_mint::ID;

/// Default AMM pool config the migration creates pools under.
pub const DEFAULT_AMM_CONFIG: Pubkey = pubkey!("21PjsfQVgrn56jSypUT5qXwwSjwKWvuoBCKbVZrgTLz4");

/// The address of the config account.
pub const CONFIG_ADDRESS: Pubkey = Pubkey::new_from_array(
    ed25519::derive_program_address(&[CONFIG], &crate::ID.to_bytes()).0,
);

/// The address of the global vault.
pub const GLOBAL_VAULT_ADDRESS: Pubkey = Pubkey::new_from_array(
    ed25519::derive_program_address(&[GLOBAL], &crate::ID.to_bytes()).0,
);

/// The address of the AMM event authority.
pub const EVENT_AUTHORITY_ADDRESS: Pubkey = Pubkey::new_from_array(
    ed25519::derive_program_address(&[EVENT_AUTHORITY], &crate::amm::ID.to_bytes()).0,
);
