pub mod consts;
pub mod error;
pub mod sdk;
pub mod state;
pub mod utils;

pub mod prelude {
    pub use crate::consts::*;
    pub use crate::error::*;
    pub use crate::sdk::*;
    pub use crate::state::*;
}

use solana_program::declare_id;

declare_id!("5KZR5fDKQr2uPDHDQGoXLPpoiEhDVFJCqqcds7pVev8h");

/// The Meteora dynamic AMM program.
pub mod amm {
    solana_program::declare_id!("Eo7WjKq67rjJQSZxS6z3YkapzY3eMj6Xy8X5EQVn5UaB");
}

/// The Meteora dynamic vault program.
pub mod vault {
    solana_program::declare_id!("24Uqj9JCLxUeoC3hGfh5W3s9FM9uCHDS2SG3LYwBpyTi");
}
