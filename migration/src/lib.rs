pub mod client;
pub mod driver;
pub mod error;
pub mod lock;
pub mod lookup_table;
pub mod mint_lock;
pub mod poll;
pub mod pool;
pub mod pretx;
pub mod provision;
pub mod settings;
pub mod tx;

pub use client::{AsyncClient, Client};
pub use driver::{migrate, migrate_exclusive, migrate_with_report, Migration, Stage};
pub use error::Error;
pub use settings::Settings;
