pub mod ens;
pub mod token;

pub use ens::{EnsClient, LocalStorageCache, NameCache, NameLookup};
pub use token::fetch_symbol;
