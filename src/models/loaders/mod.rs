pub mod toml_loader;

pub use toml_loader::{load_account_directory, parse_account_directory};
