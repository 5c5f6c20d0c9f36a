pub mod aggregate;
pub mod config_store;
pub mod fetch;
pub mod output;
