//! Process configuration read from the environment.

pub mod server;

pub use db_infra::config::db;
pub use server::ServerConfig;
