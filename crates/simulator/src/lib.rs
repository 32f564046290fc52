//! Mercado Simulator - transactional churn for the CDC source database.
//!
//! Everything interesting about the wider demo (capture, replication, SQL
//! transformation) happens in external systems; this crate's job is to give
//! them something to watch. It holds a single Postgres connection and runs an
//! endless loop of weighted random mutations against the `clientes` and
//! `pedidos` tables, committing each logical action as one transaction.
//!
//! # Modules
//!
//! - [`config`] - Source-database settings from environment variables
//! - [`connect`] - Bounded-retry connection establishment
//! - [`generate`] - Synthetic names, emails, products, and prices
//! - [`mutator`] - The four mutation operations, one transaction each
//! - [`driver`] - Weighted action selection and the cadence loop
//! - [`stats`] - Read-only aggregate counters for progress reporting
//! - [`seed`] - One-shot batch population used by the pipeline's first step

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod connect;
pub mod driver;
pub mod generate;
pub mod mutator;
pub mod seed;
pub mod stats;

pub use config::{ConfigError, SourceDbConfig};
pub use connect::{ConnectError, connect};
pub use driver::{Action, Driver};
pub use mutator::{MutationError, Mutator};
pub use seed::{SeedPlan, SeedReport, seed};
pub use stats::{SourceStats, fetch_stats};
