//! Mercado Core - Shared types library.
//!
//! This crate provides common types used across all Mercado CDC demo
//! components:
//! - `simulator` - Continuous churn simulator for the Postgres source database
//! - `mock-apis` - Simulated e-commerce and CRM REST services
//! - `cli` - Command-line tools for migrations, seeding, and pipeline runs
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, and emails

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
