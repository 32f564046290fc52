//! Mercado Mock APIs - simulated upstream REST services.
//!
//! Two stand-ins for transactional systems the wider pipeline ingests from:
//! an e-commerce service (products, shoppers, sales) and a CRM service
//! (campaigns, leads, activities). Each keeps generated records in memory
//! behind an `RwLock` and spawns a background churn task that mutates them
//! on a randomized interval, independent of request handling.
//!
//! Reads are eventually-consistent snapshots: a single response is coherent
//! (the lock covers it), but two consecutive reads may disagree because the
//! churn task ran in between. That is the whole point - downstream consumers
//! get to see the data move.
//!
//! # Modules
//!
//! - [`fake`] - Catalog-driven random record generation
//! - [`envelope`] - The `{ total, dados, timestamp }` list response shape
//! - [`ecommerce`] - Products, shoppers, and a sales churn task (port 8000)
//! - [`crm`] - Campaigns, leads, and an activity churn task (port 8001)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod crm;
pub mod ecommerce;
pub mod envelope;
pub mod fake;
