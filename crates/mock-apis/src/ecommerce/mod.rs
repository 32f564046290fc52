//! Simulated e-commerce service (port 8000).
//!
//! Products and shoppers are generated at startup; sales appear over time
//! through the [`churn`] task. All endpoints are read-only.

pub mod churn;
pub mod models;
pub mod routes;
pub mod state;

pub use routes::router;
pub use state::{EcommerceState, SharedState};
