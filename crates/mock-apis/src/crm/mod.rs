//! Simulated CRM service (port 8001).
//!
//! Campaigns and leads are generated at startup; activities appear over time
//! through the [`churn`] task, which also walks leads through their status
//! machine. All endpoints are read-only.

pub mod churn;
pub mod models;
pub mod routes;
pub mod state;

pub use routes::router;
pub use state::{CrmState, SharedState};
