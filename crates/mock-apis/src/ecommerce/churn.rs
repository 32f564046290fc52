//! Background sales churn.
//!
//! Runs on its own schedule, independent of request handling: each tick
//! sleeps a random 3-10 s, then records a sale with 70% probability. The
//! write lock is held only for the mutation itself, never across the sleep.

use tokio::task::JoinHandle;
use tracing::info;

use super::state::SharedState;

/// Spawn the churn task. It runs until the process exits.
pub fn spawn(state: SharedState) -> JoinHandle<()> {
    info!("Spawning e-commerce sales churn task");
    tokio::spawn(async move {
        loop {
            let pause = {
                let mut guard = state.write().await;
                guard.next_pause()
            };
            tokio::time::sleep(pause).await;

            let mut guard = state.write().await;
            if guard.should_sell() {
                let _ = guard.record_sale();
            }
        }
    })
}
