//! Background activity churn.
//!
//! Each tick sleeps a random 5-15 s, then logs an activity with 60%
//! probability. The write lock is held only for the mutation itself.

use tokio::task::JoinHandle;
use tracing::info;

use super::state::SharedState;

/// Spawn the churn task. It runs until the process exits.
pub fn spawn(state: SharedState) -> JoinHandle<()> {
    info!("Spawning CRM activity churn task");
    tokio::spawn(async move {
        loop {
            let pause = {
                let mut guard = state.write().await;
                guard.next_pause()
            };
            tokio::time::sleep(pause).await;

            let mut guard = state.write().await;
            if guard.should_log_activity() {
                let _ = guard.record_activity();
            }
        }
    })
}
