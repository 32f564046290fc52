//! The mutation cycle loop: pick an action, execute it, report, sleep.
//!
//! Single-threaded cooperative execution. The interrupt signal is observed
//! between cycles only, so whatever transaction is in flight completes
//! before shutdown.

use std::time::Duration;

use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sqlx::PgConnection;
use tracing::{error, info};

use crate::mutator::{MutationError, Mutator};
use crate::stats;

/// One weighted mutation action per cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Insert a new customer.
    NewCustomer,
    /// Insert an order for a random existing customer.
    NewOrder,
    /// Re-assign a random customer's email.
    UpdateCustomer,
    /// Insert a customer, pause briefly, then insert an order for it.
    NewCustomerWithOrder,
}

impl Action {
    /// All drawable actions, in weight order.
    pub const ALL: [Self; 4] = [
        Self::NewCustomer,
        Self::NewOrder,
        Self::UpdateCustomer,
        Self::NewCustomerWithOrder,
    ];

    /// Discrete distribution weights matching [`Action::ALL`].
    pub const WEIGHTS: [u32; 4] = [20, 40, 15, 25];

    /// Draw one action from the weighted distribution.
    pub fn draw<R: Rng>(rng: &mut R) -> Self {
        // weights are a non-empty, non-zero constant; construction cannot fail
        WeightedIndex::new(Self::WEIGHTS)
            .map(|dist| Self::ALL[dist.sample(rng)])
            .unwrap_or(Self::NewOrder)
    }
}

/// Sleep range between cycles, in milliseconds (2 - 8 seconds).
const CADENCE_RANGE_MS: std::ops::RangeInclusive<u64> = 2_000..=8_000;

/// Pause between the customer and the order of `NewCustomerWithOrder`.
const FOLLOW_UP_PAUSE: Duration = Duration::from_secs(1);

/// Cycles between statistics reports.
const STATS_EVERY: u64 = 10;

/// Drives the endless mutation loop over one held connection.
pub struct Driver {
    conn: PgConnection,
    mutator: Mutator,
    rng: StdRng,
    cycles: u64,
}

impl Driver {
    /// Create a driver over an established connection.
    #[must_use]
    pub fn new(conn: PgConnection) -> Self {
        Self {
            conn,
            mutator: Mutator::new(),
            rng: StdRng::from_os_rng(),
            cycles: 0,
        }
    }

    /// Cycles completed so far.
    #[must_use]
    pub const fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Run until Ctrl-C.
    ///
    /// Store errors inside a cycle are logged and the loop continues; only
    /// the final statistics fetch can surface an error from here.
    ///
    /// # Errors
    ///
    /// Returns `MutationError::Database` if the shutdown statistics fetch
    /// fails.
    pub async fn run(&mut self) -> Result<(), MutationError> {
        info!("Starting mutation driver, press Ctrl-C to stop");

        loop {
            self.cycles += 1;
            let action = Action::draw(&mut self.rng);
            info!(cycle = self.cycles, ?action, "Mutation cycle");

            if let Err(e) = self.execute(action).await {
                // Never crash the loop on a store error; next cycle may succeed
                error!(cycle = self.cycles, error = %e, "Mutation failed");
            }

            if self.cycles % STATS_EVERY == 0 {
                match stats::fetch_stats(&mut self.conn).await {
                    Ok(snapshot) => snapshot.report(),
                    Err(e) => error!(error = %e, "Statistics fetch failed"),
                }
            }

            let pause = Duration::from_millis(self.rng.random_range(CADENCE_RANGE_MS));
            tokio::select! {
                _ = tokio::signal::ctrl_c() => break,
                () = tokio::time::sleep(pause) => {}
            }
        }

        info!(cycles = self.cycles, "Interrupted, shutting down");
        let final_stats = stats::fetch_stats(&mut self.conn).await?;
        final_stats.report();
        Ok(())
    }

    /// Execute one action.
    async fn execute(&mut self, action: Action) -> Result<(), MutationError> {
        match action {
            Action::NewCustomer => {
                self.mutator.insert_customer(&mut self.conn).await?;
            }
            Action::NewOrder => {
                self.mutator.insert_order(&mut self.conn, None).await?;
            }
            Action::UpdateCustomer => {
                self.mutator.update_random_customer(&mut self.conn).await?;
            }
            Action::NewCustomerWithOrder => {
                if let Some(customer) = self.mutator.insert_customer(&mut self.conn).await? {
                    tokio::time::sleep(FOLLOW_UP_PAUSE).await;
                    self.mutator
                        .insert_order(&mut self.conn, Some(customer))
                        .await?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_draw_only_defined_actions() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..1000 {
            let action = Action::draw(&mut rng);
            assert!(Action::ALL.contains(&action));
        }
    }

    #[test]
    fn test_draw_respects_weights() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts: HashMap<&'static str, u32> = HashMap::new();
        let draws = 100_000;

        for _ in 0..draws {
            let key = match Action::draw(&mut rng) {
                Action::NewCustomer => "new_customer",
                Action::NewOrder => "new_order",
                Action::UpdateCustomer => "update_customer",
                Action::NewCustomerWithOrder => "new_customer_with_order",
            };
            *counts.entry(key).or_default() += 1;
        }

        // 20/40/15/25 within a 2-point tolerance
        let pct = |key| f64::from(counts[key]) * 100.0 / f64::from(draws);
        assert!((pct("new_customer") - 20.0).abs() < 2.0);
        assert!((pct("new_order") - 40.0).abs() < 2.0);
        assert!((pct("update_customer") - 15.0).abs() < 2.0);
        assert!((pct("new_customer_with_order") - 25.0).abs() < 2.0);
    }
}
