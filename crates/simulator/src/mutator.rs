//! The four mutation operations against the source database.
//!
//! Each operation is one transaction: begin, run the statements, commit on
//! success, roll back on any handled failure. Unique-violation and
//! empty-precondition outcomes are recoverable and reported through the
//! return value (`None` / `false`), never as errors; anything else surfaces
//! as [`MutationError`] for the driver to log and move past.

use chrono::{Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sqlx::{Connection, PgConnection};
use thiserror::Error;
use tracing::{debug, info, warn};

use mercado_core::{CustomerId, EmailError, OrderId};

use crate::generate::{self, EmailGenerator};

/// Order quantity range for the continuous simulator.
pub const QUANTITY_RANGE: std::ops::RangeInclusive<i32> = 1..=5;

/// Unit price range in centavos (R$ 50.00 - R$ 2000.00).
pub const PRICE_RANGE_CENTS: std::ops::RangeInclusive<i64> = 5_000..=200_000;

/// Customers with more than this many orders are never delete candidates.
pub const MAX_ORDERS_FOR_DELETE: i64 = 1;

/// Unrecoverable failure during a mutation; any open transaction has been
/// rolled back (explicitly or by drop) when this surfaces.
#[derive(Debug, Error)]
pub enum MutationError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("generated email is invalid: {0}")]
    InvalidEmail(#[from] EmailError),
}

/// Generates and executes transactional mutations.
///
/// Owns its RNG and email sequence explicitly; nothing here is process-wide
/// state, so two mutators never interfere with each other's sequences.
pub struct Mutator {
    rng: StdRng,
    emails: EmailGenerator,
}

impl Default for Mutator {
    fn default() -> Self {
        Self::new()
    }
}

impl Mutator {
    /// Create a mutator with an OS-seeded RNG.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Create a mutator with a caller-provided RNG (deterministic in tests).
    #[must_use]
    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            emails: EmailGenerator::new(),
        }
    }

    /// Insert a new customer with a synthetic name and per-run-unique email.
    ///
    /// Returns `Ok(None)` when the generated email collides with an existing
    /// row (possible across runs); the transaction is rolled back and the
    /// collision logged.
    ///
    /// # Errors
    ///
    /// Returns `MutationError::Database` for any other store failure and
    /// `MutationError::InvalidEmail` if the generated address fails
    /// validation.
    pub async fn insert_customer(
        &mut self,
        conn: &mut PgConnection,
    ) -> Result<Option<CustomerId>, MutationError> {
        let name = generate::random_name(&mut self.rng);
        let email = self.emails.next_for(&mut self.rng, name)?;
        let now = Utc::now();

        let mut tx = conn.begin().await?;
        let inserted = sqlx::query_scalar::<_, CustomerId>(
            r"
            INSERT INTO public.clientes (nome, email, data_cadastro, ultima_atualizacao)
            VALUES ($1, $2, $3, $3)
            RETURNING id
            ",
        )
        .bind(name)
        .bind(email.as_str())
        .bind(now)
        .fetch_one(&mut *tx)
        .await;

        match inserted {
            Ok(id) => {
                tx.commit().await?;
                info!(customer = %id, name, email = %email, "Customer inserted");
                Ok(Some(id))
            }
            Err(e) if is_unique_violation(&e) => {
                tx.rollback().await?;
                warn!(email = %email, "Duplicate email on insert, skipping");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Insert a new order, for `customer` when given or for a uniformly
    /// random existing customer otherwise.
    ///
    /// Returns `Ok(None)` without side effects when no customer was given
    /// and none exists.
    ///
    /// # Errors
    ///
    /// Returns `MutationError::Database` for any store failure, including a
    /// foreign-key violation when an explicit `customer` no longer exists.
    pub async fn insert_order(
        &mut self,
        conn: &mut PgConnection,
        customer: Option<CustomerId>,
    ) -> Result<Option<OrderId>, MutationError> {
        let mut tx = conn.begin().await?;

        let customer_id = match customer {
            Some(id) => id,
            None => {
                let picked = sqlx::query_scalar::<_, CustomerId>(
                    "SELECT id FROM public.clientes ORDER BY RANDOM() LIMIT 1",
                )
                .fetch_optional(&mut *tx)
                .await?;

                match picked {
                    Some(id) => id,
                    None => {
                        debug!("No customers available for order");
                        return Ok(None);
                    }
                }
            }
        };

        let product = generate::random_product(&mut self.rng);
        let quantity = self.rng.random_range(QUANTITY_RANGE);
        let unit_price = generate::random_price(
            &mut self.rng,
            *PRICE_RANGE_CENTS.start(),
            *PRICE_RANGE_CENTS.end(),
        );
        // Spread order dates over the last week so downstream models have
        // something to partition on
        let order_date = Utc::now() - Duration::days(self.rng.random_range(0..=7));

        let id = sqlx::query_scalar::<_, OrderId>(
            r"
            INSERT INTO public.pedidos
                (cliente_id, produto, quantidade, preco_unitario, data_pedido, ultima_atualizacao)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            ",
        )
        .bind(customer_id)
        .bind(product)
        .bind(quantity)
        .bind(unit_price)
        .bind(order_date)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        let line_total = unit_price * rust_decimal::Decimal::from(quantity);
        info!(
            order = %id,
            customer = %customer_id,
            product,
            quantity,
            total = %line_total,
            "Order inserted"
        );
        Ok(Some(id))
    }

    /// Assign a fresh synthetic email to a uniformly random customer.
    ///
    /// Returns whether a row was actually changed. No customers, or a unique
    /// violation on the new email, roll back and return `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Returns `MutationError::Database` for any other store failure.
    pub async fn update_random_customer(
        &mut self,
        conn: &mut PgConnection,
    ) -> Result<bool, MutationError> {
        let mut tx = conn.begin().await?;

        let picked = sqlx::query_as::<_, (CustomerId, String, String)>(
            "SELECT id, nome, email FROM public.clientes ORDER BY RANDOM() LIMIT 1",
        )
        .fetch_optional(&mut *tx)
        .await?;

        let Some((id, name, old_email)) = picked else {
            debug!("No customers to update");
            return Ok(false);
        };

        let new_email = self.emails.next_for(&mut self.rng, &name)?;
        let updated = sqlx::query(
            "UPDATE public.clientes SET email = $1, ultima_atualizacao = $2 WHERE id = $3",
        )
        .bind(new_email.as_str())
        .bind(Utc::now())
        .bind(id)
        .execute(&mut *tx)
        .await;

        match updated {
            Ok(result) if result.rows_affected() > 0 => {
                tx.commit().await?;
                info!(customer = %id, old_email, new_email = %new_email, "Customer email updated");
                Ok(true)
            }
            Ok(_) => {
                // Row vanished between selection and update
                tx.rollback().await?;
                Ok(false)
            }
            Err(e) if is_unique_violation(&e) => {
                tx.rollback().await?;
                warn!(customer = %id, new_email = %new_email, "Duplicate email on update, skipping");
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Delete one uniformly random customer whose order count is at most
    /// [`MAX_ORDERS_FOR_DELETE`], removing its orders first in the same
    /// transaction.
    ///
    /// The candidate condition is pushed into the selection query so the
    /// guard and the pick are one statement. A customer that disappears
    /// between selection and delete is tolerated as a silent no-op: the
    /// transaction commits only when the customer row was actually removed.
    ///
    /// # Errors
    ///
    /// Returns `MutationError::Database` for any store failure.
    pub async fn delete_random_customer(
        &mut self,
        conn: &mut PgConnection,
    ) -> Result<bool, MutationError> {
        let mut tx = conn.begin().await?;

        let candidate = sqlx::query_scalar::<_, CustomerId>(
            r"
            SELECT c.id
            FROM public.clientes c
            LEFT JOIN public.pedidos p ON p.cliente_id = c.id
            GROUP BY c.id
            HAVING COUNT(p.id) <= $1
            ORDER BY RANDOM()
            LIMIT 1
            ",
        )
        .bind(MAX_ORDERS_FOR_DELETE)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(id) = candidate else {
            debug!("No low-dependency customers to delete");
            return Ok(false);
        };

        // Dependents go first; the schema has no cascade on purpose
        let orders_removed = sqlx::query("DELETE FROM public.pedidos WHERE cliente_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let customers_removed = sqlx::query("DELETE FROM public.clientes WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if customers_removed == 1 {
            tx.commit().await?;
            info!(customer = %id, orders_removed, "Customer deleted");
            Ok(true)
        } else {
            tx.rollback().await?;
            debug!(customer = %id, "Delete candidate vanished, no-op");
            Ok(false)
        }
    }
}

/// Whether a sqlx error is a Postgres unique-constraint violation.
fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}
