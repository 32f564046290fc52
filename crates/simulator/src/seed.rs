//! One-shot batch population, the pipeline's first step.
//!
//! Where the continuous driver trickles mutations, seeding lands a small
//! batch in one call: a fixed trio of well-known customers (idempotent via
//! `ON CONFLICT DO NOTHING`), a handful of random orders, then a few updates
//! and guarded deletes so a CDC consumer sees all three change types from a
//! single run.

use chrono::{Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use sqlx::{Connection, PgConnection};
use tracing::info;

use crate::generate;
use crate::mutator::{MutationError, Mutator};

/// Fixed customers inserted by every seed run.
const SEED_CUSTOMERS: [(&str, &str); 3] = [
    ("João Silva", "joao@email.com"),
    ("Maria Santos", "maria@email.com"),
    ("Pedro Costa", "pedro@email.com"),
];

/// Product labels used for seeded orders (a smaller catalog than the
/// continuous simulator's).
const SEED_PRODUCTS: [&str; 4] = ["Notebook", "Mouse", "Teclado", "Monitor"];

/// Seeded order quantity range.
const SEED_QUANTITY_RANGE: std::ops::RangeInclusive<i32> = 1..=3;

/// Seeded unit price range in centavos (R$ 50.00 - R$ 500.00).
const SEED_PRICE_RANGE_CENTS: std::ops::RangeInclusive<i64> = 5_000..=50_000;

/// How much of each change type a seed run produces.
#[derive(Debug, Clone, Copy)]
pub struct SeedPlan {
    /// Random orders to insert.
    pub orders: u32,
    /// Random customer email updates.
    pub updates: u32,
    /// Guarded customer deletes.
    pub deletes: u32,
}

impl Default for SeedPlan {
    fn default() -> Self {
        Self {
            orders: 5,
            updates: 2,
            deletes: 1,
        }
    }
}

/// What a seed run actually did.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeedReport {
    /// Fixed customers newly inserted (0..=3; conflicts are skipped).
    pub customers_inserted: u64,
    /// Orders inserted.
    pub orders_inserted: u32,
    /// Customers whose email was updated.
    pub customers_updated: u32,
    /// Customers deleted.
    pub customers_deleted: u32,
}

/// Run one seed batch.
///
/// # Errors
///
/// Returns `MutationError::Database` if any statement fails. Partial
/// progress stays committed: each insert/update/delete is its own
/// transaction, same as the continuous driver.
pub async fn seed(
    conn: &mut PgConnection,
    mutator: &mut Mutator,
    plan: &SeedPlan,
) -> Result<SeedReport, MutationError> {
    let mut report = SeedReport::default();

    // Fixed customers, idempotent across runs
    let mut tx = conn.begin().await?;
    for (name, email) in SEED_CUSTOMERS {
        let inserted = sqlx::query(
            r"
            INSERT INTO public.clientes (nome, email, data_cadastro, ultima_atualizacao)
            VALUES ($1, $2, $3, $3)
            ON CONFLICT (email) DO NOTHING
            ",
        )
        .bind(name)
        .bind(email)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;
        report.customers_inserted += inserted.rows_affected();
    }
    tx.commit().await?;

    // Random orders against random existing customers; the customer pick is
    // pushed into the INSERT so there is no window between choose and write
    let mut rng = StdRng::from_os_rng();
    for _ in 0..plan.orders {
        let product = SEED_PRODUCTS.choose(&mut rng).copied().unwrap_or("Notebook");
        let quantity = rng.random_range(SEED_QUANTITY_RANGE);
        let unit_price = generate::random_price(
            &mut rng,
            *SEED_PRICE_RANGE_CENTS.start(),
            *SEED_PRICE_RANGE_CENTS.end(),
        );
        let order_date = Utc::now() - Duration::days(rng.random_range(0..=30));

        let mut tx = conn.begin().await?;
        let inserted = sqlx::query(
            r"
            INSERT INTO public.pedidos
                (cliente_id, produto, quantidade, preco_unitario, data_pedido, ultima_atualizacao)
            SELECT id, $1, $2, $3, $4, $5
            FROM public.clientes
            ORDER BY RANDOM()
            LIMIT 1
            ",
        )
        .bind(product)
        .bind(quantity)
        .bind(unit_price)
        .bind(order_date)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        report.orders_inserted += u32::try_from(inserted.rows_affected()).unwrap_or(0);
    }

    // A few updates and guarded deletes so the batch carries every change type
    for _ in 0..plan.updates {
        if mutator.update_random_customer(conn).await? {
            report.customers_updated += 1;
        }
    }
    for _ in 0..plan.deletes {
        if mutator.delete_random_customer(conn).await? {
            report.customers_deleted += 1;
        }
    }

    info!(
        customers_inserted = report.customers_inserted,
        orders_inserted = report.orders_inserted,
        customers_updated = report.customers_updated,
        customers_deleted = report.customers_deleted,
        "Seed batch complete"
    );
    Ok(report)
}
