//! Integration tests for the Mercado CDC demo.
//!
//! These tests run real SQL against a live Postgres and are `#[ignore]`d by
//! default so `cargo test` stays green without one.
//!
//! # Running
//!
//! ```bash
//! # Start the source database (see DB_* variables for overrides), then:
//! cargo test -p mercado-integration-tests -- --ignored --test-threads=1
//! ```
//!
//! Tests share one database and truncate the source tables as they start,
//! hence `--test-threads=1`.

use sqlx::PgConnection;

use mercado_core::{CustomerId, OrderId};
use mercado_simulator::{SourceDbConfig, connect};

/// Connect to the test database, apply migrations, and truncate the source
/// tables so the test starts from a clean slate.
///
/// # Errors
///
/// Returns an error if the database is unreachable or setup SQL fails.
pub async fn clean_source_db() -> Result<PgConnection, Box<dyn std::error::Error>> {
    let config = SourceDbConfig::from_env()?;
    let mut conn = connect(&config).await?;

    sqlx::migrate!("../simulator/migrations")
        .run(&mut conn)
        .await?;

    sqlx::query("TRUNCATE public.pedidos, public.clientes RESTART IDENTITY")
        .execute(&mut conn)
        .await?;

    Ok(conn)
}

/// Insert a customer fixture with a fixed email, returning its id.
///
/// # Errors
///
/// Returns `sqlx::Error` if the insert fails.
pub async fn insert_customer_fixture(
    conn: &mut PgConnection,
    name: &str,
    email: &str,
) -> Result<CustomerId, sqlx::Error> {
    sqlx::query_scalar::<_, CustomerId>(
        r"
        INSERT INTO public.clientes (nome, email, data_cadastro, ultima_atualizacao)
        VALUES ($1, $2, now(), now())
        RETURNING id
        ",
    )
    .bind(name)
    .bind(email)
    .fetch_one(conn)
    .await
}

/// Insert an order fixture for `customer`, returning its id.
///
/// # Errors
///
/// Returns `sqlx::Error` if the insert fails.
pub async fn insert_order_fixture(
    conn: &mut PgConnection,
    customer: CustomerId,
) -> Result<OrderId, sqlx::Error> {
    sqlx::query_scalar::<_, OrderId>(
        r"
        INSERT INTO public.pedidos
            (cliente_id, produto, quantidade, preco_unitario, data_pedido, ultima_atualizacao)
        VALUES ($1, 'Notebook', 1, 100.00, now(), now())
        RETURNING id
        ",
    )
    .bind(customer)
    .fetch_one(conn)
    .await
}

/// Count customers.
///
/// # Errors
///
/// Returns `sqlx::Error` if the query fails.
pub async fn count_customers(conn: &mut PgConnection) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM public.clientes")
        .fetch_one(conn)
        .await
}

/// Count orders referencing `customer`.
///
/// # Errors
///
/// Returns `sqlx::Error` if the query fails.
pub async fn count_orders_for(
    conn: &mut PgConnection,
    customer: CustomerId,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM public.pedidos WHERE cliente_id = $1")
        .bind(customer)
        .fetch_one(conn)
        .await
}
