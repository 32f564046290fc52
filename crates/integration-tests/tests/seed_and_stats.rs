//! Seed-batch and statistics properties against a live Postgres.
//!
//! Run with `cargo test -p mercado-integration-tests -- --ignored --test-threads=1`.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rust_decimal::Decimal;

use mercado_integration_tests::{clean_source_db, insert_customer_fixture, insert_order_fixture};
use mercado_simulator::{Mutator, SeedPlan, fetch_stats, seed};

#[tokio::test]
#[ignore = "requires a running Postgres source database"]
async fn seed_is_idempotent_for_fixed_customers() {
    let mut conn = clean_source_db().await.expect("test database available");
    let mut mutator = Mutator::with_rng(StdRng::seed_from_u64(7));

    let plan = SeedPlan {
        orders: 0,
        updates: 0,
        deletes: 0,
    };

    let first = seed(&mut conn, &mut mutator, &plan).await.expect("seed");
    assert_eq!(first.customers_inserted, 3);

    let second = seed(&mut conn, &mut mutator, &plan).await.expect("seed again");
    assert_eq!(second.customers_inserted, 0, "fixed customers conflict away");
}

#[tokio::test]
#[ignore = "requires a running Postgres source database"]
async fn seed_batch_lands_orders_on_existing_customers() {
    let mut conn = clean_source_db().await.expect("test database available");
    let mut mutator = Mutator::with_rng(StdRng::seed_from_u64(8));

    let plan = SeedPlan {
        orders: 5,
        updates: 2,
        deletes: 0,
    };
    let report = seed(&mut conn, &mut mutator, &plan).await.expect("seed");
    assert_eq!(report.orders_inserted, 5);

    let orphans: i64 = sqlx::query_scalar(
        r"
        SELECT COUNT(*)
        FROM public.pedidos p
        LEFT JOIN public.clientes c ON c.id = p.cliente_id
        WHERE c.id IS NULL
        ",
    )
    .fetch_one(&mut conn)
    .await
    .expect("count");
    assert_eq!(orphans, 0, "every order references an existing customer");
}

#[tokio::test]
#[ignore = "requires a running Postgres source database"]
async fn stats_reflect_known_fixtures() {
    let mut conn = clean_source_db().await.expect("test database available");

    let empty = fetch_stats(&mut conn).await.expect("stats on empty");
    assert_eq!(empty.total_customers, 0);
    assert_eq!(empty.total_orders, 0);
    assert_eq!(empty.total_revenue, Decimal::ZERO);
    assert!(empty.last_order.is_none());

    let customer = insert_customer_fixture(&mut conn, "Elena Ferreira", "elena@teste.com")
        .await
        .expect("fixture");
    insert_order_fixture(&mut conn, customer).await.expect("order 1");
    let last = insert_order_fixture(&mut conn, customer).await.expect("order 2");

    let snapshot = fetch_stats(&mut conn).await.expect("stats");
    assert_eq!(snapshot.total_customers, 1);
    assert_eq!(snapshot.total_orders, 2);
    // Two fixture orders at 1 x 100.00 each
    assert_eq!(snapshot.total_revenue, Decimal::new(20_000, 2));

    let last_order = snapshot.last_order.expect("an order exists");
    assert_eq!(last_order.id, last);
    assert_eq!(last_order.customer_name, "Elena Ferreira");
    assert_eq!(last_order.line_total, Decimal::new(10_000, 2));
}
