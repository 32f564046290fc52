//! Mutation-generator properties against a live Postgres.
//!
//! Run with `cargo test -p mercado-integration-tests -- --ignored --test-threads=1`.

use rand::SeedableRng;
use rand::rngs::StdRng;

use mercado_integration_tests::{
    clean_source_db, count_customers, count_orders_for, insert_customer_fixture,
    insert_order_fixture,
};
use mercado_simulator::Mutator;

fn mutator() -> Mutator {
    Mutator::with_rng(StdRng::seed_from_u64(4242))
}

#[tokio::test]
#[ignore = "requires a running Postgres source database"]
async fn inserted_customer_appears_in_scan_with_unique_email() {
    let mut conn = clean_source_db().await.expect("test database available");
    let mut mutator = mutator();

    let mut inserted = Vec::new();
    for _ in 0..20 {
        if let Some(id) = mutator.insert_customer(&mut conn).await.expect("insert") {
            inserted.push(id);
        }
    }
    assert!(!inserted.is_empty(), "at least one insert should land");

    let rows: Vec<(i32, String)> = sqlx::query_as("SELECT id, email FROM public.clientes")
        .fetch_all(&mut conn)
        .await
        .expect("scan");

    for id in inserted {
        assert!(rows.iter().any(|(row_id, _)| *row_id == id.as_i32()));
    }

    let mut emails: Vec<&str> = rows.iter().map(|(_, email)| email.as_str()).collect();
    emails.sort_unstable();
    emails.dedup();
    assert_eq!(emails.len(), rows.len(), "emails must be unique");
}

#[tokio::test]
#[ignore = "requires a running Postgres source database"]
async fn insert_order_on_empty_store_writes_nothing() {
    let mut conn = clean_source_db().await.expect("test database available");
    let mut mutator = mutator();

    let result = mutator.insert_order(&mut conn, None).await.expect("call");
    assert!(result.is_none());

    let orders: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM public.pedidos")
        .fetch_one(&mut conn)
        .await
        .expect("count");
    assert_eq!(orders, 0);
}

#[tokio::test]
#[ignore = "requires a running Postgres source database"]
async fn delete_spares_customers_with_two_orders() {
    let mut conn = clean_source_db().await.expect("test database available");
    let mut mutator = mutator();

    let guarded = insert_customer_fixture(&mut conn, "Ana Silva", "ana@teste.com")
        .await
        .expect("fixture");
    insert_order_fixture(&mut conn, guarded).await.expect("order 1");
    insert_order_fixture(&mut conn, guarded).await.expect("order 2");

    // The only customer has 2 orders, so no candidate qualifies
    for _ in 0..10 {
        let deleted = mutator.delete_random_customer(&mut conn).await.expect("call");
        assert!(!deleted, "guarded customer must never be deleted");
    }

    assert_eq!(count_customers(&mut conn).await.expect("count"), 1);
    assert_eq!(count_orders_for(&mut conn, guarded).await.expect("count"), 2);
}

#[tokio::test]
#[ignore = "requires a running Postgres source database"]
async fn delete_removes_dependents_with_parent() {
    let mut conn = clean_source_db().await.expect("test database available");
    let mut mutator = mutator();

    let victim = insert_customer_fixture(&mut conn, "Bruno Costa", "bruno@teste.com")
        .await
        .expect("fixture");
    insert_order_fixture(&mut conn, victim).await.expect("order");

    let deleted = mutator.delete_random_customer(&mut conn).await.expect("call");
    assert!(deleted);

    assert_eq!(count_customers(&mut conn).await.expect("count"), 0);
    assert_eq!(count_orders_for(&mut conn, victim).await.expect("count"), 0);
}

#[tokio::test]
#[ignore = "requires a running Postgres source database"]
async fn repeated_updates_never_duplicate_emails() {
    let mut conn = clean_source_db().await.expect("test database available");
    let mut mutator = mutator();

    for i in 0..5 {
        insert_customer_fixture(&mut conn, "Carla Santos", &format!("carla{i}@teste.com"))
            .await
            .expect("fixture");
    }

    for _ in 0..30 {
        mutator.update_random_customer(&mut conn).await.expect("update");

        let distinct: i64 =
            sqlx::query_scalar("SELECT COUNT(DISTINCT email) FROM public.clientes")
                .fetch_one(&mut conn)
                .await
                .expect("count");
        assert_eq!(distinct, 5, "emails must stay unique after every update");
    }
}

#[tokio::test]
#[ignore = "requires a running Postgres source database"]
async fn update_on_empty_store_returns_false() {
    let mut conn = clean_source_db().await.expect("test database available");
    let mut mutator = mutator();

    let updated = mutator.update_random_customer(&mut conn).await.expect("call");
    assert!(!updated);
}

#[tokio::test]
#[ignore = "requires a running Postgres source database"]
async fn insert_order_for_known_customer_references_it() {
    let mut conn = clean_source_db().await.expect("test database available");
    let mut mutator = mutator();

    let customer = insert_customer_fixture(&mut conn, "Diego Almeida", "diego@teste.com")
        .await
        .expect("fixture");

    let order = mutator
        .insert_order(&mut conn, Some(customer))
        .await
        .expect("insert")
        .expect("order lands");

    let owner: i32 = sqlx::query_scalar("SELECT cliente_id FROM public.pedidos WHERE id = $1")
        .bind(order)
        .fetch_one(&mut conn)
        .await
        .expect("lookup");
    assert_eq!(owner, customer.as_i32());
}
