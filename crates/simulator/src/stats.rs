//! Read-only aggregate counters for progress reporting.
//!
//! Fetched every few cycles by the driver and once more at shutdown. Purely
//! observational: nothing here feeds back into action selection.

use rust_decimal::Decimal;
use sqlx::PgConnection;

use mercado_core::OrderId;

use crate::mutator::MutationError;

/// Snapshot of the source database's aggregate state.
#[derive(Debug, Clone)]
pub struct SourceStats {
    /// Row count of `clientes`.
    pub total_customers: i64,
    /// Row count of `pedidos`.
    pub total_orders: i64,
    /// `SUM(quantidade * preco_unitario)` over all orders, zero when empty.
    pub total_revenue: Decimal,
    /// The most recent order by id, when any exists.
    pub last_order: Option<LastOrder>,
}

/// The most recent order, joined with its customer's name.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LastOrder {
    pub id: OrderId,
    pub customer_name: String,
    pub product: String,
    pub line_total: Decimal,
}

/// Fetch current aggregate statistics.
///
/// # Errors
///
/// Returns `MutationError::Database` if any query fails.
pub async fn fetch_stats(conn: &mut PgConnection) -> Result<SourceStats, MutationError> {
    let total_customers =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM public.clientes")
            .fetch_one(&mut *conn)
            .await?;

    let total_orders = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM public.pedidos")
        .fetch_one(&mut *conn)
        .await?;

    let total_revenue = sqlx::query_scalar::<_, Decimal>(
        "SELECT COALESCE(SUM(quantidade * preco_unitario), 0) FROM public.pedidos",
    )
    .fetch_one(&mut *conn)
    .await?;

    let last_order = sqlx::query_as::<_, LastOrder>(
        r"
        SELECT p.id,
               c.nome AS customer_name,
               p.produto AS product,
               (p.quantidade * p.preco_unitario) AS line_total
        FROM public.pedidos p
        JOIN public.clientes c ON p.cliente_id = c.id
        ORDER BY p.id DESC
        LIMIT 1
        ",
    )
    .fetch_optional(&mut *conn)
    .await?;

    Ok(SourceStats {
        total_customers,
        total_orders,
        total_revenue,
        last_order,
    })
}

impl SourceStats {
    /// Log the snapshot at info level.
    pub fn report(&self) {
        tracing::info!(
            customers = self.total_customers,
            orders = self.total_orders,
            revenue = %self.total_revenue,
            "Source database statistics"
        );
        if let Some(last) = &self.last_order {
            tracing::info!(
                order = %last.id,
                customer = %last.customer_name,
                product = %last.product,
                total = %last.line_total,
                "Most recent order"
            );
        }
    }
}
