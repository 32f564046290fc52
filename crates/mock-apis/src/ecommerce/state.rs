//! In-memory state for the e-commerce service.
//!
//! Sequential IDs and the RNG live inside the state struct, owned by the
//! single instance that mutates them; there are no process-wide counters.

use std::sync::Arc;

use chrono::{Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use mercado_core::{Price, ProductId, SaleId, ShopperId};

use super::models::{CATEGORIES, CHANNELS, PAYMENT_METHODS, Product, SALE_STATUSES, Sale, Shopper};
use crate::fake;

/// Shared handle used by handlers and the churn task.
pub type SharedState = Arc<RwLock<EcommerceState>>;

/// Everything the service knows, behind one lock.
pub struct EcommerceState {
    pub produtos: Vec<Product>,
    pub clientes: Vec<Shopper>,
    pub vendas: Vec<Sale>,
    next_product_id: i32,
    next_shopper_id: i32,
    next_sale_id: i32,
    rng: StdRng,
}

/// Products generated at startup.
const INITIAL_PRODUCTS: usize = 50;

/// Shoppers generated at startup.
const INITIAL_SHOPPERS: usize = 100;

impl EcommerceState {
    /// Build a freshly seeded state with an OS-seeded RNG.
    #[must_use]
    pub fn seeded() -> Self {
        Self::seeded_with(StdRng::from_os_rng())
    }

    /// Build a freshly seeded state with a caller-provided RNG
    /// (deterministic in tests).
    #[must_use]
    pub fn seeded_with(rng: StdRng) -> Self {
        let mut state = Self {
            produtos: Vec::with_capacity(INITIAL_PRODUCTS),
            clientes: Vec::with_capacity(INITIAL_SHOPPERS),
            vendas: Vec::new(),
            next_product_id: 1,
            next_shopper_id: 1,
            next_sale_id: 1,
            rng,
        };

        for _ in 0..INITIAL_PRODUCTS {
            state.add_product();
        }
        for _ in 0..INITIAL_SHOPPERS {
            state.add_shopper();
        }
        state
    }

    /// Wrap into the shared handle.
    #[must_use]
    pub fn into_shared(self) -> SharedState {
        Arc::new(RwLock::new(self))
    }

    fn add_product(&mut self) {
        let id = ProductId::new(self.next_product_id);
        self.next_product_id += 1;

        let registered_days_ago = self.rng.random_range(0..=365);
        self.produtos.push(Product {
            id,
            nome: fake::product_name(&mut self.rng),
            categoria: CATEGORIES
                .choose(&mut self.rng)
                .copied()
                .unwrap_or(CATEGORIES[0])
                .to_string(),
            preco: Price::new(fake::amount(&mut self.rng, 1_999, 99_999)),
            estoque: self.rng.random_range(0..=100),
            marca: fake::company(&mut self.rng),
            data_cadastro: Utc::now() - Duration::days(registered_days_ago),
            // roughly 75% of the catalog is active
            ativo: self.rng.random_range(0..4) != 0,
        });
    }

    fn add_shopper(&mut self) {
        let id = ShopperId::new(self.next_shopper_id);
        self.next_shopper_id += 1;

        let nome = fake::full_name(&mut self.rng);
        let email = fake::email_for(&mut self.rng, &nome);
        let (cidade, estado) = fake::city(&mut self.rng);
        let registered_days_ago = self.rng.random_range(0..=730);

        self.clientes.push(Shopper {
            id,
            nome,
            email,
            telefone: fake::phone(&mut self.rng),
            cidade,
            estado,
            data_cadastro: Utc::now() - Duration::days(registered_days_ago),
            vip: self.rng.random_bool(0.5),
            total_compras: 0,
            valor_total_gasto: Price::default(),
        });
    }

    /// Record one sale against a random active product and random shopper.
    ///
    /// Returns `None` when no active product or no shopper exists. Stock
    /// never goes below zero; shopper lifetime totals are bumped.
    pub fn record_sale(&mut self) -> Option<SaleId> {
        let product_idx = {
            let active: Vec<usize> = self
                .produtos
                .iter()
                .enumerate()
                .filter(|(_, p)| p.ativo)
                .map(|(i, _)| i)
                .collect();
            *active.choose(&mut self.rng)?
        };
        if self.clientes.is_empty() {
            return None;
        }
        let shopper_idx = self.rng.random_range(0..self.clientes.len());

        let quantidade = self.rng.random_range(1..=3);
        let desconto = if self.rng.random_bool(0.3) {
            fake::amount(&mut self.rng, 0, 15) // 0.00 - 0.15
        } else {
            Decimal::ZERO
        };

        let id = SaleId::new(self.next_sale_id);
        self.next_sale_id += 1;

        let sale = {
            let product = &self.produtos[product_idx];
            let gross = product.preco.amount() * Decimal::from(quantidade);
            let valor_total = Price::new(gross * (Decimal::ONE - desconto));

            Sale {
                id,
                cliente_id: self.clientes[shopper_idx].id,
                produto_id: product.id,
                quantidade,
                preco_unitario: product.preco,
                desconto,
                valor_total,
                metodo_pagamento: PAYMENT_METHODS
                    .choose(&mut self.rng)
                    .copied()
                    .unwrap_or(PAYMENT_METHODS[0])
                    .to_string(),
                status: SALE_STATUSES
                    .choose(&mut self.rng)
                    .copied()
                    .unwrap_or(SALE_STATUSES[0])
                    .to_string(),
                data_venda: Utc::now(),
                canal: CHANNELS
                    .choose(&mut self.rng)
                    .copied()
                    .unwrap_or(CHANNELS[0])
                    .to_string(),
            }
        };

        self.produtos[product_idx].estoque =
            (self.produtos[product_idx].estoque - quantidade).max(0);

        let shopper = &mut self.clientes[shopper_idx];
        shopper.total_compras += 1;
        shopper.valor_total_gasto =
            Price::new(shopper.valor_total_gasto.amount() + sale.valor_total.amount());

        tracing::info!(
            venda = %sale.id,
            produto = %sale.produto_id,
            total = %sale.valor_total,
            "New sale"
        );
        self.vendas.push(sale);
        Some(id)
    }

    /// Draw the churn pause (3 - 10 seconds).
    pub fn next_pause(&mut self) -> std::time::Duration {
        std::time::Duration::from_millis(self.rng.random_range(3_000..=10_000))
    }

    /// Whether this tick should produce a sale (70% of ticks).
    pub fn should_sell(&mut self) -> bool {
        self.rng.random_bool(0.7)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state() -> EcommerceState {
        EcommerceState::seeded_with(StdRng::seed_from_u64(99))
    }

    #[test]
    fn test_seeding_counts() {
        let state = test_state();
        assert_eq!(state.produtos.len(), INITIAL_PRODUCTS);
        assert_eq!(state.clientes.len(), INITIAL_SHOPPERS);
        assert!(state.vendas.is_empty());
    }

    #[test]
    fn test_shoppers_carry_validated_emails() {
        let state = test_state();
        assert!(
            state
                .clientes
                .iter()
                .all(|c| c.email.domain() == "exemplo.com" && !c.email.local_part().is_empty())
        );
    }

    #[test]
    fn test_ids_are_sequential() {
        let state = test_state();
        for (i, product) in state.produtos.iter().enumerate() {
            assert_eq!(product.id.as_i32(), i32::try_from(i).unwrap() + 1);
        }
    }

    #[test]
    fn test_record_sale_updates_totals() {
        let mut state = test_state();
        let before: u32 = state.clientes.iter().map(|c| c.total_compras).sum();

        let id = state.record_sale().expect("seeded state has active products");
        assert_eq!(state.vendas.len(), 1);
        assert_eq!(state.vendas[0].id, id);

        let after: u32 = state.clientes.iter().map(|c| c.total_compras).sum();
        assert_eq!(after, before + 1);
    }

    #[test]
    fn test_stock_never_goes_negative() {
        let mut state = test_state();
        for _ in 0..2_000 {
            let _ = state.record_sale();
        }
        assert!(state.produtos.iter().all(|p| p.estoque >= 0));
    }

    #[test]
    fn test_sales_only_reference_active_products() {
        let mut state = test_state();
        for _ in 0..200 {
            let _ = state.record_sale();
        }
        for sale in &state.vendas {
            let product = state
                .produtos
                .iter()
                .find(|p| p.id == sale.produto_id)
                .expect("sale references a known product");
            assert!(product.ativo);
        }
    }
}
