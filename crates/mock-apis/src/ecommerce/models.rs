//! Wire types for the e-commerce service.
//!
//! Field names are the Portuguese ones the downstream ingestion already
//! expects; they are part of the external interface, not a style choice.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use mercado_core::{Email, Price, ProductId, SaleId, ShopperId};

/// Product categories.
pub const CATEGORIES: [&str; 8] = [
    "Eletrônicos",
    "Roupas",
    "Casa & Jardim",
    "Livros",
    "Esportes",
    "Beleza",
    "Automóveis",
    "Brinquedos",
];

/// Payment methods for generated sales.
pub const PAYMENT_METHODS: [&str; 4] = ["PIX", "Cartão de Crédito", "Cartão de Débito", "Boleto"];

/// Fulfillment status for generated sales.
pub const SALE_STATUSES: [&str; 4] = ["Pendente", "Processando", "Enviado", "Entregue"];

/// Sales channels.
pub const CHANNELS: [&str; 3] = ["Website", "Mobile App", "Marketplace"];

/// A catalog product.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub nome: String,
    pub categoria: String,
    pub preco: Price,
    pub estoque: i32,
    pub marca: String,
    pub data_cadastro: DateTime<Utc>,
    pub ativo: bool,
}

/// A registered shopper with running lifetime totals.
#[derive(Debug, Clone, Serialize)]
pub struct Shopper {
    pub id: ShopperId,
    pub nome: String,
    pub email: Email,
    pub telefone: String,
    pub cidade: String,
    pub estado: String,
    pub data_cadastro: DateTime<Utc>,
    pub vip: bool,
    pub total_compras: u32,
    pub valor_total_gasto: Price,
}

/// A sale recorded by the churn task.
#[derive(Debug, Clone, Serialize)]
pub struct Sale {
    pub id: SaleId,
    pub cliente_id: ShopperId,
    pub produto_id: ProductId,
    pub quantidade: i32,
    pub preco_unitario: Price,
    /// Fractional discount in `[0, 0.15]`, zero for most sales.
    pub desconto: Decimal,
    pub valor_total: Price,
    pub metodo_pagamento: String,
    pub status: String,
    pub data_venda: DateTime<Utc>,
    pub canal: String,
}
