//! Synthetic data generation: names, emails, products, prices.
//!
//! The catalogs are fixed so runs are recognizable in downstream dashboards;
//! only the combinations are random. Email generation keeps an explicit
//! per-generator sequence so addresses never collide within a run (collisions
//! with rows from earlier runs are possible and handled as recoverable
//! unique violations by the caller).

use rand::Rng;
use rand::seq::IndexedRandom;
use rust_decimal::Decimal;

use mercado_core::{Email, EmailError};

/// Customer names drawn for new `clientes` rows.
pub const NAMES: [&str; 20] = [
    "Ana Silva",
    "Bruno Costa",
    "Carla Santos",
    "Diego Almeida",
    "Elena Ferreira",
    "Felipe Lima",
    "Gabriela Rocha",
    "Henrique Souza",
    "Isabela Martins",
    "João Oliveira",
    "Kamila Pereira",
    "Lucas Barbosa",
    "Marina Gomes",
    "Nicolas Cardoso",
    "Olívia Mendes",
    "Pedro Ribeiro",
    "Quintina Araújo",
    "Rafael Torres",
    "Sofia Nascimento",
    "Thiago Ramos",
];

/// Product labels for new `pedidos` rows.
pub const PRODUCTS: [&str; 15] = [
    "Notebook Dell",
    "Mouse Logitech",
    "Teclado Mecânico",
    "Monitor 24\"",
    "Webcam HD",
    "Smartphone Samsung",
    "Tablet iPad",
    "Fone Bluetooth",
    "Carregador Wireless",
    "Cabo USB-C",
    "SSD 1TB",
    "Memória RAM 16GB",
    "Placa de Vídeo",
    "Processador Intel",
    "Motherboard ASUS",
];

/// Email domains for generated addresses.
pub const EMAIL_DOMAINS: [&str; 5] = [
    "gmail.com",
    "hotmail.com",
    "yahoo.com.br",
    "empresa.com",
    "outlook.com",
];

/// Pick a random customer name from the catalog.
pub fn random_name<R: Rng>(rng: &mut R) -> &'static str {
    // catalog is non-empty, choose cannot fail
    NAMES.choose(rng).copied().unwrap_or(NAMES[0])
}

/// Pick a random product label from the catalog.
pub fn random_product<R: Rng>(rng: &mut R) -> &'static str {
    PRODUCTS.choose(rng).copied().unwrap_or(PRODUCTS[0])
}

/// Draw a uniform random price in `[min_cents, max_cents]`, as a 2-dp
/// decimal. Working in centavos keeps floats out of stored amounts.
pub fn random_price<R: Rng>(rng: &mut R, min_cents: i64, max_cents: i64) -> Decimal {
    Decimal::new(rng.random_range(min_cents..=max_cents), 2)
}

/// Generator for synthetic, per-run-unique email addresses.
///
/// The sequence counter is explicit state owned by the instance; there are
/// no process-wide globals involved.
#[derive(Debug, Default)]
pub struct EmailGenerator {
    seq: u32,
}

impl EmailGenerator {
    /// Create a generator starting at sequence 1.
    #[must_use]
    pub const fn new() -> Self {
        Self { seq: 0 }
    }

    /// Generate a validated address for `name`, e.g.
    /// `joao.oliveira17@gmail.com`.
    ///
    /// # Errors
    ///
    /// Returns `EmailError` if the combined address does not parse; with the
    /// fixed catalogs this does not happen, but the caller already has an
    /// error channel and generated data should never bypass validation.
    pub fn next_for<R: Rng>(&mut self, rng: &mut R, name: &str) -> Result<Email, EmailError> {
        self.seq += 1;
        let domain = EMAIL_DOMAINS.choose(rng).copied().unwrap_or("empresa.com");
        Email::parse(&format!("{}{}@{}", sanitize_name(name), self.seq, domain))
    }
}

/// Lowercase a catalog name and fold it into an ASCII email local part.
fn sanitize_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| match c {
            ' ' => '.',
            'á' | 'ã' | 'â' | 'à' => 'a',
            'é' | 'ê' => 'e',
            'í' => 'i',
            'ó' | 'õ' | 'ô' => 'o',
            'ú' => 'u',
            'ç' => 'c',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_sanitize_name_folds_accents() {
        assert_eq!(sanitize_name("João Oliveira"), "joao.oliveira");
        assert_eq!(sanitize_name("Quintina Araújo"), "quintina.araujo");
        assert_eq!(sanitize_name("Olívia Mendes"), "olivia.mendes");
    }

    #[test]
    fn test_emails_are_unique_within_a_run() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut generator = EmailGenerator::new();

        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            let name = random_name(&mut rng);
            let email = generator
                .next_for(&mut rng, name)
                .expect("catalog names produce valid addresses");
            assert!(seen.insert(email), "generator produced a duplicate email");
        }
    }

    #[test]
    fn test_every_catalog_name_yields_a_valid_address() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut generator = EmailGenerator::new();

        for name in NAMES {
            let email = generator
                .next_for(&mut rng, name)
                .expect("catalog names produce valid addresses");
            assert!(email.as_str().is_ascii(), "non-ascii email: {email}");
            assert!(EMAIL_DOMAINS.contains(&email.domain()));
        }
    }

    #[test]
    fn test_random_price_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            let price = random_price(&mut rng, 5_000, 200_000);
            assert!(price >= Decimal::new(5_000, 2));
            assert!(price <= Decimal::new(200_000, 2));
            assert_eq!(price.scale(), 2);
        }
    }
}
