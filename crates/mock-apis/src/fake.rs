//! Catalog-driven fake data.
//!
//! Real fixtures come from combining fixed word lists, not from a faker
//! library: the pipeline downstream only needs plausible shapes, and fixed
//! catalogs keep the services dependency-light and deterministic under a
//! seeded RNG.

use rand::Rng;
use rand::seq::IndexedRandom;
use rust_decimal::Decimal;

use mercado_core::Email;

const FIRST_NAMES: [&str; 16] = [
    "Ana", "Bruno", "Carla", "Diego", "Elena", "Felipe", "Gabriela", "Henrique", "Isabela",
    "João", "Kamila", "Lucas", "Marina", "Nicolas", "Olívia", "Pedro",
];

const LAST_NAMES: [&str; 12] = [
    "Silva", "Costa", "Santos", "Almeida", "Ferreira", "Lima", "Rocha", "Souza", "Martins",
    "Oliveira", "Pereira", "Barbosa",
];

const COMPANIES: [&str; 10] = [
    "Aurora Tech",
    "Beira-Mar Log",
    "Cedro Digital",
    "Delta Varejo",
    "Estrela Norte",
    "Farol Sistemas",
    "Girassol SA",
    "Horizonte Web",
    "Ipanema Dados",
    "Jacarandá Ltda",
];

const CITIES: [(&str, &str); 8] = [
    ("Rio de Janeiro", "RJ"),
    ("São Paulo", "SP"),
    ("Belo Horizonte", "MG"),
    ("Curitiba", "PR"),
    ("Porto Alegre", "RS"),
    ("Salvador", "BA"),
    ("Recife", "PE"),
    ("Fortaleza", "CE"),
];

const JOB_TITLES: [&str; 8] = [
    "Analista de Dados",
    "Gerente Comercial",
    "Coordenador de TI",
    "Diretor de Operações",
    "Especialista em Marketing",
    "Consultor de Vendas",
    "Engenheiro de Software",
    "Assistente Administrativo",
];

const PRODUCT_ADJECTIVES: [&str; 8] = [
    "Compacto", "Premium", "Essencial", "Ultra", "Clássico", "Portátil", "Profissional", "Smart",
];

const PRODUCT_NOUNS: [&str; 10] = [
    "Organizador",
    "Carregador",
    "Suporte",
    "Kit Ferramentas",
    "Mochila",
    "Luminária",
    "Caixa de Som",
    "Filtro",
    "Ventilador",
    "Cafeteira",
];

/// Pick a random element from a non-empty slice.
fn pick<'a, R: Rng>(rng: &mut R, items: &'a [&'a str]) -> &'a str {
    items.choose(rng).copied().unwrap_or("")
}

/// A full name like "Marina Souza".
pub fn full_name<R: Rng>(rng: &mut R) -> String {
    format!(
        "{} {}",
        pick(rng, &FIRST_NAMES),
        pick(rng, &LAST_NAMES)
    )
}

/// A validated email derived from `name` with a numeric suffix.
pub fn email_for<R: Rng>(rng: &mut R, name: &str) -> Email {
    let mut local: String = name
        .to_lowercase()
        .chars()
        .map(|c| match c {
            ' ' => '.',
            'á' | 'ã' | 'â' => 'a',
            'é' | 'ê' => 'e',
            'í' => 'i',
            'ó' | 'õ' | 'ô' => 'o',
            'ú' => 'u',
            'ç' => 'c',
            other => other,
        })
        .collect();
    if local.is_empty() {
        local.push_str("contato");
    }
    let raw = format!("{local}{}@exemplo.com", rng.random_range(1..=9999));
    // local part is non-empty and the domain is fixed, so this always parses
    Email::parse(&raw).expect("generated address is structurally valid")
}

/// A BR-shaped phone number.
pub fn phone<R: Rng>(rng: &mut R) -> String {
    format!(
        "({:02}) 9{:04}-{:04}",
        rng.random_range(11..=99),
        rng.random_range(0..=9999),
        rng.random_range(0..=9999)
    )
}

/// A company name.
pub fn company<R: Rng>(rng: &mut R) -> String {
    pick(rng, &COMPANIES).to_string()
}

/// A (city, state-abbreviation) pair.
pub fn city<R: Rng>(rng: &mut R) -> (String, String) {
    let (city, state) = CITIES.choose(rng).copied().unwrap_or(CITIES[0]);
    (city.to_string(), state.to_string())
}

/// A job title.
pub fn job_title<R: Rng>(rng: &mut R) -> String {
    pick(rng, &JOB_TITLES).to_string()
}

/// A two-word product name like "Suporte Premium".
pub fn product_name<R: Rng>(rng: &mut R) -> String {
    format!(
        "{} {}",
        pick(rng, &PRODUCT_NOUNS),
        pick(rng, &PRODUCT_ADJECTIVES)
    )
}

/// A uniform 2-dp decimal amount in `[min_cents, max_cents]`.
pub fn amount<R: Rng>(rng: &mut R, min_cents: i64, max_cents: i64) -> Decimal {
    Decimal::new(rng.random_range(min_cents..=max_cents), 2)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_full_name_has_two_parts() {
        let mut rng = StdRng::seed_from_u64(5);
        let name = full_name(&mut rng);
        assert_eq!(name.split_whitespace().count(), 2);
    }

    #[test]
    fn test_email_carries_name_and_fixed_domain() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..100 {
            let name = full_name(&mut rng);
            let email = email_for(&mut rng, &name);
            assert_eq!(email.domain(), "exemplo.com");
            assert!(!email.local_part().is_empty());
        }
    }

    #[test]
    fn test_email_survives_a_degenerate_name() {
        let mut rng = StdRng::seed_from_u64(5);
        let email = email_for(&mut rng, "");
        assert!(email.local_part().starts_with("contato"));
    }

    #[test]
    fn test_amount_in_range() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..100 {
            let value = amount(&mut rng, 1_999, 99_999);
            assert!(value >= Decimal::new(1_999, 2) && value <= Decimal::new(99_999, 2));
        }
    }
}
