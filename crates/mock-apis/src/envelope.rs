//! Common list-response envelope.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// The `{ total, dados, timestamp }` shape every list endpoint returns.
#[derive(Debug, Serialize)]
pub struct ListEnvelope<T> {
    pub total: usize,
    pub dados: Vec<T>,
    pub timestamp: DateTime<Utc>,
}

impl<T> ListEnvelope<T> {
    /// Wrap a page of records, stamping the response time.
    #[must_use]
    pub fn new(dados: Vec<T>) -> Self {
        Self {
            total: dados.len(),
            dados,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_matches_page_size() {
        let envelope = ListEnvelope::new(vec![1, 2, 3]);
        assert_eq!(envelope.total, 3);

        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["total"], 3);
        assert_eq!(json["dados"].as_array().unwrap().len(), 3);
        assert!(json["timestamp"].is_string());
    }
}
