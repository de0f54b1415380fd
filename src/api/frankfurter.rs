// ============================================================================
// API Client : Frankfurter (taux de change spot)
// ============================================================================
// Récupère le taux de référence BCE d'une paire via api.frankfurter.app
//
// CONCEPTS RUST :
// 1. HashMap<String, f64> : la réponse indexe les taux par code devise
// 2. Context (anyhow) : enrichir les erreurs réseau/parsing
// ============================================================================

use std::collections::HashMap;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::api::RateProvider;
use crate::models::CurrencyCode;

/// Réponse de l'endpoint /latest
///
/// Exemple : {"amount":1.0,"base":"USD","date":"2024-01-05",
///            "rates":{"EUR":0.9151}}
#[derive(Debug, Deserialize)]
struct LatestResponse {
    base: String,
    rates: HashMap<String, f64>,
}

/// Client Frankfurter pour les taux spot
pub struct FrankfurterClient {
    client: reqwest::Client,
    base_url: String,
}

impl FrankfurterClient {
    /// Crée le client HTTP
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("lazyforex/0.1")
            .build()
            .context("Échec de la création du client HTTP Frankfurter")?;

        Ok(Self {
            client,
            base_url: "https://api.frankfurter.app".to_string(),
        })
    }

    /// Construit l'URL de l'endpoint /latest pour une paire
    fn build_url(&self, base: CurrencyCode, quote: CurrencyCode) -> String {
        format!(
            "{}/latest?from={}&to={}",
            self.base_url,
            base.code(),
            quote.code()
        )
    }
}

#[async_trait]
impl RateProvider for FrankfurterClient {
    /// Récupère le taux spot base -> quote
    #[instrument(skip(self))]
    async fn get_rate(&self, base: CurrencyCode, quote: CurrencyCode) -> Result<f64> {
        // Une devise contre elle-même vaut toujours 1
        if base == quote {
            return Ok(1.0);
        }

        let url = self.build_url(base, quote);
        debug!(url = %url, "Built Frankfurter URL");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Échec de la requête HTTP vers Frankfurter")?;

        let status = response.status();
        debug!(status = %status, "Received HTTP response");

        if !status.is_success() {
            anyhow::bail!("Frankfurter a retourné une erreur : HTTP {}", status);
        }

        let latest: LatestResponse = response
            .json()
            .await
            .context("Échec du parsing JSON de la réponse Frankfurter")?;

        extract_rate(latest, quote)
    }
}

/// Extrait le taux de la devise cotée de la réponse
fn extract_rate(latest: LatestResponse, quote: CurrencyCode) -> Result<f64> {
    debug!(base = %latest.base, rates = latest.rates.len(), "Parsed Frankfurter response");

    latest
        .rates
        .get(quote.code())
        .copied()
        .with_context(|| format!("Taux absent de la réponse pour {}", quote.code()))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url() {
        let client = FrankfurterClient::new().unwrap();
        let url = client.build_url(CurrencyCode::Usd, CurrencyCode::Eur);

        assert!(url.contains("from=USD"));
        assert!(url.contains("to=EUR"));
        assert!(url.contains("frankfurter.app"));
    }

    #[test]
    fn test_extract_rate() {
        let json = r#"{"amount":1.0,"base":"USD","date":"2024-01-05","rates":{"EUR":0.9151}}"#;
        let latest: LatestResponse = serde_json::from_str(json).unwrap();

        let rate = extract_rate(latest, CurrencyCode::Eur).unwrap();
        assert!((rate - 0.9151).abs() < 1e-9);
    }

    #[test]
    fn test_extract_missing_rate_fails() {
        let json = r#"{"amount":1.0,"base":"USD","date":"2024-01-05","rates":{"EUR":0.9151}}"#;
        let latest: LatestResponse = serde_json::from_str(json).unwrap();

        // GBP absente de la réponse : erreur explicite
        assert!(extract_rate(latest, CurrencyCode::Gbp).is_err());
    }

    #[tokio::test]
    async fn test_same_currency_is_identity() {
        let client = FrankfurterClient::new().unwrap();
        // Aucun appel réseau pour base == quote
        let rate = client
            .get_rate(CurrencyCode::Usd, CurrencyCode::Usd)
            .await
            .unwrap();
        assert_eq!(rate, 1.0);
    }
}
