// ============================================================================
// API Client : Yahoo Finance (séries historiques de paires)
// ============================================================================
// Récupère l'historique quotidien d'une paire de devises ("USDEUR=X")
//
// CONCEPTS RUST AVANCÉS :
// 1. async/await : programmation asynchrone (non-bloquante)
// 2. Result<T, E> : gestion d'erreurs avec contexte
// 3. Serde : désérialisation JSON automatique
// ============================================================================

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::DateTime;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::api::SeriesProvider;
use crate::models::{CurrencyCode, CurrencyPair, Lookback, PricePoint, PriceSeries};

// ============================================================================
// Structures pour parser la réponse JSON de Yahoo Finance
// ============================================================================
// Yahoo retourne un JSON complexe, on définit des structures qui matchent
// exactement la structure JSON pour que serde puisse désérialiser
// automatiquement. Seule la colonne close nous intéresse ici.
// ============================================================================

/// Réponse complète de l'API Yahoo Finance
#[derive(Debug, Deserialize)]
struct YahooResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Vec<ChartResult>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<Quote>,
}

/// Colonne close de la réponse (les trous du marché sont des None)
#[derive(Debug, Deserialize)]
struct Quote {
    close: Option<Vec<Option<f64>>>,
}

// ============================================================================
// Client
// ============================================================================

/// Client Yahoo Finance pour les séries historiques
///
/// CONCEPT : Collaborateur explicite
/// - Le client HTTP est construit une fois dans new()
/// - L'instance est passée là où on en a besoin (pas de global)
pub struct YahooSeriesClient {
    client: reqwest::Client,
    base_url: String,
}

impl YahooSeriesClient {
    /// Crée le client avec un User-Agent (Yahoo bloque les clients anonymes)
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .context("Échec de la création du client HTTP Yahoo")?;

        Ok(Self {
            client,
            base_url: "https://query1.finance.yahoo.com/v8/finance/chart".to_string(),
        })
    }

    /// Construit l'URL de l'API pour une paire et un lookback
    ///
    /// L'intervalle est toujours quotidien ("1d") : la granularité
    /// intraday n'a pas de sens pour ce dashboard.
    fn build_url(&self, pair: CurrencyPair, lookback: Lookback) -> String {
        let now = chrono::Utc::now().timestamp();
        let days_ago = lookback.to_days() as i64;
        let period1 = now - (days_ago * 24 * 60 * 60);
        let period2 = now;

        format!(
            "{}/{}?interval=1d&period1={}&period2={}",
            self.base_url,
            pair.provider_symbol(),
            period1,
            period2
        )
    }
}

#[async_trait]
impl SeriesProvider for YahooSeriesClient {
    /// Récupère la série quotidienne d'une paire de devises
    ///
    /// CONCEPT RUST : #[instrument]
    /// - Macro tracing qui ajoute automatiquement un span
    /// - Tous les logs à l'intérieur auront le contexte de la paire
    #[instrument(skip(self, lookback), fields(lookback = %lookback.label()))]
    async fn get_series(
        &self,
        base: CurrencyCode,
        quote: CurrencyCode,
        lookback: Lookback,
    ) -> Result<PriceSeries> {
        let pair = CurrencyPair::new(base, quote);
        let url = self.build_url(pair, lookback);
        debug!(url = %url, "Built Yahoo Finance chart URL");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Échec de la requête HTTP vers Yahoo Finance")?;

        let status = response.status();
        debug!(status = %status, "Received HTTP response");

        if !status.is_success() {
            anyhow::bail!("Yahoo Finance a retourné une erreur : HTTP {}", status);
        }

        let yahoo_response: YahooResponse = response
            .json()
            .await
            .context("Échec du parsing JSON de la réponse Yahoo")?;

        parse_chart_response(yahoo_response, pair, lookback)
    }
}

/// Convertit la réponse Yahoo en PriceSeries
///
/// CONCEPT RUST : Ownership
/// - yahoo_response est "moved", on en devient propriétaire
/// - pair et lookback sont Copy, donc copiés automatiquement
fn parse_chart_response(
    yahoo_response: YahooResponse,
    pair: CurrencyPair,
    lookback: Lookback,
) -> Result<PriceSeries> {
    let result = yahoo_response
        .chart
        .result
        .into_iter()
        .next()
        .context("Aucune donnée retournée par Yahoo Finance")?;

    let timestamps = result.timestamp.unwrap_or_default();
    let closes = result
        .indicators
        .quote
        .into_iter()
        .next()
        .and_then(|q| q.close)
        .unwrap_or_default();

    let mut series = PriceSeries::new(pair, lookback);
    let mut skipped_count = 0;

    // CONCEPT RUST : zip de deux colonnes
    // - Les timestamps et les closes sont alignés par index
    // - Un close manquant (jour sans cotation) est sauté
    for (&timestamp, close) in timestamps.iter().zip(closes.iter()) {
        let price = match close {
            Some(price) => *price,
            None => {
                skipped_count += 1;
                continue;
            }
        };

        let datetime = DateTime::from_timestamp(timestamp, 0).context("Timestamp invalide")?;

        series.push(PricePoint {
            date: datetime.date_naive(),
            price,
        });
    }

    if skipped_count > 0 {
        warn!(
            skipped = skipped_count,
            total = timestamps.len(),
            "Skipped points with missing close"
        );
    }

    debug!(
        pair = %pair.display(),
        parsed = series.len(),
        "Finished parsing price series"
    );

    if series.is_empty() {
        anyhow::bail!("Aucun prix valide trouvé pour {}", pair.display());
    }

    Ok(series)
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url() {
        let client = YahooSeriesClient::new().unwrap();
        let pair = CurrencyPair::new(CurrencyCode::Usd, CurrencyCode::Eur);
        let url = client.build_url(pair, Lookback::ThreeMonths);

        assert!(url.contains("USDEUR=X"));
        assert!(url.contains("interval=1d"));
        assert!(url.contains("yahoo.com"));
    }

    #[test]
    fn test_parse_chart_response() {
        // Réponse minimale : 3 jours dont un close manquant
        let json = r#"{
            "chart": {
                "result": [{
                    "timestamp": [1704153600, 1704240000, 1704326400],
                    "indicators": {
                        "quote": [{ "close": [0.91, null, 0.92] }]
                    }
                }]
            }
        }"#;

        let response: YahooResponse = serde_json::from_str(json).unwrap();
        let pair = CurrencyPair::new(CurrencyCode::Usd, CurrencyCode::Eur);
        let series = parse_chart_response(response, pair, Lookback::OneMonth).unwrap();

        // Le close null est sauté
        assert_eq!(series.len(), 2);
        assert_eq!(series.first().unwrap().price, 0.91);
        assert_eq!(series.last().unwrap().price, 0.92);
    }

    #[test]
    fn test_parse_empty_response_fails() {
        let json = r#"{
            "chart": {
                "result": [{
                    "timestamp": [],
                    "indicators": { "quote": [{ "close": [] }] }
                }]
            }
        }"#;

        let response: YahooResponse = serde_json::from_str(json).unwrap();
        let pair = CurrencyPair::new(CurrencyCode::Usd, CurrencyCode::Eur);

        // Série vide : erreur explicite plutôt qu'une série trompeuse
        assert!(parse_chart_response(response, pair, Lookback::OneMonth).is_err());
    }

    // Test async nécessite tokio test runtime
    // CONCEPT RUST : #[tokio::test]
    // - Macro qui setup un runtime tokio pour le test
    // - Permet d'utiliser .await dans les tests
    #[tokio::test]
    async fn test_get_series_live() {
        // Test avec un vrai appel API (peut échouer si pas de connexion)
        let client = YahooSeriesClient::new().unwrap();
        let result = client
            .get_series(CurrencyCode::Usd, CurrencyCode::Eur, Lookback::OneMonth)
            .await;

        match result {
            Ok(series) => {
                assert!(!series.is_empty());
                println!("✓ Récupéré {} points pour USD/EUR", series.len());
            }
            Err(e) => {
                println!("⚠ Test skippé (pas de connexion?) : {}", e);
            }
        }
    }
}
