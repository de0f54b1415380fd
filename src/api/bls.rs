// ============================================================================
// API Client : BLS (Bureau of Labor Statistics, inflation US)
// ============================================================================
// Récupère la série CPI-U mensuelle via l'API publique v2 du BLS
//
// CONCEPTS RUST :
// 1. POST JSON : le BLS attend la requête dans le corps, pas dans l'URL
// 2. Parsing de valeurs String : le BLS livre les nombres entre guillemets
// ============================================================================

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, instrument, warn};

use crate::api::InflationProvider;
use crate::models::{CpiObservation, CpiSeries};

/// Série CPI-U toutes dépenses, villes US, non désaisonnalisée
pub const CPI_ALL_URBAN_SERIES: &str = "CUUR0000SA0";

// ============================================================================
// Structures pour parser la réponse JSON du BLS
// ============================================================================

#[derive(Debug, Deserialize)]
struct BlsResponse {
    status: String,

    // Le BLS met une majuscule à "Results"
    #[serde(rename = "Results")]
    results: Option<BlsResults>,
}

#[derive(Debug, Deserialize)]
struct BlsResults {
    series: Vec<BlsSeries>,
}

#[derive(Debug, Deserialize)]
struct BlsSeries {
    #[serde(rename = "seriesID")]
    series_id: String,
    data: Vec<BlsDataPoint>,
}

/// Une ligne de données BLS
///
/// period "M01".."M12" : mois ; "M13" : moyenne annuelle (ignorée)
#[derive(Debug, Deserialize)]
struct BlsDataPoint {
    year: String,
    period: String,
    value: String,
}

// ============================================================================
// Client
// ============================================================================

/// Client BLS pour la série CPI
pub struct BlsClient {
    client: reqwest::Client,
    base_url: String,
}

impl BlsClient {
    /// Crée le client HTTP
    ///
    /// L'API v2 sans clé suffit pour une série sur quelques années
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("lazyforex/0.1")
            .build()
            .context("Échec de la création du client HTTP BLS")?;

        Ok(Self {
            client,
            base_url: "https://api.bls.gov/publicAPI/v2/timeseries/data/".to_string(),
        })
    }
}

#[async_trait]
impl InflationProvider for BlsClient {
    /// Récupère la série CPI entre deux années incluses
    #[instrument(skip(self))]
    async fn get_cpi_series(&self, start_year: i32, end_year: i32) -> Result<CpiSeries> {
        // Corps de la requête : les années sont des strings côté BLS
        let payload = json!({
            "seriesid": [CPI_ALL_URBAN_SERIES],
            "startyear": start_year.to_string(),
            "endyear": end_year.to_string(),
        });

        debug!(url = %self.base_url, start_year, end_year, "Posting BLS request");

        let response = self
            .client
            .post(&self.base_url)
            .json(&payload)
            .send()
            .await
            .context("Échec de la requête HTTP vers le BLS")?;

        let status = response.status();
        debug!(status = %status, "Received HTTP response");

        if !status.is_success() {
            anyhow::bail!("Le BLS a retourné une erreur : HTTP {}", status);
        }

        let bls_response: BlsResponse = response
            .json()
            .await
            .context("Échec du parsing JSON de la réponse BLS")?;

        parse_bls_response(bls_response)
    }
}

/// Convertit la réponse BLS en CpiSeries
///
/// Les lignes M13 (moyenne annuelle) et les valeurs illisibles sont
/// sautées ; le tri chronologique est fait par CpiSeries (le BLS livre
/// du plus récent au plus ancien).
fn parse_bls_response(response: BlsResponse) -> Result<CpiSeries> {
    if response.status != "REQUEST_SUCCEEDED" {
        anyhow::bail!("Requête BLS refusée : {}", response.status);
    }

    let series = response
        .results
        .context("Réponse BLS sans résultats")?
        .series
        .into_iter()
        .next()
        .context("Aucune série dans la réponse BLS")?;

    let mut observations = Vec::new();
    let mut skipped_count = 0;

    for point in &series.data {
        let observation = match parse_data_point(point) {
            Some(observation) => observation,
            None => {
                skipped_count += 1;
                continue;
            }
        };
        observations.push(observation);
    }

    if skipped_count > 0 {
        warn!(
            skipped = skipped_count,
            total = series.data.len(),
            "Skipped BLS rows (annual averages or unparseable values)"
        );
    }

    if observations.is_empty() {
        anyhow::bail!("Aucune observation CPI exploitable dans la réponse BLS");
    }

    debug!(series_id = %series.series_id, parsed = observations.len(), "Parsed CPI series");
    Ok(CpiSeries::from_observations(series.series_id, observations))
}

/// Parse une ligne BLS en observation mensuelle
///
/// None pour les périodes non mensuelles (M13) et les champs illisibles
fn parse_data_point(point: &BlsDataPoint) -> Option<CpiObservation> {
    // "M01".."M12" uniquement
    let month: u32 = point.period.strip_prefix('M')?.parse().ok()?;
    if !(1..=12).contains(&month) {
        return None;
    }

    let year: i32 = point.year.parse().ok()?;
    let value: f64 = point.value.parse().ok()?;
    let date = NaiveDate::from_ymd_opt(year, month, 1)?;

    Some(CpiObservation { date, value })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bls_response() {
        // Extrait de réponse réelle : données du plus récent au plus ancien,
        // avec une ligne M13 à ignorer
        let json = r#"{
            "status": "REQUEST_SUCCEEDED",
            "Results": {
                "series": [{
                    "seriesID": "CUUR0000SA0",
                    "data": [
                        {"year": "2024", "period": "M02", "value": "310.326"},
                        {"year": "2024", "period": "M01", "value": "308.417"},
                        {"year": "2023", "period": "M13", "value": "304.702"},
                        {"year": "2023", "period": "M12", "value": "306.746"}
                    ]
                }]
            }
        }"#;

        let response: BlsResponse = serde_json::from_str(json).unwrap();
        let series = parse_bls_response(response).unwrap();

        // M13 sautée, le reste trié chronologiquement
        assert_eq!(series.len(), 3);
        assert_eq!(
            series.observations()[0].date,
            NaiveDate::from_ymd_opt(2023, 12, 1).unwrap()
        );
        assert!((series.last().unwrap().value - 310.326).abs() < 1e-9);
    }

    #[test]
    fn test_failed_status_is_an_error() {
        let json = r#"{"status": "REQUEST_NOT_PROCESSED", "Results": null}"#;
        let response: BlsResponse = serde_json::from_str(json).unwrap();

        assert!(parse_bls_response(response).is_err());
    }

    #[test]
    fn test_parse_data_point_rejects_annual_average() {
        let point = BlsDataPoint {
            year: "2023".to_string(),
            period: "M13".to_string(),
            value: "304.702".to_string(),
        };
        assert!(parse_data_point(&point).is_none());

        let point = BlsDataPoint {
            year: "2023".to_string(),
            period: "M07".to_string(),
            value: "305.691".to_string(),
        };
        let obs = parse_data_point(&point).unwrap();
        assert_eq!(obs.date, NaiveDate::from_ymd_opt(2023, 7, 1).unwrap());
    }

    #[tokio::test]
    async fn test_get_cpi_series_live() {
        // Test avec un vrai appel API (peut échouer si pas de connexion)
        let client = BlsClient::new().unwrap();
        let result = client.get_cpi_series(2022, 2024).await;

        match result {
            Ok(series) => {
                assert!(!series.is_empty());
                println!("✓ Récupéré {} observations CPI", series.len());
            }
            Err(e) => {
                println!("⚠ Test skippé (pas de connexion?) : {}", e);
            }
        }
    }
}
