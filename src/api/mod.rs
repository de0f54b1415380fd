// ============================================================================
// Module : api
// ============================================================================
// Interfaces des fournisseurs de données externes et leurs implémentations
//
// CONCEPT RUST : Trait objects comme frontière de collaboration
// - Le reste de l'application ne connaît que les traits
// - Les clients HTTP concrets sont construits dans main() et passés
//   explicitement (pas de singleton global)
// - async_trait : permet des méthodes async dans les traits
// ============================================================================

pub mod bls;         // Inflation US (BLS public API v2)
pub mod frankfurter; // Taux spot (Frankfurter / BCE)
pub mod yahoo;       // Séries historiques de paires (Yahoo Finance)

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{CpiSeries, CurrencyCode, Lookback, PriceSeries};

pub use bls::BlsClient;
pub use frankfurter::FrankfurterClient;
pub use yahoo::YahooSeriesClient;

/// Fournisseur de taux de change spot
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Retourne le taux base -> quote (combien de quote pour 1 base)
    async fn get_rate(&self, base: CurrencyCode, quote: CurrencyCode) -> Result<f64>;
}

/// Fournisseur de séries historiques quotidiennes
#[async_trait]
pub trait SeriesProvider: Send + Sync {
    /// Retourne la série quotidienne de la paire sur le lookback demandé
    async fn get_series(
        &self,
        base: CurrencyCode,
        quote: CurrencyCode,
        lookback: Lookback,
    ) -> Result<PriceSeries>;
}

/// Fournisseur de la série CPI mensuelle
#[async_trait]
pub trait InflationProvider: Send + Sync {
    /// Retourne la série CPI entre deux années incluses
    async fn get_cpi_series(&self, start_year: i32, end_year: i32) -> Result<CpiSeries>;
}

// ============================================================================
// Providers : le lot de collaborateurs passé au worker
// ============================================================================

/// Les trois fournisseurs de données de l'application
///
/// CONCEPT RUST : Box<dyn Trait>
/// - Le worker ne dépend que des interfaces
/// - Les tests injectent des fakes sans toucher au réseau
pub struct Providers {
    pub rates: Box<dyn RateProvider>,
    pub series: Box<dyn SeriesProvider>,
    pub inflation: Box<dyn InflationProvider>,
}

impl Providers {
    /// Construit le lot de production (Frankfurter + Yahoo + BLS)
    pub fn production() -> Result<Self> {
        Ok(Self {
            rates: Box::new(FrankfurterClient::new()?),
            series: Box::new(YahooSeriesClient::new()?),
            inflation: Box::new(BlsClient::new()?),
        })
    }
}

// ============================================================================
// Tests : le pipeline consommé à travers les interfaces
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics;
    use crate::models::{CurrencyPair, PricePoint};
    use chrono::NaiveDate;

    /// Fake provider : série fixe, aucun réseau
    struct FixedSeriesProvider {
        prices: Vec<f64>,
    }

    #[async_trait]
    impl SeriesProvider for FixedSeriesProvider {
        async fn get_series(
            &self,
            base: CurrencyCode,
            quote: CurrencyCode,
            lookback: Lookback,
        ) -> Result<PriceSeries> {
            let mut series = PriceSeries::new(CurrencyPair::new(base, quote), lookback);
            for (i, &price) in self.prices.iter().enumerate() {
                let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                    + chrono::Duration::days(i as i64);
                series.push(PricePoint { date, price });
            }
            Ok(series)
        }
    }

    #[tokio::test]
    async fn test_pipeline_through_provider_interface() {
        // Le flux complet : provider -> série -> métriques
        let provider: Box<dyn SeriesProvider> = Box::new(FixedSeriesProvider {
            prices: vec![100.0, 102.0, 101.0, 105.0],
        });

        let series = provider
            .get_series(CurrencyCode::Usd, CurrencyCode::Eur, Lookback::OneMonth)
            .await
            .unwrap();

        let m = metrics::compute(&series).unwrap();
        assert!((m.period_change_percent.unwrap() - 5.0).abs() < 1e-9);
        assert_eq!(m.period_high, 105.0);
        assert_eq!(m.period_low, 100.0);
    }

    #[tokio::test]
    async fn test_empty_provider_series_yields_no_metrics() {
        let provider = FixedSeriesProvider { prices: Vec::new() };
        let series = provider
            .get_series(CurrencyCode::Usd, CurrencyCode::Eur, Lookback::OneMonth)
            .await
            .unwrap();

        // Pas de métriques, pas de panic
        assert!(metrics::compute(&series).is_none());
    }
}
