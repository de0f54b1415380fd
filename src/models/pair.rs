// ============================================================================
// Structure : PairItem
// ============================================================================
// Représente une devise suivie dans la watchlist avec ses données chargées
//
// CONCEPTS RUST :
// 1. Composition : PairItem contient un taux spot et une PriceSeries
// 2. Option : gérer les données manquantes sans valeur sentinelle
// ============================================================================

use crate::metrics::{self, DerivedMetrics};
use crate::models::{CurrencyCode, PriceSeries};

/// Une devise cible suivie sur le dashboard
#[derive(Debug, Clone)]
pub struct PairItem {
    /// Devise cotée (la base est portée par l'App)
    pub quote: CurrencyCode,

    /// Taux spot base -> quote (None si pas encore chargé ou erreur)
    /// CONCEPT RUST : Option pour les données optionnelles
    /// - Some(taux) : taux disponible
    /// - None : pas encore chargé ou erreur de chargement
    pub spot_rate: Option<f64>,

    /// Série historique de la paire (None si pas encore chargée ou erreur)
    pub series: Option<PriceSeries>,
}

impl PairItem {
    /// Crée un nouvel item sans données
    pub fn new(quote: CurrencyCode) -> Self {
        Self {
            quote,
            spot_rate: None,
            series: None,
        }
    }

    /// Retourne le taux à afficher
    ///
    /// Le taux spot prime ; s'il manque, on retombe sur la dernière
    /// clôture de la série. Un échec du provider de taux ne vide donc
    /// pas la ligne tant que la série est là.
    pub fn current_rate(&self) -> Option<f64> {
        self.spot_rate
            .or_else(|| self.series.as_ref()?.last().map(|p| p.price))
    }

    /// Retourne la variation en pourcentage sur le lookback de la série
    ///
    /// CONCEPT RUST : Method chaining sur Option
    /// - .as_ref() : &Option<T> -> Option<&T>
    /// - .and_then() : enchaîne un calcul qui peut lui-même échouer
    pub fn change_percent(&self) -> Option<f64> {
        self.series
            .as_ref()
            .and_then(|series| metrics::compute(series))
            .and_then(|m| m.period_change_percent)
    }

    /// Recalcule les métriques dérivées de la série
    ///
    /// Pur calcul, refait à chaque demande (pas de cache)
    pub fn metrics(&self) -> Option<DerivedMetrics> {
        self.series.as_ref().and_then(metrics::compute)
    }

    /// Vérifie si la série historique est chargée
    pub fn has_series(&self) -> bool {
        self.series.is_some()
    }

    /// Retourne true si la paire est en hausse sur le lookback
    pub fn is_positive(&self) -> bool {
        self.change_percent().map(|c| c >= 0.0).unwrap_or(false)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CurrencyPair, Lookback, PricePoint};
    use chrono::NaiveDate;

    fn series_with_prices(prices: &[f64]) -> PriceSeries {
        let pair = CurrencyPair::new(CurrencyCode::Usd, CurrencyCode::Eur);
        let mut series = PriceSeries::new(pair, Lookback::OneMonth);
        for (i, &price) in prices.iter().enumerate() {
            let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                + chrono::Duration::days(i as i64);
            series.push(PricePoint { date, price });
        }
        series
    }

    #[test]
    fn test_pair_item_without_data() {
        let item = PairItem::new(CurrencyCode::Eur);
        assert!(!item.has_series());
        assert!(item.current_rate().is_none());
        assert!(item.change_percent().is_none());
        assert!(!item.is_positive());
    }

    #[test]
    fn test_current_rate_prefers_spot() {
        let mut item = PairItem::new(CurrencyCode::Eur);
        item.series = Some(series_with_prices(&[0.90, 0.92]));

        // Pas de spot : dernière clôture de la série
        assert_eq!(item.current_rate(), Some(0.92));

        // Spot disponible : il prime
        item.spot_rate = Some(0.925);
        assert_eq!(item.current_rate(), Some(0.925));
    }

    #[test]
    fn test_change_percent_from_series() {
        let mut item = PairItem::new(CurrencyCode::Eur);
        item.series = Some(series_with_prices(&[1.00, 1.05]));

        let change = item.change_percent().unwrap();
        assert!((change - 5.0).abs() < 1e-9);
        assert!(item.is_positive());
    }
}
