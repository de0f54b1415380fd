// ============================================================================
// Structure : PriceSeries (série de prix datée)
// ============================================================================
// Représente l'historique quotidien d'une paire de devises
//
// CONCEPTS RUST :
// 1. NaiveDate : date sans timezone (une observation par jour)
// 2. f64 : floating point 64 bits pour les prix (précision suffisante)
// 3. Vec<T> : tableau dynamique possédant ses points
// ============================================================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::CurrencyPair;

/// Période de lookback demandée au provider de séries
///
/// CONCEPT : Lookback vs intervalle
/// - L'intervalle des observations est fixe : une par jour ("1d")
/// - Le lookback est la profondeur d'historique demandée
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lookback {
    /// 1 mois (30 jours)
    OneMonth,
    /// 3 mois
    ThreeMonths,
    /// 6 mois
    SixMonths,
    /// 1 an
    OneYear,
    /// 2 ans (730 jours)
    TwoYears,
    /// 5 ans (1825 jours)
    FiveYears,
}

impl Lookback {
    /// Retourne le nombre de jours correspondant
    pub fn to_days(&self) -> u32 {
        match self {
            Lookback::OneMonth => 30,
            Lookback::ThreeMonths => 90,
            Lookback::SixMonths => 180,
            Lookback::OneYear => 365,
            Lookback::TwoYears => 730,
            Lookback::FiveYears => 1825,
        }
    }

    /// Retourne le label pour l'affichage
    pub fn label(&self) -> &'static str {
        match self {
            Lookback::OneMonth => "1M",
            Lookback::ThreeMonths => "3M",
            Lookback::SixMonths => "6M",
            Lookback::OneYear => "1Y",
            Lookback::TwoYears => "2Y",
            Lookback::FiveYears => "5Y",
        }
    }

    /// Retourne le lookback suivant (cycle)
    ///
    /// CONCEPT : Cycle d'états
    /// - 1M → 3M → 6M → 1Y → 2Y → 5Y → 1M
    /// - Utilisé avec la touche 'l' sur la vue graphique
    pub fn next(&self) -> Lookback {
        match self {
            Lookback::OneMonth => Lookback::ThreeMonths,
            Lookback::ThreeMonths => Lookback::SixMonths,
            Lookback::SixMonths => Lookback::OneYear,
            Lookback::OneYear => Lookback::TwoYears,
            Lookback::TwoYears => Lookback::FiveYears,
            Lookback::FiveYears => Lookback::OneMonth, // Boucle
        }
    }

    /// Retourne le lookback précédent (cycle)
    pub fn previous(&self) -> Lookback {
        match self {
            Lookback::OneMonth => Lookback::FiveYears, // Boucle
            Lookback::ThreeMonths => Lookback::OneMonth,
            Lookback::SixMonths => Lookback::ThreeMonths,
            Lookback::OneYear => Lookback::SixMonths,
            Lookback::TwoYears => Lookback::OneYear,
            Lookback::FiveYears => Lookback::TwoYears,
        }
    }
}

impl Default for Lookback {
    /// Lookback par défaut : 3 mois (bon équilibre détail/contexte)
    fn default() -> Self {
        Lookback::ThreeMonths
    }
}

/// Une observation datée du prix d'une paire
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PricePoint {
    /// Date de l'observation
    pub date: NaiveDate,

    /// Prix de clôture du jour (devise cotée pour 1 unité de base)
    /// Un prix > 0 est attendu mais pas imposé ici
    pub price: f64,
}

/// Série de prix datée pour une paire de devises
///
/// Invariant : les points sont strictement croissants par date.
/// push() ignore silencieusement tout point daté <= au dernier point,
/// la série reste donc toujours triée sans re-tri.
///
/// CONCEPT RUST : Ownership
/// - PriceSeries possède le Vec, le Vec possède les points
/// - Quand PriceSeries est drop, tout est libéré automatiquement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSeries {
    /// Paire de devises de la série
    pub pair: CurrencyPair,

    /// Lookback avec lequel la série a été récupérée
    pub lookback: Lookback,

    /// Observations, strictement croissantes par date
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Crée une série vide pour une paire et un lookback
    pub fn new(pair: CurrencyPair, lookback: Lookback) -> Self {
        Self {
            pair,
            lookback,
            points: Vec::new(),
        }
    }

    /// Ajoute une observation en fin de série
    ///
    /// CONCEPT : Invariant au point d'entrée unique
    /// - Une date <= à la dernière violerait l'ordre strict : on l'ignore
    /// - Les providers livrent leurs points déjà triés, le cas est rare
    pub fn push(&mut self, point: PricePoint) {
        if let Some(last) = self.points.last() {
            if point.date <= last.date {
                debug!(
                    pair = %self.pair.display(),
                    date = %point.date,
                    "Point ignoré (date non strictement croissante)"
                );
                return;
            }
        }
        self.points.push(point);
    }

    /// Retourne le nombre d'observations
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Vérifie si la série est vide
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Retourne la première observation
    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    /// Retourne l'observation la plus récente
    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// Retourne toutes les observations (lecture seule)
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Retourne la colonne des prix
    ///
    /// CONCEPT RUST : Iterator chaining
    /// - .iter() puis .map() puis .collect()
    /// - Alloue un Vec : utilisé une fois par calcul de métriques
    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CurrencyCode;

    fn test_pair() -> CurrencyPair {
        CurrencyPair::new(CurrencyCode::Usd, CurrencyCode::Eur)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_lookback_to_days() {
        assert_eq!(Lookback::OneMonth.to_days(), 30);
        assert_eq!(Lookback::OneYear.to_days(), 365);
        assert_eq!(Lookback::FiveYears.to_days(), 1825);
    }

    #[test]
    fn test_lookback_cycle() {
        assert_eq!(Lookback::OneMonth.next(), Lookback::ThreeMonths);
        assert_eq!(Lookback::FiveYears.next(), Lookback::OneMonth); // Boucle
        assert_eq!(Lookback::OneMonth.previous(), Lookback::FiveYears);
    }

    #[test]
    fn test_series_push_ordered() {
        let mut series = PriceSeries::new(test_pair(), Lookback::OneMonth);
        assert!(series.is_empty());

        series.push(PricePoint { date: date(2024, 1, 2), price: 0.92 });
        series.push(PricePoint { date: date(2024, 1, 3), price: 0.93 });

        assert_eq!(series.len(), 2);
        assert_eq!(series.first().unwrap().price, 0.92);
        assert_eq!(series.last().unwrap().price, 0.93);
    }

    #[test]
    fn test_series_push_rejects_out_of_order() {
        let mut series = PriceSeries::new(test_pair(), Lookback::OneMonth);
        series.push(PricePoint { date: date(2024, 1, 3), price: 0.92 });

        // Date antérieure : ignorée
        series.push(PricePoint { date: date(2024, 1, 2), price: 0.91 });
        // Date identique : ignorée aussi (ordre strict)
        series.push(PricePoint { date: date(2024, 1, 3), price: 0.95 });

        assert_eq!(series.len(), 1);
        assert_eq!(series.last().unwrap().price, 0.92);
    }

    #[test]
    fn test_series_prices_column() {
        let mut series = PriceSeries::new(test_pair(), Lookback::OneMonth);
        series.push(PricePoint { date: date(2024, 1, 2), price: 1.0 });
        series.push(PricePoint { date: date(2024, 1, 3), price: 2.0 });

        assert_eq!(series.prices(), vec![1.0, 2.0]);
    }
}
