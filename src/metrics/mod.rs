// ============================================================================
// Module : metrics
// ============================================================================
// Pipeline de métriques dérivées : transforme une série de prix brute en
// statistiques affichables (variation, volatilité, moyennes mobiles, extrêmes)
//
// CONCEPTS RUST :
// 1. Fonctions pures : aucune I/O, aucun état, recalcul à chaque appel
// 2. Option<f64> : une métrique indéfinie n'est pas une erreur
// 3. Iterator fold : min/max et sommes en un seul passage
// ============================================================================

pub mod inflation; // Variation annuelle de l'indice CPI

use serde::{Deserialize, Serialize};

use crate::models::PriceSeries;

/// Facteur d'annualisation : nombre de jours de cotation par an
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Fenêtre courte de moyenne mobile (20 observations)
pub const SHORT_MA_WINDOW: usize = 20;

/// Fenêtre longue de moyenne mobile (50 observations)
pub const LONG_MA_WINDOW: usize = 50;

// ============================================================================
// Structure : DerivedMetrics
// ============================================================================
// CONCEPT : Métriques partielles plutôt qu'erreur
// - Une série trop courte pour une métrique donne None sur ce champ
// - Seule une série vide ne produit aucune métrique du tout
// ============================================================================

/// Métriques dérivées d'une série de prix
///
/// Recalculées à chaque demande, jamais mises en cache :
/// la série source est la seule vérité.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// Dernier prix observé
    pub current_value: f64,

    /// Variation sur la période : (dernier / premier - 1) * 100
    /// None si moins de 2 observations ou premier prix nul
    pub period_change_percent: Option<f64>,

    /// Volatilité annualisée des retours quotidiens, en pourcentage
    ///
    /// Définition retenue : écart-type échantillon des retours quotidiens
    /// simples, multiplié par sqrt(252) puis par 100. None s'il y a moins
    /// de 2 retours exploitables (donc moins de 3 observations).
    pub volatility_percent: Option<f64>,

    /// Prix maximum sur la période
    pub period_high: f64,

    /// Prix minimum sur la période
    pub period_low: f64,

    /// Dernière valeur de la moyenne mobile 20 observations
    /// None tant que la série est plus courte que la fenêtre
    pub moving_average_20: Option<f64>,

    /// Dernière valeur de la moyenne mobile 50 observations
    pub moving_average_50: Option<f64>,
}

// ============================================================================
// Pipeline principal
// ============================================================================

/// Calcule les métriques dérivées d'une série de prix
///
/// CONCEPT : Absence explicite plutôt que crash
/// - Série vide : None ("pas de métriques"), jamais de panic
/// - Série courte : métriques partielles via les champs Option
///
/// # Exemple
/// let metrics = metrics::compute(&series)?;
/// println!("variation : {:?} %", metrics.period_change_percent);
pub fn compute(series: &PriceSeries) -> Option<DerivedMetrics> {
    let prices = series.prices();

    // Série vide : pas de métriques du tout
    let (&first, &last) = match (prices.first(), prices.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return None,
    };

    // Min/max en un seul passage
    // CONCEPT RUST : fold
    // - Accumule (min, max) sans deux itérations séparées
    let (period_low, period_high) = prices
        .iter()
        .fold((f64::MAX, f64::MIN), |(min, max), &p| {
            (min.min(p), max.max(p))
        });

    // Variation sur la période : demande au moins 2 points
    // et un premier prix non nul (division)
    let period_change_percent = if prices.len() >= 2 && first != 0.0 {
        Some((last / first - 1.0) * 100.0)
    } else {
        None
    };

    // Volatilité annualisée des retours quotidiens
    let returns = daily_returns(&prices);
    let volatility_percent =
        sample_std_dev(&returns).map(|sd| sd * TRADING_DAYS_PER_YEAR.sqrt() * 100.0);

    Some(DerivedMetrics {
        current_value: last,
        period_change_percent,
        volatility_percent,
        period_high,
        period_low,
        moving_average_20: latest_moving_average(&prices, SHORT_MA_WINDOW),
        moving_average_50: latest_moving_average(&prices, LONG_MA_WINDOW),
    })
}

/// Moyenne mobile simple glissante sur `window` observations
///
/// Retourne un vecteur de même longueur que `prices` :
/// - None pour les indices < window - 1 (fenêtre incomplète)
/// - Sinon la moyenne arithmétique des `window` dernières valeurs
///
/// Une fenêtre de 0 n'a pas de sens : tout le vecteur est None.
pub fn moving_average(prices: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; prices.len()];
    }

    prices
        .iter()
        .enumerate()
        .map(|(i, _)| {
            if i + 1 < window {
                None
            } else {
                Some(mean(&prices[i + 1 - window..=i]))
            }
        })
        .collect()
}

/// Dernière valeur de la moyenne mobile, sans calculer toute la série
fn latest_moving_average(prices: &[f64], window: usize) -> Option<f64> {
    if window == 0 || prices.len() < window {
        return None;
    }
    Some(mean(&prices[prices.len() - window..]))
}

// ============================================================================
// Helpers statistiques
// ============================================================================

/// Moyenne arithmétique (le slice ne doit pas être vide)
fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Écart-type échantillon (dénominateur n - 1)
///
/// CONCEPT : Échantillon vs population
/// - n - 1 : estimateur non biaisé sur un échantillon de retours
/// - None avec moins de 2 valeurs (n - 1 = 0)
fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }

    let m = mean(values);
    let variance = values
        .iter()
        .map(|&v| (v - m).powi(2))
        .sum::<f64>()
        / (values.len() - 1) as f64;

    Some(variance.sqrt())
}

/// Retours quotidiens simples : p[i] / p[i-1] - 1
///
/// Un prix précédent nul est sauté (division impossible)
fn daily_returns(prices: &[f64]) -> Vec<f64> {
    prices
        .windows(2)
        .filter_map(|w| {
            if w[0] == 0.0 {
                None
            } else {
                Some(w[1] / w[0] - 1.0)
            }
        })
        .collect()
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CurrencyCode, CurrencyPair, Lookback, PricePoint, PriceSeries};
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
    fn test_empty_series_yields_no_metrics() {
        // Série vide : absence explicite, pas de panic
        let series = series_with_prices(&[]);
        assert!(compute(&series).is_none());
    }

    #[test]
    fn test_constant_series() {
        // Série constante : variation 0, volatilité 0
        let series = series_with_prices(&[1.25, 1.25, 1.25, 1.25]);
        let metrics = compute(&series).unwrap();

        assert_eq!(metrics.period_change_percent, Some(0.0));
        assert_eq!(metrics.volatility_percent, Some(0.0));
        assert_eq!(metrics.period_high, 1.25);
        assert_eq!(metrics.period_low, 1.25);
        assert_eq!(metrics.current_value, 1.25);
    }

    #[test]
    fn test_increasing_series_positive_change() {
        let series = series_with_prices(&[1.0, 1.1, 1.2, 1.3]);
        let metrics = compute(&series).unwrap();

        assert!(metrics.period_change_percent.unwrap() > 0.0);
    }

    #[test]
    fn test_reference_example() {
        // Exemple de référence : [100, 102, 101, 105]
        let series = series_with_prices(&[100.0, 102.0, 101.0, 105.0]);
        let metrics = compute(&series).unwrap();

        assert!((metrics.period_change_percent.unwrap() - 5.0).abs() < 1e-9);
        assert_eq!(metrics.period_high, 105.0);
        assert_eq!(metrics.period_low, 100.0);
        assert_eq!(metrics.current_value, 105.0);
    }

    #[test]
    fn test_single_point_gives_partial_metrics() {
        // Un seul point : prix/extrêmes définis, le reste indéfini
        let series = series_with_prices(&[1.5]);
        let metrics = compute(&series).unwrap();

        assert_eq!(metrics.current_value, 1.5);
        assert_eq!(metrics.period_high, 1.5);
        assert_eq!(metrics.period_low, 1.5);
        assert!(metrics.period_change_percent.is_none());
        assert!(metrics.volatility_percent.is_none());
        assert!(metrics.moving_average_20.is_none());
    }

    #[test]
    fn test_volatility_needs_two_returns() {
        // 2 points = 1 retour : écart-type échantillon indéfini
        let series = series_with_prices(&[1.0, 1.1]);
        let metrics = compute(&series).unwrap();
        assert!(metrics.volatility_percent.is_none());

        // 3 points = 2 retours : défini
        let series = series_with_prices(&[1.0, 1.1, 1.2]);
        let metrics = compute(&series).unwrap();
        assert!(metrics.volatility_percent.is_some());
    }

    #[test]
    fn test_volatility_annualization() {
        // Retours : +10 % puis -10 % -> moyenne 0, variance échantillon
        // ((0.1)^2 + (-0.1)^2) / 1 = 0.02, écart-type sqrt(0.02)
        let series = series_with_prices(&[1.0, 1.1, 0.99]);
        let metrics = compute(&series).unwrap();

        let expected = (0.02f64).sqrt() * TRADING_DAYS_PER_YEAR.sqrt() * 100.0;
        assert!((metrics.volatility_percent.unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_moving_average_window() {
        // Fenêtre 2 : indéfinie au premier point, moyenne glissante ensuite
        let ma = moving_average(&[1.0, 2.0, 3.0, 4.0], 2);
        assert_eq!(ma, vec![None, Some(1.5), Some(2.5), Some(3.5)]);

        // Fenêtre 3 : indéfinie pour les indices < 2
        let ma = moving_average(&[1.0, 2.0, 3.0, 4.0], 3);
        assert_eq!(ma, vec![None, None, Some(2.0), Some(3.0)]);
    }

    #[test]
    fn test_moving_average_degenerate_windows() {
        // Fenêtre 0 : tout indéfini
        assert_eq!(moving_average(&[1.0, 2.0], 0), vec![None, None]);

        // Fenêtre plus grande que la série : tout indéfini
        assert_eq!(moving_average(&[1.0, 2.0], 5), vec![None, None]);

        // Série vide : vecteur vide
        assert!(moving_average(&[], 3).is_empty());
    }

    #[test]
    fn test_metrics_moving_averages() {
        // 20 points : MA20 définie, MA50 non
        let prices: Vec<f64> = (1..=20).map(|i| i as f64).collect();
        let series = series_with_prices(&prices);
        let metrics = compute(&series).unwrap();

        // Moyenne de 1..=20 = 10.5
        assert_eq!(metrics.moving_average_20, Some(10.5));
        assert!(metrics.moving_average_50.is_none());
    }

    #[test]
    fn test_zero_first_price() {
        // Premier prix nul : variation indéfinie, pas de division par zéro
        let series = series_with_prices(&[0.0, 1.0, 2.0]);
        let metrics = compute(&series).unwrap();
        assert!(metrics.period_change_percent.is_none());
    }
}
