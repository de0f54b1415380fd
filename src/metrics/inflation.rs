// ============================================================================
// Inflation : variation annuelle de l'indice CPI
// ============================================================================
// Transforme la série CPI mensuelle en taux d'inflation année sur année,
// comme l'indicateur publié dans la presse (CPI-U, séries CUUR0000SA0)
// ============================================================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::CpiSeries;

/// Décalage année sur année : 12 observations mensuelles
pub const YEAR_OVER_YEAR_MONTHS: usize = 12;

/// Taux d'inflation à une date donnée
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InflationPoint {
    /// Mois de l'observation
    pub date: NaiveDate,

    /// Variation de l'indice sur 12 mois, en pourcentage
    pub percent: f64,
}

/// Calcule l'inflation année sur année de la série CPI
///
/// Pour chaque mois : (valeur / valeur 12 mois avant - 1) * 100.
/// Les 12 premières observations n'ont pas de base de comparaison
/// et sont omises, ainsi que les bases nulles ou négatives.
pub fn year_over_year(series: &CpiSeries) -> Vec<InflationPoint> {
    let observations = series.observations();

    observations
        .iter()
        .enumerate()
        .skip(YEAR_OVER_YEAR_MONTHS)
        .filter_map(|(i, obs)| {
            let base = observations[i - YEAR_OVER_YEAR_MONTHS].value;
            if base <= 0.0 {
                return None;
            }
            Some(InflationPoint {
                date: obs.date,
                percent: (obs.value / base - 1.0) * 100.0,
            })
        })
        .collect()
}

/// Retourne le taux d'inflation le plus récent
///
/// None si la série est trop courte pour un calcul année sur année
pub fn current_rate(series: &CpiSeries) -> Option<f64> {
    year_over_year(series).last().map(|p| p.percent)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CpiObservation;

    fn monthly_series(values: &[f64]) -> CpiSeries {
        let observations = values
            .iter()
            .enumerate()
            .map(|(i, &value)| CpiObservation {
                // 24 mois à partir de janvier 2023
                date: NaiveDate::from_ymd_opt(
                    2023 + (i as i32) / 12,
                    (i as u32) % 12 + 1,
                    1,
                )
                .unwrap(),
                value,
            })
            .collect();
        CpiSeries::from_observations("CUUR0000SA0".to_string(), observations)
    }

    #[test]
    fn test_flat_index_means_zero_inflation() {
        let series = monthly_series(&[300.0; 24]);
        let points = year_over_year(&series);

        // 24 observations - 12 sans base = 12 points
        assert_eq!(points.len(), 12);
        assert!(points.iter().all(|p| p.percent.abs() < 1e-9));
        assert_eq!(current_rate(&series), Some(0.0));
    }

    #[test]
    fn test_three_percent_inflation() {
        // Année 1 constante à 300, année 2 constante à 309 : +3 %
        let mut values = vec![300.0; 12];
        values.extend(vec![309.0; 12]);
        let series = monthly_series(&values);

        let rate = current_rate(&series).unwrap();
        assert!((rate - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_short_series_has_no_rate() {
        // 12 observations : aucune n'a de base 12 mois avant
        let series = monthly_series(&[300.0; 12]);
        assert!(year_over_year(&series).is_empty());
        assert_eq!(current_rate(&series), None);
    }

    #[test]
    fn test_yoy_dates_align_with_recent_months() {
        let series = monthly_series(&[300.0; 24]);
        let points = year_over_year(&series);

        // Le premier point comparé est le 13e mois (janvier 2024)
        assert_eq!(
            points.first().unwrap().date,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
    }
}
