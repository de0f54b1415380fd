// ============================================================================
// Structure : CpiSeries (indice des prix à la consommation)
// ============================================================================
// Série mensuelle de l'indice CPI publiée par le BLS
// ============================================================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Une observation mensuelle de l'indice CPI
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CpiObservation {
    /// Premier jour du mois de l'observation
    pub date: NaiveDate,

    /// Valeur de l'indice (ex: 314.069)
    pub value: f64,
}

/// Série mensuelle de l'indice CPI, croissante par date
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CpiSeries {
    /// Identifiant de la série BLS (ex: "CUUR0000SA0")
    pub series_id: String,

    /// Observations triées par date croissante
    observations: Vec<CpiObservation>,
}

impl CpiSeries {
    /// Crée une série à partir d'observations potentiellement désordonnées
    ///
    /// Le BLS livre les données du plus récent au plus ancien :
    /// on trie ici une fois pour toutes.
    pub fn from_observations(series_id: String, mut observations: Vec<CpiObservation>) -> Self {
        observations.sort_by_key(|obs| obs.date);
        Self {
            series_id,
            observations,
        }
    }

    /// Retourne le nombre d'observations
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Vérifie si la série est vide
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Retourne les observations (lecture seule)
    pub fn observations(&self) -> &[CpiObservation] {
        &self.observations
    }

    /// Retourne l'observation la plus récente
    pub fn last(&self) -> Option<&CpiObservation> {
        self.observations.last()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(y: i32, m: u32, value: f64) -> CpiObservation {
        CpiObservation {
            date: NaiveDate::from_ymd_opt(y, m, 1).unwrap(),
            value,
        }
    }

    #[test]
    fn test_from_observations_sorts() {
        // Ordre BLS : du plus récent au plus ancien
        let series = CpiSeries::from_observations(
            "CUUR0000SA0".to_string(),
            vec![obs(2024, 3, 312.3), obs(2024, 1, 308.4), obs(2024, 2, 310.3)],
        );

        assert_eq!(series.len(), 3);
        assert_eq!(series.observations()[0].value, 308.4);
        assert_eq!(series.last().unwrap().value, 312.3);
    }

    #[test]
    fn test_empty_series() {
        let series = CpiSeries::from_observations("CUUR0000SA0".to_string(), Vec::new());
        assert!(series.is_empty());
        assert!(series.last().is_none());
    }
}
