// ============================================================================
// Structure : ExpenseBudget (budget mensuel pour la comparaison de coût de vie)
// ============================================================================
// Neuf postes de dépenses mensuelles exprimés dans la devise de base,
// convertis dans les devises suivies via les taux spot
//
// CONCEPTS RUST :
// 1. Enum + Vec : postes fixes mais montants éditables par index
// 2. Composition : la comparaison consomme les taux sans les posséder
// ============================================================================

use serde::{Deserialize, Serialize};

use crate::models::CurrencyCode;

/// Poste de dépense mensuelle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpenseCategory {
    Housing,       // Loyer / crédit immobilier
    Food,          // Alimentation / courses
    Transportation,
    Healthcare,
    Utilities,     // Eau, électricité, gaz
    InternetPhone,
    Insurance,
    Entertainment,
    Miscellaneous,
}

impl ExpenseCategory {
    /// Retourne le label pour l'affichage
    pub fn label(&self) -> &'static str {
        match self {
            ExpenseCategory::Housing => "Housing (Rent/Mortgage)",
            ExpenseCategory::Food => "Food/Groceries",
            ExpenseCategory::Transportation => "Transportation",
            ExpenseCategory::Healthcare => "Healthcare",
            ExpenseCategory::Utilities => "Utilities",
            ExpenseCategory::InternetPhone => "Internet/Phone",
            ExpenseCategory::Insurance => "Insurance",
            ExpenseCategory::Entertainment => "Entertainment",
            ExpenseCategory::Miscellaneous => "Miscellaneous",
        }
    }
}

/// Une ligne du budget : un poste et son montant mensuel
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ExpenseEntry {
    pub category: ExpenseCategory,
    pub amount: f64,
}

/// Budget mensuel dans la devise de base
///
/// CONCEPT RUST : Vec plutôt que champs nommés
/// - L'UI navigue et édite les postes par index sélectionné
/// - Un Vec garde l'ordre d'affichage stable
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseBudget {
    entries: Vec<ExpenseEntry>,
}

impl ExpenseBudget {
    /// Retourne les lignes du budget (lecture seule)
    pub fn entries(&self) -> &[ExpenseEntry] {
        &self.entries
    }

    /// Retourne le nombre de postes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Vérifie si le budget est vide
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Met à jour le montant d'un poste par index
    ///
    /// Les montants négatifs sont ramenés à 0 : une dépense
    /// négative n'a pas de sens dans cette comparaison.
    pub fn set_amount(&mut self, index: usize, amount: f64) {
        if let Some(entry) = self.entries.get_mut(index) {
            entry.amount = amount.max(0.0);
        }
    }

    /// Retourne le total mensuel dans la devise de base
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|e| e.amount).sum()
    }

    /// Convertit le total dans une devise cible au taux donné
    ///
    /// Retourne (coût mensuel, coût annuel)
    pub fn converted_totals(&self, rate: f64) -> (f64, f64) {
        let monthly = self.total() * rate;
        (monthly, monthly * 12.0)
    }
}

impl Default for ExpenseBudget {
    /// Montants par défaut de l'outil d'origine
    fn default() -> Self {
        let defaults = [
            (ExpenseCategory::Housing, 2000.0),
            (ExpenseCategory::Food, 500.0),
            (ExpenseCategory::Transportation, 400.0),
            (ExpenseCategory::Healthcare, 500.0),
            (ExpenseCategory::Utilities, 250.0),
            (ExpenseCategory::InternetPhone, 150.0),
            (ExpenseCategory::Insurance, 300.0),
            (ExpenseCategory::Entertainment, 200.0),
            (ExpenseCategory::Miscellaneous, 300.0),
        ];

        Self {
            entries: defaults
                .iter()
                .map(|&(category, amount)| ExpenseEntry { category, amount })
                .collect(),
        }
    }
}

// ============================================================================
// CostComparison : le budget converti dans une devise suivie
// ============================================================================

/// Coût de vie converti dans une devise cible
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostComparison {
    /// Devise cible
    pub currency: CurrencyCode,

    /// Coût mensuel converti
    pub monthly: f64,

    /// Coût annuel converti (mensuel x 12)
    pub annual: f64,
}

/// Convertit le budget dans chaque devise dont le taux est disponible
///
/// CONCEPT : Dégradation partielle plutôt qu'échec global
/// - (devise, None) : taux indisponible, la devise est simplement omise
/// - Une seule devise en erreur ne fait pas échouer la comparaison
pub fn compare_costs(
    budget: &ExpenseBudget,
    rates: &[(CurrencyCode, Option<f64>)],
) -> Vec<CostComparison> {
    rates
        .iter()
        .filter_map(|&(currency, rate)| {
            let rate = rate?;
            let (monthly, annual) = budget.converted_totals(rate);
            Some(CostComparison {
                currency,
                monthly,
                annual,
            })
        })
        .collect()
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_budget_total() {
        let budget = ExpenseBudget::default();
        assert_eq!(budget.len(), 9);
        // 2000 + 500 + 400 + 500 + 250 + 150 + 300 + 200 + 300
        assert_eq!(budget.total(), 4600.0);
    }

    #[test]
    fn test_set_amount() {
        let mut budget = ExpenseBudget::default();
        budget.set_amount(0, 1500.0);
        assert_eq!(budget.entries()[0].amount, 1500.0);
        assert_eq!(budget.total(), 4100.0);

        // Montant négatif ramené à 0
        budget.set_amount(1, -50.0);
        assert_eq!(budget.entries()[1].amount, 0.0);

        // Index hors bornes : ignoré sans panic
        budget.set_amount(99, 1.0);
    }

    #[test]
    fn test_converted_totals() {
        let budget = ExpenseBudget::default();
        let (monthly, annual) = budget.converted_totals(0.5);
        assert_eq!(monthly, 2300.0);
        assert_eq!(annual, 27600.0);
    }

    #[test]
    fn test_compare_costs_skips_missing_rates() {
        let budget = ExpenseBudget::default();
        let rates = vec![
            (CurrencyCode::Eur, Some(0.9)),
            (CurrencyCode::Gbp, None), // Taux indisponible
            (CurrencyCode::Jpy, Some(150.0)),
        ];

        let comparisons = compare_costs(&budget, &rates);

        // GBP omise, pas d'erreur
        assert_eq!(comparisons.len(), 2);
        assert_eq!(comparisons[0].currency, CurrencyCode::Eur);
        assert!((comparisons[0].monthly - 4140.0).abs() < 1e-9);
        assert!((comparisons[0].annual - 49680.0).abs() < 1e-9);
        assert_eq!(comparisons[1].currency, CurrencyCode::Jpy);
    }
}
