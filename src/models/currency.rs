// ============================================================================
// Structure : CurrencyCode et CurrencyPair
// ============================================================================
// Représente les devises supportées et les paires de devises suivies
//
// CONCEPTS RUST :
// 1. Enum fieldless : un ensemble fermé de valeurs connues à la compilation
// 2. &'static str : labels stockés dans le binaire, zéro allocation
// 3. Copy : un code de devise est une valeur triviale à dupliquer
// ============================================================================

use serde::{Deserialize, Serialize};

/// Devise supportée par le dashboard
///
/// CONCEPT RUST : Enum fieldless avec Copy
/// - L'ensemble des devises est fermé (pas de code arbitraire)
/// - from_code() est le seul point d'entrée depuis une saisie utilisateur
/// - Copy car un variant sans données tient dans un octet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurrencyCode {
    /// Dollar américain
    Usd,
    /// Euro
    Eur,
    /// Livre sterling
    Gbp,
    /// Yen japonais
    Jpy,
    /// Dollar australien
    Aud,
    /// Dollar canadien
    Cad,
    /// Franc suisse
    Chf,
    /// Yuan chinois
    Cny,
    /// Roupie indienne
    Inr,
    /// Dollar néo-zélandais
    Nzd,
    /// Dollar de Singapour
    Sgd,
    /// Dollar de Hong Kong
    Hkd,
    /// Won sud-coréen
    Krw,
    /// Peso mexicain
    Mxn,
    /// Real brésilien
    Brl,
}

impl CurrencyCode {
    /// Retourne le code ISO à 3 lettres
    ///
    /// CONCEPT RUST : &'static str
    /// - String littérale dans le binaire
    /// - Pas d'allocation, très efficace
    pub fn code(&self) -> &'static str {
        match self {
            CurrencyCode::Usd => "USD",
            CurrencyCode::Eur => "EUR",
            CurrencyCode::Gbp => "GBP",
            CurrencyCode::Jpy => "JPY",
            CurrencyCode::Aud => "AUD",
            CurrencyCode::Cad => "CAD",
            CurrencyCode::Chf => "CHF",
            CurrencyCode::Cny => "CNY",
            CurrencyCode::Inr => "INR",
            CurrencyCode::Nzd => "NZD",
            CurrencyCode::Sgd => "SGD",
            CurrencyCode::Hkd => "HKD",
            CurrencyCode::Krw => "KRW",
            CurrencyCode::Mxn => "MXN",
            CurrencyCode::Brl => "BRL",
        }
    }

    /// Retourne le nom complet pour l'affichage
    pub fn name(&self) -> &'static str {
        match self {
            CurrencyCode::Usd => "United States Dollar",
            CurrencyCode::Eur => "Euro",
            CurrencyCode::Gbp => "British Pound Sterling",
            CurrencyCode::Jpy => "Japanese Yen",
            CurrencyCode::Aud => "Australian Dollar",
            CurrencyCode::Cad => "Canadian Dollar",
            CurrencyCode::Chf => "Swiss Franc",
            CurrencyCode::Cny => "Chinese Yuan",
            CurrencyCode::Inr => "Indian Rupee",
            CurrencyCode::Nzd => "New Zealand Dollar",
            CurrencyCode::Sgd => "Singapore Dollar",
            CurrencyCode::Hkd => "Hong Kong Dollar",
            CurrencyCode::Krw => "South Korean Won",
            CurrencyCode::Mxn => "Mexican Peso",
            CurrencyCode::Brl => "Brazilian Real",
        }
    }

    /// Parse un code saisi par l'utilisateur (insensible à la casse)
    ///
    /// CONCEPT RUST : Option<T> au lieu d'une exception
    /// - Some(devise) si le code est connu
    /// - None sinon, l'appelant décide quoi faire
    pub fn from_code(code: &str) -> Option<CurrencyCode> {
        match code.trim().to_uppercase().as_str() {
            "USD" => Some(CurrencyCode::Usd),
            "EUR" => Some(CurrencyCode::Eur),
            "GBP" => Some(CurrencyCode::Gbp),
            "JPY" => Some(CurrencyCode::Jpy),
            "AUD" => Some(CurrencyCode::Aud),
            "CAD" => Some(CurrencyCode::Cad),
            "CHF" => Some(CurrencyCode::Chf),
            "CNY" => Some(CurrencyCode::Cny),
            "INR" => Some(CurrencyCode::Inr),
            "NZD" => Some(CurrencyCode::Nzd),
            "SGD" => Some(CurrencyCode::Sgd),
            "HKD" => Some(CurrencyCode::Hkd),
            "KRW" => Some(CurrencyCode::Krw),
            "MXN" => Some(CurrencyCode::Mxn),
            "BRL" => Some(CurrencyCode::Brl),
            _ => None,
        }
    }

    /// Retourne toutes les devises supportées (pour UI de sélection)
    pub fn all() -> Vec<CurrencyCode> {
        vec![
            CurrencyCode::Usd,
            CurrencyCode::Eur,
            CurrencyCode::Gbp,
            CurrencyCode::Jpy,
            CurrencyCode::Aud,
            CurrencyCode::Cad,
            CurrencyCode::Chf,
            CurrencyCode::Cny,
            CurrencyCode::Inr,
            CurrencyCode::Nzd,
            CurrencyCode::Sgd,
            CurrencyCode::Hkd,
            CurrencyCode::Krw,
            CurrencyCode::Mxn,
            CurrencyCode::Brl,
        ]
    }

    /// Retourne la devise suivante dans la liste (cycle)
    ///
    /// CONCEPT : Cycle d'états
    /// - USD → EUR → ... → BRL → USD
    /// - Utilisé pour changer la devise de base avec la touche 'b'
    pub fn next(&self) -> CurrencyCode {
        let all = CurrencyCode::all();
        let pos = all.iter().position(|c| c == self).unwrap_or(0);
        all[(pos + 1) % all.len()]
    }
}

impl Default for CurrencyCode {
    /// Devise de base par défaut : USD (comme l'outil d'origine)
    fn default() -> Self {
        CurrencyCode::Usd
    }
}

// ============================================================================
// CurrencyPair : une paire base/cotée
// ============================================================================

/// Paire de devises dont on suit le prix relatif
///
/// CONCEPT : Base vs cotée
/// - base : devise de référence (1 unité)
/// - quote : devise dans laquelle la base est exprimée
/// - Ex : USD/EUR = combien d'euros pour 1 dollar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyPair {
    /// Devise de base
    pub base: CurrencyCode,

    /// Devise cotée
    pub quote: CurrencyCode,
}

impl CurrencyPair {
    /// Crée une nouvelle paire
    pub fn new(base: CurrencyCode, quote: CurrencyCode) -> Self {
        Self { base, quote }
    }

    /// Retourne le symbole pour l'API de séries historiques
    ///
    /// Format Yahoo Finance : "USDEUR=X" pour la paire USD/EUR
    pub fn provider_symbol(&self) -> String {
        format!("{}{}=X", self.base.code(), self.quote.code())
    }

    /// Retourne la forme d'affichage "USD/EUR"
    pub fn display(&self) -> String {
        format!("{}/{}", self.base.code(), self.quote.code())
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_and_name() {
        assert_eq!(CurrencyCode::Usd.code(), "USD");
        assert_eq!(CurrencyCode::Eur.name(), "Euro");
        assert_eq!(CurrencyCode::Gbp.name(), "British Pound Sterling");
    }

    #[test]
    fn test_from_code() {
        assert_eq!(CurrencyCode::from_code("EUR"), Some(CurrencyCode::Eur));
        // Insensible à la casse et aux espaces
        assert_eq!(CurrencyCode::from_code(" jpy "), Some(CurrencyCode::Jpy));
        assert_eq!(CurrencyCode::from_code("XXX"), None);
        assert_eq!(CurrencyCode::from_code(""), None);
    }

    #[test]
    fn test_all_currencies_roundtrip() {
        // Chaque devise doit se re-parser depuis son propre code
        for currency in CurrencyCode::all() {
            assert_eq!(CurrencyCode::from_code(currency.code()), Some(currency));
        }
        assert_eq!(CurrencyCode::all().len(), 15);
    }

    #[test]
    fn test_next_cycles() {
        assert_eq!(CurrencyCode::Usd.next(), CurrencyCode::Eur);
        // BRL est la dernière : boucle vers USD
        assert_eq!(CurrencyCode::Brl.next(), CurrencyCode::Usd);
    }

    #[test]
    fn test_pair_symbol_and_display() {
        let pair = CurrencyPair::new(CurrencyCode::Usd, CurrencyCode::Eur);
        assert_eq!(pair.provider_symbol(), "USDEUR=X");
        assert_eq!(pair.display(), "USD/EUR");
    }
}
