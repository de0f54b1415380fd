// ============================================================================
// LazyForex - Library
// ============================================================================
// Expose les modules publics pour les exemples et tests
// ============================================================================

pub mod api;     // Providers de données (Frankfurter, Yahoo, BLS)
pub mod models;  // Structures de données
pub mod metrics; // Pipeline de métriques dérivées
pub mod app;     // État de l'application
pub mod ui;      // Interface utilisateur
