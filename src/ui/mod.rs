// ============================================================================
// Module : ui
// ============================================================================
// Gère toute l'interface utilisateur (Terminal User Interface)
// ============================================================================

pub mod events;    // Gestion des événements clavier
pub mod dashboard; // Rendu de l'interface principale et routing des écrans
pub mod chart;     // Rendu du graphique de paire avec moyennes mobiles
pub mod inflation; // Rendu de la vue inflation US
pub mod expenses;  // Rendu de la vue coût de vie

// Re-exports pour simplifier les imports
pub use dashboard::render;
pub use events::{Event, EventHandler};
