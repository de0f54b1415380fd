// ============================================================================
// Structure : App
// ============================================================================
// Gère l'état global de l'application TUI
//
// CONCEPTS RUST :
// 1. State Management : centraliser l'état dans une seule structure
// 2. Mutabilité contrôlée : &mut self pour modifier l'état
// 3. Encapsulation : les modifications passent par les méthodes de App
//
// PATTERN : Cette structure suit le pattern "Application State"
// - Tous les composants de l'UI lisent depuis App
// - Toutes les modifications passent par les méthodes de App
// - Garantit la cohérence de l'état
// ============================================================================

use crate::models::{CpiSeries, CurrencyCode, ExpenseBudget, Lookback, PairItem};

// ============================================================================
// Enum : Screen
// ============================================================================
// CONCEPT RUST : Enums pour state machines
// - Représente les différents écrans de l'application
// - Un seul écran actif à la fois
// - Le compilateur force à gérer tous les cas (exhaustivité)
// ============================================================================

/// Écrans de l'application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Vue principale : taux de change des devises suivies
    Dashboard,

    /// Vue graphique : série historique de la paire sélectionnée
    ChartView,

    /// Vue inflation : taux d'inflation US année sur année
    InflationView,

    /// Vue coût de vie : budget mensuel et conversion par devise
    ExpensesView,

    /// Mode saisie : permet de capturer du texte utilisateur
    /// CONCEPT : Modal input mode (Vim-like)
    /// - Capture les touches pour construire un buffer
    /// - Enter valide, ESC annule
    InputMode,
}

/// Ce que le mode saisie est en train de capturer
///
/// CONCEPT : Contexte de saisie
/// - Le même mode InputMode sert à deux usages
/// - Le contexte décide du parsing et de l'écran de retour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputContext {
    /// Ajout d'une devise à la watchlist (code à 3 lettres)
    AddCurrency,

    /// Édition du montant d'un poste de dépense (index du poste)
    EditExpense(usize),
}

/// État principal de l'application
pub struct App {
    /// Indique si l'application doit continuer à tourner
    pub running: bool,

    /// Devise de base : tous les taux sont exprimés depuis elle
    pub base: CurrencyCode,

    /// Devises cibles suivies (watchlist)
    pub watchlist: Vec<PairItem>,

    /// Index de la devise sélectionnée dans la watchlist
    pub selected_index: usize,

    /// Écran actuellement affiché
    pub current_screen: Screen,

    /// Lookback actuel pour les séries historiques
    /// Peut être modifié avec les touches h et l sur la vue graphique
    pub current_lookback: Lookback,

    /// Série CPI chargée (None tant que le fetch n'a pas abouti)
    pub cpi: Option<CpiSeries>,

    /// Budget mensuel pour la comparaison de coût de vie
    pub budget: ExpenseBudget,

    /// Index du poste sélectionné sur la vue dépenses
    pub expense_index: usize,

    /// Indique si l'utilisateur a demandé à quitter (attend confirmation)
    /// CONCEPT : Two-step quit pour éviter les sorties accidentelles
    /// - Première pression de 'q' : confirm_quit = true
    /// - Deuxième pression de 'q' : running = false (quit réel)
    /// - N'importe quelle autre touche : confirm_quit = false (annulation)
    pub confirm_quit: bool,

    /// Indique si l'utilisateur a demandé une suppression (attend confirmation)
    pub confirm_delete: bool,

    /// Indique si des données sont en cours de chargement
    pub is_loading: bool,

    /// Message de chargement optionnel
    pub loading_message: Option<String>,

    /// Buffer de saisie pour le mode Input
    pub input_buffer: String,

    /// Prompt affiché en mode Input
    pub input_prompt: String,

    /// Contexte de la saisie en cours
    pub input_context: InputContext,
}

impl App {
    /// Crée une nouvelle instance avec une watchlist vide
    ///
    /// CONCEPT RUST : Constructor pattern
    /// - Convention : fonction associée nommée "new()"
    /// - Initialise tous les champs avec des valeurs par défaut
    pub fn new() -> Self {
        Self {
            running: true,
            base: CurrencyCode::default(), // USD
            watchlist: Vec::new(),
            selected_index: 0,
            current_screen: Screen::Dashboard,
            current_lookback: Lookback::default(), // 3 mois
            cpi: None,
            budget: ExpenseBudget::default(),
            expense_index: 0,
            confirm_quit: false,
            confirm_delete: false,
            is_loading: false,
            loading_message: None,
            input_buffer: String::new(),
            input_prompt: String::new(),
            input_context: InputContext::AddCurrency,
        }
    }

    /// Crée une App avec une base et une watchlist préchargées
    pub fn with_watchlist(base: CurrencyCode, watchlist: Vec<PairItem>) -> Self {
        Self {
            base,
            watchlist,
            ..Self::new()
        }
    }

    /// Quitte l'application
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Vérifie si l'application doit continuer
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Tick : appelé à chaque itération de la boucle
    ///
    /// CONCEPT : Event Loop Pattern
    /// - tick() est appelé régulièrement (chaque frame)
    /// - Permet de mettre à jour l'état même sans événement utilisateur
    pub fn tick(&mut self) {
        // Rien à faire à chaque tick pour l'instant
    }

    // ========================================================================
    // Navigation dans la watchlist
    // ========================================================================

    /// Navigue vers le haut dans la watchlist
    ///
    /// CONCEPT RUST : Saturating arithmetic
    /// - saturating_sub() : soustrait mais ne descend pas en dessous de 0
    /// - Évite les panics avec les unsigned
    pub fn navigate_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    /// Navigue vers le bas dans la watchlist
    pub fn navigate_down(&mut self) {
        let max_index = self.watchlist.len().saturating_sub(1);
        self.selected_index = (self.selected_index + 1).min(max_index);
    }

    /// Retourne l'item sélectionné dans la watchlist
    pub fn selected_item(&self) -> Option<&PairItem> {
        self.watchlist.get(self.selected_index)
    }

    /// Retourne les taux spot de la watchlist pour les agrégats
    ///
    /// Une devise sans taux reste dans la liste avec None :
    /// c'est le consommateur (comparaison de coûts) qui l'omet.
    pub fn spot_rates(&self) -> Vec<(CurrencyCode, Option<f64>)> {
        self.watchlist
            .iter()
            .map(|item| (item.quote, item.current_rate()))
            .collect()
    }

    // ========================================================================
    // Transitions d'écran
    // ========================================================================

    /// Affiche la vue graphique
    pub fn show_chart(&mut self) {
        self.current_screen = Screen::ChartView;
    }

    /// Retourne à la vue dashboard
    pub fn show_dashboard(&mut self) {
        self.current_screen = Screen::Dashboard;
    }

    /// Affiche la vue inflation
    pub fn show_inflation(&mut self) {
        self.current_screen = Screen::InflationView;
    }

    /// Affiche la vue coût de vie
    pub fn show_expenses(&mut self) {
        self.current_screen = Screen::ExpensesView;
    }

    /// Vérifie si on est sur le dashboard
    pub fn is_on_dashboard(&self) -> bool {
        self.current_screen == Screen::Dashboard
    }

    /// Vérifie si on est sur la vue graphique
    pub fn is_on_chart(&self) -> bool {
        self.current_screen == Screen::ChartView
    }

    /// Vérifie si on est sur la vue inflation
    pub fn is_on_inflation(&self) -> bool {
        self.current_screen == Screen::InflationView
    }

    /// Vérifie si on est sur la vue coût de vie
    pub fn is_on_expenses(&self) -> bool {
        self.current_screen == Screen::ExpensesView
    }

    // ========================================================================
    // Lookback et devise de base
    // ========================================================================

    /// Passe au lookback suivant
    ///
    /// CONCEPT : Cycle d'états
    /// - 1M → 3M → 6M → 1Y → 2Y → 5Y → 1M
    /// - Utilisé avec la touche 'l'
    pub fn next_lookback(&mut self) {
        self.current_lookback = self.current_lookback.next();
    }

    /// Passe au lookback précédent
    pub fn previous_lookback(&mut self) {
        self.current_lookback = self.current_lookback.previous();
    }

    /// Passe à la devise de base suivante
    ///
    /// Les devises déjà dans la watchlist sont sautées : une paire
    /// base/base n'a pas de sens sur le dashboard.
    pub fn next_base(&mut self) {
        let mut candidate = self.base.next();
        while self.watchlist.iter().any(|item| item.quote == candidate) {
            candidate = candidate.next();
        }
        self.base = candidate;
    }

    // ========================================================================
    // Confirmations two-step (quit, delete)
    // ========================================================================

    /// Demande la confirmation de quitter
    pub fn request_quit(&mut self) {
        self.confirm_quit = true;
    }

    /// Annule la demande de quit
    pub fn cancel_quit(&mut self) {
        self.confirm_quit = false;
    }

    /// Vérifie si on attend la confirmation de quit
    pub fn is_awaiting_quit_confirmation(&self) -> bool {
        self.confirm_quit
    }

    /// Demande la confirmation de suppression
    pub fn request_delete(&mut self) {
        self.confirm_delete = true;
    }

    /// Annule la demande de suppression
    pub fn cancel_delete(&mut self) {
        self.confirm_delete = false;
    }

    /// Vérifie si on attend la confirmation de suppression
    pub fn is_awaiting_delete_confirmation(&self) -> bool {
        self.confirm_delete
    }

    /// Supprime la devise sélectionnée de la watchlist
    ///
    /// CONCEPT : Safe deletion
    /// - Supprime l'item à selected_index
    /// - Ajuste selected_index si nécessaire
    /// - Reset confirm_delete
    pub fn delete_selected(&mut self) {
        if self.selected_index < self.watchlist.len() {
            self.watchlist.remove(self.selected_index);

            // Ajuste l'index si on a supprimé le dernier élément
            if self.selected_index >= self.watchlist.len() && self.selected_index > 0 {
                self.selected_index -= 1;
            }
        }

        self.confirm_delete = false;
    }

    // ========================================================================
    // Loading state
    // ========================================================================

    /// Démarre le chargement avec un message optionnel
    pub fn start_loading(&mut self, message: Option<String>) {
        self.is_loading = true;
        self.loading_message = message;
    }

    /// Termine le chargement
    pub fn stop_loading(&mut self) {
        self.is_loading = false;
        self.loading_message = None;
    }

    /// Vérifie si des données sont en cours de chargement
    pub fn is_loading_data(&self) -> bool {
        self.is_loading
    }

    // ========================================================================
    // Navigation dans les postes de dépenses
    // ========================================================================

    /// Poste de dépense précédent
    pub fn expense_up(&mut self) {
        self.expense_index = self.expense_index.saturating_sub(1);
    }

    /// Poste de dépense suivant
    pub fn expense_down(&mut self) {
        let max_index = self.budget.len().saturating_sub(1);
        self.expense_index = (self.expense_index + 1).min(max_index);
    }

    // ========================================================================
    // Input Mode Management
    // ========================================================================

    /// Entre en mode input avec un prompt et un contexte
    ///
    /// CONCEPT : Modal input (Vim-like)
    /// - Change l'écran vers InputMode
    /// - Initialise le buffer vide
    /// - Le contexte décide du retour (dashboard ou vue dépenses)
    pub fn start_input(&mut self, prompt: String, context: InputContext) {
        self.current_screen = Screen::InputMode;
        self.input_buffer.clear();
        self.input_prompt = prompt;
        self.input_context = context;
    }

    /// Écran de retour à la sortie du mode input
    fn input_return_screen(&self) -> Screen {
        match self.input_context {
            InputContext::AddCurrency => Screen::Dashboard,
            InputContext::EditExpense(_) => Screen::ExpensesView,
        }
    }

    /// Annule le mode input et retourne à l'écran d'origine
    pub fn cancel_input(&mut self) {
        self.current_screen = self.input_return_screen();
        self.input_buffer.clear();
        self.input_prompt.clear();
    }

    /// Récupère la valeur saisie et retourne à l'écran d'origine
    ///
    /// CONCEPT : Consume input
    /// - Retourne le contenu du buffer et son contexte
    /// - Vide le buffer
    pub fn submit_input(&mut self) -> (String, InputContext) {
        let value = self.input_buffer.clone();
        let context = self.input_context;
        self.current_screen = self.input_return_screen();
        self.input_buffer.clear();
        self.input_prompt.clear();
        (value, context)
    }

    /// Ajoute un caractère au buffer d'input
    pub fn append_char(&mut self, c: char) {
        self.input_buffer.push(c);
    }

    /// Supprime le dernier caractère du buffer
    pub fn backspace(&mut self) {
        self.input_buffer.pop();
    }

    /// Vérifie si on est en mode input
    pub fn is_in_input_mode(&self) -> bool {
        self.current_screen == Screen::InputMode
    }
}

// ============================================================================
// Trait Default
// ============================================================================
// Convention Rust : si new() ne prend pas de paramètres, implémenter Default
// ============================================================================

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn app_with_targets(targets: &[CurrencyCode]) -> App {
        let watchlist = targets.iter().map(|&c| PairItem::new(c)).collect();
        App::with_watchlist(CurrencyCode::Usd, watchlist)
    }

    #[test]
    fn test_app_creation() {
        let app = App::new();
        assert!(app.is_running());
        assert!(app.watchlist.is_empty());
        assert_eq!(app.base, CurrencyCode::Usd);
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_app_quit() {
        let mut app = App::new();
        app.quit();
        assert!(!app.is_running());
    }

    #[test]
    fn test_navigation() {
        let mut app = app_with_targets(&[
            CurrencyCode::Eur,
            CurrencyCode::Gbp,
            CurrencyCode::Jpy,
        ]);

        assert_eq!(app.selected_index, 0);

        app.navigate_down();
        assert_eq!(app.selected_index, 1);
        app.navigate_down();
        assert_eq!(app.selected_index, 2);

        // Navigate down au max : reste à 2
        app.navigate_down();
        assert_eq!(app.selected_index, 2);

        app.navigate_up();
        assert_eq!(app.selected_index, 1);
        app.navigate_up();
        app.navigate_up(); // Au min : reste à 0
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_delete_selected_adjusts_index() {
        let mut app = app_with_targets(&[CurrencyCode::Eur, CurrencyCode::Gbp]);
        app.navigate_down();
        assert_eq!(app.selected_index, 1);

        app.delete_selected();
        assert_eq!(app.watchlist.len(), 1);
        // L'index est ramené sur le dernier item restant
        assert_eq!(app.selected_index, 0);
        assert!(!app.is_awaiting_delete_confirmation());
    }

    #[test]
    fn test_lookback_cycle() {
        let mut app = App::new();
        assert_eq!(app.current_lookback, Lookback::ThreeMonths);

        app.next_lookback();
        assert_eq!(app.current_lookback, Lookback::SixMonths);

        app.previous_lookback();
        app.previous_lookback();
        assert_eq!(app.current_lookback, Lookback::OneMonth);
    }

    #[test]
    fn test_next_base_skips_watchlist() {
        // EUR est suivie : USD -> (EUR sautée) -> GBP
        let mut app = app_with_targets(&[CurrencyCode::Eur]);
        app.next_base();
        assert_eq!(app.base, CurrencyCode::Gbp);
    }

    #[test]
    fn test_input_mode_context_add_currency() {
        let mut app = App::new();
        app.start_input("Add currency: ".to_string(), InputContext::AddCurrency);
        assert!(app.is_in_input_mode());

        app.append_char('e');
        app.append_char('u');
        app.append_char('x');
        app.backspace();
        app.append_char('r');

        let (value, context) = app.submit_input();
        assert_eq!(value, "eur");
        assert_eq!(context, InputContext::AddCurrency);
        assert!(app.is_on_dashboard());
        assert!(app.input_buffer.is_empty());
    }

    #[test]
    fn test_input_mode_context_edit_expense() {
        let mut app = App::new();
        app.show_expenses();
        app.start_input("Housing: ".to_string(), InputContext::EditExpense(0));

        app.append_char('1');
        app.append_char('5');

        let (value, context) = app.submit_input();
        assert_eq!(value, "15");
        assert_eq!(context, InputContext::EditExpense(0));
        // Retour à la vue dépenses, pas au dashboard
        assert!(app.is_on_expenses());
    }

    #[test]
    fn test_expense_navigation_bounds() {
        let mut app = App::new();
        app.expense_up(); // Au min : reste à 0
        assert_eq!(app.expense_index, 0);

        for _ in 0..20 {
            app.expense_down();
        }
        // 9 postes : index max 8
        assert_eq!(app.expense_index, 8);
    }

    #[test]
    fn test_spot_rates_keeps_missing_as_none() {
        let mut app = app_with_targets(&[CurrencyCode::Eur, CurrencyCode::Gbp]);
        app.watchlist[0].spot_rate = Some(0.92);

        let rates = app.spot_rates();
        assert_eq!(rates[0], (CurrencyCode::Eur, Some(0.92)));
        assert_eq!(rates[1], (CurrencyCode::Gbp, None));
    }
}
