// ============================================================================
// Dashboard - Rendu de l'interface principale
// ============================================================================
// Dessine l'interface TUI en utilisant les widgets de ratatui
//
// CONCEPTS RATATUI :
// 1. Frame : surface de dessin
// 2. Widgets : composants UI (Block, Paragraph, List, etc.)
// 3. Layout : découpage de l'espace en zones
// 4. Style : couleurs et attributs de texte
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::{App, Screen};
use crate::ui::{chart, expenses, inflation};

// ============================================================================
// Fonction principale de rendu
// ============================================================================

/// Dessine l'interface complète
///
/// CONCEPT RUST : Routing avec match sur enum
/// - Pattern matching sur app.current_screen
/// - Le compilateur garantit l'exhaustivité (tous les cas gérés)
pub fn render(frame: &mut Frame, app: &App) {
    match app.current_screen {
        Screen::Dashboard => {
            render_dashboard(frame, app);
        }
        Screen::ChartView => {
            chart::render_chart(frame, app, frame.size());
        }
        Screen::InflationView => {
            inflation::render_inflation(frame, app, frame.size());
        }
        Screen::ExpensesView => {
            expenses::render_expenses(frame, app, frame.size());
        }
        Screen::InputMode => {
            // Affiche l'écran d'origine avec la ligne de saisie en bas
            render_input_mode(frame, app);
        }
    }
}

/// Dessine le dashboard (taux de change)
fn render_dashboard(frame: &mut Frame, app: &App) {
    let size = frame.size();
    let chunks = create_layout(size);

    render_header(frame, app, chunks[0]);
    render_rates(frame, app, chunks[1]);
    render_footer(frame, app, chunks[2]);
}

// ============================================================================
// Layout : Découpage de l'écran
// ============================================================================

/// Crée le layout principal (header, content, footer)
///
/// CONCEPT RATATUI : Layout
/// - split() découpe un Rect en plusieurs zones
/// - Length(n) : exactement n lignes ; Min(0) : tout le reste
fn create_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header : 3 lignes
            Constraint::Min(0),    // Content : tout le reste
            Constraint::Length(3), // Footer : 3 lignes
        ])
        .split(area)
        .to_vec()
}

// ============================================================================
// Header : Titre et devise de base
// ============================================================================

/// Dessine le header avec la devise de base
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" LazyForex ")
        .title_alignment(Alignment::Center);

    let mut spans = vec![
        Span::raw("💱 Exchange Rates (Base: "),
        Span::styled(
            app.base.code(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(", {})", app.base.name())),
    ];

    // Indicateur de chargement à droite du titre
    if app.is_loading_data() {
        let message = app
            .loading_message
            .clone()
            .unwrap_or_else(|| "Chargement...".to_string());
        spans.push(Span::styled(
            format!("  ⏳ {}", message),
            Style::default().fg(Color::Yellow),
        ));
    }

    let paragraph = Paragraph::new(vec![Line::from(spans)])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Main Content : Table des taux
// ============================================================================

/// Dessine la watchlist de devises avec taux et variation
///
/// CONCEPT RATATUI : List widget
/// - Widget pour afficher une liste d'items
/// - Highlight : style spécial pour l'item sélectionné
fn render_rates(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" 📊 Watchlist ({}) ", app.current_lookback.label()));

    // Si la watchlist est vide, affiche un message
    if app.watchlist.is_empty() {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Watchlist vide : [a] pour ajouter une devise",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center);

        frame.render_widget(paragraph, area);
        return;
    }

    // CONCEPT RUST : Iterator chaining
    // - .iter() puis .enumerate() puis .map() puis .collect()
    let items: Vec<ListItem> = app
        .watchlist
        .iter()
        .enumerate()
        .map(|(index, item)| {
            // Couleur selon la variation sur la période
            let style = if item.has_series() {
                if item.is_positive() {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default().fg(Color::Red)
                }
            } else {
                Style::default().fg(Color::Gray)
            };

            let rate_str = item
                .current_rate()
                .map(|r| format_rate(r))
                .unwrap_or_else(|| "Loading...".to_string());

            let change_str = item
                .change_percent()
                .map(|c| {
                    let arrow = if c >= 0.0 { "▲" } else { "▼" };
                    format!("{} {:+.2}%", arrow, c)
                })
                .unwrap_or_default();

            let line = format!(
                " {:<5} {:<26} {:>12}  {}",
                item.quote.code(),
                item.quote.name(),
                rate_str,
                change_str
            );

            let mut list_item = ListItem::new(line).style(style);

            // Item sélectionné : gras + couleurs inversées
            if index == app.selected_index {
                list_item = list_item.style(
                    style
                        .add_modifier(Modifier::BOLD)
                        .add_modifier(Modifier::REVERSED),
                );
            }

            list_item
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}

/// Formate un taux selon son ordre de grandeur
///
/// Les taux JPY/KRW se lisent mal avec 4 décimales, les taux
/// EUR/GBP se lisent mal avec 2 : on ajuste.
fn format_rate(rate: f64) -> String {
    if rate >= 100.0 {
        format!("{:.2}", rate)
    } else {
        format!("{:.4}", rate)
    }
}

// ============================================================================
// Footer : Instructions
// ============================================================================

/// Dessine le footer avec les raccourcis clavier
fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let shortcuts = if app.is_awaiting_delete_confirmation() {
        // Message de confirmation de suppression
        let currency = app
            .selected_item()
            .map(|item| item.quote.code())
            .unwrap_or("?");

        Line::from(vec![
            Span::styled(
                "⚠  Appuyez sur ",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "[d]",
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD)
                    .add_modifier(Modifier::SLOW_BLINK),
            ),
            Span::styled(
                format!(" à nouveau pour supprimer {} ou autre touche pour annuler ⚠", currency),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ])
    } else if app.is_awaiting_quit_confirmation() {
        // Message de confirmation de quit
        Line::from(vec![
            Span::styled(
                "⚠  Appuyez sur ",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "[q]",
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD)
                    .add_modifier(Modifier::SLOW_BLINK),
            ),
            Span::styled(
                " à nouveau pour quitter, ou n'importe quelle autre touche pour annuler ⚠",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ])
    } else {
        // Shortcuts normaux avec différentes couleurs
        Line::from(vec![
            Span::styled("[q]", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::raw(" Quit  "),
            Span::styled("[↑↓/jk]", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::raw(" Nav  "),
            Span::styled("[Enter]", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::raw(" Chart  "),
            Span::styled("[a]", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(" Add  "),
            Span::styled("[d]", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::raw(" Del  "),
            Span::styled("[b]", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw(" Base  "),
            Span::styled("[i]", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw(" Inflation  "),
            Span::styled("[e]", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw(" Expenses  "),
            Span::styled("[r]", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw(" Refresh"),
        ])
    };

    let paragraph = Paragraph::new(vec![shortcuts])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Input Mode : Saisie (ajout devise, édition dépense)
// ============================================================================

/// Dessine l'écran avec le mode input actif
///
/// CONCEPT : Modal input (Vim-like)
/// - Affiche le contenu en arrière-plan
/// - Affiche une ligne d'input en bas
/// - ESC annule, Enter valide
fn render_input_mode(frame: &mut Frame, app: &App) {
    let size = frame.size();
    let chunks = create_layout(size);

    render_header(frame, app, chunks[0]);

    // Arrière-plan selon le contexte de saisie
    match app.input_context {
        crate::app::InputContext::AddCurrency => render_rates(frame, app, chunks[1]),
        crate::app::InputContext::EditExpense(_) => {
            expenses::render_expenses(frame, app, chunks[1])
        }
    }

    render_input_footer(frame, app, chunks[2]);
}

/// Dessine le footer en mode input avec la ligne de saisie
fn render_input_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green)); // Vert pour indiquer mode input

    let input_line = Line::from(vec![
        Span::styled(
            &app.input_prompt,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(&app.input_buffer, Style::default().fg(Color::White)),
        Span::styled(
            "█", // Curseur
            Style::default().fg(Color::White).add_modifier(Modifier::SLOW_BLINK),
        ),
    ]);

    let help_line = Line::from(vec![
        Span::styled(
            "[Enter]",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Confirm  "),
        Span::styled(
            "[ESC]",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Cancel"),
    ]);

    let paragraph = Paragraph::new(vec![input_line, help_line])
        .block(block)
        .alignment(Alignment::Left);

    frame.render_widget(paragraph, area);
}
