// ============================================================================
// Expenses - Rendu de la vue coût de vie
// ============================================================================
// Affiche le budget mensuel par poste (éditable) et la conversion du total
// dans chaque devise suivie dont le taux est disponible
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::App;
use crate::models::compare_costs;

/// Dessine la vue coût de vie complète
pub fn render_expenses(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Total mensuel
            Constraint::Min(11),    // Postes de dépenses
            Constraint::Length(8),  // Comparaison par devise
        ])
        .split(area)
        .to_vec();

    render_total(frame, app, chunks[0]);
    render_budget(frame, app, chunks[1]);
    render_comparison(frame, app, chunks[2]);
}

/// Dessine le header avec le total mensuel dans la devise de base
fn render_total(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" 🏠 Monthly Expenses ");

    let text = vec![Line::from(vec![
        Span::raw("Total mensuel: "),
        Span::styled(
            format!("{:.2} {}", app.budget.total(), app.base.code()),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            "[↑↓/jk]",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Poste  "),
        Span::styled(
            "[Enter]",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Éditer  "),
        Span::styled(
            "[ESC]",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Retour"),
    ])];

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// Dessine la liste des postes de dépenses
fn render_budget(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Postes ");

    let items: Vec<ListItem> = app
        .budget
        .entries()
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let line = format!(
                " {:<26} {:>10.2} {}",
                entry.category.label(),
                entry.amount,
                app.base.code()
            );

            let mut list_item = ListItem::new(line).style(Style::default().fg(Color::White));

            if index == app.expense_index {
                list_item = list_item.style(
                    Style::default()
                        .fg(Color::White)
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

/// Dessine la comparaison du coût de vie par devise suivie
///
/// Les devises sans taux sont omises de la table (dégradation
/// partielle, pas d'erreur globale)
fn render_comparison(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Cost Comparison ");

    let comparisons = compare_costs(&app.budget, &app.spot_rates());

    if comparisons.is_empty() {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Aucun taux disponible pour la conversion",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center);

        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = comparisons
        .iter()
        .map(|c| {
            let line = format!(
                " {:<5} {:<26} Monthly {:>14.2}   Annual {:>16.2}",
                c.currency.code(),
                format!("({})", c.currency.name()),
                c.monthly,
                c.annual
            );
            ListItem::new(line).style(Style::default().fg(Color::White))
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}
