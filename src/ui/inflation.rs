// ============================================================================
// Inflation - Rendu de la vue inflation US
// ============================================================================
// Affiche le taux d'inflation année sur année dérivé de la série CPI,
// avec le taux courant en tête
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::app::App;
use crate::metrics::inflation::{self, InflationPoint};

/// Dessine la vue inflation complète
pub fn render_inflation(frame: &mut Frame, app: &App, area: Rect) {
    let series = match &app.cpi {
        Some(series) => series,
        None => {
            render_no_data(frame, area, "Données BLS non disponibles");
            return;
        }
    };

    let points = inflation::year_over_year(series);
    if points.is_empty() {
        render_no_data(frame, area, "Série CPI trop courte pour un taux annuel");
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Taux courant
            Constraint::Min(0),    // Graphique
        ])
        .split(area)
        .to_vec();

    render_current_rate(frame, &points, chunks[0]);
    render_inflation_graph(frame, &points, chunks[1]);
}

/// Dessine le header avec le taux d'inflation courant
fn render_current_rate(frame: &mut Frame, points: &[InflationPoint], area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" 📉 US Inflation (CPI-U, year over year) ");

    // Le dernier point est le taux courant
    let text = match points.last() {
        Some(latest) => vec![Line::from(vec![
            Span::raw("Taux actuel: "),
            Span::styled(
                format!("{:.2}%", latest.percent),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("  ({})  ", latest.date.format("%B %Y"))),
            Span::styled(
                "[ESC]",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Retour"),
        ])],
        None => vec![Line::from("Chargement...")],
    };

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// Dessine la courbe du taux d'inflation
fn render_inflation_graph(frame: &mut Frame, points: &[InflationPoint], area: Rect) {
    let data: Vec<(f64, f64)> = points
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.percent))
        .collect();

    let (min_rate, max_rate) = data
        .iter()
        .fold((f64::MAX, f64::MIN), |(min, max), &(_x, y)| {
            (min.min(y), max.max(y))
        });

    // Marge fixe : l'inflation varie sur quelques points de pourcentage
    // et peut être négative, pas de clamp à 0 ici
    let y_min = min_rate - 0.5;
    let y_max = max_rate + 0.5;

    let datasets = vec![Dataset::default()
        .name("YoY %")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&data)];

    let first_label = points
        .first()
        .map(|p| p.date.format("%m/%y").to_string())
        .unwrap_or_default();
    let last_label = points
        .last()
        .map(|p| p.date.format("%m/%y").to_string())
        .unwrap_or_default();

    let x_axis = Axis::default()
        .style(Style::default().fg(Color::Gray))
        .bounds([0.0, (data.len() - 1).max(1) as f64])
        .labels(vec![Span::raw(first_label), Span::raw(last_label)]);

    let y_axis = Axis::default()
        .title("%")
        .style(Style::default().fg(Color::Gray))
        .bounds([y_min, y_max])
        .labels(vec![
            Span::raw(format!("{:.1}", y_min)),
            Span::raw(format!("{:.1}", (y_min + y_max) / 2.0)),
            Span::raw(format!("{:.1}", y_max)),
        ]);

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(" US Inflation Rate Over Time "),
        )
        .x_axis(x_axis)
        .y_axis(y_axis);

    frame.render_widget(chart, area);
}

/// Affiche un message quand il n'y a pas de données à afficher
fn render_no_data(frame: &mut Frame, area: Rect, message: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" ⚠ Inflation ");

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(message.to_string(), Style::default().fg(Color::Red))),
        Line::from(""),
        Line::from(Span::styled(
            "[ESC] Retour",
            Style::default().fg(Color::Gray),
        )),
    ];

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
