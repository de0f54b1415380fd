// ============================================================================
// Chart - Rendu du graphique pour une paire de devises
// ============================================================================
// Affiche la série historique en ligne, avec les moyennes mobiles 20 et 50
// en surimpression et un panneau de métriques dérivées
//
// CONCEPTS RATATUI :
// 1. Chart widget : graphique ligne
// 2. Dataset : une série de points (x, y) par courbe
// 3. Axis : configuration des axes X et Y
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
use crate::metrics::{self, DerivedMetrics, LONG_MA_WINDOW, SHORT_MA_WINDOW};
use crate::models::{CurrencyPair, PairItem, PriceSeries};

// ============================================================================
// Fonction principale de rendu du graphique
// ============================================================================

/// Dessine le graphique pour la paire sélectionnée
///
/// CONCEPT RUST : Early return avec match
/// - Si pas de devise sélectionnée, affiche un message et return
/// - Si pas de données, affiche un message et return
pub fn render_chart(frame: &mut Frame, app: &App, area: Rect) {
    let item = match app.selected_item() {
        Some(item) => item,
        None => {
            render_no_data(frame, area, "Aucune devise sélectionnée");
            return;
        }
    };

    let series = match &item.series {
        Some(series) => series,
        None => {
            let msg = format!("Pas de données pour {}/{}", app.base.code(), item.quote.code());
            render_no_data(frame, area, &msg);
            return;
        }
    };

    // Layout vertical : titre + zone principale
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Titre
            Constraint::Min(0),    // Graphique + métriques
        ])
        .split(area)
        .to_vec();

    render_chart_header(frame, item, series, chunks[0]);

    // Layout horizontal : graphique à gauche, métriques à droite
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // Graphique
            Constraint::Length(30), // Panneau de métriques
        ])
        .split(chunks[1])
        .to_vec();

    render_chart_graph(frame, item, series, body[0]);
    render_metrics_panel(frame, series, body[1]);
}

// ============================================================================
// Header du graphique
// ============================================================================

/// Dessine le header avec la paire et la variation
fn render_chart_header(frame: &mut Frame, item: &PairItem, series: &PriceSeries, area: Rect) {
    let pair: CurrencyPair = series.pair;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" 📈 {} ({}) ", pair.display(), item.quote.name()));

    let text = if let (Some(rate), Some(change)) = (item.current_rate(), item.change_percent()) {
        let color = if change >= 0.0 { Color::Green } else { Color::Red };
        let arrow = if change >= 0.0 { "▲" } else { "▼" };

        vec![Line::from(vec![
            Span::raw("Taux: "),
            Span::styled(
                format!("{:.4}", rate),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(format!("{} {:+.2}%", arrow, change), Style::default().fg(color)),
            Span::raw(format!("  [{}]  ", series.lookback.label())),
            Span::styled(
                "[h/l]",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Lookback  "),
            Span::styled(
                "[ESC]",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Retour"),
        ])]
    } else {
        vec![Line::from("Chargement...")]
    };

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Graphique principal
// ============================================================================

/// Dessine le graphique ligne avec les moyennes mobiles
///
/// CONCEPT RUST : Iterator chaining
/// - La série devient des points (index, prix)
/// - Les moyennes mobiles deviennent des points là où elles sont définies
fn render_chart_graph(frame: &mut Frame, item: &PairItem, series: &PriceSeries, area: Rect) {
    let prices = series.prices();

    let points: Vec<(f64, f64)> = prices
        .iter()
        .enumerate()
        .map(|(i, &price)| (i as f64, price))
        .collect();

    if points.is_empty() {
        render_no_data(frame, area, "Pas de données à afficher");
        return;
    }

    // Les moyennes mobiles sont indéfinies en début de série :
    // on ne trace que les points définis
    let ma20_points = ma_points(&prices, SHORT_MA_WINDOW);
    let ma50_points = ma_points(&prices, LONG_MA_WINDOW);

    // Bornes des axes
    let (min_price, max_price) = points
        .iter()
        .fold((f64::MAX, f64::MIN), |(min, max), &(_x, y)| {
            (min.min(y), max.max(y))
        });

    // Marge de 5% pour que le graphique respire
    let margin = (max_price - min_price) * 0.05;
    let y_min = (min_price - margin).max(0.0);
    let y_max = max_price + margin;

    let color = if item.is_positive() { Color::Green } else { Color::Red };

    let mut datasets = vec![Dataset::default()
        .name(series.pair.display())
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(&points)];

    if !ma20_points.is_empty() {
        datasets.push(
            Dataset::default()
                .name("MA20")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Yellow))
                .data(&ma20_points),
        );
    }

    if !ma50_points.is_empty() {
        datasets.push(
            Dataset::default()
                .name("MA50")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Magenta))
                .data(&ma50_points),
        );
    }

    // Labels de l'axe X : dates de début et de fin de la série
    let first_label = series
        .first()
        .map(|p| p.date.format("%d/%m/%y").to_string())
        .unwrap_or_default();
    let last_label = series
        .last()
        .map(|p| p.date.format("%d/%m/%y").to_string())
        .unwrap_or_default();

    let x_axis = Axis::default()
        .style(Style::default().fg(Color::Gray))
        .bounds([0.0, (points.len() - 1).max(1) as f64])
        .labels(vec![
            Span::raw(first_label),
            Span::raw(last_label),
        ]);

    let y_axis = Axis::default()
        .style(Style::default().fg(Color::Gray))
        .bounds([y_min, y_max])
        .labels(vec![
            Span::raw(format!("{:.4}", y_min)),
            Span::raw(format!("{:.4}", (y_min + y_max) / 2.0)),
            Span::raw(format!("{:.4}", y_max)),
        ]);

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(format!(
                    " {} ({} jours) ",
                    series.pair.display(),
                    series.lookback.to_days()
                )),
        )
        .x_axis(x_axis)
        .y_axis(y_axis);

    frame.render_widget(chart, area);
}

/// Convertit une moyenne mobile en points traçables
fn ma_points(prices: &[f64], window: usize) -> Vec<(f64, f64)> {
    metrics::moving_average(prices, window)
        .iter()
        .enumerate()
        .filter_map(|(i, ma)| ma.map(|value| (i as f64, value)))
        .collect()
}

// ============================================================================
// Panneau de métriques dérivées
// ============================================================================

/// Dessine le panneau latéral avec les métriques de la série
///
/// Les métriques indéfinies (série trop courte) affichent "n/a"
fn render_metrics_panel(frame: &mut Frame, series: &PriceSeries, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Métriques ");

    let text = match metrics::compute(series) {
        Some(m) => metrics_lines(&m),
        None => vec![Line::from(Span::styled(
            "Pas de métriques",
            Style::default().fg(Color::Gray),
        ))],
    };

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Left);

    frame.render_widget(paragraph, area);
}

/// Construit les lignes du panneau de métriques
fn metrics_lines(m: &DerivedMetrics) -> Vec<Line<'static>> {
    let label_style = Style::default().fg(Color::Gray);
    let value_style = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);

    let optional = |value: Option<f64>, unit: &str| match value {
        Some(v) => format!("{:.4}{}", v, unit),
        None => "n/a".to_string(),
    };

    vec![
        Line::from(vec![
            Span::styled(format!("{:<12}", "Dernier"), label_style),
            Span::styled(format!("{:.4}", m.current_value), value_style),
        ]),
        Line::from(vec![
            Span::styled(format!("{:<12}", "Variation"), label_style),
            Span::styled(
                match m.period_change_percent {
                    Some(c) => format!("{:+.2}%", c),
                    None => "n/a".to_string(),
                },
                value_style,
            ),
        ]),
        Line::from(vec![
            Span::styled(format!("{:<12}", "Volatilité"), label_style),
            Span::styled(
                match m.volatility_percent {
                    Some(v) => format!("{:.2}% ann.", v),
                    None => "n/a".to_string(),
                },
                value_style,
            ),
        ]),
        Line::from(vec![
            Span::styled(format!("{:<12}", "Plus haut"), label_style),
            Span::styled(format!("{:.4}", m.period_high), value_style),
        ]),
        Line::from(vec![
            Span::styled(format!("{:<12}", "Plus bas"), label_style),
            Span::styled(format!("{:.4}", m.period_low), value_style),
        ]),
        Line::from(vec![
            Span::styled(format!("{:<12}", "MA20"), label_style),
            Span::styled(optional(m.moving_average_20, ""), Style::default().fg(Color::Yellow)),
        ]),
        Line::from(vec![
            Span::styled(format!("{:<12}", "MA50"), label_style),
            Span::styled(optional(m.moving_average_50, ""), Style::default().fg(Color::Magenta)),
        ]),
    ]
}

// ============================================================================
// Helper : Message quand pas de données
// ============================================================================

/// Affiche un message quand il n'y a pas de données à afficher
fn render_no_data(frame: &mut Frame, area: Rect, message: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" ⚠ Erreur ");

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
