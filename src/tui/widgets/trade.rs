// Trade Architect widget: the picked give/receive pair, the nine-category
// impact table, the AI verdict, and scouted trade suggestions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};
use ratatui::Frame;

use crate::ai::TradeSuggestion;
use crate::league::player::Player;
use crate::protocol::UiSnapshot;
use crate::scoring::net_value::net_value;
use crate::scoring::trade::CategoryImpact;

/// Render the trade architect into the given area.
pub fn render(frame: &mut Frame, area: Rect, snap: &UiSnapshot) {
    let zones = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(12),
            Constraint::Min(5),
        ])
        .split(area);

    render_sides(frame, zones[0], snap);
    render_impact_and_verdict(frame, zones[1], snap);
    render_suggestions(frame, zones[2], snap);
}

fn render_sides(frame: &mut Frame, area: Rect, snap: &UiSnapshot) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let give = side_paragraph(snap.trade.give.as_ref(), "press 'g' on a roster player");
    frame.render_widget(
        give.block(Block::default().borders(Borders::ALL).title("You Give")),
        halves[0],
    );

    let receive = side_paragraph(snap.trade.receive.as_ref(), "press 'r' on a waiver player");
    frame.render_widget(
        receive.block(Block::default().borders(Borders::ALL).title("You Receive")),
        halves[1],
    );
}

fn side_paragraph(player: Option<&Player>, hint: &str) -> Paragraph<'static> {
    match player {
        Some(p) => Paragraph::new(vec![
            Line::from(Span::styled(
                format!("{} ({} - {})", p.name, p.positions_str(), p.team),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("net value {:+.2}", net_value(p))),
        ]),
        None => Paragraph::new(Line::from(Span::styled(
            hint.to_string(),
            Style::default().fg(Color::DarkGray),
        ))),
    }
}

fn render_impact_and_verdict(frame: &mut Frame, area: Rect, snap: &UiSnapshot) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(26), Constraint::Min(20)])
        .split(area);

    render_impacts(frame, halves[0], &snap.trade.impacts);

    let verdict = if snap.loading.trade_verdict {
        "Weighing the trade...".to_string()
    } else {
        snap.trade
            .verdict
            .clone()
            .unwrap_or_else(|| "Press Enter for a verdict once both sides are set.".to_string())
    };
    let paragraph = Paragraph::new(verdict)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Verdict"));
    frame.render_widget(paragraph, halves[1]);
}

fn render_impacts(frame: &mut Frame, area: Rect, impacts: &[CategoryImpact]) {
    let rows: Vec<Row> = impacts.iter().map(impact_row).collect();
    let widths = [
        Constraint::Length(5),
        Constraint::Length(8),
        Constraint::Length(7),
    ];
    let table = Table::new(rows, widths)
        .block(Block::default().borders(Borders::ALL).title("Impact"));
    frame.render_widget(table, area);
}

/// One impact row, green for an improvement and red for a downgrade.
pub fn impact_row(impact: &CategoryImpact) -> Row<'static> {
    let color = if impact.is_improvement {
        Color::Green
    } else {
        Color::Red
    };
    let tag = if impact.is_improvement { "better" } else { "worse" };
    Row::new(vec![
        Cell::from(impact.category.clone()),
        Cell::from(format!("{:+.2}", impact.delta)).style(Style::default().fg(color)),
        Cell::from(tag).style(Style::default().fg(color)),
    ])
}

fn render_suggestions(frame: &mut Frame, area: Rect, snap: &UiSnapshot) {
    let lines: Vec<Line> = if snap.loading.trade_scout {
        vec![Line::from("Scouting the league for trades...")]
    } else if snap.trade.suggestions.is_empty() {
        vec![Line::from(Span::styled(
            "Press 'a' to scout the league for trade targets.",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        snap.trade
            .suggestions
            .iter()
            .flat_map(suggestion_lines)
            .collect()
    };

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(format!(
            "Suggestions ({})",
            snap.trade.suggestions.len()
        )));
    frame.render_widget(paragraph, area);
}

/// Two display lines per suggestion: the swap with scores, then the pitch.
pub fn suggestion_lines(s: &TradeSuggestion) -> Vec<Line<'static>> {
    let difficulty_color = match s.negotiation_difficulty.label() {
        "Easy" => Color::Green,
        "Hard" => Color::Red,
        _ => Color::Yellow,
    };
    vec![
        Line::from(vec![
            Span::styled(
                format!("{} <- {}", s.target_player_name, s.asset_to_give_name),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("  synergy {}", s.synergy_score)),
            Span::raw("  "),
            Span::styled(
                s.negotiation_difficulty.label().to_string(),
                Style::default().fg(difficulty_color),
            ),
        ]),
        Line::from(Span::styled(
            format!("  {}", s.the_pitch),
            Style::default().fg(Color::Gray),
        )),
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
