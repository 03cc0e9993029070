// My Team widget: roster table with per-game stats, net value, injury
// status, and protection markers.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

use crate::league::category::Category;
use crate::league::player::{Player, PlayerStatus};
use crate::protocol::{SectionId, UiSnapshot};
use crate::scoring::net_value::net_value;
use crate::tui::ViewState;

/// Render the roster table into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState, snap: &UiSnapshot) {
    let selected = state.selected_index(SectionId::MyTeam);

    let mut header_cells = vec![
        Cell::from(""),
        Cell::from("Name"),
        Cell::from("Pos"),
        Cell::from("Team"),
        Cell::from("Status"),
        Cell::from("NET"),
    ];
    header_cells.extend(Category::ALL.iter().map(|c| Cell::from(c.label())));
    let header = Row::new(header_cells).style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = snap
        .roster
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let base = if i == selected {
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            let mut cells = vec![
                Cell::from(protect_marker(p)),
                Cell::from(p.name.clone()),
                Cell::from(p.positions_str()),
                Cell::from(p.team.clone()),
                Cell::from(p.status.label()).style(base.fg(status_color(p.status))),
                Cell::from(format!("{:+.2}", net_value(p))),
            ];
            cells.extend(
                Category::ALL
                    .iter()
                    .map(|c| Cell::from(format_stat(*c, p.avg_stats.get(*c)))),
            );
            Row::new(cells).style(base)
        })
        .collect();

    let mut widths = vec![
        Constraint::Length(2),
        Constraint::Min(18),
        Constraint::Length(8),
        Constraint::Length(5),
        Constraint::Length(12),
        Constraint::Length(7),
    ];
    widths.extend(std::iter::repeat(Constraint::Length(6)).take(Category::ALL.len()));

    let title = Line::from(format!(
        "My Team - {} ({})",
        snap.matchup.my_team,
        snap.roster.len()
    ));

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));

    frame.render_widget(table, area);
}

/// Marker shown in front of protected players.
pub fn protect_marker(player: &Player) -> &'static str {
    if player.protected {
        "*"
    } else {
        ""
    }
}

/// Color for an injury status cell.
pub fn status_color(status: PlayerStatus) -> Color {
    match status {
        PlayerStatus::Healthy => Color::Green,
        PlayerStatus::Questionable | PlayerStatus::DayToDay => Color::Yellow,
        PlayerStatus::Out => Color::Red,
    }
}

/// Format a raw per-game stat for its category (percentages get 3 decimals).
pub fn format_stat(cat: Category, value: f64) -> String {
    if cat.is_percentage() {
        format!("{:.3}", value)
    } else {
        format!("{:.1}", value)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
