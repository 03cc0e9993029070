// Waiver Wire widget: searchable, sortable table of free agents with the
// high-impact pickup badge.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

use crate::league::category::Category;
use crate::league::player::Player;
use crate::protocol::{SectionId, UiSnapshot, WaiverSort};
use crate::scoring::net_value::{is_high_impact, net_value};
use crate::tui::ViewState;

/// Render the waiver wire table into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState, snap: &UiSnapshot) {
    let selected = state.selected_index(SectionId::WaiverWire);
    let sort_cat = sort_category(snap.waivers.sort);

    let mut header_cells = vec![
        Cell::from("#"),
        Cell::from("Name"),
        Cell::from("Pos"),
        Cell::from("Team"),
        Cell::from("NET"),
    ];
    header_cells.extend(Category::ALL.iter().map(|c| {
        let label = c.label();
        if Some(*c) == sort_cat {
            Cell::from(label).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        } else {
            Cell::from(label)
        }
    }));
    header_cells.push(Cell::from(""));

    let header = Row::new(header_cells).style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = snap
        .waivers
        .players
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
                Cell::from(format!("{}", i + 1)),
                Cell::from(p.name.clone()),
                Cell::from(p.positions_str()),
                Cell::from(p.team.clone()),
                Cell::from(format!("{:+.2}", net_value(p))),
            ];
            cells.extend(Category::ALL.iter().map(|c| {
                let value = p.avg_stats.get(*c);
                let text = if c.is_percentage() {
                    format!("{:.3}", value)
                } else {
                    format!("{:.1}", value)
                };
                Cell::from(text)
            }));
            cells.push(badge_cell(p));

            Row::new(cells).style(base)
        })
        .collect();

    let mut widths = vec![
        Constraint::Length(3),
        Constraint::Min(18),
        Constraint::Length(8),
        Constraint::Length(5),
        Constraint::Length(7),
    ];
    widths.extend(std::iter::repeat(Constraint::Length(6)).take(Category::ALL.len()));
    widths.push(Constraint::Length(12));

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(build_title(snap)));

    frame.render_widget(table, area);
}

/// The raw-stat column a sort key highlights, if any.
fn sort_category(sort: WaiverSort) -> Option<Category> {
    match sort {
        WaiverSort::NetValue => None,
        WaiverSort::Stat(cat) => Some(cat),
    }
}

/// Badge for players whose net value clears the high-impact threshold.
fn badge_cell(player: &Player) -> Cell<'static> {
    if is_high_impact(player) {
        Cell::from("HIGH IMPACT").style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Cell::from("")
    }
}

/// Title with sort key, order, active query, and result count.
pub fn build_title(snap: &UiSnapshot) -> Line<'static> {
    let order = if snap.waivers.descending { "desc" } else { "asc" };
    let mut title = format!("Waiver Wire [{} {}]", snap.waivers.sort.label(), order);
    if !snap.waivers.query.is_empty() {
        title.push_str(&format!(" \"{}\"", snap.waivers.query));
    }
    title.push_str(&format!(" ({})", snap.waivers.players.len()));
    Line::from(title)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
