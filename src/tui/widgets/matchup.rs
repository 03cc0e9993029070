// Live Matchup widget: category scoreboard with running totals, projections,
// and the per-category win probability.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};
use ratatui::Frame;

use crate::league::matchup::MatchupCategory;
use crate::protocol::UiSnapshot;
use crate::scoring::matchup::{currently_winning, row_probability};

/// Render the live matchup into the given area.
pub fn render(frame: &mut Frame, area: Rect, snap: &UiSnapshot) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Line::from("Live Matchup"));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Scoreboard header, category table, then the weekly strategy text.
    let zones = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(11),
            Constraint::Min(3),
        ])
        .split(inner);

    frame.render_widget(scoreboard(snap), zones[0]);

    let header = Row::new(vec![
        Cell::from("CAT"),
        Cell::from("Mine"),
        Cell::from("Opp"),
        Cell::from("Proj Me"),
        Cell::from("Proj Opp"),
        Cell::from("Win%"),
    ])
    .style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = snap.matchup.categories.iter().map(category_row).collect();

    let widths = [
        Constraint::Length(5),
        Constraint::Length(8),
        Constraint::Length(8),
        Constraint::Length(9),
        Constraint::Length(9),
        Constraint::Length(6),
    ];

    let table = Table::new(rows, widths).header(header);
    frame.render_widget(table, zones[1]);

    let strategy = if snap.loading.strategy {
        "Working out a weekly plan...".to_string()
    } else {
        snap.strategy_text
            .clone()
            .unwrap_or_else(|| "Press 'a' for a weekly strategy.".to_string())
    };
    let paragraph = Paragraph::new(strategy)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::TOP).title("Strategy"));
    frame.render_widget(paragraph, zones[2]);
}

/// Scoreboard lines: team names with the category score, then game volume.
fn scoreboard(snap: &UiSnapshot) -> Paragraph<'static> {
    let m = &snap.matchup;
    let score = Line::from(vec![
        Span::styled(
            format!("{} {}", m.my_team, m.score_mine),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" - "),
        Span::styled(
            format!("{} {}", m.score_opp, m.opp_team),
            Style::default().fg(Color::Magenta),
        ),
    ]);
    let games = Line::from(Span::styled(
        format!(
            "Games: me {} played / {} left, opp {} played / {} left",
            m.games.played_mine, m.games.remaining_mine, m.games.played_opp, m.games.remaining_opp
        ),
        Style::default().fg(Color::Gray),
    ));
    Paragraph::new(vec![score, games])
}

/// One scoreboard row, green when the category is currently held, red when
/// it is currently lost.
fn category_row(row: &MatchupCategory) -> Row<'static> {
    let winning = currently_winning(row);
    let color = if winning { Color::Green } else { Color::Red };
    Row::new(vec![
        Cell::from(row.category.label()).style(Style::default().fg(color)),
        Cell::from(format_total(row, row.mine)),
        Cell::from(format_total(row, row.opp)),
        Cell::from(format_total(row, row.projected_mine)),
        Cell::from(format_total(row, row.projected_opp)),
        Cell::from(format!("{}%", row_probability(row)))
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD)),
    ])
}

/// Percentages accumulate as averages and keep 3 decimals; counting stats
/// render whole.
fn format_total(row: &MatchupCategory, value: f64) -> String {
    if row.category.is_percentage() {
        format!("{:.3}", value)
    } else {
        format!("{:.0}", value)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::league::category::Category;
    use crate::tui::testutil;

    #[test]
    fn percentage_rows_keep_decimals() {
        let row = MatchupCategory::new(Category::Fgp, 0.512, 0.498, 0.510, 0.501);
        assert_eq!(format_total(&row, row.mine), "0.512");
        let row = MatchupCategory::new(Category::Pts, 412.0, 398.0, 780.0, 765.0);
        assert_eq!(format_total(&row, row.mine), "412");
    }

    #[test]
    fn render_does_not_panic() {
        let backend = ratatui::backend::TestBackend::new(100, 30);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let snap = testutil::snapshot();
        terminal
            .draw(|frame| render(frame, frame.area(), &snap))
            .unwrap();
    }
}
