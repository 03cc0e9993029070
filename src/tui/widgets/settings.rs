// Settings widget: session summary, the league connection edit form, and
// the sign-in token line.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::protocol::UiSnapshot;
use crate::tui::{LeagueForm, SettingsInput, ViewState};

/// Render the settings panel into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState, snap: &UiSnapshot) {
    let (title, lines) = match &state.settings_input {
        Some(SettingsInput::League(form)) => ("Edit League Connection", form_lines(form)),
        Some(SettingsInput::Token(token)) => ("Sign In", token_lines(token)),
        None => ("Settings & Session", summary_lines(snap)),
    };
    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(paragraph, area);
}

/// The session summary, one labeled line per fact.
pub fn summary_lines(snap: &UiSnapshot) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    lines.push(labeled(
        "Signed in as",
        snap.session
            .user_name
            .clone()
            .unwrap_or_else(|| "not signed in".to_string()),
    ));
    lines.push(labeled(
        "League",
        snap.session
            .league_summary
            .clone()
            .unwrap_or_else(|| "not connected".to_string()),
    ));
    lines.push(labeled(
        "Last sync",
        snap.session
            .last_sync
            .clone()
            .unwrap_or_else(|| "never".to_string()),
    ));
    lines.push(labeled(
        "AI advisor",
        if snap.ai_enabled {
            "configured".to_string()
        } else {
            "disabled (no API key)".to_string()
        },
    ));

    lines.push(Line::from(""));
    let sync_hint = if snap.loading.sync {
        Span::styled(
            "Syncing league...",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(
            "Press Enter to sync the league from ESPN.",
            Style::default().fg(Color::Gray),
        )
    };
    lines.push(Line::from(sync_hint));
    lines.push(Line::from(Span::styled(
        "e edits the league connection, i signs in with a token, x signs out.",
        Style::default().fg(Color::Gray),
    )));

    lines
}

/// The league connection edit form, one row per field.
pub fn form_lines(form: &LeagueForm) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (idx, label) in LeagueForm::LABELS.iter().enumerate() {
        let focused = idx == form.focus;
        let mut value = form.display_value(idx);
        if focused && !form.is_toggle_focused() {
            value.push('_');
        }
        let value_style = if focused {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} {:<16}", if focused { ">" } else { " " }, label),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(value, value_style),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Tab moves between fields, Space flips the privacy toggle.",
        Style::default().fg(Color::Gray),
    )));
    lines.push(Line::from(Span::styled(
        "Enter saves, Esc discards. Cookies are only needed for private leagues.",
        Style::default().fg(Color::Gray),
    )));
    lines
}

/// The sign-in token entry line.
pub fn token_lines(token: &str) -> Vec<Line<'static>> {
    vec![
        Line::from("Paste your identity token and press Enter."),
        Line::from(""),
        Line::from(Span::styled(
            format!("Token: {token}_"),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Esc cancels.",
            Style::default().fg(Color::Gray),
        )),
    ]
}

fn labeled(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{:<14}", label),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(value),
    ])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
