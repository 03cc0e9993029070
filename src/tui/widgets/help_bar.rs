// Help bar widget: keyboard shortcut hints for the active section, or the
// live search input while it is being edited.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::protocol::{SectionId, UiSnapshot};
use crate::tui::{SettingsInput, ViewState};

/// Render the help bar into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState, snap: &UiSnapshot) {
    let line = if let Some(input) = &state.settings_input {
        let hint = match input {
            SettingsInput::League(_) => {
                " Tab:Next field | Space:Toggle private | Enter:Save | Esc:Cancel"
            }
            SettingsInput::Token(_) => " Enter:Sign in | Esc:Cancel",
        };
        Line::from(Span::styled(
            hint,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ))
    } else if state.search_mode {
        Line::from(vec![
            Span::styled(
                format!(" Search: {}_", state.search_input),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "  (Enter keeps, Esc clears)",
                Style::default().fg(Color::Gray),
            ),
        ])
    } else {
        Line::from(Span::styled(
            hints(snap.section),
            Style::default().fg(Color::White).add_modifier(Modifier::DIM),
        ))
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

/// Key hints for a section.
pub fn hints(section: SectionId) -> &'static str {
    match section {
        SectionId::MyTeam => {
            " q:Quit | 1-8:Sections | j/k:Move | p:Protect | g:Give | d:Deep Dive | a:Insights"
        }
        SectionId::Matchup => " q:Quit | 1-8:Sections | a:Strategy",
        SectionId::LeagueHub => " q:Quit | 1-8:Sections | j/k:Move | a:Scout Team",
        SectionId::Schedule => " q:Quit | 1-8:Sections | j/k:Move",
        SectionId::WaiverWire => {
            " q:Quit | 1-8:Sections | j/k:Move | /:Search | s:Sort | o:Order | r:Receive | d:Deep Dive"
        }
        SectionId::TradeArchitect => {
            " q:Quit | 1-8:Sections | a:Scout Trades | Enter:Verdict"
        }
        SectionId::AiCoach => " q:Quit | 1-8:Sections | j/k:Scroll | a:Refresh",
        SectionId::Settings => {
            " q:Quit | 1-8:Sections | Enter:Sync | e:Edit League | i:Sign In | x:Sign Out"
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::testutil;

    #[test]
    fn every_section_has_hints() {
        for section in SectionId::ALL {
            assert!(
                hints(section).contains("q:Quit"),
                "{:?} hints missing quit",
                section
            );
        }
    }

    #[test]
    fn waiver_hints_mention_search_and_sort() {
        let text = hints(SectionId::WaiverWire);
        assert!(text.contains("/:Search"));
        assert!(text.contains("s:Sort"));
    }

    #[test]
    fn settings_hints_cover_the_session_keys() {
        let text = hints(SectionId::Settings);
        assert!(text.contains("e:Edit League"));
        assert!(text.contains("i:Sign In"));
        assert!(text.contains("x:Sign Out"));
    }

    #[test]
    fn render_shows_form_hints_while_editing() {
        let backend = ratatui::backend::TestBackend::new(100, 1);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let snap = testutil::snapshot();
        let mut state = ViewState::default();
        state.settings_input = Some(crate::tui::SettingsInput::League(
            crate::tui::LeagueForm::default(),
        ));
        terminal
            .draw(|frame| render(frame, frame.area(), &state, &snap))
            .unwrap();
    }

    #[test]
    fn render_does_not_panic_in_search_mode() {
        let backend = ratatui::backend::TestBackend::new(100, 1);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let snap = testutil::snapshot();
        let mut state = ViewState::default();
        state.search_mode = true;
        state.search_input = "gaff".to_string();
        terminal
            .draw(|frame| render(frame, frame.area(), &state, &snap))
            .unwrap();
    }
}
