// Status bar widget: advisory indicator, signed-in user, section tabs.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::protocol::{SectionId, UiSnapshot};

/// Render the status bar into the given area.
///
/// Layout: [advisory indicator] [user] [section tabs]
pub fn render(frame: &mut Frame, area: Rect, snap: &UiSnapshot) {
    let mut spans = Vec::new();

    // Advisory indicator: green when a model is configured, gray otherwise
    let (dot, dot_color) = advisory_indicator(snap.ai_enabled);
    spans.push(Span::styled(
        format!(" {} ", dot),
        Style::default().fg(dot_color),
    ));

    // Signed-in user
    let user = snap.session.user_name.as_deref().unwrap_or("guest");
    spans.push(Span::styled(
        user.to_string(),
        Style::default().fg(Color::White),
    ));

    // Separator
    spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));

    // Section tabs
    spans.extend(section_spans(snap.section));

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// Return the advisory dot character and its color.
pub fn advisory_indicator(ai_enabled: bool) -> (&'static str, Color) {
    if ai_enabled {
        ("●", Color::Green)
    } else {
        ("●", Color::DarkGray)
    }
}

/// Build section tab spans with short labels and the active section highlighted.
/// E.g. "[1:Team] [2:Matchup] [3:League] ..."
pub fn section_spans(active: SectionId) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for (i, section) in SectionId::ALL.iter().enumerate() {
        let style = if *section == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(
            format!("[{}:{}]", i + 1, short_label(*section)),
            style,
        ));
        spans.push(Span::raw(" "));
    }
    spans
}

/// Short tab label for a section.
pub fn short_label(section: SectionId) -> &'static str {
    match section {
        SectionId::MyTeam => "Team",
        SectionId::Matchup => "Matchup",
        SectionId::LeagueHub => "League",
        SectionId::Schedule => "Sched",
        SectionId::WaiverWire => "Waivers",
        SectionId::TradeArchitect => "Trade",
        SectionId::AiCoach => "Coach",
        SectionId::Settings => "Setup",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
