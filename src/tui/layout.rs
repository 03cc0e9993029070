// Screen layout: panel arrangement and sizing.
//
// Divides the terminal area into fixed zones for the dashboard:
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// +--------------------------------------------------+
// | Main Panel (fill)                                 |
// |   section content switched with keys 1-8          |
// +--------------------------------------------------+
// | Status Line (1 row)                               |
// +--------------------------------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Layout, Rect};

/// Resolved screen areas for each dashboard zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Top row: section tabs, AI indicator, signed-in user.
    pub status_bar: Rect,
    /// Section content area.
    pub main_panel: Rect,
    /// Second-to-last row: status message and loading spinner.
    pub status_line: Rect,
    /// Bottom row: keyboard shortcut hints for the active section.
    pub help_bar: Rect,
}

impl AppLayout {
    fn zones(&self) -> [Rect; 4] {
        [
            self.status_bar,
            self.main_panel,
            self.status_line,
            self.help_bar,
        ]
    }
}

/// Build the dashboard layout from the available terminal area.
///
/// The status bar, status line, and help bar get fixed single rows; the
/// main panel takes everything in between.
pub fn build_layout(area: Rect) -> AppLayout {
    let [status_bar, main_panel, status_line, help_bar] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(10),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    AppLayout {
        status_bar,
        main_panel,
        status_line,
        help_bar,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
