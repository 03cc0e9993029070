// TUI dashboard: layout, input handling, and widget rendering.
//
// The TUI holds the latest `UiSnapshot` pushed by the app orchestrator plus
// purely local view state (selection cursors, scroll offsets, search input).
// The orchestrator sends a fresh snapshot after every state change; the TUI
// re-renders at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::collections::HashMap;
use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::layout::Alignment;
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tokio::sync::mpsc;

use crate::league::player::Player;
use crate::league::team::Team;
use crate::protocol::{SectionId, UiSnapshot, UserCommand};
use crate::session::LeagueConnection;

use layout::build_layout;

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// Per-section key under which the selection cursor is stored.
pub fn selection_key(section: SectionId) -> &'static str {
    match section {
        SectionId::MyTeam => "roster",
        SectionId::Matchup => "matchup",
        SectionId::LeagueHub => "teams",
        SectionId::Schedule => "schedule",
        SectionId::WaiverWire => "waivers",
        SectionId::TradeArchitect => "trade",
        SectionId::AiCoach => "coach",
        SectionId::Settings => "settings",
    }
}

/// An in-progress edit of the league connection, driven from Settings.
#[derive(Debug, Clone, Default)]
pub struct LeagueForm {
    pub league_id: String,
    pub season_id: String,
    pub is_private: bool,
    pub espn_s2: String,
    pub swid: String,
    /// Index into [`LeagueForm::LABELS`].
    pub focus: usize,
}

impl LeagueForm {
    pub const LABELS: [&'static str; 5] = [
        "League ID",
        "Season",
        "Private league",
        "espn_s2 cookie",
        "SWID cookie",
    ];
    const PRIVATE: usize = 2;

    /// Prefill from the current connection so an edit starts from what is
    /// already saved.
    pub fn from_connection(conn: Option<&LeagueConnection>) -> Self {
        match conn {
            Some(c) => LeagueForm {
                league_id: c.league_id.clone(),
                season_id: c.season_id.clone(),
                is_private: c.is_private,
                espn_s2: c.espn_s2.clone().unwrap_or_default(),
                swid: c.swid.clone().unwrap_or_default(),
                focus: 0,
            },
            None => LeagueForm::default(),
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % Self::LABELS.len();
    }

    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + Self::LABELS.len() - 1) % Self::LABELS.len();
    }

    pub fn is_toggle_focused(&self) -> bool {
        self.focus == Self::PRIVATE
    }

    /// The text field under the cursor; `None` on the private toggle.
    pub fn field_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            0 => Some(&mut self.league_id),
            1 => Some(&mut self.season_id),
            3 => Some(&mut self.espn_s2),
            4 => Some(&mut self.swid),
            _ => None,
        }
    }

    /// Display text for a field row.
    pub fn display_value(&self, idx: usize) -> String {
        match idx {
            0 => self.league_id.clone(),
            1 => self.season_id.clone(),
            Self::PRIVATE => if self.is_private { "yes" } else { "no" }.to_string(),
            3 => self.espn_s2.clone(),
            4 => self.swid.clone(),
            _ => String::new(),
        }
    }

    /// Assemble the connection, trimming text and dropping blank cookies.
    pub fn to_connection(&self) -> LeagueConnection {
        let cookie = |s: &str| {
            let s = s.trim();
            if s.is_empty() {
                None
            } else {
                Some(s.to_string())
            }
        };
        LeagueConnection {
            league_id: self.league_id.trim().to_string(),
            season_id: self.season_id.trim().to_string(),
            is_private: self.is_private,
            espn_s2: cookie(&self.espn_s2),
            swid: cookie(&self.swid),
        }
    }
}

/// Which text input the Settings section has open.
#[derive(Debug, Clone)]
pub enum SettingsInput {
    /// The league connection edit form.
    League(LeagueForm),
    /// An identity-provider token being pasted for sign-in.
    Token(String),
}

/// TUI-local state. The latest snapshot from the orchestrator plus cursor,
/// scroll, and search-input state that never leaves the terminal side.
pub struct ViewState {
    /// Latest full snapshot; `None` until the orchestrator's first push.
    pub snapshot: Option<UiSnapshot>,
    /// Per-section selection cursor (keyed by `selection_key`).
    pub selected: HashMap<String, usize>,
    /// Per-widget scroll offsets for text panels.
    pub scroll_offset: HashMap<String, usize>,
    /// Waiver search text being edited.
    pub search_input: String,
    /// Whether the waiver search input is active.
    pub search_mode: bool,
    /// Whether the quit confirmation overlay is showing.
    pub confirm_quit: bool,
    /// Settings text entry (league form or sign-in token), when open.
    pub settings_input: Option<SettingsInput>,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            snapshot: None,
            selected: HashMap::new(),
            scroll_offset: HashMap::new(),
            search_input: String::new(),
            search_mode: false,
            confirm_quit: false,
            settings_input: None,
        }
    }
}

impl ViewState {
    /// The active section, defaulting to My Team before the first snapshot.
    pub fn section(&self) -> SectionId {
        self.snapshot
            .as_ref()
            .map(|s| s.section)
            .unwrap_or(SectionId::MyTeam)
    }

    /// Length of the selectable list in the given section.
    pub fn list_len(&self, section: SectionId) -> usize {
        let Some(snap) = &self.snapshot else {
            return 0;
        };
        match section {
            SectionId::MyTeam => snap.roster.len(),
            SectionId::LeagueHub => snap.teams.len(),
            SectionId::Schedule => snap.schedule.len(),
            SectionId::WaiverWire => snap.waivers.players.len(),
            SectionId::TradeArchitect => snap.trade.suggestions.len(),
            _ => 0,
        }
    }

    /// Current cursor position for a section (0 when unset).
    pub fn selected_index(&self, section: SectionId) -> usize {
        self.selected
            .get(selection_key(section))
            .copied()
            .unwrap_or(0)
    }

    /// Move the cursor in the active section, clamped to the list bounds.
    pub fn move_selection(&mut self, delta: isize) {
        let section = self.section();
        let len = self.list_len(section);
        if len == 0 {
            return;
        }
        let current = self.selected_index(section) as isize;
        let next = (current + delta).clamp(0, len as isize - 1) as usize;
        self.selected.insert(selection_key(section).to_string(), next);
    }

    /// Pull cursors back inside list bounds after a snapshot shrinks a list.
    pub fn apply_snapshot(&mut self, snapshot: UiSnapshot) {
        self.snapshot = Some(snapshot);
        for section in SectionId::ALL {
            let len = self.list_len(section);
            let key = selection_key(section);
            if let Some(idx) = self.selected.get_mut(key) {
                if len == 0 {
                    *idx = 0;
                } else if *idx >= len {
                    *idx = len - 1;
                }
            }
        }
    }

    /// The roster player under the cursor, if any.
    pub fn selected_roster_player(&self) -> Option<&Player> {
        let snap = self.snapshot.as_ref()?;
        snap.roster.get(self.selected_index(SectionId::MyTeam))
    }

    /// The waiver player under the cursor, if any.
    pub fn selected_waiver_player(&self) -> Option<&Player> {
        let snap = self.snapshot.as_ref()?;
        snap.waivers
            .players
            .get(self.selected_index(SectionId::WaiverWire))
    }

    /// The league team under the cursor, if any.
    pub fn selected_team(&self) -> Option<&Team> {
        let snap = self.snapshot.as_ref()?;
        snap.teams.get(self.selected_index(SectionId::LeagueHub))
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete dashboard frame.
fn render_frame(frame: &mut Frame, state: &ViewState) {
    let Some(snapshot) = &state.snapshot else {
        let waiting = Paragraph::new("Loading league data...")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(waiting, frame.area());
        return;
    };

    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, snapshot);

    match snapshot.section {
        SectionId::MyTeam => widgets::roster::render(frame, layout.main_panel, state, snapshot),
        SectionId::Matchup => widgets::matchup::render(frame, layout.main_panel, snapshot),
        SectionId::LeagueHub => {
            widgets::league_hub::render(frame, layout.main_panel, state, snapshot)
        }
        SectionId::Schedule => widgets::schedule::render(frame, layout.main_panel, state, snapshot),
        SectionId::WaiverWire => {
            widgets::waivers::render(frame, layout.main_panel, state, snapshot)
        }
        SectionId::TradeArchitect => {
            widgets::trade::render(frame, layout.main_panel, snapshot)
        }
        SectionId::AiCoach => widgets::coach::render(frame, layout.main_panel, state, snapshot),
        SectionId::Settings => {
            widgets::settings::render(frame, layout.main_panel, state, snapshot)
        }
    }

    widgets::status_line::render(frame, layout.status_line, snapshot);
    widgets::help_bar::render(frame, layout.help_bar, state, snapshot);

    if state.confirm_quit {
        widgets::quit_confirm::render(frame, frame.area());
    }
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// 1. Initializes the terminal (raw mode, alternate screen).
/// 2. Installs a panic hook to restore the terminal on crash.
/// 3. Runs an async select loop over snapshots, keyboard input, and render
///    ticks.
/// 4. Restores the terminal on clean exit.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiSnapshot>,
    cmd_tx: mpsc::Sender<UserCommand>,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    // Chain our restore hook before the original so a panic anywhere leaves
    // the terminal usable.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::default();
    let mut event_stream = EventStream::new();

    // ~30fps render interval
    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            snapshot = ui_rx.recv() => {
                match snapshot {
                    Some(snapshot) => {
                        view_state.apply_snapshot(snapshot);
                    }
                    None => {
                        // Channel closed: app is shutting down
                        break;
                    }
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            let quitting = cmd == UserCommand::Quit;
                            let _ = cmd_tx.send(cmd).await;
                            if quitting {
                                break;
                            }
                        }
                    }
                    Some(Ok(_)) => {
                        // Mouse and resize events are ignored
                    }
                    Some(Err(_)) | None => {
                        break;
                    }
                }
            }

            _ = render_tick.tick() => {
                terminal.draw(|frame| render_frame(frame, &view_state))?;
            }
        }
    }

    ratatui::restore();

    Ok(())
}

// ---------------------------------------------------------------------------
// Test fixtures
// ---------------------------------------------------------------------------


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
