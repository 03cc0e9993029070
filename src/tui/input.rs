// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages sent to the
// app orchestrator, or into local ViewState mutations (selection movement,
// scroll, search input editing).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::protocol::{SectionId, UserCommand};

use super::{LeagueForm, SettingsInput, ViewState};

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to the
/// app orchestrator (section switches, AI triggers, Quit). Returns `None`
/// when the key press was handled locally by mutating `ViewState` (selection
/// movement, scrolling).
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Only process key press events. On Windows, crossterm emits both
    // Press and Release events for each physical keypress; ignoring
    // non-Press events prevents double-processing.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C always quits immediately regardless of mode (escape hatch)
    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    // Quit confirmation mode: only y/q confirm, n/Esc cancel, everything else blocked
    if view_state.confirm_quit {
        return handle_confirm_quit(key_event, view_state);
    }

    // Settings text entry: the league form or the sign-in token line
    if view_state.settings_input.is_some() {
        return handle_settings_input(key_event, view_state);
    }

    // Search mode: capture printable characters, forward the query per edit
    if view_state.search_mode {
        return handle_search_mode(key_event, view_state);
    }

    let section = view_state.section();

    // Normal mode key dispatch
    match key_event.code {
        // Section switching
        KeyCode::Char(c @ '1'..='8') => {
            SectionId::from_key(c).map(UserCommand::SwitchSection)
        }

        // Selection / scrolling
        KeyCode::Up | KeyCode::Char('k') => {
            if section == SectionId::AiCoach {
                scroll_up(view_state, "coach", 1);
            } else {
                view_state.move_selection(-1);
            }
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if section == SectionId::AiCoach {
                scroll_down(view_state, "coach", 1);
            } else {
                view_state.move_selection(1);
            }
            None
        }
        KeyCode::PageUp => {
            if section == SectionId::AiCoach {
                scroll_up(view_state, "coach", page_size());
            } else {
                view_state.move_selection(-(page_size() as isize));
            }
            None
        }
        KeyCode::PageDown => {
            if section == SectionId::AiCoach {
                scroll_down(view_state, "coach", page_size());
            } else {
                view_state.move_selection(page_size() as isize);
            }
            None
        }

        // Search entry: only available on the waiver wire where it is relevant
        KeyCode::Char('/') => {
            if section == SectionId::WaiverWire {
                view_state.search_mode = true;
            }
            None
        }

        // Escape: clear the waiver search, otherwise no-op
        KeyCode::Esc => {
            if section == SectionId::WaiverWire && !view_state.search_input.is_empty() {
                view_state.search_input.clear();
                Some(UserCommand::WaiverSearch(String::new()))
            } else {
                None
            }
        }

        // Waiver sorting
        KeyCode::Char('s') if section == SectionId::WaiverWire => Some(UserCommand::CycleSort),
        KeyCode::Char('o') if section == SectionId::WaiverWire => {
            Some(UserCommand::FlipSortOrder)
        }

        // Roster actions
        KeyCode::Char('p') if section == SectionId::MyTeam => view_state
            .selected_roster_player()
            .map(|p| UserCommand::ToggleProtect { player_id: p.id.clone() }),
        KeyCode::Char('g') if section == SectionId::MyTeam => view_state
            .selected_roster_player()
            .map(|p| UserCommand::SelectGive { player_id: p.id.clone() }),
        KeyCode::Char('r') if section == SectionId::WaiverWire => view_state
            .selected_waiver_player()
            .map(|p| UserCommand::SelectReceive { player_id: p.id.clone() }),

        // Player deep dive on the highlighted row
        KeyCode::Char('d') => match section {
            SectionId::MyTeam => view_state
                .selected_roster_player()
                .map(|p| UserCommand::RequestDeepDive { player_id: p.id.clone() }),
            SectionId::WaiverWire => view_state
                .selected_waiver_player()
                .map(|p| UserCommand::RequestDeepDive { player_id: p.id.clone() }),
            _ => None,
        },

        // Settings: league edit form, sign-in token entry, sign-out
        KeyCode::Char('e') if section == SectionId::Settings => {
            let form = LeagueForm::from_connection(
                view_state
                    .snapshot
                    .as_ref()
                    .and_then(|s| s.session.connection.as_ref()),
            );
            view_state.settings_input = Some(SettingsInput::League(form));
            None
        }
        KeyCode::Char('i') if section == SectionId::Settings => {
            view_state.settings_input = Some(SettingsInput::Token(String::new()));
            None
        }
        KeyCode::Char('x') if section == SectionId::Settings => Some(UserCommand::SignOut),

        // Section-specific AI triggers
        KeyCode::Char('a') | KeyCode::Enter => section_trigger(key_event.code, view_state),

        // Quit: enter confirmation mode instead of quitting immediately
        KeyCode::Char('q') => {
            view_state.confirm_quit = true;
            None
        }

        _ => None,
    }
}

/// The primary action for the active section.
///
/// `a` requests the section's advisory call; on the Trade Architect, Enter
/// asks for a verdict on the picked swap while `a` scouts the league for
/// new suggestions.
fn section_trigger(code: KeyCode, view_state: &ViewState) -> Option<UserCommand> {
    match view_state.section() {
        SectionId::MyTeam | SectionId::AiCoach => Some(UserCommand::RequestInsights),
        SectionId::Matchup => Some(UserCommand::RequestMatchupStrategy),
        SectionId::LeagueHub => view_state
            .selected_team()
            .map(|t| UserCommand::RequestOpponentScout { team_id: t.id.clone() }),
        SectionId::WaiverWire => view_state
            .selected_waiver_player()
            .map(|p| UserCommand::RequestDeepDive { player_id: p.id.clone() }),
        SectionId::TradeArchitect => {
            if code == KeyCode::Enter {
                Some(UserCommand::RequestTradeVerdict)
            } else {
                Some(UserCommand::RequestTradeScout)
            }
        }
        SectionId::Settings => Some(UserCommand::SyncLeague),
        SectionId::Schedule => None,
    }
}

/// Handle key events while in quit confirmation mode.
///
/// In quit confirmation mode:
/// - `y` or `q` confirms quit (sends UserCommand::Quit)
/// - `n` or `Esc` cancels (returns to normal mode)
/// - All other keys are blocked (no-op)
fn handle_confirm_quit(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('q') | KeyCode::Char('Q') => {
            Some(UserCommand::Quit)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view_state.confirm_quit = false;
            None
        }
        _ => None, // Block all other input
    }
}

/// Handle key events while a Settings text entry is open.
///
/// League form:
/// - Tab/Down move to the next field, BackTab/Up to the previous
/// - Space flips the private toggle when it is focused
/// - Enter closes the form and saves (ignored while the ids are blank)
/// - Esc discards the edit
///
/// Token line: printable characters build the token, Enter signs in,
/// Esc cancels.
fn handle_settings_input(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match view_state.settings_input.take() {
        Some(SettingsInput::League(mut form)) => match key_event.code {
            KeyCode::Esc => None,
            KeyCode::Enter => {
                let conn = form.to_connection();
                if conn.league_id.is_empty() || conn.season_id.is_empty() {
                    // Stay open until both ids are filled in.
                    view_state.settings_input = Some(SettingsInput::League(form));
                    None
                } else {
                    Some(UserCommand::SaveLeague(conn))
                }
            }
            code => {
                match code {
                    KeyCode::Tab | KeyCode::Down => form.focus_next(),
                    KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
                    KeyCode::Char(' ') if form.is_toggle_focused() => {
                        form.is_private = !form.is_private;
                    }
                    KeyCode::Char(c) => {
                        if let Some(field) = form.field_mut() {
                            field.push(c);
                        }
                    }
                    KeyCode::Backspace => {
                        if let Some(field) = form.field_mut() {
                            field.pop();
                        }
                    }
                    _ => {}
                }
                view_state.settings_input = Some(SettingsInput::League(form));
                None
            }
        },
        Some(SettingsInput::Token(mut token)) => match key_event.code {
            KeyCode::Esc => None,
            KeyCode::Enter => {
                let token = token.trim().to_string();
                if token.is_empty() {
                    None
                } else {
                    Some(UserCommand::SignIn { token })
                }
            }
            code => {
                match code {
                    KeyCode::Char(c) => token.push(c),
                    KeyCode::Backspace => {
                        token.pop();
                    }
                    _ => {}
                }
                view_state.settings_input = Some(SettingsInput::Token(token));
                None
            }
        },
        None => None,
    }
}

/// Handle key events while in waiver search mode.
///
/// Every edit forwards the full query so the filtered list updates live:
/// - Printable characters are appended to the query
/// - Backspace removes the last character
/// - Enter exits search mode keeping the query
/// - Esc exits search mode and clears the query
fn handle_search_mode(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Esc => {
            view_state.search_mode = false;
            view_state.search_input.clear();
            Some(UserCommand::WaiverSearch(String::new()))
        }
        KeyCode::Enter => {
            view_state.search_mode = false;
            None
        }
        KeyCode::Backspace => {
            view_state.search_input.pop();
            Some(UserCommand::WaiverSearch(view_state.search_input.clone()))
        }
        KeyCode::Char(c) => {
            view_state.search_input.push(c);
            Some(UserCommand::WaiverSearch(view_state.search_input.clone()))
        }
        _ => None,
    }
}

/// Scroll a text panel up by the given number of lines.
fn scroll_up(view_state: &mut ViewState, key: &str, lines: usize) {
    let offset = view_state.scroll_offset.entry(key.to_string()).or_insert(0);
    *offset = offset.saturating_sub(lines);
}

/// Scroll a text panel down by the given number of lines.
fn scroll_down(view_state: &mut ViewState, key: &str, lines: usize) {
    let offset = view_state.scroll_offset.entry(key.to_string()).or_insert(0);
    *offset = offset.saturating_add(lines);
}

/// Page size for PageUp/PageDown movement.
fn page_size() -> usize {
    10
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
