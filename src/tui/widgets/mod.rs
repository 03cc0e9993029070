// TUI widget modules, one per dashboard zone or section.

pub mod coach;
pub mod help_bar;
pub mod league_hub;
pub mod matchup;
pub mod quit_confirm;
pub mod roster;
pub mod schedule;
pub mod settings;
pub mod status_bar;
pub mod status_line;
pub mod trade;
pub mod waivers;
