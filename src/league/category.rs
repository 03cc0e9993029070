// The nine scoring categories and their polarity metadata.
//
// Polarity lives here and nowhere else: the normalizer, the net-value
// aggregator, the win-probability heuristic, and the trade-delta calculator
// all consult `lower_is_better()` instead of re-deriving the turnovers
// special case at each call site.

use serde::{Deserialize, Serialize};

/// A head-to-head scoring category in a standard 9-cat league.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Pts,
    Reb,
    Ast,
    Stl,
    Blk,
    Fgp,
    Ftp,
    Tpm,
    To,
}

impl Category {
    /// All nine categories in display order.
    pub const ALL: [Category; 9] = [
        Category::Pts,
        Category::Reb,
        Category::Ast,
        Category::Stl,
        Category::Blk,
        Category::Tpm,
        Category::Fgp,
        Category::Ftp,
        Category::To,
    ];

    /// Scoreboard label, e.g. `3PM` for three-pointers made.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Pts => "PTS",
            Category::Reb => "REB",
            Category::Ast => "AST",
            Category::Stl => "STL",
            Category::Blk => "BLK",
            Category::Fgp => "FG%",
            Category::Ftp => "FT%",
            Category::Tpm => "3PM",
            Category::To => "TO",
        }
    }

    /// True when a lower raw value wins the category. Turnovers only.
    pub fn lower_is_better(&self) -> bool {
        matches!(self, Category::To)
    }

    /// True for percentage categories (rendered with a `%` suffix).
    pub fn is_percentage(&self) -> bool {
        matches!(self, Category::Fgp | Category::Ftp)
    }

    /// Parse a scoreboard label back to a category.
    pub fn from_label(label: &str) -> Option<Category> {
        Category::ALL.iter().copied().find(|c| c.label() == label)
    }
}
