// Weekly head-to-head matchup state.

use serde::{Deserialize, Serialize};

use crate::league::category::Category;

/// One category row of the weekly matchup: cumulative totals so far plus
/// projected end-of-week totals for both sides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchupCategory {
    pub category: Category,
    pub mine: f64,
    pub opp: f64,
    pub projected_mine: f64,
    pub projected_opp: f64,
    pub lower_is_better: bool,
}

/// Per-side schedule volume for the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamesVolume {
    pub played_mine: u32,
    pub played_opp: u32,
    pub remaining_mine: u32,
    pub remaining_opp: u32,
}

/// The current week's matchup snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matchup {
    pub my_team: String,
    pub opp_team: String,
    pub score_mine: u32,
    pub score_opp: u32,
    pub categories: Vec<MatchupCategory>,
    pub games: GamesVolume,
}

impl MatchupCategory {
    /// Build a row from a category and its four totals, taking the polarity
    /// flag from the category metadata table.
    pub fn new(category: Category, mine: f64, opp: f64, projected_mine: f64, projected_opp: f64) -> Self {
        MatchupCategory {
            category,
            mine,
            opp,
            projected_mine,
            projected_opp,
            lower_is_better: category.lower_is_better(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_polarity_comes_from_the_category_table() {
        let to = MatchupCategory::new(Category::To, 85.0, 72.0, 115.0, 98.0);
        assert!(to.lower_is_better);
        let pts = MatchupCategory::new(Category::Pts, 840.0, 790.0, 1120.0, 1050.0);
        assert!(!pts.lower_is_better);
    }
}
