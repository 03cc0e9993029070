// Win-probability heuristic for weekly category matchups.
//
// This is a deliberately crude linear estimate, not a statistical model:
// a ~10% relative lead in a category maps to roughly 90% confidence.

use crate::league::matchup::MatchupCategory;

/// Floor and ceiling of the reported probability.
pub const PROB_MIN: u8 = 5;
pub const PROB_MAX: u8 = 95;

/// Estimate the percentage chance that "my" side wins a category, given the
/// projected end-of-week totals for both sides and the category polarity.
///
/// Steps: polarity-aware advantage, relative lead percent over the mean of
/// the two projections, `50 + 4 * lead_percent`, round, clamp to [5, 95].
/// Both projections zero is degenerate (division by zero); the fallback is
/// a coin-flip 50.
pub fn win_probability(proj_mine: f64, proj_opp: f64, lower_is_better: bool) -> u8 {
    let advantage = if lower_is_better {
        proj_opp - proj_mine
    } else {
        proj_mine - proj_opp
    };
    let average = (proj_mine + proj_opp) / 2.0;
    if average == 0.0 {
        return 50;
    }
    let lead_percent = (advantage / average) * 100.0;
    let raw = 50.0 + 4.0 * lead_percent;
    raw.round().clamp(PROB_MIN as f64, PROB_MAX as f64) as u8
}

/// Win probability for a matchup row's projected totals.
pub fn row_probability(row: &MatchupCategory) -> u8 {
    win_probability(row.projected_mine, row.projected_opp, row.lower_is_better)
}

/// Whether "my" side currently leads the category on cumulative totals.
pub fn currently_winning(row: &MatchupCategory) -> bool {
    if row.lower_is_better {
        row.mine < row.opp
    } else {
        row.mine > row.opp
    }
}
