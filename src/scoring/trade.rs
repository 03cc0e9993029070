// Trade impact: per-category statistical swing of a one-for-one swap.

use serde::{Deserialize, Serialize};

use crate::league::category::Category;
use crate::league::player::Player;

/// One row of the trade impact table. Serialized with camelCase keys to
/// match the trade-suggestion wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryImpact {
    pub category: String,
    pub delta: f64,
    pub is_improvement: bool,
}

/// Per-category swing of giving away `give` and receiving `receive`:
/// `receive - give` on raw per-game stats, rounded to two decimals.
/// Purely a subtraction; antisymmetric by construction.
pub fn trade_delta(give: &Player, receive: &Player, cat: Category) -> f64 {
    let diff = receive.avg_stats.get(cat) - give.avg_stats.get(cat);
    (diff * 100.0).round() / 100.0
}

/// Whether a delta improves the category, per the polarity table: turnovers
/// improve on a negative delta, every other category on a positive one.
pub fn is_improvement(cat: Category, delta: f64) -> bool {
    if cat.lower_is_better() {
        delta < 0.0
    } else {
        delta > 0.0
    }
}

/// Full nine-row impact table for a proposed swap.
pub fn trade_impact(give: &Player, receive: &Player) -> Vec<CategoryImpact> {
    Category::ALL
        .iter()
        .map(|cat| {
            let delta = trade_delta(give, receive, *cat);
            CategoryImpact {
                category: cat.label().to_string(),
                delta,
                is_improvement: is_improvement(*cat, delta),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::league::fixtures;

    fn fixture_pair() -> (Player, Player) {
        let roster = fixtures::demo_roster();
        let pool = fixtures::waiver_pool();
        let give = roster.iter().find(|p| p.name == "Jayson Tatum").unwrap().clone();
        let receive = pool.iter().find(|p| p.name == "Daniel Gafford").unwrap().clone();
        (give, receive)
    }

    #[test]
    fn delta_is_receive_minus_give_to_two_decimals() {
        let (give, receive) = fixture_pair();
        // Gafford 11.0 PTS - Tatum 26.9 PTS
        assert_eq!(trade_delta(&give, &receive, Category::Pts), -15.9);
        // Gafford 2.1 BLK - Tatum 0.6 BLK
        assert_eq!(trade_delta(&give, &receive, Category::Blk), 1.5);
    }

    #[test]
    fn antisymmetry() {
        let (give, receive) = fixture_pair();
        for cat in Category::ALL {
            assert_eq!(
                trade_delta(&give, &receive, cat),
                -trade_delta(&receive, &give, cat),
                "antisymmetry violated for {}",
                cat.label()
            );
        }
    }

    #[test]
    fn turnover_improvement_is_a_negative_delta() {
        assert!(is_improvement(Category::To, -0.5));
        assert!(!is_improvement(Category::To, 0.5));
        assert!(is_improvement(Category::Pts, 0.5));
        assert!(!is_improvement(Category::Pts, -0.5));
        // A zero delta improves nothing.
        assert!(!is_improvement(Category::To, 0.0));
        assert!(!is_improvement(Category::Pts, 0.0));
    }

    #[test]
    fn impact_table_covers_every_category_in_display_order() {
        let (give, receive) = fixture_pair();
        let table = trade_impact(&give, &receive);
        let labels: Vec<&str> = table.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(
            labels,
            vec!["PTS", "REB", "AST", "STL", "BLK", "3PM", "FG%", "FT%", "TO"]
        );
        // Tatum 2.5 TO -> Gafford 1.0 TO: delta -1.5, an improvement.
        let to_row = table.iter().find(|r| r.category == "TO").unwrap();
        assert_eq!(to_row.delta, -1.5);
        assert!(to_row.is_improvement);
    }
}
