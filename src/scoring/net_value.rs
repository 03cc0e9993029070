// Net value aggregation: one ranking scalar per player.

use std::cmp::Ordering;

use crate::league::player::Player;

/// Threshold above which a waiver pickup is flagged as high impact.
pub const HIGH_IMPACT_THRESHOLD: f64 = 4.0;

/// Sum a player's nine standardized category scores into a single scalar.
///
/// No category weighting is applied; every category contributes equally, so
/// the result is deterministic and order-independent. Players without
/// computed standardized scores contribute 0.
pub fn net_value(player: &Player) -> f64 {
    player.cat_values.map(|cv| cv.sum()).unwrap_or(0.0)
}

/// True when the player clears the high-impact recommendation bar.
pub fn is_high_impact(player: &Player) -> bool {
    net_value(player) > HIGH_IMPACT_THRESHOLD
}

/// Order players for a "recommended" listing: descending net value, with
/// unscored players strictly below every scored player regardless of the 0
/// their missing scores would otherwise tie against.
pub fn rank_by_net_value(players: &mut [Player]) {
    players.sort_by(|a, b| match (a.cat_values.is_some(), b.cat_values.is_some()) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => net_value(b)
            .partial_cmp(&net_value(a))
            .unwrap_or(Ordering::Equal),
    });
}
