// Category scoring engine: normalization, net value, win probability,
// and trade deltas.

pub mod matchup;
pub mod net_value;
pub mod normalize;
pub mod trade;
