// Category normalizer: z-scores over a player pool with polarity applied.

use crate::league::category::Category;
use crate::league::player::{CatValues, Player};

// ---------------------------------------------------------------------------
// Pool statistics
// ---------------------------------------------------------------------------

/// Mean and standard deviation for a single category across a player pool.
#[derive(Debug, Clone, Copy)]
pub struct PoolStats {
    pub mean: f64,
    pub stdev: f64,
}

/// Threshold below which standard deviation is treated as zero.
const STDEV_EPSILON: f64 = 1e-9;

/// Compute mean and standard deviation for a slice of values.
///
/// Returns `PoolStats { mean: 0.0, stdev: 0.0 }` for an empty slice.
/// Uses the population standard deviation (N denominator), since the pool
/// represents the full relevant player universe rather than a sample.
pub fn pool_stats(values: &[f64]) -> PoolStats {
    if values.is_empty() {
        return PoolStats { mean: 0.0, stdev: 0.0 };
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    PoolStats {
        mean,
        stdev: variance.sqrt(),
    }
}

/// Compute a z-score given a value and pool stats.
///
/// Returns 0.0 if the standard deviation is approximately zero. This is also
/// the documented policy for a pool of size 1, where the deviation is
/// undefined: every score clamps to 0.
pub fn zscore(value: f64, stats: &PoolStats) -> f64 {
    if stats.stdev < STDEV_EPSILON {
        return 0.0;
    }
    (value - stats.mean) / stats.stdev
}

// ---------------------------------------------------------------------------
// Roster normalization
// ---------------------------------------------------------------------------

/// Per-category pool stats for all nine categories, computed once and
/// shared across every player scored against the pool.
#[derive(Debug, Clone)]
pub struct CategoryPoolStats {
    stats: [PoolStats; 9],
}

impl CategoryPoolStats {
    /// Compute pool stats for each category over `pool`.
    pub fn from_pool(pool: &[Player]) -> Self {
        let mut stats = [PoolStats { mean: 0.0, stdev: 0.0 }; 9];
        for (i, cat) in Category::ALL.iter().enumerate() {
            let values: Vec<f64> = pool.iter().map(|p| p.avg_stats.get(*cat)).collect();
            stats[i] = pool_stats(&values);
        }
        CategoryPoolStats { stats }
    }

    pub fn get(&self, cat: Category) -> &PoolStats {
        let idx = Category::ALL.iter().position(|c| *c == cat).unwrap_or(0);
        &self.stats[idx]
    }
}

/// Standardize one player's raw stats against the pool.
///
/// The league polarity convention is applied here: for turnovers the sign is
/// inverted, so a below-average turnover rate yields a positive score and
/// "higher standardized score" always means "better for the team".
pub fn standardize(player: &Player, pool: &CategoryPoolStats) -> CatValues {
    let mut out = CatValues::default();
    for cat in Category::ALL {
        let raw = zscore(player.avg_stats.get(cat), pool.get(cat));
        let signed = if cat.lower_is_better() { -raw } else { raw };
        out.set(cat, signed);
    }
    out
}

/// Standardize every player in `players` against the reference `pool`,
/// filling in `cat_values` in place.
pub fn normalize_roster(players: &mut [Player], pool: &[Player]) {
    let stats = CategoryPoolStats::from_pool(pool);
    for player in players.iter_mut() {
        player.cat_values = Some(standardize(player, &stats));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::league::player::{PlayerStatus, StatLine};

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    fn make_player(id: &str, stats: StatLine) -> Player {
        Player {
            id: id.into(),
            name: format!("Player {id}"),
            team: "TST".into(),
            positions: vec!["PG".into()],
            avg_stats: stats,
            cat_values: None,
            status: PlayerStatus::Healthy,
            protected: false,
        }
    }

    // ---- pool_stats / zscore ----

    #[test]
    fn pool_stats_known_values() {
        // Values: [2, 4, 4, 4, 5, 5, 7, 9] => mean 5.0, population stdev 2.0
        let values = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let stats = pool_stats(&values);
        assert!(approx_eq(stats.mean, 5.0, 1e-10));
        assert!(approx_eq(stats.stdev, 2.0, 1e-10));
    }

    #[test]
    fn pool_stats_empty() {
        let stats = pool_stats(&[]);
        assert!(approx_eq(stats.mean, 0.0, 1e-10));
        assert!(approx_eq(stats.stdev, 0.0, 1e-10));
    }

    #[test]
    fn zscore_known_inputs() {
        let stats = PoolStats { mean: 5.0, stdev: 2.0 };
        assert!(approx_eq(zscore(9.0, &stats), 2.0, 1e-10));
        assert!(approx_eq(zscore(1.0, &stats), -2.0, 1e-10));
        assert!(approx_eq(zscore(5.0, &stats), 0.0, 1e-10));
    }

    #[test]
    fn zscore_zero_stdev_returns_zero() {
        let stats = PoolStats { mean: 42.0, stdev: 0.0 };
        assert!(approx_eq(zscore(100.0, &stats), 0.0, 1e-10));
    }

    // ---- polarity ----

    #[test]
    fn turnovers_sign_is_inverted() {
        // Low-turnover player should come out positive in TO, high negative.
        let pool = vec![
            make_player("careful", StatLine { to: 1.0, ..Default::default() }),
            make_player("average", StatLine { to: 2.5, ..Default::default() }),
            make_player("sloppy", StatLine { to: 4.0, ..Default::default() }),
        ];
        let stats = CategoryPoolStats::from_pool(&pool);

        let careful = standardize(&pool[0], &stats);
        let sloppy = standardize(&pool[2], &stats);
        assert!(careful.to > 0.0, "low turnovers must score positive");
        assert!(sloppy.to < 0.0, "high turnovers must score negative");
    }

    #[test]
    fn counting_stats_keep_their_sign() {
        let pool = vec![
            make_player("star", StatLine { pts: 30.0, ..Default::default() }),
            make_player("bench", StatLine { pts: 6.0, ..Default::default() }),
        ];
        let stats = CategoryPoolStats::from_pool(&pool);
        assert!(standardize(&pool[0], &stats).pts > 0.0);
        assert!(standardize(&pool[1], &stats).pts < 0.0);
    }

    // ---- degenerate pools ----

    #[test]
    fn pool_of_one_clamps_every_score_to_zero() {
        let pool = vec![make_player(
            "solo",
            StatLine { pts: 25.0, reb: 10.0, to: 3.0, ..Default::default() },
        )];
        let stats = CategoryPoolStats::from_pool(&pool);
        let values = standardize(&pool[0], &stats);
        for cat in Category::ALL {
            assert!(
                approx_eq(values.get(cat), 0.0, 1e-10),
                "{} should clamp to 0 for a single-player pool",
                cat.label()
            );
        }
    }

    #[test]
    fn identical_players_all_score_zero() {
        let stats_line = StatLine { pts: 20.0, reb: 8.0, ast: 5.0, to: 2.0, ..Default::default() };
        let pool: Vec<Player> = (0..4)
            .map(|i| make_player(&format!("clone{i}"), stats_line))
            .collect();
        let mut players = pool.clone();
        normalize_roster(&mut players, &pool);
        for p in &players {
            assert!(approx_eq(p.cat_values.unwrap().sum(), 0.0, 1e-10));
        }
    }

    #[test]
    fn normalize_roster_fills_cat_values() {
        let pool = vec![
            make_player("a", StatLine { pts: 30.0, to: 1.5, ..Default::default() }),
            make_player("b", StatLine { pts: 10.0, to: 3.5, ..Default::default() }),
        ];
        let mut players = pool.clone();
        normalize_roster(&mut players, &pool);
        assert!(players.iter().all(|p| p.cat_values.is_some()));
        // Player a: more points (positive) and fewer turnovers (positive).
        let a = players[0].cat_values.unwrap();
        assert!(a.pts > 0.0 && a.to > 0.0);
    }
}
