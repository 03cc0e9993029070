// Player model: identity, raw per-game averages, standardized category
// scores, availability status, and the user-set protected flag.

use serde::{Deserialize, Serialize};

use crate::league::category::Category;

// ---------------------------------------------------------------------------
// Stat tuples
// ---------------------------------------------------------------------------

/// Raw per-game averages across the nine scoring categories.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StatLine {
    pub pts: f64,
    pub reb: f64,
    pub ast: f64,
    pub stl: f64,
    pub blk: f64,
    pub fgp: f64,
    pub ftp: f64,
    pub tpm: f64,
    pub to: f64,
}

impl StatLine {
    pub fn get(&self, cat: Category) -> f64 {
        match cat {
            Category::Pts => self.pts,
            Category::Reb => self.reb,
            Category::Ast => self.ast,
            Category::Stl => self.stl,
            Category::Blk => self.blk,
            Category::Fgp => self.fgp,
            Category::Ftp => self.ftp,
            Category::Tpm => self.tpm,
            Category::To => self.to,
        }
    }
}

/// Standardized (z-score style) per-category values. One entry per raw-stat
/// category; sign convention is "positive = better for the team" in every
/// category, including turnovers.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CatValues {
    pub pts: f64,
    pub reb: f64,
    pub ast: f64,
    pub stl: f64,
    pub blk: f64,
    pub fgp: f64,
    pub ftp: f64,
    pub tpm: f64,
    pub to: f64,
}

impl CatValues {
    pub fn get(&self, cat: Category) -> f64 {
        match cat {
            Category::Pts => self.pts,
            Category::Reb => self.reb,
            Category::Ast => self.ast,
            Category::Stl => self.stl,
            Category::Blk => self.blk,
            Category::Fgp => self.fgp,
            Category::Ftp => self.ftp,
            Category::Tpm => self.tpm,
            Category::To => self.to,
        }
    }

    pub fn set(&mut self, cat: Category, value: f64) {
        match cat {
            Category::Pts => self.pts = value,
            Category::Reb => self.reb = value,
            Category::Ast => self.ast = value,
            Category::Stl => self.stl = value,
            Category::Blk => self.blk = value,
            Category::Fgp => self.fgp = value,
            Category::Ftp => self.ftp = value,
            Category::Tpm => self.tpm = value,
            Category::To => self.to = value,
        }
    }

    /// Sum across all nine categories.
    pub fn sum(&self) -> f64 {
        Category::ALL.iter().map(|c| self.get(*c)).sum()
    }
}

// ---------------------------------------------------------------------------
// Availability status
// ---------------------------------------------------------------------------

/// Injury-report availability status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerStatus {
    Healthy,
    Questionable,
    Out,
    #[serde(rename = "Day-to-Day")]
    DayToDay,
}

impl PlayerStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PlayerStatus::Healthy => "Healthy",
            PlayerStatus::Questionable => "Questionable",
            PlayerStatus::Out => "Out",
            PlayerStatus::DayToDay => "Day-to-Day",
        }
    }

    pub fn from_label(label: &str) -> Option<PlayerStatus> {
        match label {
            "Healthy" => Some(PlayerStatus::Healthy),
            "Questionable" => Some(PlayerStatus::Questionable),
            "Out" => Some(PlayerStatus::Out),
            "Day-to-Day" => Some(PlayerStatus::DayToDay),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// A rosterable player.
///
/// `cat_values` may be absent for players whose standardized scores have not
/// been computed; such players carry a net value of 0 and rank below scored
/// players in any recommendation ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub team: String,
    pub positions: Vec<String>,
    pub avg_stats: StatLine,
    pub cat_values: Option<CatValues>,
    pub status: PlayerStatus,
    /// User-set flag excluding the player from AI drop suggestions.
    #[serde(default)]
    pub protected: bool,
}

impl Player {
    pub fn positions_str(&self) -> String {
        self.positions.join("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stat_line_get_covers_all_categories() {
        let stats = StatLine {
            pts: 1.0,
            reb: 2.0,
            ast: 3.0,
            stl: 4.0,
            blk: 5.0,
            fgp: 6.0,
            ftp: 7.0,
            tpm: 8.0,
            to: 9.0,
        };
        let values: Vec<f64> = Category::ALL.iter().map(|c| stats.get(*c)).collect();
        // Display order interleaves TPM before the percentages.
        assert_eq!(values, vec![1.0, 2.0, 3.0, 4.0, 5.0, 8.0, 6.0, 7.0, 9.0]);
    }

    #[test]
    fn cat_values_set_then_get() {
        let mut cv = CatValues::default();
        cv.set(Category::To, -1.5);
        assert_eq!(cv.get(Category::To), -1.5);
        assert_eq!(cv.get(Category::Pts), 0.0);
    }

    #[test]
    fn status_serde_uses_display_labels() {
        let json = serde_json::to_string(&PlayerStatus::DayToDay).unwrap();
        assert_eq!(json, "\"Day-to-Day\"");
        let back: PlayerStatus = serde_json::from_str("\"Day-to-Day\"").unwrap();
        assert_eq!(back, PlayerStatus::DayToDay);
    }
}
