use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Hard,
}

/// Display grade of a boost strategy. Has no effect on the calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveQuality {
    #[default]
    Best,
    Great,
    Brilliant,
}

/// One way of boosting through a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoostStrategy {
    pub name: String,
    /// Traversal time of the room when boosted with this strategy.
    pub time: f64,
    /// Offset into the traversal at which the boost is triggered.
    pub boost_time: f64,
    #[serde(default)]
    pub quality: MoveQuality,
}

impl BoostStrategy {
    pub fn new(name: &str, time: f64, boost_time: f64, quality: MoveQuality) -> Self {
        Self {
            name: name.to_string(),
            time,
            boost_time,
            quality,
        }
    }

    /// Time left in the room after the boost trigger.
    pub fn time_after_boost(&self) -> f64 {
        self.time - self.boost_time
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub name: String,
    pub boostless_time: f64,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub boost_strats: Vec<BoostStrategy>,
}

impl Room {
    pub fn new(
        name: &str,
        boostless_time: f64,
        difficulty: Difficulty,
        boost_strats: Vec<BoostStrategy>,
    ) -> Self {
        Self {
            name: name.to_string(),
            boostless_time,
            difficulty,
            boost_strats,
        }
    }

    /// Seconds saved over the boostless traversal by boosting with `strat`.
    pub fn saving(&self, strat: &BoostStrategy) -> f64 {
        self.boostless_time - strat.time
    }
}
