use serde::{Deserialize, Serialize};

use super::state::Gauges;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthStage {
    Seed,
    Sprout,
    Growing,
    Blooming,
}

impl GrowthStage {
    pub fn classify(growth: f64) -> Self {
        if growth < 25.0 {
            Self::Seed
        } else if growth < 50.0 {
            Self::Sprout
        } else if growth < 75.0 {
            Self::Growing
        } else {
            Self::Blooming
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Seed => "Seed",
            Self::Sprout => "Sprout",
            Self::Growing => "Growing",
            Self::Blooming => "Blooming",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Self::Seed => "🌰",
            Self::Sprout => "🌱",
            Self::Growing => "🌿",
            Self::Blooming => "🌸",
        }
    }
}

impl std::fmt::Display for GrowthStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.label(), self.glyph())
    }
}

/// Coarse wellbeing summary, checked in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PetCondition {
    Unhealthy,
    Thriving,
    Content,
}

impl PetCondition {
    const UNHEALTHY_BELOW: f64 = 30.0;
    const THRIVING_ABOVE: f64 = 70.0;

    pub fn assess(gauges: &Gauges) -> Self {
        if gauges.health < Self::UNHEALTHY_BELOW {
            Self::Unhealthy
        } else if gauges.happiness > Self::THRIVING_ABOVE {
            Self::Thriving
        } else {
            Self::Content
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_boundaries() {
        assert_eq!(GrowthStage::classify(0.0), GrowthStage::Seed);
        assert_eq!(GrowthStage::classify(24.9), GrowthStage::Seed);
        assert_eq!(GrowthStage::classify(25.0), GrowthStage::Sprout);
        assert_eq!(GrowthStage::classify(49.9), GrowthStage::Sprout);
        assert_eq!(GrowthStage::classify(50.0), GrowthStage::Growing);
        assert_eq!(GrowthStage::classify(74.99), GrowthStage::Growing);
        assert_eq!(GrowthStage::classify(75.0), GrowthStage::Blooming);
        assert_eq!(GrowthStage::classify(100.0), GrowthStage::Blooming);
    }

    #[test]
    fn stage_display_includes_glyph() {
        assert_eq!(GrowthStage::Sprout.to_string(), "Sprout 🌱");
        assert_eq!(GrowthStage::Blooming.to_string(), "Blooming 🌸");
    }

    #[test]
    fn unhealthy_wins_over_happy() {
        let gauges = Gauges {
            health: 29.0,
            happiness: 90.0,
            ..Gauges::INITIAL
        };
        assert_eq!(PetCondition::assess(&gauges), PetCondition::Unhealthy);
    }

    #[test]
    fn condition_thresholds_are_strict() {
        let at_edges = Gauges {
            health: 30.0,
            happiness: 70.0,
            ..Gauges::INITIAL
        };
        assert_eq!(PetCondition::assess(&at_edges), PetCondition::Content);

        let happy = Gauges {
            happiness: 70.5,
            ..at_edges
        };
        assert_eq!(PetCondition::assess(&happy), PetCondition::Thriving);
    }
}
