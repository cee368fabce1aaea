use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One of the two teams in a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Side::Home => "home",
            Side::Away => "away",
        }
    }
}

/// Running score, one non-negative tally per side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}

impl Score {
    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Home => self.home,
            Side::Away => self.away,
        }
    }

    pub fn add(&mut self, side: Side, points: u32) {
        match side {
            Side::Home => self.home += points,
            Side::Away => self.away += points,
        }
    }

    /// Points ahead (positive) or behind (negative) from `side`'s point of view.
    pub fn margin(&self, side: Side) -> i32 {
        self.get(side) as i32 - self.get(side.other()) as i32
    }

    pub fn is_tied(&self) -> bool {
        self.home == self.away
    }

    pub fn leader(&self) -> Option<Side> {
        match self.home.cmp(&self.away) {
            std::cmp::Ordering::Greater => Some(Side::Home),
            std::cmp::Ordering::Less => Some(Side::Away),
            std::cmp::Ordering::Equal => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_margin_is_symmetric() {
        let mut score = Score::default();
        score.add(Side::Home, 7);
        score.add(Side::Away, 17);
        assert_eq!(score.margin(Side::Away), 10);
        assert_eq!(score.margin(Side::Home), -10);
        assert_eq!(score.leader(), Some(Side::Away));
    }

    #[test]
    fn test_other_side() {
        assert_eq!(Side::Home.other(), Side::Away);
        assert_eq!(Side::Away.other().other(), Side::Away);
    }
}
