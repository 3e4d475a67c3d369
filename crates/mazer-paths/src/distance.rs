use std::fmt;
use std::str::FromStr;

use mazer_core::Pos;

/// Manhattan (L1) distance between two positions.
#[inline]
pub fn manhattan(a: Pos, b: Pos) -> i32 {
    (a.row - b.row).abs() + (a.col - b.col).abs()
}

/// Signed row-plus-column offset from `from` to `to`.
///
/// Equal to [`manhattan`] while `from` is above and left of `to`, negative
/// past it on either axis, so it is not a lower bound on the remaining cost.
#[inline]
pub fn signed_offset(from: Pos, to: Pos) -> i32 {
    (to.row - from.row) + (to.col - from.col)
}

/// Remaining-cost estimate used by A*.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Heuristic {
    /// Absolute Manhattan distance. Admissible on a 4-connected grid.
    #[default]
    Manhattan,
    /// [`signed_offset`]. Kept for comparison with older runs; it can go
    /// negative for cells beyond the goal.
    Signed,
}

impl Heuristic {
    /// Estimate the cost of reaching `goal` from `p`.
    #[inline]
    pub fn estimate(self, p: Pos, goal: Pos) -> i32 {
        match self {
            Heuristic::Manhattan => manhattan(p, goal),
            Heuristic::Signed => signed_offset(p, goal),
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Heuristic::Manhattan => f.write_str("manhattan"),
            Heuristic::Signed => f.write_str("signed"),
        }
    }
}

impl FromStr for Heuristic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "manhattan" | "abs" => Ok(Heuristic::Manhattan),
            "signed" => Ok(Heuristic::Signed),
            other => Err(format!("unknown heuristic '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_is_symmetric() {
        let a = Pos::new(1, 5);
        let b = Pos::new(4, 2);
        assert_eq!(manhattan(a, b), 6);
        assert_eq!(manhattan(b, a), 6);
        assert_eq!(manhattan(a, a), 0);
    }

    #[test]
    fn signed_goes_negative_past_goal() {
        let goal = Pos::new(2, 2);
        assert_eq!(signed_offset(Pos::new(0, 0), goal), 4);
        assert_eq!(signed_offset(Pos::new(2, 4), goal), -2);
        assert_eq!(Heuristic::Manhattan.estimate(Pos::new(2, 4), goal), 2);
    }

    #[test]
    fn parse_heuristic() {
        assert_eq!("Manhattan".parse::<Heuristic>(), Ok(Heuristic::Manhattan));
        assert_eq!("signed".parse::<Heuristic>(), Ok(Heuristic::Signed));
        assert_eq!(
            "euclid".parse::<Heuristic>(),
            Err("unknown heuristic 'euclid'".to_string())
        );
    }
}
