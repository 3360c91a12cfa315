use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::ScoringError;

/// Number of personality categories on the Enneagram circle.
pub const CATEGORY_COUNT: u8 = 9;

/// One of the nine personality categories, arranged on a fixed cycle
/// (1 through 9, where 1 and 9 are neighbours).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(u8);

impl Category {
    /// Validate a raw category number from the item bank.
    pub fn new(n: u8) -> Result<Self, ScoringError> {
        if (1..=CATEGORY_COUNT).contains(&n) {
            Ok(Category(n))
        } else {
            Err(ScoringError::InvalidCategory(n))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Predecessor on the cycle: 1 wraps to 9.
    pub fn predecessor(self) -> Category {
        if self.0 == 1 {
            Category(CATEGORY_COUNT)
        } else {
            Category(self.0 - 1)
        }
    }

    /// Successor on the cycle: 9 wraps to 1.
    pub fn successor(self) -> Category {
        if self.0 == CATEGORY_COUNT {
            Category(1)
        } else {
            Category(self.0 + 1)
        }
    }

    /// True if `other` sits directly next to `self` on the cycle.
    pub fn is_adjacent_to(self, other: Category) -> bool {
        other == self.predecessor() || other == self.successor()
    }

    /// All nine categories in ascending order.
    pub fn all() -> impl Iterator<Item = Category> {
        (1..=CATEGORY_COUNT).map(Category)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Accumulated score per category. A category no item contributed to is
/// absent, not zero. BTreeMap keeps iteration in ascending category order,
/// which is what makes the lowest-id tie-break deterministic.
pub type ScoreMap = BTreeMap<Category, u32>;

/// The resolved outcome of a completed response set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// Category with the highest accumulated score.
    pub dominant: Category,
    /// Higher-scoring of the two categories adjacent to the dominant.
    pub wing: Category,
    /// How clearly the dominant outscored the wing, clamped to 0..=100.
    pub confidence: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_full_range() {
        for n in 1..=9 {
            assert!(Category::new(n).is_ok());
        }
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert_eq!(Category::new(0), Err(ScoringError::InvalidCategory(0)));
        assert_eq!(Category::new(10), Err(ScoringError::InvalidCategory(10)));
    }

    #[test]
    fn test_predecessor_wraps() {
        let one = Category::new(1).unwrap();
        assert_eq!(one.predecessor().get(), 9);
        let five = Category::new(5).unwrap();
        assert_eq!(five.predecessor().get(), 4);
    }

    #[test]
    fn test_successor_wraps() {
        let nine = Category::new(9).unwrap();
        assert_eq!(nine.successor().get(), 1);
        let five = Category::new(5).unwrap();
        assert_eq!(five.successor().get(), 6);
    }

    #[test]
    fn test_adjacency_is_symmetric() {
        for a in Category::all() {
            for b in Category::all() {
                assert_eq!(a.is_adjacent_to(b), b.is_adjacent_to(a));
            }
        }
    }

    #[test]
    fn test_boundary_adjacency() {
        let one = Category::new(1).unwrap();
        let nine = Category::new(9).unwrap();
        assert!(one.is_adjacent_to(nine));
        assert!(nine.is_adjacent_to(one));
        assert!(!one.is_adjacent_to(Category::new(5).unwrap()));
    }
}
