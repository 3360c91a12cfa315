use super::error::ScoringError;
use super::types::{Category, Outcome, ScoreMap};
use crate::inventory::types::{Item, ResponseSet};

/// Accumulate a response set into per-category scores.
///
/// Each answered item adds its ordinal answer value to the score of the
/// item's category. Items without a response are skipped, not counted as
/// zero, so a partial response set yields a partial map. Fails if any item
/// carries a category outside 1..=9.
pub fn accumulate(responses: &ResponseSet, items: &[Item]) -> Result<ScoreMap, ScoringError> {
    let mut scores = ScoreMap::new();

    for item in items {
        let category = Category::new(item.category)?;
        if let Some(&value) = responses.get(&item.id) {
            *scores.entry(category).or_insert(0) += u32::from(value);
        }
    }

    Ok(scores)
}

/// Resolve the dominant category, its wing and a confidence value from
/// accumulated scores.
///
/// Dominant is the highest-scoring category; ties go to the lowest category
/// id. The wing is the higher-scoring of the dominant's two cyclic
/// neighbours (an absent neighbour counts as 0), with the same tie-break.
/// Confidence is the dominant-over-wing margin times 10, clamped to 100.
pub fn resolve_dominant(scores: &ScoreMap) -> Result<Outcome, ScoringError> {
    // BTreeMap iterates in ascending category order; preferring the earlier
    // key on equal scores keeps the lowest id on ties.
    let (&dominant, &dominant_score) = scores
        .iter()
        .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(a.0)))
        .ok_or(ScoringError::IncompleteData)?;

    let prev = dominant.predecessor();
    let next = dominant.successor();
    let prev_score = scores.get(&prev).copied().unwrap_or(0);
    let next_score = scores.get(&next).copied().unwrap_or(0);

    // Lower category id wins a wing tie.
    let (wing, wing_score) =
        if next_score > prev_score || (next_score == prev_score && next < prev) {
            (next, next_score)
        } else {
            (prev, prev_score)
        };

    let confidence = (dominant_score.saturating_sub(wing_score) * 10).min(100);

    Ok(Outcome {
        dominant,
        wing,
        confidence,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn item(id: u64, category: u8) -> Item {
        Item {
            id,
            text: format!("Statement {}", id),
            category,
            position: id as u32,
        }
    }

    fn cat(n: u8) -> Category {
        Category::new(n).unwrap()
    }

    fn responses(pairs: &[(u64, u8)]) -> ResponseSet {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_accumulate_sums_per_category() {
        let items = vec![item(1, 1), item(2, 1), item(3, 2), item(4, 3)];
        let resp = responses(&[(1, 4), (2, 4), (3, 1), (4, 1)]);

        let scores = accumulate(&resp, &items).unwrap();
        assert_eq!(scores.get(&cat(1)), Some(&8));
        assert_eq!(scores.get(&cat(2)), Some(&1));
        assert_eq!(scores.get(&cat(3)), Some(&1));
    }

    #[test]
    fn test_accumulate_skips_missing_responses() {
        let items = vec![item(1, 1), item(2, 2)];
        let resp = responses(&[(1, 3)]);

        let scores = accumulate(&resp, &items).unwrap();
        assert_eq!(scores.get(&cat(1)), Some(&3));
        // Unanswered category is absent, not zero.
        assert_eq!(scores.get(&cat(2)), None);
    }

    #[test]
    fn test_accumulate_conserves_score_mass() {
        let items = vec![item(1, 1), item(2, 5), item(3, 9), item(4, 5)];
        let resp = responses(&[(1, 2), (2, 3), (3, 4), (4, 1)]);

        let scores = accumulate(&resp, &items).unwrap();
        let total: u32 = scores.values().sum();
        assert_eq!(total, 2 + 3 + 4 + 1);
    }

    #[test]
    fn test_accumulate_rejects_invalid_category() {
        let items = vec![item(1, 1), item(2, 12)];
        let resp = responses(&[(1, 3), (2, 2)]);

        let err = accumulate(&resp, &items).unwrap_err();
        assert_eq!(err, ScoringError::InvalidCategory(12));
    }

    #[test]
    fn test_empty_responses_yield_empty_map() {
        let items = vec![item(1, 1), item(2, 2)];
        let scores = accumulate(&ResponseSet::new(), &items).unwrap();
        assert!(scores.is_empty());
    }

    #[test]
    fn test_resolve_empty_map_is_incomplete_data() {
        let err = resolve_dominant(&ScoreMap::new()).unwrap_err();
        assert_eq!(err, ScoringError::IncompleteData);
    }

    #[test]
    fn test_resolve_picks_maximum() {
        let mut scores = BTreeMap::new();
        scores.insert(cat(1), 8);
        scores.insert(cat(2), 2);
        scores.insert(cat(3), 2);

        let outcome = resolve_dominant(&scores).unwrap();
        assert_eq!(outcome.dominant, cat(1));
    }

    #[test]
    fn test_dominant_tie_goes_to_lowest_id() {
        let mut scores = BTreeMap::new();
        scores.insert(cat(3), 10);
        scores.insert(cat(7), 10);
        scores.insert(cat(5), 4);

        let outcome = resolve_dominant(&scores).unwrap();
        assert_eq!(outcome.dominant, cat(3));
    }

    #[test]
    fn test_wing_is_higher_neighbour() {
        let mut scores = BTreeMap::new();
        scores.insert(cat(4), 20);
        scores.insert(cat(3), 12);
        scores.insert(cat(5), 15);

        let outcome = resolve_dominant(&scores).unwrap();
        assert_eq!(outcome.dominant, cat(4));
        assert_eq!(outcome.wing, cat(5));
    }

    #[test]
    fn test_wing_tie_goes_to_lower_id() {
        let mut scores = BTreeMap::new();
        scores.insert(cat(4), 20);
        scores.insert(cat(3), 12);
        scores.insert(cat(5), 12);

        let outcome = resolve_dominant(&scores).unwrap();
        assert_eq!(outcome.wing, cat(3));
    }

    #[test]
    fn test_wing_wraps_around_the_circle() {
        // Dominant 1: neighbours are 9 and 2.
        let mut scores = BTreeMap::new();
        scores.insert(cat(1), 30);
        scores.insert(cat(9), 14);
        scores.insert(cat(2), 9);

        let outcome = resolve_dominant(&scores).unwrap();
        assert_eq!(outcome.dominant, cat(1));
        assert_eq!(outcome.wing, cat(9));

        // Dominant 9: neighbours are 8 and 1.
        let mut scores = BTreeMap::new();
        scores.insert(cat(9), 30);
        scores.insert(cat(1), 11);
        scores.insert(cat(8), 6);

        let outcome = resolve_dominant(&scores).unwrap();
        assert_eq!(outcome.dominant, cat(9));
        assert_eq!(outcome.wing, cat(1));
    }

    #[test]
    fn test_absent_neighbour_counts_as_zero() {
        // Only categories 5 and 6 scored; dominant 5's neighbour 4 is absent.
        let mut scores = BTreeMap::new();
        scores.insert(cat(5), 18);
        scores.insert(cat(6), 7);

        let outcome = resolve_dominant(&scores).unwrap();
        assert_eq!(outcome.dominant, cat(5));
        assert_eq!(outcome.wing, cat(6));
    }

    #[test]
    fn test_wing_is_always_adjacent() {
        // Sweep every possible dominant with the remaining mass spread
        // unevenly; the wing must always sit next to the dominant.
        for dom in 1..=9u8 {
            let mut scores = BTreeMap::new();
            for c in 1..=9u8 {
                scores.insert(cat(c), if c == dom { 40 } else { u32::from(c) });
            }
            let outcome = resolve_dominant(&scores).unwrap();
            assert_eq!(outcome.dominant, cat(dom));
            assert!(outcome.dominant.is_adjacent_to(outcome.wing));
        }
    }

    #[test]
    fn test_confidence_scales_with_margin() {
        let mut scores = BTreeMap::new();
        scores.insert(cat(2), 15);
        scores.insert(cat(3), 12);

        let outcome = resolve_dominant(&scores).unwrap();
        // (15 - 12) * 10 = 30
        assert_eq!(outcome.confidence, 30);
    }

    #[test]
    fn test_confidence_monotone_in_margin() {
        let mut last = 0;
        for wing_score in (0..=15u32).rev() {
            let mut scores = BTreeMap::new();
            scores.insert(cat(2), 15);
            scores.insert(cat(3), wing_score);
            let outcome = resolve_dominant(&scores).unwrap();
            assert!(outcome.confidence >= last);
            last = outcome.confidence;
        }
    }

    #[test]
    fn test_confidence_clamps_at_100() {
        let mut scores = BTreeMap::new();
        scores.insert(cat(7), 60);
        scores.insert(cat(8), 3);

        let outcome = resolve_dominant(&scores).unwrap();
        assert_eq!(outcome.confidence, 100);
    }

    #[test]
    fn test_confidence_zero_on_tied_wing() {
        let mut scores = BTreeMap::new();
        scores.insert(cat(2), 15);
        scores.insert(cat(1), 15);

        let outcome = resolve_dominant(&scores).unwrap();
        assert_eq!(outcome.dominant, cat(1));
        assert_eq!(outcome.confidence, 0);
    }

    #[test]
    fn test_identical_input_identical_outcome() {
        let items: Vec<Item> = (1..=36).map(|i| item(i, ((i - 1) % 9 + 1) as u8)).collect();
        let resp: ResponseSet = (1..=36).map(|i| (i, ((i % 4) + 1) as u8)).collect();

        let first = resolve_dominant(&accumulate(&resp, &items).unwrap()).unwrap();
        for _ in 0..5 {
            let again = resolve_dominant(&accumulate(&resp, &items).unwrap()).unwrap();
            assert_eq!(first, again);
        }
    }

    #[test]
    fn test_full_scoring_flow() {
        // 2 items per category, category 1 answered "very true" (4),
        // everything else "rarely" (1).
        let items: Vec<Item> = (1..=18).map(|i| item(i, ((i - 1) / 2 + 1) as u8)).collect();
        let resp: ResponseSet = items
            .iter()
            .map(|it| (it.id, if it.category == 1 { 4 } else { 1 }))
            .collect();

        let scores = accumulate(&resp, &items).unwrap();
        assert_eq!(scores.get(&cat(1)), Some(&8));
        assert_eq!(scores.get(&cat(2)), Some(&2));
        assert_eq!(scores.get(&cat(9)), Some(&2));

        let outcome = resolve_dominant(&scores).unwrap();
        assert_eq!(outcome.dominant, cat(1));
        // Neighbours 9 and 2 are tied at 2; the lower id wins.
        assert_eq!(outcome.wing, cat(2));
        assert_eq!(outcome.confidence, 60);
    }
}
