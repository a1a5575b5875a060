use std::cmp;

/// Levenshtein edit distance over chars, two rolling rows.
pub fn distance(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0usize; b.len() + 1];
    for (i, ac) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, bc) in b.iter().enumerate() {
            let sub_cost = if ac == bc { 0 } else { 1 };
            current[j + 1] = cmp::min(
                cmp::min(previous[j + 1] + 1, current[j] + 1),
                previous[j] + sub_cost,
            );
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[b.len()]
}

/// Scores a lowercase needle against a lowercase hay in `0.0..=1.0`.
/// Every needle token is matched against its best hay token.
pub fn score(needle: &str, hay: &str) -> f64 {
    let needle_tokens: Vec<_> = needle.split_whitespace().collect();
    let hay_tokens: Vec<_> = hay.split_whitespace().collect();
    if needle_tokens.is_empty() || hay_tokens.is_empty() {
        return 0.0;
    }

    let total: f64 = needle_tokens
        .iter()
        .map(|needle| {
            hay_tokens
                .iter()
                .map(|hay| score_token(needle, hay))
                .fold(0.0, f64::max)
        })
        .sum();
    total / needle_tokens.len() as f64
}

fn score_token(needle: &str, hay: &str) -> f64 {
    if hay.starts_with(needle) {
        return 1.0;
    }
    if hay.contains(needle) {
        return 0.9;
    }
    let dist = distance(needle, hay);
    let longest = cmp::max(needle.chars().count(), hay.chars().count());
    1.0 - dist as f64 / longest as f64
}

#[test]
fn fuzzy_empty_vs_nonempty() {
    assert_eq!(distance("", "abc"), 3);
    assert_eq!(distance("abc", ""), 3);
}

#[test]
fn fuzzy_unicode_distinct() {
    assert_eq!(distance("café", "cafe"), 1);
}

#[test]
fn fuzzy_longer_sequence() {
    assert_eq!(distance("intention", "execution"), 5);
}

#[test]
fn fuzzy_prefix_scores_full() {
    assert_eq!(score("lib", "ferdinand postma library"), 1.0);
}

#[test]
fn fuzzy_no_tokens_scores_zero() {
    assert_eq!(score("", "library"), 0.0);
    assert_eq!(score("library", "   "), 0.0);
}
