use campuscompass::shared::fuzzy;

#[test]
fn fuzzy_empty_vs_empty() {
    let dist = fuzzy::distance("", "");
    assert_eq!(dist, 0);
}

#[test]
fn fuzzy_completely_different() {
    let dist = fuzzy::distance("kitten", "orange");
    assert_eq!(dist, 6);
}

#[test]
fn fuzzy_substitution() {
    let dist = fuzzy::distance("cat", "cut");
    assert_eq!(dist, 1);
}

#[test]
fn fuzzy_insertion() {
    let dist = fuzzy::distance("heimat", "heimatt");
    assert_eq!(dist, 1);
}

#[test]
fn fuzzy_contained_token_scores_below_prefix() {
    let contained = fuzzy::score("postma", "ferdinandpostma");
    let prefix = fuzzy::score("ferdi", "ferdinand postma");
    assert_eq!(contained, 0.9);
    assert!(prefix > contained);
}

#[test]
fn fuzzy_typo_still_scores_high() {
    let score = fuzzy::score("enginering", "faculty of engineering");
    assert!(score > 0.9 && score < 1.0);
}

#[test]
fn fuzzy_score_averages_tokens() {
    let score = fuzzy::score("dining zzzz", "main dining hall");
    assert!(score > 0.4 && score < 0.75);
}
