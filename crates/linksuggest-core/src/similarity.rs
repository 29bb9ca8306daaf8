//! Approximate string matching: Levenshtein distance, normalized
//! similarity, and the length-adaptive acceptance threshold.

/// Lowest acceptance threshold, reached by very long keys.
pub const MIN_THRESHOLD: f64 = 0.05;

/// Highest acceptance threshold, used for one and two character keys.
pub const MAX_THRESHOLD: f64 = 0.9;

/// Case-insensitive Levenshtein distance, counted in characters.
///
/// Uses a single DP row sized by the shorter string.
#[must_use]
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };

    if short.is_empty() {
        return long.len();
    }

    let mut row: Vec<usize> = (0..=short.len()).collect();
    for (i, lc) in long.iter().enumerate() {
        let mut diag = row[0];
        row[0] = i + 1;
        for (j, sc) in short.iter().enumerate() {
            let cost = usize::from(lc != sc);
            let next = (row[j + 1] + 1).min(row[j] + 1).min(diag + cost);
            diag = row[j + 1];
            row[j + 1] = next;
        }
    }
    row[short.len()]
}

/// Normalized similarity in `[0, 1]`: one minus the edit distance over the
/// longer length. Two empty strings are identical.
#[must_use]
pub fn similarity(a: &str, b: &str) -> f64 {
    let longest = a.to_lowercase().chars().count().max(b.to_lowercase().chars().count());
    if longest == 0 {
        return 1.0;
    }
    (longest - edit_distance(a, b)) as f64 / longest as f64
}

/// Minimum similarity a query needs to match `key`.
///
/// `clamp(2.5 / log2(len), 0.05, 0.9)`: short keys demand near-exact
/// matches. Keys where the formula is undefined (length 0 or 1) get the
/// upper bound.
#[must_use]
pub fn acceptance_threshold(key: &str) -> f64 {
    let len = key.chars().count();
    if len <= 1 {
        return MAX_THRESHOLD;
    }
    (2.5 / (len as f64).log2()).clamp(MIN_THRESHOLD, MAX_THRESHOLD)
}

/// Score `query` against `key`, returning the similarity only when it
/// clears the key's acceptance threshold.
#[must_use]
pub fn accept(key: &str, query: &str) -> Option<f64> {
    let score = similarity(key, query);
    (score >= acceptance_threshold(key)).then_some(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn edit_distance_matches_known_values() {
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("flaw", "lawn"), 2);
        assert_eq!(edit_distance("", "abc"), 3);
        assert_eq!(edit_distance("abc", ""), 3);
        assert_eq!(edit_distance("", ""), 0);
    }

    #[test]
    fn edit_distance_ignores_case() {
        assert_eq!(edit_distance("Project Plan", "project plan"), 0);
        assert_eq!(edit_distance("ÉTÉ", "été"), 0);
    }

    #[test]
    fn similarity_of_empty_strings_is_one() {
        assert!((similarity("", "") - 1.0).abs() < f64::EPSILON);
        assert!(similarity("", "a").abs() < f64::EPSILON);
    }

    #[test]
    fn similarity_uses_longer_length() {
        // one insertion over five characters
        assert!((similarity("plan", "plann") - 0.8).abs() < 1e-12);
    }

    #[test]
    fn threshold_special_cases_short_keys() {
        assert!((acceptance_threshold("") - MAX_THRESHOLD).abs() < f64::EPSILON);
        assert!((acceptance_threshold("a") - MAX_THRESHOLD).abs() < f64::EPSILON);
        assert!((acceptance_threshold("ab") - MAX_THRESHOLD).abs() < f64::EPSILON);
        // 2.5 / log2(8) = 0.8333..
        assert!((acceptance_threshold("abcdefgh") - 2.5 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn accept_applies_threshold_of_key() {
        assert_eq!(accept("project plan", "Project Plan"), Some(1.0));
        assert_eq!(accept("plann", "plan"), None);
        // 12 / 15 = 0.8 clears 2.5 / log2(12) ~ 0.697
        let score = accept("project plan", "project plan is").unwrap();
        assert!((score - 0.8).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn similarity_with_self_is_one(s in "\\PC{1,24}") {
            prop_assert!((similarity(&s, &s) - 1.0).abs() < f64::EPSILON);
        }

        #[test]
        fn similarity_is_symmetric(a in "[a-zA-Z ]{0,16}", b in "[a-zA-Z ]{0,16}") {
            prop_assert!((similarity(&a, &b) - similarity(&b, &a)).abs() < f64::EPSILON);
        }

        #[test]
        fn similarity_stays_in_unit_interval(a in "\\PC{0,16}", b in "\\PC{0,16}") {
            let s = similarity(&a, &b);
            prop_assert!((0.0..=1.0).contains(&s));
        }

        #[test]
        fn threshold_is_clamped_and_non_increasing(len in 0usize..200) {
            let shorter = acceptance_threshold(&"x".repeat(len));
            let longer = acceptance_threshold(&"x".repeat(len + 1));
            prop_assert!((MIN_THRESHOLD..=MAX_THRESHOLD).contains(&shorter));
            prop_assert!(longer <= shorter);
        }
    }
}
