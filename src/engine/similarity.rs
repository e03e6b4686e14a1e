//! Gestalt (Ratcliff/Obershelp) string similarity and close-match lookup.
//!
//! Scores come from `difflib`'s `SequenceMatcher`, so a cutoff accepts the
//! same matches `difflib::get_close_matches` would.

use difflib::sequencematcher::SequenceMatcher;

fn chars_ratio(a: &[char], b: &[char]) -> f64 {
    let mut matcher: SequenceMatcher<char> = SequenceMatcher::new(a, b);
    matcher.ratio() as f64
}

/// Similarity of two strings on a 0.0-1.0 scale (1.0 = identical).
///
/// Compares characters, not bytes. Two empty strings are identical.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    chars_ratio(&a, &b)
}

/// Returns the candidate most similar to `word`, if its ratio reaches `cutoff`.
///
/// Equal ratios resolve to the lexicographically greatest candidate.
pub fn best_match<'a, S: AsRef<str>>(
    word: &str,
    candidates: &'a [S],
    cutoff: f64,
) -> Option<(&'a str, f64)> {
    let word: Vec<char> = word.chars().collect();

    candidates
        .iter()
        .map(|candidate| {
            let candidate = candidate.as_ref();
            let chars: Vec<char> = candidate.chars().collect();
            (candidate, chars_ratio(&chars, &word))
        })
        .filter(|(_, score)| *score >= cutoff)
        .max_by(|(a_name, a_score), (b_name, b_score)| {
            a_score.total_cmp(b_score).then_with(|| a_name.cmp(b_name))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(actual: f64, expected: f64) -> bool {
        (actual - expected).abs() < 1e-6
    }

    #[test]
    fn test_ratio_identical_and_disjoint() {
        assert_eq!(ratio("Pikachu", "Pikachu"), 1.0);
        assert_eq!(ratio("abc", "xyz"), 0.0);
        assert_eq!(ratio("", ""), 1.0);
        assert_eq!(ratio("", "abc"), 0.0);
    }

    #[test]
    fn test_ratio_known_values() {
        // Matching blocks "bcd": 2 * 3 / 8
        assert_eq!(ratio("abcd", "bcde"), 0.75);
        // One substituted character: 2 * 6 / 14
        assert!(close(ratio("Pikachu", "Pikachv"), 12.0 / 14.0));
        // Blocks "ab" + "cd" on either side of the extra character
        assert!(close(ratio("abxcd", "abcd"), 8.0 / 9.0));
    }

    #[test]
    fn test_ratio_recurses_on_both_sides() {
        // "Gen" + "gar" around the substituted character
        assert!(close(ratio("Gengar", "Genqar"), 10.0 / 12.0));
    }

    #[test]
    fn test_ratio_counts_characters() {
        // One differing character each, not two differing bytes
        assert!(close(ratio("Pokémon", "Pokemon"), 12.0 / 14.0));
    }

    #[test]
    fn test_best_match_picks_highest() {
        let names = ["Charmander", "Charmeleon", "Charizard"];
        let (name, score) = best_match("Charizrd", &names, 0.8).unwrap();
        assert_eq!(name, "Charizard");
        assert!(close(score, 16.0 / 17.0));
    }

    #[test]
    fn test_best_match_respects_cutoff() {
        let names = ["Pikachu", "Raichu"];
        assert!(best_match("Snorlax", &names, 0.8).is_none());
        assert!(best_match("", &names, 0.8).is_none());
    }

    #[test]
    fn test_best_match_accepts_ratio_at_cutoff() {
        // Exactly 2 * 4 / 10
        let names = ["Abcde"];
        assert_eq!(best_match("Abcd", &names, 0.8).map(|(n, _)| n), Some("Abcde"));
    }

    #[test]
    fn test_best_match_tie_prefers_greatest_name() {
        let names = ["abce", "abcf"];
        let (name, _) = best_match("abcd", &names, 0.7).unwrap();
        assert_eq!(name, "abcf");

        let reversed = ["abcf", "abce"];
        let (name, _) = best_match("abcd", &reversed, 0.7).unwrap();
        assert_eq!(name, "abcf");
    }
}
