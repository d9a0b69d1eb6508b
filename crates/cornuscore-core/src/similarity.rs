use strsim::levenshtein;

/// Levenshtein edit distance between two strings, counted in characters.
///
/// Symmetric: `edit_distance(a, b) == edit_distance(b, a)`.
#[inline]
pub fn edit_distance(a: &str, b: &str) -> usize {
    levenshtein(a, b)
}

/// Similarity ratio `1 - distance / max(len_a, len_b)`, in [0, 1].
///
/// Two empty strings are identical and yield 1.0.
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - edit_distance(a, b) as f64 / max_len as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_distances() {
        assert_eq!(edit_distance("", ""), 0);
        assert_eq!(edit_distance("abc", ""), 3);
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("sofialuna", "sofilu"), 3);
    }

    #[test]
    fn distance_is_symmetric() {
        let words = ["", "ana", "anaperez", "anitaperez95", "sintiafer", "ñandú"];
        for a in words {
            for b in words {
                assert_eq!(
                    edit_distance(a, b),
                    edit_distance(b, a),
                    "asymmetric for {:?} / {:?}",
                    a,
                    b
                );
            }
        }
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(edit_distance("núñez", "nunez"), 2);
        assert!((similarity("núñez", "nunez") - 0.6).abs() < 1e-9);
    }

    #[test]
    fn ratio_bounds() {
        assert_eq!(similarity("", ""), 1.0);
        assert_eq!(similarity("abc", "abc"), 1.0);
        assert_eq!(similarity("abc", "xyz"), 0.0);
        assert_eq!(similarity("abc", ""), 0.0);
        assert!((similarity("charlyg", "charlig") - (1.0 - 1.0 / 7.0)).abs() < 1e-9);
    }
}
