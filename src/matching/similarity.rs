use std::collections::HashSet;

/// Similarity of two structural paths in [0, 1].
///
/// Segments are compared from the most specific end backwards; counting stops
/// at the first mismatch. The shared suffix length is divided by the longer
/// path's segment count.
pub fn structural_similarity(path_a: &str, path_b: &str) -> f64 {
    let segments_a = path_segments(path_a);
    let segments_b = path_segments(path_b);

    let total_parts = segments_a.len().max(segments_b.len());

    let common_parts = segments_a
        .iter()
        .rev()
        .zip(segments_b.iter().rev())
        .take_while(|(a, b)| a == b)
        .count();

    common_parts as f64 / total_parts as f64
}

/// Similarity of two class attributes in [0, 1].
///
/// Shared class count over the size of the larger class set; zero when either
/// side has no classes.
pub fn class_similarity(classes_a: &str, classes_b: &str) -> f64 {
    if classes_a.is_empty() || classes_b.is_empty() {
        return 0.0;
    }

    let set_a: HashSet<&str> = classes_a.split_whitespace().collect();
    let set_b: HashSet<&str> = classes_b.split_whitespace().collect();

    if set_a.is_empty() || set_b.is_empty() {
        return 0.0;
    }

    let intersection = set_a.intersection(&set_b).count();
    intersection as f64 / set_a.len().max(set_b.len()) as f64
}

/// Split a path on `>`, trimming each segment. `"a>b"` and `"a > b"` agree.
/// An empty path is a single empty segment.
fn path_segments(path: &str) -> Vec<&str> {
    path.split('>').map(str::trim).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPSILON,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_structural_common_suffix() {
        assert_close(structural_similarity("a > b > c", "x > b > c"), 2.0 / 3.0);
    }

    #[test]
    fn test_structural_shorter_path() {
        assert_close(structural_similarity("div > span", "section > div > span"), 2.0 / 3.0);
        assert_close(structural_similarity("section > div > span", "div > span"), 2.0 / 3.0);
    }

    #[test]
    fn test_structural_stops_at_first_mismatch() {
        // the shared root does not count once the tails diverge
        assert_close(structural_similarity("html > body > ul > li", "html > body > ol > li"), 0.25);
        assert_close(structural_similarity("html > body > p", "html > body > span"), 0.0);
    }

    #[test]
    fn test_structural_identical_and_unspaced() {
        assert_close(structural_similarity("html > body > p", "html > body > p"), 1.0);
        assert_close(structural_similarity("a>b", "a > b"), 1.0);
    }

    #[test]
    fn test_structural_nth_of_type_is_a_different_segment() {
        assert_close(
            structural_similarity("ul > li:nth-of-type(2)", "ul > li:nth-of-type(3)"),
            0.0,
        );
    }

    #[test]
    fn test_structural_empty_paths() {
        assert_close(structural_similarity("", "a > b"), 0.0);
        assert_close(structural_similarity("", ""), 1.0);
        assert_close(structural_similarity("  ", ""), 1.0);
    }

    #[test]
    fn test_class_partial_overlap() {
        assert_close(class_similarity("foo bar", "bar baz"), 0.5);
    }

    #[test]
    fn test_class_empty_short_circuit() {
        assert_close(class_similarity("", "foo"), 0.0);
        assert_close(class_similarity("foo", ""), 0.0);
        assert_close(class_similarity("   ", "foo"), 0.0);
    }

    #[test]
    fn test_class_denominator_is_larger_set() {
        assert_close(class_similarity("card", "card featured wide"), 1.0 / 3.0);
        assert_close(class_similarity("a  b\tc", "c b a"), 1.0);
    }

    #[test]
    fn test_class_duplicates_collapse() {
        assert_close(class_similarity("item item", "item"), 1.0);
    }
}
