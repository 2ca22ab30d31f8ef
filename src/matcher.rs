use std::cmp::Ordering;
use std::fmt;

/// Edit distance that may be unbounded, used as the result of matching
/// against an empty candidate set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Distance {
    Finite(usize),
    Infinite,
}

impl Distance {
    pub fn is_within(self, threshold: usize) -> bool {
        match self {
            Distance::Finite(d) => d <= threshold,
            Distance::Infinite => false,
        }
    }
}

impl Ord for Distance {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Distance::Finite(a), Distance::Finite(b)) => a.cmp(b),
            (Distance::Finite(_), Distance::Infinite) => Ordering::Less,
            (Distance::Infinite, Distance::Finite(_)) => Ordering::Greater,
            (Distance::Infinite, Distance::Infinite) => Ordering::Equal,
        }
    }
}

impl PartialOrd for Distance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Finite(d) => write!(f, "{}", d),
            Distance::Infinite => write!(f, "inf"),
        }
    }
}

/// Closest candidate found for a title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match<'a> {
    pub distance: Distance,
    pub matched: &'a str,
}

/// Strip the final `.`-delimited segment: `"a.b.mp3"` becomes `"a.b"`.
/// A name without any `.` strips to the empty string.
pub fn strip_extension(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(idx) => &filename[..idx],
        None => "",
    }
}

/// Levenshtein distance counted in Unicode scalar values.
pub fn distance(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

/// Nearest candidate to `target`. Ties keep the earliest candidate.
pub fn best_match<'a, I, S>(target: &str, candidates: I) -> Match<'a>
where
    I: IntoIterator<Item = &'a S>,
    S: AsRef<str> + ?Sized + 'a,
{
    let mut best = Match {
        distance: Distance::Infinite,
        matched: "",
    };

    for candidate in candidates {
        let candidate = candidate.as_ref();
        let d = Distance::Finite(distance(target, candidate));
        if d < best.distance {
            best = Match {
                distance: d,
                matched: candidate,
            };
            if d == Distance::Finite(0) {
                break;
            }
        }
    }

    best
}

/// `true` when some candidate is at most `threshold` edits away (inclusive).
pub fn within_threshold<'a, I, S>(target: &str, candidates: I, threshold: usize) -> bool
where
    I: IntoIterator<Item = &'a S>,
    S: AsRef<str> + ?Sized + 'a,
{
    best_match(target, candidates).distance.is_within(threshold)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_identity_and_symmetry() {
        let samples = ["", "abc", "Song A (Live)", "Björk – Jóga", "日本語のタイトル", "!?.,;"];
        for a in samples {
            assert_eq!(distance(a, a), 0);
            for b in samples {
                assert_eq!(distance(a, b), distance(b, a), "{:?} vs {:?}", a, b);
            }
        }
    }

    #[test]
    fn test_distance_known_values() {
        assert_eq!(distance("", ""), 0);
        assert_eq!(distance("abc", ""), 3);
        assert_eq!(distance("", "abc"), 3);
        assert_eq!(distance("kitten", "sitting"), 3);
        // Counted per character, not per byte
        assert_eq!(distance("café", "cafe"), 1);
    }

    #[test]
    fn test_best_match_empty_candidates() {
        let empty: Vec<String> = Vec::new();
        let m = best_match("anything", &empty);
        assert_eq!(m.distance, Distance::Infinite);
        assert_eq!(m.matched, "");
        assert!(!within_threshold("anything", &empty, usize::MAX));
    }

    #[test]
    fn test_best_match_exact() {
        let candidates = ["abc", "abd", "xyz"];
        let m = best_match("abc", candidates.iter());
        assert_eq!(m.distance, Distance::Finite(0));
        assert_eq!(m.matched, "abc");
    }

    #[test]
    fn test_best_match_tie_keeps_first() {
        let candidates = ["abx", "aby"];
        let m = best_match("abc", candidates.iter());
        assert_eq!(m.distance, Distance::Finite(1));
        assert_eq!(m.matched, "abx");
    }

    #[test]
    fn test_within_threshold_is_inclusive() {
        let candidates = vec!["abx".to_string()];
        assert!(within_threshold("abc", &candidates, 1));
        assert!(!within_threshold("abc", &candidates, 0));
    }

    #[test]
    fn test_strip_extension() {
        assert_eq!(strip_extension("Song A.mp3"), "Song A");
        assert_eq!(strip_extension("filename.test.txt"), "filename.test");
        assert_eq!(strip_extension("Mr. Blue Sky.mp3"), "Mr. Blue Sky");
        assert_eq!(strip_extension("noext"), "");
    }

    #[test]
    fn test_infinite_sorts_last() {
        assert!(Distance::Finite(usize::MAX) < Distance::Infinite);
        assert_eq!(Distance::Infinite.to_string(), "inf");
    }
}
