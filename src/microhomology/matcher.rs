//! Count matching bases outward from a breakpoint.
//!
//! Comparison is exact byte equality: no case folding and no special handling
//! of ambiguity codes such as `N`.

/// Count equal bases from the end of `flank` and the end of `seq`, stopping at
/// the first mismatch or when either runs out.
pub fn count_left_matches(flank: &[u8], seq: &[u8]) -> usize {
    flank
        .iter()
        .rev()
        .zip(seq.iter().rev())
        .take_while(|(f, s)| f == s)
        .count()
}

/// Count equal bases from the start of `flank` and the start of `seq`, stopping
/// at the first mismatch or when either runs out.
pub fn count_right_matches(flank: &[u8], seq: &[u8]) -> usize {
    flank
        .iter()
        .zip(seq.iter())
        .take_while(|(f, s)| f == s)
        .count()
}

/// Left and right match counts for one event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchCounts {
    pub left: usize,
    pub right: usize,
}

/// Score both breakpoints: the left flank against the right side of the indel,
/// the right flank against the left side.
pub fn score(left_flank: &str, right_flank: &str, left_side: &str, right_side: &str) -> MatchCounts {
    MatchCounts {
        left: count_left_matches(left_flank.as_bytes(), right_side.as_bytes()),
        right: count_right_matches(right_flank.as_bytes(), left_side.as_bytes()),
    }
}
