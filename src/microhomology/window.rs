//! Reference windows for deleted spans and flanking sequence.
//!
//! ```text
//!           LLLL                 RRRR
//!           ====|               |====
//!                delL       delR
//! ```
//!
//! The left flank (`LLLL`) is compared with the far end of the deleted span
//! (`delR`), and the right flank (`RRRR`) with its near end (`delL`): after the
//! deletion these are the bases that meet at each breakpoint.

/// 0-based half-open reference interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: u64,
    pub end: u64,
}

impl Interval {
    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }
}

/// How the deleted span of a ranged deletion is read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionWindows {
    /// Span is shorter than the flanking bound; read it once and use it on both sides
    Whole(Interval),
    /// First and last `max_flanking` bases of the span
    Split { left: Interval, right: Interval },
}

/// Plan the reads for a deleted span of `del_len` bases starting at `start`.
pub fn plan_deleted_span(start: u64, del_len: u64, max_flanking: u64) -> DeletionWindows {
    let end = start + del_len;
    if del_len < max_flanking {
        DeletionWindows::Whole(Interval::new(start, end))
    } else {
        DeletionWindows::Split {
            left: Interval::new(start, start + max_flanking),
            right: Interval::new(end - max_flanking, end),
        }
    }
}

/// Intervals of the left and right flanks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlankWindows {
    pub left: Interval,
    pub right: Interval,
}

/// Plan the flanks around an event.
///
/// The left flank ends at `left_breakpoint` and is as long as the sequence it
/// is compared with (the right side); the right flank starts at
/// `right_breakpoint` and is as long as the left side. A left flank reaching
/// past the contig start is shortened.
pub fn plan_flanks(
    left_breakpoint: u64,
    right_breakpoint: u64,
    left_side_len: u64,
    right_side_len: u64,
) -> FlankWindows {
    FlankWindows {
        left: Interval::new(
            left_breakpoint.saturating_sub(right_side_len),
            left_breakpoint,
        ),
        right: Interval::new(right_breakpoint, right_breakpoint + left_side_len),
    }
}
