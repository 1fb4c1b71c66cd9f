use std::fmt;

/// Kind of indel event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndelType {
    Insertion,
    Deletion,
}

impl IndelType {
    /// Short tag used in output rows
    pub fn tag(self) -> &'static str {
        match self {
            Self::Insertion => "INS",
            Self::Deletion => "DEL",
        }
    }
}

impl fmt::Display for IndelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// The inserted or deleted material compared against the flanks.
///
/// Deletions longer than the flanking bound are only read as two windows, one
/// at each end of the deleted span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndelSides {
    /// Whole inserted/deleted sequence, used on both sides
    Single(String),
    /// Bounded windows from the start and end of a deleted span
    Pair { left: String, right: String },
}

impl IndelSides {
    /// Side nearest the left breakpoint; compared against the right flank
    pub fn left(&self) -> &str {
        match self {
            Self::Single(seq) => seq,
            Self::Pair { left, .. } => left,
        }
    }

    /// Side nearest the right breakpoint; compared against the left flank
    pub fn right(&self) -> &str {
        match self {
            Self::Single(seq) => seq,
            Self::Pair { right, .. } => right,
        }
    }

    pub fn is_windowed(&self) -> bool {
        matches!(self, Self::Pair { .. })
    }
}

/// A classified, normalized indel ready for flank retrieval
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndelEvent {
    pub kind: IndelType,

    pub chrom: String,

    /// Variant position (1-based), as reported
    pub pos: u64,

    /// Reported end: `pos + length` for deletions, `pos` for insertions
    pub end: u64,

    /// 0-based offset of the left breakpoint; the left flank ends here
    pub breakpoint: u64,

    /// Effective indel length
    pub length: u64,

    pub sides: IndelSides,

    /// Original REF allele
    pub ref_allele: String,

    /// Original (first) ALT allele
    pub alt_allele: String,
}

impl IndelEvent {
    /// 0-based offset where the right flank starts
    pub fn right_breakpoint(&self) -> u64 {
        match self.kind {
            IndelType::Insertion => self.breakpoint,
            IndelType::Deletion => self.breakpoint + self.length,
        }
    }
}

/// Reference sequence on either side of the event
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlankPair {
    pub left: String,
    pub right: String,
}

/// Microhomology measured for one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub event: IndelEvent,
    pub flanks: FlankPair,

    /// Bases matching between the end of the left flank and the end of the right side
    pub left_matches: usize,

    /// Bases matching between the start of the right flank and the start of the left side
    pub right_matches: usize,
}
