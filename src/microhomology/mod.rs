//! Microhomology detection and scoring.
//!
//! Each variant passes through a linear pipeline:
//!
//! 1. **Classification** ([`classifier`]): filter failures, symbolic SV alleles
//!    and breakends are skipped; the rest become insertions, deletions, or
//!    ranged deletions (extent taken from an INFO end coordinate)
//! 2. **Normalization** ([`normalize`]): the shared allele prefix is trimmed to
//!    isolate the inserted/deleted sequence
//! 3. **Windowing** ([`window`]): long deleted spans are read as two bounded
//!    windows, and flanking intervals are sized to the sequence they are
//!    compared with
//! 4. **Matching** ([`matcher`]): bases are counted outward from each
//!    breakpoint until the first mismatch
//!
//! ## Example
//!
//! ```rust
//! use mhsig::core::Variant;
//! use mhsig::microhomology::{CallConfig, MicrohomologyEngine};
//! use mhsig::parsing::fasta::InMemoryReference;
//!
//! let reference = InMemoryReference::new().with_contig("chr1", "GGGGCATTCAGG");
//! let mut engine = MicrohomologyEngine::with_config(reference, CallConfig::default());
//!
//! // CA inserted after the anchor A at position 6, right after another CA
//! let result = engine
//!     .process(&Variant::new("chr1", 6, "A", "ACA"))
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(result.flanks.left, "CA");
//! assert_eq!(result.left_matches, 2);
//! assert_eq!(result.right_matches, 0);
//! ```

pub mod classifier;
pub mod engine;
pub mod matcher;
pub mod normalize;
pub mod window;

pub use classifier::{Classification, SkipReason};
pub use engine::{CallConfig, MicrohomologyEngine, RunStats, DEFAULT_MAX_FLANKING};
pub use matcher::MatchCounts;
