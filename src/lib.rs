//! # mhsig
//!
//! A library for measuring microhomology around insertion and deletion variants.
//!
//! Microhomology, short stretches of identical sequence at both ends of an
//! inserted or deleted segment, is a signature of repair pathways such as
//! microhomology-mediated end joining. For each indel in a VCF, `mhsig` compares
//! the reference sequence flanking the breakpoint with the inserted or deleted
//! bases and counts how many match, scanning outward from the breakpoint.
//!
//! ## Features
//!
//! - **Prefix normalization**: Shared anchor bases are trimmed from REF/ALT
//! - **Long-range deletions**: Deletion extents from an INFO end coordinate
//!   (e.g. `END`), with bounded windows at each end of very large spans
//! - **Independent breakpoints**: Left and right match counts are reported separately
//! - **Streaming**: One variant in flight at a time
//!
//! ## Example
//!
//! ```rust
//! use mhsig::core::Variant;
//! use mhsig::microhomology::{CallConfig, MicrohomologyEngine};
//! use mhsig::parsing::fasta::InMemoryReference;
//!
//! let reference = InMemoryReference::new().with_contig("chr1", "GGGGGGGCTTTTAAGG");
//! let mut engine = MicrohomologyEngine::with_config(reference, CallConfig::default());
//!
//! // TT deleted after the anchor at position 8
//! let result = engine
//!     .process(&Variant::new("chr1", 8, "CTT", "C"))
//!     .unwrap()
//!     .expect("deletion is scored");
//!
//! assert_eq!(result.left_matches, 0);
//! assert_eq!(result.right_matches, 2);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Variant records, indel events and match results
//! - [`microhomology`]: Classification, normalization, windowing and matching
//! - [`parsing`]: VCF variant source and indexed FASTA sequence provider
//! - [`output`]: Output header and rows
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod microhomology;
pub mod output;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::core::{IndelEvent, IndelSides, IndelType, MatchResult, Variant};
pub use crate::microhomology::{CallConfig, MicrohomologyEngine, RunStats};
pub use crate::parsing::{ParseError, SequenceProvider, VariantSource};
