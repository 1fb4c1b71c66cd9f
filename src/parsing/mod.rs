//! Access to variant records and reference sequence.
//!
//! The engine only sees two capabilities:
//!
//! - [`VariantSource`]: a forward-only stream of [`Variant`] records
//! - [`SequenceProvider`]: random access to reference bases by interval
//!
//! Concrete implementations read VCF files ([`vcf::VcfVariantSource`]) and
//! indexed FASTA files ([`fasta::IndexedFastaProvider`]) using noodles. In-memory
//! versions are provided for tests and library callers.
//!
//! ## Example
//!
//! ```rust,no_run
//! use mhsig::parsing::fasta::IndexedFastaProvider;
//! use mhsig::parsing::SequenceProvider;
//! use std::path::Path;
//!
//! let mut reference = IndexedFastaProvider::open(Path::new("ref.fa")).unwrap();
//! // Two bases ending at the anchor of a variant at POS=100
//! let bases = reference.fetch("chr1", 98, 100).unwrap();
//! ```

use thiserror::Error;

use crate::core::Variant;

pub mod fasta;
pub mod vcf;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("noodles error: {0}")]
    Noodles(String),

    #[error("Invalid variant record: {0}")]
    InvalidRecord(String),

    #[error("Unknown contig: {0}")]
    UnknownContig(String),
}

/// Random access to reference bases.
///
/// Intervals are 0-based half-open and computed arithmetically from 1-based
/// variant positions; implementations must not shift them. Parts of the
/// interval outside the contig are clipped, so the result may be shorter than
/// requested.
pub trait SequenceProvider {
    /// Fetch the bases in `[start, end)` of `chrom`.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::UnknownContig` if `chrom` is not in the reference, or
    /// an IO/noodles error if the read fails.
    fn fetch(&mut self, chrom: &str, start: u64, end: u64) -> Result<String, ParseError>;
}

/// Forward-only stream of variant records
pub trait VariantSource {
    /// Next record, `None` at end of input.
    fn next_variant(&mut self) -> Option<Result<Variant, ParseError>>;
}

impl VariantSource for std::vec::IntoIter<Variant> {
    fn next_variant(&mut self) -> Option<Result<Variant, ParseError>> {
        self.next().map(Ok)
    }
}

/// Clip `[start, end)` to a contig of `length` bases
pub(crate) fn clip_interval(start: u64, end: u64, length: u64) -> Option<(u64, u64)> {
    let end = end.min(length);
    (start < end).then_some((start, end))
}
