//! Variant records from VCF files using noodles.
//!
//! noodles handles the header and record framing; the REF, first ALT, FILTER
//! and INFO columns are then read from their raw text into a [`Variant`].
//! Plain and gzip/bgzip-compressed files are supported.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use noodles::vcf;

use crate::core::{Info, Variant};
use crate::parsing::{ParseError, VariantSource};

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// FILTER passes when it is `PASS` or unset
pub fn filter_passes(filters: &str) -> bool {
    matches!(filters, "" | "." | "PASS")
}

/// First allele of a comma-separated ALT column
pub fn first_alt(alternate_bases: &str) -> &str {
    alternate_bases.split(',').next().unwrap_or_default()
}

/// Streaming reader over the records of a VCF file
pub struct VcfVariantSource {
    reader: vcf::io::Reader<Box<dyn BufRead>>,
    record: vcf::Record,
    line: u64,
}

impl VcfVariantSource {
    /// Open a VCF file and read its header
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Io` if the file cannot be opened, or
    /// `ParseError::Noodles` if the header is invalid.
    pub fn open(path: &Path) -> Result<Self, ParseError> {
        let file = File::open(path)?;
        let inner: Box<dyn BufRead> = if is_gzipped(path) {
            Box::new(BufReader::new(MultiGzDecoder::new(file)))
        } else {
            Box::new(BufReader::new(file))
        };

        Self::from_reader(inner)
    }

    /// Read a VCF from any buffered reader
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Noodles` if the header is invalid.
    pub fn from_reader(inner: Box<dyn BufRead>) -> Result<Self, ParseError> {
        let mut reader = vcf::io::Reader::new(inner);
        reader
            .read_header()
            .map_err(|e| ParseError::Noodles(format!("Failed to parse VCF header: {e}")))?;

        Ok(Self {
            reader,
            record: vcf::Record::default(),
            line: 0,
        })
    }

    fn read_variant(&mut self) -> Result<Option<Variant>, ParseError> {
        let n = self
            .reader
            .read_record(&mut self.record)
            .map_err(|e| ParseError::Noodles(format!("Failed to read VCF record: {e}")))?;
        if n == 0 {
            return Ok(None);
        }
        self.line += 1;

        let record = &self.record;
        let chrom = record.reference_sequence_name().to_string();

        let pos = record
            .variant_start()
            .transpose()
            .map_err(|e| ParseError::InvalidRecord(format!("record {}: {e}", self.line)))?
            .ok_or_else(|| {
                ParseError::InvalidRecord(format!("record {}: missing position", self.line))
            })?;

        let alternate_bases = record.alternate_bases();
        let filters = record.filters();

        Ok(Some(Variant {
            chrom,
            pos: usize::from(pos) as u64,
            ref_allele: record.reference_bases().to_string(),
            alt_allele: first_alt(alternate_bases.as_ref()).to_string(),
            passes_filters: filter_passes(filters.as_ref()),
            info: Info::parse(record.info().as_ref()),
        }))
    }
}

impl VariantSource for VcfVariantSource {
    fn next_variant(&mut self) -> Option<Result<Variant, ParseError>> {
        self.read_variant().transpose()
    }
}

impl Iterator for VcfVariantSource {
    type Item = Result<Variant, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_variant()
    }
}
