//! Reference sequence retrieval from indexed FASTA files using noodles.
//!
//! The reference must have a `.fai` index next to it (`ref.fa` -> `ref.fa.fai`).

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use noodles::core::{Position, Region};
use noodles::fasta;
use tracing::debug;

use crate::parsing::{clip_interval, ParseError, SequenceProvider};

/// Path of the `.fai` index for a FASTA file
pub fn fai_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".fai");
    PathBuf::from(name)
}

/// Indexed FASTA reader
pub struct IndexedFastaProvider {
    reader: fasta::io::IndexedReader<BufReader<File>>,
    lengths: HashMap<String, u64>,
}

impl IndexedFastaProvider {
    /// Open a FASTA file and its `.fai` index
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Io` if either file cannot be opened, or
    /// `ParseError::Noodles` if the index cannot be parsed.
    pub fn open(path: &Path) -> Result<Self, ParseError> {
        let index_reader = File::open(fai_path(path)).map(BufReader::new)?;
        let index = fasta::fai::io::Reader::new(index_reader)
            .read_index()
            .map_err(|e| ParseError::Noodles(format!("Failed to parse FAI file: {e}")))?;

        let lengths = index
            .as_ref()
            .iter()
            .map(|record| {
                (
                    String::from_utf8_lossy(record.name()).to_string(),
                    record.length(),
                )
            })
            .collect();

        let inner = File::open(path).map(BufReader::new)?;
        let reader = fasta::io::IndexedReader::new(inner, index);

        Ok(Self { reader, lengths })
    }

    pub fn contig_length(&self, chrom: &str) -> Option<u64> {
        self.lengths.get(chrom).copied()
    }
}

impl SequenceProvider for IndexedFastaProvider {
    fn fetch(&mut self, chrom: &str, start: u64, end: u64) -> Result<String, ParseError> {
        let length = self
            .contig_length(chrom)
            .ok_or_else(|| ParseError::UnknownContig(chrom.to_string()))?;

        let Some((start, end)) = clip_interval(start, end, length) else {
            return Ok(String::new());
        };

        // 0-based half-open -> 1-based closed
        let to_position = |n: u64| {
            usize::try_from(n)
                .ok()
                .and_then(Position::new)
                .ok_or_else(|| ParseError::Noodles(format!("Invalid position: {n}")))
        };
        let region = Region::new(chrom, to_position(start + 1)?..=to_position(end)?);

        debug!("Fetching {chrom}:{}-{end}", start + 1);
        let record = self
            .reader
            .query(&region)
            .map_err(|e| ParseError::Noodles(format!("Failed to read {chrom}:{}-{end}: {e}", start + 1)))?;

        Ok(String::from_utf8_lossy(record.sequence().as_ref()).to_string())
    }
}

/// Reference held in memory, keyed by contig name
#[derive(Debug, Clone, Default)]
pub struct InMemoryReference {
    contigs: HashMap<String, String>,
}

impl InMemoryReference {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_contig(mut self, name: impl Into<String>, sequence: impl Into<String>) -> Self {
        self.contigs.insert(name.into(), sequence.into());
        self
    }
}

impl SequenceProvider for InMemoryReference {
    fn fetch(&mut self, chrom: &str, start: u64, end: u64) -> Result<String, ParseError> {
        let sequence = self
            .contigs
            .get(chrom)
            .ok_or_else(|| ParseError::UnknownContig(chrom.to_string()))?;

        let Some((start, end)) = clip_interval(start, end, sequence.len() as u64) else {
            return Ok(String::new());
        };

        #[allow(clippy::cast_possible_truncation)] // bounded by sequence.len()
        let range = start as usize..end as usize;
        Ok(sequence.get(range).unwrap_or_default().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_indexed_fasta(dir: &TempDir) -> PathBuf {
        // 8 bases per line, 9 bytes per line
        let fasta_path = dir.path().join("ref.fa");
        let mut fasta = File::create(&fasta_path).unwrap();
        fasta
            .write_all(b">chr1\nACGTACGT\nGGCCTTAA\nCA\n>chr2\nTTTT\n")
            .unwrap();

        let mut fai = File::create(fai_path(&fasta_path)).unwrap();
        fai.write_all(b"chr1\t18\t6\t8\t9\nchr2\t4\t33\t4\t5\n")
            .unwrap();

        fasta_path
    }

    #[test]
    fn test_fai_path() {
        assert_eq!(
            fai_path(Path::new("/data/ref.fa")),
            PathBuf::from("/data/ref.fa.fai")
        );
    }

    #[test]
    fn test_indexed_fetch() {
        let dir = TempDir::new().unwrap();
        let path = write_indexed_fasta(&dir);
        let mut reference = IndexedFastaProvider::open(&path).unwrap();

        assert_eq!(reference.contig_length("chr1"), Some(18));
        assert_eq!(reference.fetch("chr1", 0, 4).unwrap(), "ACGT");
        // spans a line break
        assert_eq!(reference.fetch("chr1", 6, 10).unwrap(), "GTGG");
        assert_eq!(reference.fetch("chr2", 1, 3).unwrap(), "TT");
    }

    #[test]
    fn test_indexed_fetch_clipped() {
        let dir = TempDir::new().unwrap();
        let path = write_indexed_fasta(&dir);
        let mut reference = IndexedFastaProvider::open(&path).unwrap();

        assert_eq!(reference.fetch("chr1", 16, 30).unwrap(), "CA");
        assert_eq!(reference.fetch("chr1", 20, 30).unwrap(), "");
        assert_eq!(reference.fetch("chr1", 5, 5).unwrap(), "");
    }

    #[test]
    fn test_indexed_unknown_contig() {
        let dir = TempDir::new().unwrap();
        let path = write_indexed_fasta(&dir);
        let mut reference = IndexedFastaProvider::open(&path).unwrap();

        assert!(matches!(
            reference.fetch("chrZ", 0, 4),
            Err(ParseError::UnknownContig(_))
        ));
    }

    #[test]
    fn test_open_without_index() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("noindex.fa");
        std::fs::write(&path, ">chr1\nACGT\n").unwrap();

        assert!(IndexedFastaProvider::open(&path).is_err());
    }

    #[test]
    fn test_in_memory_fetch() {
        let mut reference = InMemoryReference::new().with_contig("chr1", "ACGTACGT");

        assert_eq!(reference.fetch("chr1", 2, 6).unwrap(), "GTAC");
        assert_eq!(reference.fetch("chr1", 6, 12).unwrap(), "GT");
        assert_eq!(reference.fetch("chr1", 9, 12).unwrap(), "");
        assert!(reference.fetch("chr9", 0, 1).is_err());
    }
}
