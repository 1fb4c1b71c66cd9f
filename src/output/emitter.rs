use std::io::Write;
use std::path::PathBuf;

use serde::Serialize;

use crate::cli::OutputFormat;
use crate::core::{IndelSides, MatchResult};

/// Column layout of output rows
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputLayout {
    /// left_seq, indel_seq, right_seq
    Simple,
    /// left_seq, right_seq, indel_seq1, indel_seq2
    #[default]
    Breakpoint,
}

impl OutputLayout {
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Self::Simple => &[
                "chrom",
                "start",
                "end",
                "type",
                "ref",
                "alt",
                "length",
                "left_matches",
                "right_matches",
                "left_seq",
                "indel_seq",
                "right_seq",
            ],
            Self::Breakpoint => &[
                "chrom",
                "start",
                "end",
                "type",
                "ref",
                "alt",
                "length",
                "left_matches",
                "right_matches",
                "left_seq",
                "right_seq",
                "indel_seq1",
                "indel_seq2",
            ],
        }
    }
}

/// Invocation details stamped into the output header
#[derive(Debug, Clone)]
pub struct RunInfo {
    /// Command-line arguments, space separated
    pub command: String,
    pub version: String,
    pub fasta: PathBuf,
    pub vcf: PathBuf,
    pub passing_only: bool,
    pub min_length: u64,
}

/// Writes header and result rows
pub struct RecordEmitter<W: Write> {
    writer: W,
    layout: OutputLayout,
    format: OutputFormat,
}

impl<W: Write> RecordEmitter<W> {
    pub fn new(writer: W, layout: OutputLayout, format: OutputFormat) -> Self {
        Self {
            writer,
            layout,
            format,
        }
    }

    /// Write the comment lines and column header. JSON output has no header.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_header(&mut self, run: &RunInfo) -> std::io::Result<()> {
        if matches!(self.format, OutputFormat::Json) {
            return Ok(());
        }

        writeln!(self.writer, "##mhsig_Command={}", run.command)?;
        writeln!(self.writer, "##mhsig_Version={}", run.version)?;
        writeln!(self.writer, "#fasta: {}", run.fasta.display())?;
        writeln!(self.writer, "#vcf: {}", run.vcf.display())?;
        if run.passing_only {
            writeln!(self.writer, "#only-passing-variants")?;
        }
        if run.min_length > 0 {
            writeln!(self.writer, "#min-length: {}", run.min_length)?;
        }
        let columns = self.layout.columns().join("\t");
        writeln!(self.writer, "{columns}")
    }

    /// Write one result row
    ///
    /// # Errors
    ///
    /// Returns an error if writing or JSON serialization fails.
    pub fn write_result(&mut self, result: &MatchResult) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Tsv => {
                let line = self.tsv_fields(result).join("\t");
                writeln!(self.writer, "{line}")?;
            }
            OutputFormat::Json => {
                let row = self.json_row(result);
                serde_json::to_writer(&mut self.writer, &row)?;
                writeln!(self.writer)?;
            }
        }
        Ok(())
    }

    /// Flush and return the underlying writer
    ///
    /// # Errors
    ///
    /// Returns an error if flushing fails.
    pub fn finish(mut self) -> std::io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn tsv_fields(&self, result: &MatchResult) -> Vec<String> {
        let event = &result.event;
        let mut fields = vec![
            event.chrom.clone(),
            event.pos.to_string(),
            event.end.to_string(),
            event.kind.tag().to_string(),
            event.ref_allele.clone(),
            event.alt_allele.clone(),
            event.length.to_string(),
            result.left_matches.to_string(),
            result.right_matches.to_string(),
        ];

        match self.layout {
            OutputLayout::Simple => fields.extend([
                result.flanks.left.clone(),
                joined_indel(&event.sides),
                result.flanks.right.clone(),
            ]),
            OutputLayout::Breakpoint => fields.extend([
                result.flanks.left.clone(),
                result.flanks.right.clone(),
                event.sides.left().to_string(),
                event.sides.right().to_string(),
            ]),
        }

        fields
    }

    fn json_row<'a>(&self, result: &'a MatchResult) -> JsonRow<'a> {
        let event = &result.event;
        let mut row = JsonRow {
            chrom: &event.chrom,
            start: event.pos,
            end: event.end,
            kind: event.kind.tag(),
            ref_allele: &event.ref_allele,
            alt_allele: &event.alt_allele,
            length: event.length,
            left_matches: result.left_matches,
            right_matches: result.right_matches,
            left_seq: &result.flanks.left,
            right_seq: &result.flanks.right,
            indel_seq: None,
            indel_seq1: None,
            indel_seq2: None,
        };

        match self.layout {
            OutputLayout::Simple => row.indel_seq = Some(joined_indel(&event.sides)),
            OutputLayout::Breakpoint => {
                row.indel_seq1 = Some(event.sides.left());
                row.indel_seq2 = Some(event.sides.right());
            }
        }

        row
    }
}

/// One result as a JSON object
#[derive(Debug, Serialize)]
struct JsonRow<'a> {
    chrom: &'a str,
    start: u64,
    end: u64,
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(rename = "ref")]
    ref_allele: &'a str,
    #[serde(rename = "alt")]
    alt_allele: &'a str,
    length: u64,
    left_matches: usize,
    right_matches: usize,
    left_seq: &'a str,
    right_seq: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    indel_seq: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    indel_seq1: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    indel_seq2: Option<&'a str>,
}

/// Single-column rendering of the indel; windowed sides are joined with `...`
fn joined_indel(sides: &IndelSides) -> String {
    match sides {
        IndelSides::Single(seq) => seq.clone(),
        IndelSides::Pair { left, right } => format!("{left}...{right}"),
    }
}
