//! Command-line interface for mhsig.
//!
//! Available commands:
//!
//! - **call**: Measure microhomology around each indel in a VCF
//!
//! ## Usage
//!
//! ```text
//! # Breakpoint layout (default), TSV to stdout
//! mhsig call --vcf calls.vcf.gz --ref GRCh38.fa
//!
//! # Passing indels of at least 3 bases, simple layout
//! mhsig call --vcf calls.vcf --ref GRCh38.fa --passing --minlen 3 --layout simple
//!
//! # Long-range deletions from an SV caller, using the END INFO field
//! mhsig call --vcf delly.vcf --ref GRCh38.fa --end-key END --maxflanking 500
//! ```

use clap::{Parser, Subcommand};

pub mod call;

#[derive(Parser)]
#[command(name = "mhsig")]
#[command(version)]
#[command(about = "Micro-homology signature caller")]
#[command(
    long_about = "mhsig measures microhomology around insertion and deletion variants.\n\nFor each indel in a VCF, the reference sequence flanking the breakpoint is compared with the inserted or deleted bases, and the number of identical bases at each breakpoint is reported."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "tsv")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Calculate the level of microhomology for indels (from VCF)
    Call(call::CallArgs),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Tsv,
    Json,
}
