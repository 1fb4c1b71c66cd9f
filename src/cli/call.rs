use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::Args;
use tracing::debug;

use crate::cli::OutputFormat;
use crate::microhomology::{CallConfig, MicrohomologyEngine, DEFAULT_MAX_FLANKING};
use crate::output::{OutputLayout, RecordEmitter, RunInfo};
use crate::parsing::fasta::IndexedFastaProvider;
use crate::parsing::vcf::VcfVariantSource;
use crate::utils::validation::{validate_reference, validate_vcf};

#[derive(Args)]
pub struct CallArgs {
    /// Variant file (contains indel coordinates to examine)
    #[arg(long, required = true)]
    pub vcf: PathBuf,

    /// Reference genome FASTA file (requires a .fai index)
    #[arg(long = "ref", required = true)]
    pub reference: PathBuf,

    /// Only use variants that pass all VCF filters
    #[arg(long)]
    pub passing: bool,

    /// Min indel length
    #[arg(long, default_value = "0")]
    pub minlen: u64,

    /// Maximum flanking sequence to investigate
    #[arg(long, default_value_t = DEFAULT_MAX_FLANKING, value_parser = clap::value_parser!(u64).range(1..))]
    pub maxflanking: u64,

    /// INFO key for the end of a DEL
    #[arg(long)]
    pub end_key: Option<String>,

    /// Output column layout
    #[arg(long, value_enum, default_value = "breakpoint")]
    pub layout: OutputLayout,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl CallArgs {
    pub fn config(&self) -> CallConfig {
        CallConfig {
            passing_only: self.passing,
            min_length: self.minlen,
            max_flanking: self.maxflanking,
            end_key: self.end_key.clone(),
        }
    }
}

/// Execute call subcommand
///
/// `command` is the invocation's argument string, recorded in the output header.
///
/// # Errors
///
/// Returns an error if an input file is missing, the reference index is
/// missing, a record cannot be read, or output cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: CallArgs, format: OutputFormat, command: String) -> anyhow::Result<()> {
    validate_reference(&args.reference)?;
    validate_vcf(&args.vcf)?;

    let reference = IndexedFastaProvider::open(&args.reference)?;
    let mut source = VcfVariantSource::open(&args.vcf)?;

    let writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(std::io::stdout().lock())),
    };

    let config = args.config();
    debug!("{config:?}");

    let mut emitter = RecordEmitter::new(writer, args.layout, format);
    emitter.write_header(&RunInfo {
        command,
        version: env!("CARGO_PKG_VERSION").to_string(),
        fasta: args.reference.clone(),
        vcf: args.vcf.clone(),
        passing_only: config.passing_only,
        min_length: config.min_length,
    })?;

    let mut engine = MicrohomologyEngine::with_config(reference, config);
    engine.run(&mut source, |result| emitter.write_result(result))?;

    emitter.finish()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("mhsig").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["call", "--vcf", "in.vcf", "--ref", "ref.fa"]).unwrap();
        let Commands::Call(args) = cli.command;

        assert_eq!(cli.format, OutputFormat::Tsv);
        assert_eq!(args.layout, OutputLayout::Breakpoint);
        assert_eq!(args.config(), CallConfig::default());
    }

    #[test]
    fn test_all_options() {
        let cli = parse(&[
            "call",
            "--vcf",
            "in.vcf",
            "--ref",
            "ref.fa",
            "--passing",
            "--minlen",
            "3",
            "--maxflanking",
            "500",
            "--end-key",
            "END",
            "--layout",
            "simple",
            "--format",
            "json",
        ])
        .unwrap();
        let Commands::Call(args) = cli.command;

        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(args.layout, OutputLayout::Simple);
        assert_eq!(
            args.config(),
            CallConfig {
                passing_only: true,
                min_length: 3,
                max_flanking: 500,
                end_key: Some("END".to_string()),
            }
        );
    }

    #[test]
    fn test_required_inputs() {
        assert!(parse(&["call", "--vcf", "in.vcf"]).is_err());
        assert!(parse(&["call", "--ref", "ref.fa"]).is_err());
    }

    #[test]
    fn test_zero_maxflanking_rejected() {
        assert!(parse(&["call", "--vcf", "in.vcf", "--ref", "ref.fa", "--maxflanking", "0"]).is_err());
    }
}
