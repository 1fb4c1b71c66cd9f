//! Startup checks on input files.

use std::path::{Path, PathBuf};

use crate::parsing::fasta::fai_path;

/// Input validation error types
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing reference FASTA file: {0}")]
    MissingReference(PathBuf),
    #[error("Missing FASTA index (.fai) for reference: {0}")]
    MissingReferenceIndex(PathBuf),
    #[error("Missing VCF file: {0}")]
    MissingVcf(PathBuf),
}

/// Check that the reference FASTA and its `.fai` index exist
///
/// # Errors
///
/// Returns `ValidationError::MissingReference` or
/// `ValidationError::MissingReferenceIndex`.
pub fn validate_reference(path: &Path) -> Result<(), ValidationError> {
    if !path.is_file() {
        return Err(ValidationError::MissingReference(path.to_path_buf()));
    }
    if !fai_path(path).is_file() {
        return Err(ValidationError::MissingReferenceIndex(path.to_path_buf()));
    }
    Ok(())
}

/// Check that the VCF file exists
///
/// # Errors
///
/// Returns `ValidationError::MissingVcf` if it does not.
pub fn validate_vcf(path: &Path) -> Result<(), ValidationError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(ValidationError::MissingVcf(path.to_path_buf()))
    }
}
