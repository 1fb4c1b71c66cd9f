//! Shared-prefix trimming of REF/ALT alleles.
//!
//! VCF indels carry an anchor base shared by both alleles; removing the common
//! leading bases leaves the inserted or deleted material.

use crate::core::IndelType;

/// Alleles with their common leading bases removed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrimmedAlleles<'a> {
    pub ref_allele: &'a str,
    pub alt_allele: &'a str,
    /// Number of leading characters removed from both alleles
    pub prefix_len: usize,
}

/// Strip the leading characters shared by `ref_allele` and `alt_allele`,
/// stopping at the first difference or when either allele runs out.
pub fn trim_shared_prefix<'a>(ref_allele: &'a str, alt_allele: &'a str) -> TrimmedAlleles<'a> {
    let mut prefix_len = 0;
    let mut byte_len = 0;
    for (r, a) in ref_allele.chars().zip(alt_allele.chars()) {
        if r != a {
            break;
        }
        prefix_len += 1;
        byte_len += r.len_utf8();
    }

    TrimmedAlleles {
        ref_allele: &ref_allele[byte_len..],
        alt_allele: &alt_allele[byte_len..],
        prefix_len,
    }
}

/// The inserted or deleted sequence of a normalized indel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedIndel {
    pub kind: IndelType,
    pub sequence: String,
    pub prefix_len: usize,
}

impl NormalizedIndel {
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

/// Trim the alleles and take the deleted (from REF) or inserted (from ALT)
/// sequence. Returns `None` when the trimmed sequence is shorter than
/// `min_length`.
pub fn normalize(
    ref_allele: &str,
    alt_allele: &str,
    kind: IndelType,
    min_length: u64,
) -> Option<NormalizedIndel> {
    let trimmed = trim_shared_prefix(ref_allele, alt_allele);
    let sequence = match kind {
        IndelType::Deletion => trimmed.ref_allele,
        IndelType::Insertion => trimmed.alt_allele,
    };

    let indel = NormalizedIndel {
        kind,
        sequence: sequence.to_string(),
        prefix_len: trimmed.prefix_len,
    };

    (indel.len() as u64 >= min_length).then_some(indel)
}
