//! Decide whether a variant is an insertion, a deletion, or skipped.

use tracing::{debug, warn};

use crate::core::Variant;
use crate::microhomology::engine::CallConfig;

/// Symbolic structural-variant alleles that carry no literal sequence
pub const SYMBOLIC_SV_ALLELES: [&str; 3] = ["<INV>", "<BND>", "<DUP>"];

/// Why a variant produced no output row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// Failed FILTER while only passing variants are requested
    Filtered,
    /// ALT is `<INV>`, `<BND>` or `<DUP>`
    SymbolicAllele,
    /// `SVTYPE=BND`
    Breakend,
    /// No length change (SNV/MNV)
    Substitution,
    /// Trimmed indel shorter than the configured minimum
    BelowMinLength,
    /// Nothing left of the indel after trimming the shared prefix
    EmptyIndel,
}

/// Result of classifying one variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Skip(SkipReason),
    Insertion,
    /// Deletion spelled out in REF/ALT
    Deletion,
    /// Deletion whose extent comes from an INFO end coordinate
    RangedDeletion { del_len: u64 },
}

/// Classify a variant against the configured filters.
pub fn classify(variant: &Variant, config: &CallConfig) -> Classification {
    if config.passing_only && variant.is_filtered() {
        return Classification::Skip(SkipReason::Filtered);
    }

    if SYMBOLIC_SV_ALLELES.contains(&variant.alt_allele.as_str()) {
        return Classification::Skip(SkipReason::SymbolicAllele);
    }

    match variant.info.get_str("SVTYPE") {
        Ok(Some(svtype)) if svtype == "BND" => {
            warn!("Skipping BND at {}:{}", variant.chrom, variant.pos);
            return Classification::Skip(SkipReason::Breakend);
        }
        Ok(_) => {}
        Err(e) => warn!("{}:{}: {e}", variant.chrom, variant.pos),
    }

    let del_len = end_coordinate(variant, config.end_key.as_deref()) - variant.pos;

    if variant.ref_allele.chars().count() > 1 || del_len > 1 {
        if del_len == 0 {
            Classification::Deletion
        } else {
            Classification::RangedDeletion { del_len }
        }
    } else if variant.alt_allele.chars().count() > 1 {
        Classification::Insertion
    } else {
        Classification::Skip(SkipReason::Substitution)
    }
}

/// End coordinate from the configured INFO key, or `pos` when the key is unset,
/// absent, not an integer, or before `pos`.
fn end_coordinate(variant: &Variant, end_key: Option<&str>) -> u64 {
    let Some(key) = end_key else {
        return variant.pos;
    };

    match variant.info.get_int(key) {
        Ok(Some(end)) => match u64::try_from(end) {
            Ok(end) if end >= variant.pos => end,
            _ => {
                debug!(
                    "{}:{}: {key}={end} precedes the variant position, ignoring",
                    variant.chrom, variant.pos
                );
                variant.pos
            }
        },
        Ok(None) => variant.pos,
        Err(e) => {
            warn!("{}:{}: {e}", variant.chrom, variant.pos);
            variant.pos
        }
    }
}
