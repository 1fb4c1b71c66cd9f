//! Core data types for indel microhomology measurement.
//!
//! - [`Variant`]: A variant record reduced to CHROM/POS/REF/ALT/FILTER/INFO
//! - [`Info`], [`InfoValue`]: Typed access to the INFO column
//! - [`IndelEvent`], [`IndelSides`], [`IndelType`]: A normalized insertion or deletion
//! - [`FlankPair`], [`MatchResult`]: Flanking reference sequence and match counts
//!
//! ## Coordinates
//!
//! Variant positions are 1-based, as in VCF. Reference intervals are 0-based
//! half-open and derived arithmetically from the variant position, so for a
//! variant at `pos` with a single anchor base, `[pos - n, pos)` is the `n` bases
//! ending at the anchor and `[pos, pos + n)` the `n` bases following it.

pub mod indel;
pub mod variant;

pub use indel::{FlankPair, IndelEvent, IndelSides, IndelType, MatchResult};
pub use variant::{Info, InfoError, InfoValue, Variant};
