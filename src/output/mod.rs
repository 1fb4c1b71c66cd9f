//! Per-variant output rows.
//!
//! Two column layouts are supported:
//!
//! | Layout | Columns after `right_matches` |
//! |--------|-------------------------------|
//! | `simple` | `left_seq`, `indel_seq`, `right_seq` |
//! | `breakpoint` | `left_seq`, `right_seq`, `indel_seq1`, `indel_seq2` |
//!
//! Both start with `chrom`, `start`, `end`, `type`, `ref`, `alt`, `length`,
//! `left_matches`, `right_matches`. TSV output is preceded by `#` comment lines
//! recording the command, version and inputs; JSON output is one object per line.

pub mod emitter;

pub use emitter::{OutputLayout, RecordEmitter, RunInfo};
